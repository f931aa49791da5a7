use clap::Parser;
use relm4::prelude::*;
use seekcircle::DragMode;
use seekcircle_demo::config::{self, Overrides};
use seekcircle_demo::gui::app::AppModel;
use seekcircle_demo::sys::runtime;

#[derive(Parser, Debug)]
#[command(name = "seekcircle-demo", version, about, long_about = None)]
struct Cli {
    /// Initial progress, clamped to the configured range
    #[arg(short, long)]
    progress: Option<i32>,

    /// Drag behaviour, "winding" or "absolute" (overrides the config file)
    #[arg(short, long)]
    drag_mode: Option<DragMode>,

    /// Write the default config file if none exists, print its path and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if cli.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let overrides = Overrides {
        progress: cli.progress,
        drag_mode: cli.drag_mode,
    };
    let config = config::load_or_default().with_overrides(&overrides);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    // GTK would otherwise try to parse our flags
    let app = RelmApp::new("org.seekcircle.demo").with_args(Vec::new());

    app.run::<AppModel>((config, overrides, rx));
    Ok(())
}
