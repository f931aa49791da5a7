use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use seekcircle::progress::{DEFAULT_MAX, DEFAULT_MIN};
use seekcircle::{DragMode, SeekCircle, Style};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub min: i32,
    pub max: i32,
    pub progress: i32,
    pub enabled: bool,
    pub drag_mode: DragMode,
    pub style: Style,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            progress: DEFAULT_MIN,
            enabled: true,
            drag_mode: DragMode::default(),
            style: Style::default(),
        }
    }
}

/// Command line values that win over the config file, including across reloads.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub progress: Option<i32>,
    pub drag_mode: Option<DragMode>,
}

impl Config {
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(progress) = overrides.progress {
            self.progress = progress;
        }
        if let Some(mode) = overrides.drag_mode {
            self.drag_mode = mode;
        }
        self
    }

    pub fn build_circle(&self) -> SeekCircle {
        let mut circle = SeekCircle::new(self.style)
            .with_range(self.min, self.max, self.progress)
            .with_drag_mode(self.drag_mode);
        circle.set_enabled(self.enabled);
        circle
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no home directory to place the config file in")]
    ConfigDirNotFound,
    #[error("config file has no parent directory: {0}")]
    NoParent(PathBuf),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("watching config failed: {0}")]
    Notify(#[from] notify::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("org", "seekcircle", "seekcircle")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(dirs.config_dir().join("config.toml"))
}

/// Layers `SEEKCIRCLE_*` environment variables over the optional config file.
pub fn load_config() -> Result<Config, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(get_config_path()?).required(false))
        .add_source(
            config::Environment::with_prefix("SEEKCIRCLE")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    load_config().unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {}", e);
        Config::default()
    })
}

/// Writes the commented default config unless one already exists, returning its path.
pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    let dir = path
        .parent()
        .ok_or_else(|| ConfigError::NoParent(path.clone()))?;
    fs_err::create_dir_all(dir)?;
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Editors tend to save in several steps (truncate, write, rename), so changes landing this
/// close together become a single reload.
const RELOAD_SETTLE: Duration = Duration::from_millis(150);

/// Whether a watcher event touched the config file itself rather than a neighbour of it.
pub fn is_config_change(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Sends [`AppEvent::ConfigReload`] whenever the config file changes. Runs until the app side
/// of `tx` is dropped.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    match watch_config(&tx).await {
        Ok(()) => log::debug!("config watcher stopped"),
        Err(e) => log::error!("Live config reload disabled: {}", e),
    }
}

async fn watch_config(tx: &Sender<AppEvent>) -> Result<(), ConfigError> {
    let config_path = get_config_path()?;
    let config_dir = config_path
        .parent()
        .ok_or_else(|| ConfigError::NoParent(config_path.clone()))?;
    // the file itself may not exist yet, so watch the directory that will hold it
    fs_err::create_dir_all(config_dir)?;

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(config_dir, RecursiveMode::NonRecursive)?;
    log::info!("Watching {} for changes", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if is_config_change(&event, &config_path) => {
                tokio::time::sleep(RELOAD_SETTLE).await;
                let skipped = std::iter::from_fn(|| bridge_rx.try_recv().ok()).count();
                log::debug!("config changed ({} follow-up events folded)", skipped);

                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("Watch error: {}", e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seekcircle::Color;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_config_matches_defaults() {
        assert_eq!(parse(DEFAULT_CONFIG), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = parse(
            r##"
max = 12
drag_mode = "Absolute"

[style]
end_color = "#ff00ff00"
"##,
        );
        assert_eq!(config.max, 12);
        assert_eq!(config.min, 0);
        assert_eq!(config.drag_mode, DragMode::Absolute);
        assert_eq!(config.style.end_color, Color::rgb(0, 0xff, 0));
        assert_eq!(config.style.ring_bias, Style::default().ring_bias);
    }

    #[test]
    fn test_overrides_win() {
        let overrides = Overrides {
            progress: Some(7),
            drag_mode: Some(DragMode::Absolute),
        };
        let config = Config::default().with_overrides(&overrides);
        assert_eq!(config.progress, 7);
        assert_eq!(config.drag_mode, DragMode::Absolute);
    }

    const CONFIG_PATH: &str = "/home/user/.config/seekcircle/config.toml";

    fn event(kind: EventKind, path: &str) -> notify::Event {
        notify::Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_config_change_filter() {
        use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind};

        let cases = vec![
            (event(EventKind::Modify(ModifyKind::Any), CONFIG_PATH), true),
            (event(EventKind::Create(CreateKind::File), CONFIG_PATH), true),
            (event(EventKind::Remove(RemoveKind::File), CONFIG_PATH), true),
            (event(EventKind::Access(AccessKind::Any), CONFIG_PATH), false),
            // an editor's swap file next to the config
            (
                event(
                    EventKind::Modify(ModifyKind::Any),
                    "/home/user/.config/seekcircle/.config.toml.swp",
                ),
                false,
            ),
        ];

        for (event, expected) in cases {
            assert_eq!(
                is_config_change(&event, Path::new(CONFIG_PATH)),
                expected,
                "{:?}",
                event
            );
        }
    }

    #[test]
    fn test_build_circle_clamps() {
        let config = Config {
            min: 10,
            max: 20,
            progress: 99,
            enabled: false,
            ..Config::default()
        };
        let circle = config.build_circle();
        assert_eq!((circle.min(), circle.max(), circle.progress()), (10, 20, 20));
        assert!(!circle.is_enabled());
    }
}
