use gtk::gdk;
use gtk4 as gtk;

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.seekcircle-area {
    background: none;
    background-color: transparent;
}

.seekcircle-progress {
    font-size: 28px;
    font-weight: bold;
}

.seekcircle-progress.tracking {
    opacity: 0.6;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
