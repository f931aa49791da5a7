use crate::config::{self, Config, Overrides};
use crate::events::AppEvent;
use crate::gui::theme;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use seekcircle::{CairoCanvas, PointerEvent, PointerPhase, SeekCircle, SeekEvent};
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub circle: Rc<RefCell<SeekCircle>>,
    pub progress: i32,
    pub enabled: bool,
    pub tracking: bool,
    pub overrides: Overrides,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Pointer(PointerEvent),
    Seek(SeekEvent),
    SetEnabled(bool),
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Position of a drag sample in widget coordinates.
fn drag_point(gesture: &gtk::GestureDrag, dx: f64, dy: f64) -> Option<(f64, f64)> {
    gesture.start_point().map(|(x, y)| (x + dx, y + dy))
}

fn pointer(phase: PointerPhase, (x, y): (f64, f64)) -> AppMsg {
    AppMsg::Pointer(PointerEvent::new(phase, x, y))
}

fn forward_events(circle: &mut SeekCircle, sender: &ComponentSender<AppModel>) {
    let sender = sender.clone();
    circle.subscribe(move |_, event| sender.input(AppMsg::Seek(*event)));
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, Overrides, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("SeekCircle"),
            set_default_size: (360, 420),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 8,
                set_margin_all: 12,

                #[name = "overlay"]
                gtk::Overlay {
                    set_vexpand: true,

                    #[name = "drawing_area"]
                    gtk::DrawingArea {
                        set_hexpand: true,
                        set_vexpand: true,
                        add_css_class: "seekcircle-area",

                        add_controller = gtk::GestureDrag {
                            connect_drag_begin[sender] => move |_, x, y| {
                                sender.input(pointer(PointerPhase::Down, (x, y)));
                            },
                            connect_drag_update[sender] => move |gesture, dx, dy| {
                                if let Some(point) = drag_point(gesture, dx, dy) {
                                    sender.input(pointer(PointerPhase::Move, point));
                                }
                            },
                            connect_drag_end[sender] => move |gesture, dx, dy| {
                                match drag_point(gesture, dx, dy) {
                                    Some(point) => sender.input(pointer(PointerPhase::Up, point)),
                                    None => sender.input(pointer(PointerPhase::Cancel, (0.0, 0.0))),
                                }
                            },
                            connect_cancel[sender] => move |_, _| {
                                sender.input(pointer(PointerPhase::Cancel, (0.0, 0.0)));
                            },
                        },
                    },

                    add_overlay = &gtk::Label {
                        add_css_class: "seekcircle-progress",
                        set_halign: gtk::Align::Center,
                        set_valign: gtk::Align::Center,
                        set_can_target: false,
                        #[watch]
                        set_label: &format!("{}%", model.progress),
                        #[watch]
                        set_class_active: ("tracking", model.tracking),
                    },
                },

                gtk::CheckButton {
                    set_label: Some("Enabled"),
                    #[watch]
                    set_active: model.enabled,
                    connect_toggled[sender] => move |button| {
                        sender.input(AppMsg::SetEnabled(button.is_active()));
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, overrides, rx) = init;

        theme::load_css();

        let mut circle = config.build_circle();
        forward_events(&mut circle, &sender);

        let model = AppModel {
            progress: circle.progress(),
            enabled: circle.is_enabled(),
            tracking: false,
            circle: Rc::new(RefCell::new(circle)),
            overrides,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let circle_resize = model.circle.clone();
        widgets.drawing_area.connect_resize(move |_, width, height| {
            circle_resize
                .borrow_mut()
                .set_bounds(width as f64, height as f64);
        });

        let circle_draw = model.circle.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, width, height| {
                let mut circle = circle_draw.borrow_mut();
                circle.set_bounds(width as f64, height as f64);
                if let Err(e) = circle.render(&mut CairoCanvas::new(cr)) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Pointer(event) => {
                let response = self.circle.borrow_mut().handle_pointer(event);
                if response.should_redraw {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Seek(event) => match event {
                SeekEvent::ProgressChanged {
                    progress,
                    from_user,
                } => {
                    log::debug!("progress changed to {} (from_user: {})", progress, from_user);
                    self.progress = progress;
                    self.drawing_area.queue_draw();
                }
                SeekEvent::TrackingStarted => self.tracking = true,
                SeekEvent::TrackingStopped { committed } => {
                    self.tracking = false;
                    if committed {
                        log::info!("Seeked to {}", self.progress);
                    }
                }
            },
            AppMsg::SetEnabled(enabled) => {
                self.circle.borrow_mut().set_enabled(enabled);
                self.enabled = enabled;
                self.tracking &= enabled;
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let progress = self.circle.borrow().progress();
                    let mut circle = new_config.with_overrides(&self.overrides).build_circle();
                    // keep the user's position across reloads
                    circle.set_progress(progress);
                    forward_events(&mut circle, &sender);

                    self.progress = circle.progress();
                    self.enabled = circle.is_enabled();
                    self.tracking = false;
                    *self.circle.borrow_mut() = circle;
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Quit => relm4::main_application().quit(),
        }
    }
}
