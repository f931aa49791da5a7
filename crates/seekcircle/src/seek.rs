use crate::events::SeekEvent;
use crate::input::{DragMode, InputMapper, InputOutcome, PointerEvent};
use crate::progress::ProgressCircle;
use crate::style::Style;
use derive_more::Deref;
use std::fmt;

type Listener = Box<dyn FnMut(&SeekCircle, &SeekEvent)>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerResponse {
    pub handled: bool,
    pub should_redraw: bool,
}

impl PointerResponse {
    pub fn new(handled: bool, should_redraw: bool) -> Self {
        Self {
            handled,
            should_redraw,
        }
    }
}

/// A [`ProgressCircle`] that can be dragged around its ring.
///
/// Read access goes through `Deref`; every mutation goes through this type so listeners see it.
#[derive(Deref)]
pub struct SeekCircle {
    #[deref]
    circle: ProgressCircle,
    input: InputMapper,
    enabled: bool,
    listeners: Vec<Listener>,
}

impl fmt::Debug for SeekCircle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeekCircle")
            .field("circle", &self.circle)
            .field("input", &self.input)
            .field("enabled", &self.enabled)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for SeekCircle {
    fn default() -> Self {
        Self::new(Style::default())
    }
}

impl SeekCircle {
    pub fn new(style: Style) -> Self {
        Self {
            circle: ProgressCircle::new(style),
            input: InputMapper::default(),
            enabled: true,
            listeners: Vec::new(),
        }
    }

    pub fn with_range(mut self, min: i32, max: i32, progress: i32) -> Self {
        self.circle = self.circle.with_range(min, max, progress);
        self
    }

    pub fn with_drag_mode(mut self, mode: DragMode) -> Self {
        self.input.set_mode(mode);
        self
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&SeekCircle, &SeekEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// A disabled circle leaves pointer events unhandled. Disabling drops any gesture in flight.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled && self.input.is_tracking() {
            log::debug!("seek circle disabled mid-gesture");
            self.input.reset();
        }
        self.enabled = enabled;
    }

    pub fn drag_mode(&self) -> DragMode {
        self.input.mode()
    }

    pub fn set_drag_mode(&mut self, mode: DragMode) {
        self.input.set_mode(mode);
    }

    pub fn is_tracking(&self) -> bool {
        self.input.is_tracking()
    }

    pub fn set_min(&mut self, min: i32) -> bool {
        let before = self.circle.progress();
        let changed = self.circle.set_min(min);
        self.notify_progress(before, false);
        changed
    }

    pub fn set_max(&mut self, max: i32) -> bool {
        let before = self.circle.progress();
        let changed = self.circle.set_max(max);
        self.notify_progress(before, false);
        changed
    }

    pub fn set_progress(&mut self, progress: i32) -> bool {
        let before = self.circle.progress();
        let changed = self.circle.set_progress(progress);
        self.notify_progress(before, false);
        changed
    }

    pub fn set_bounds(&mut self, width: f64, height: f64) -> bool {
        self.circle.set_bounds(width, height)
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> PointerResponse {
        if !self.enabled {
            return PointerResponse::default();
        }

        let outcome = self
            .input
            .handle(event, self.circle.layout(), self.circle.range());

        match outcome {
            InputOutcome::Ignored => PointerResponse::default(),
            InputOutcome::Started(progress) => {
                log::debug!("tracking started at {:?}", event.position);
                let redraw = self.update_touch_progress(progress);
                self.emit(SeekEvent::TrackingStarted);
                PointerResponse::new(true, redraw)
            }
            InputOutcome::Moved(progress) => {
                let redraw = self.update_touch_progress(progress);
                PointerResponse::new(true, redraw)
            }
            InputOutcome::Finished(progress) => {
                let redraw = self.update_touch_progress(progress);
                log::debug!("tracking finished at {}", self.circle.progress());
                self.emit(SeekEvent::TrackingStopped { committed: true });
                PointerResponse::new(true, redraw)
            }
            InputOutcome::Cancelled => {
                log::debug!("tracking cancelled");
                self.emit(SeekEvent::TrackingStopped { committed: false });
                PointerResponse::new(true, false)
            }
        }
    }

    fn update_touch_progress(&mut self, progress: i32) -> bool {
        let before = self.circle.progress();
        let changed = self.circle.set_progress(progress);
        self.notify_progress(before, true);
        changed
    }

    fn notify_progress(&mut self, before: i32, from_user: bool) {
        let progress = self.circle.progress();
        if progress == before {
            return;
        }
        log::trace!("progress {before} -> {progress} (from_user: {from_user})");
        self.emit(SeekEvent::ProgressChanged {
            progress,
            from_user,
        });
    }

    fn emit(&mut self, event: SeekEvent) {
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in listeners.iter_mut() {
            listener(self, &event);
        }
        // keep anything subscribed from inside a callback
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
    }
}
