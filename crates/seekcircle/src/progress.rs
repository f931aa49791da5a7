use crate::geometry::Layout;
use crate::render::{self, Canvas, Segment};
use crate::style::Style;

pub const DEFAULT_MIN: i32 = 0;
pub const DEFAULT_MAX: i32 = 100;

/// Integer progress clamped to `[min, max]`, with `min >= 0` and `max >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressRange {
    min: i32,
    max: i32,
    progress: i32,
}

impl Default for ProgressRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            progress: DEFAULT_MIN,
        }
    }
}

impl ProgressRange {
    pub fn new(min: i32, max: i32, progress: i32) -> Self {
        let mut range = Self::default();
        range.set_max(max);
        range.set_min(min);
        range.set_progress(progress);
        range
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn progress(&self) -> i32 {
        self.progress
    }

    /// Number of segments the range spans.
    pub fn span(&self) -> i32 {
        self.max - self.min
    }

    /// Progress relative to `min`.
    pub fn relative(&self) -> i32 {
        self.progress - self.min
    }

    /// `(progress - min) / (max - min)`, or `0.0` for an empty span.
    pub fn ratio(&self) -> f64 {
        match self.span() {
            0 => 0.0,
            span => self.relative() as f64 / span as f64,
        }
    }

    /// Raises `max` along with `min` when they cross. Returns true if progress moved.
    pub fn set_min(&mut self, min: i32) -> bool {
        self.min = min.max(0);
        self.max = self.max.max(self.min);
        self.set_progress(self.progress)
    }

    /// Lowers `min` along with `max` when they cross. Returns true if progress moved.
    pub fn set_max(&mut self, max: i32) -> bool {
        self.max = max.max(1);
        self.min = self.min.min(self.max);
        self.set_progress(self.progress)
    }

    /// Returns true if the clamped value differs from the current one.
    pub fn set_progress(&mut self, progress: i32) -> bool {
        let progress = progress.clamp(self.min, self.max);
        if progress == self.progress {
            return false;
        }
        self.progress = progress;
        true
    }
}

/// A segmented ring that displays progress but takes no input.
#[derive(Debug, Clone)]
pub struct ProgressCircle {
    range: ProgressRange,
    style: Style,
    layout: Layout,
    bounds: (f64, f64),
}

impl Default for ProgressCircle {
    fn default() -> Self {
        Self::new(Style::default())
    }
}

impl ProgressCircle {
    pub fn new(style: Style) -> Self {
        Self {
            range: ProgressRange::default(),
            style,
            layout: Layout::default(),
            bounds: (0.0, 0.0),
        }
    }

    pub fn with_range(mut self, min: i32, max: i32, progress: i32) -> Self {
        self.range = ProgressRange::new(min, max, progress);
        self
    }

    pub fn range(&self) -> &ProgressRange {
        &self.range
    }

    pub fn min(&self) -> i32 {
        self.range.min()
    }

    pub fn max(&self) -> i32 {
        self.range.max()
    }

    pub fn progress(&self) -> i32 {
        self.range.progress()
    }

    pub fn ratio(&self) -> f64 {
        self.range.ratio()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Returns true if the ring needs a redraw.
    pub fn set_min(&mut self, min: i32) -> bool {
        let before = self.range;
        self.range.set_min(min);
        self.range != before
    }

    /// Returns true if the ring needs a redraw.
    pub fn set_max(&mut self, max: i32) -> bool {
        let before = self.range;
        self.range.set_max(max);
        self.range != before
    }

    pub fn set_progress(&mut self, progress: i32) -> bool {
        self.range.set_progress(progress)
    }

    /// Recomputes the layout for new pixel bounds. Returns true if they changed.
    pub fn set_bounds(&mut self, width: f64, height: f64) -> bool {
        if self.bounds == (width, height) {
            return false;
        }
        self.bounds = (width, height);
        self.layout = Layout::calculate(
            width,
            height,
            self.style.ring_bias,
            self.style.section_ratio,
        );
        true
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        render::segments(&self.range, &self.style)
    }

    pub fn render<C: Canvas>(&self, canvas: &mut C) -> Result<(), C::Error> {
        render::render(canvas, &self.range, &self.style, &self.layout)
    }
}
