//! Segmented circular progress and seek widget.
//!
//! [`ProgressCircle`] draws progress as a ring of ticks, blending from a start color to an end
//! color across the filled ones. [`SeekCircle`] adds pointer handling so the ring can be dragged,
//! and reports changes to subscribed listeners.
//!
//! Both are toolkit agnostic: hosts feed pixel bounds and pointer events in, and hand a
//! [`Canvas`] to draw on. [`CairoCanvas`] adapts a `cairo::Context`.

pub mod color;
pub mod events;
pub mod geometry;
pub mod input;
pub mod progress;
pub mod render;
pub mod seek;
pub mod style;

pub use color::{Color, ColorParseError};
pub use events::SeekEvent;
pub use geometry::{Layout, Point, Rect};
pub use input::{DragMode, PointerEvent, PointerPhase};
pub use progress::{ProgressCircle, ProgressRange};
pub use render::{CairoCanvas, Canvas, Segment};
pub use seek::{PointerResponse, SeekCircle};
pub use style::Style;
