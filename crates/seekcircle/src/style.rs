use crate::color::Color;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RING_BIAS: f64 = 0.15;
pub const DEFAULT_SECTION_RATIO: f64 = 5.0;
pub const DEFAULT_START_COLOR: Color = Color::rgb(0x33, 0xb5, 0xe5);
pub const DEFAULT_END_COLOR: Color = Color::rgb(0xff, 0x59, 0x00);
pub const DEFAULT_INACTIVE_COLOR: Color = Color::rgb(0x40, 0x40, 0x40);

/// Scale applied to segments beyond the current progress.
pub const INACTIVE_SCALE: f64 = 0.7;

/// Per-instance visual parameters of a ring.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Style {
    /// Segment thickness as a fraction of the outer radius.
    pub ring_bias: f64,
    /// Thickness to width ratio of a single segment.
    pub section_ratio: f64,
    pub start_color: Color,
    pub end_color: Color,
    pub inactive_color: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            ring_bias: DEFAULT_RING_BIAS,
            section_ratio: DEFAULT_SECTION_RATIO,
            start_color: DEFAULT_START_COLOR,
            end_color: DEFAULT_END_COLOR,
            inactive_color: DEFAULT_INACTIVE_COLOR,
        }
    }
}
