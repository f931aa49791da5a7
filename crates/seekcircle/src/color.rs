use derive_more::{AsRef, Deref, From, Into};
use palette::{FromColor, Hsv, Srgb};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Opaque sRGB color.
///
/// Parses `#rrggbb` and the `#aarrggbb` form. The alpha byte of the
/// latter is dropped, segments are always painted fully opaque.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Deref,
    From,
    Into,
    AsRef,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct Color(Srgb<u8>);

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn to_f64(self) -> Srgb<f64> {
        self.0.into_format()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("color must start with '#'")]
    MissingHash,
    #[error("expected 6 or 8 hex digits, got {0}")]
    InvalidLength(usize),
    #[error("invalid hex digit: {0}")]
    InvalidDigit(#[from] ParseIntError),
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().strip_prefix('#').ok_or(ColorParseError::MissingHash)?;
        if !matches!(hex.len(), 6 | 8) {
            return Err(ColorParseError::InvalidLength(hex.len()));
        }
        let value = u32::from_str_radix(hex, 16)?;
        let [_, r, g, b] = value.to_be_bytes();
        Ok(Self::rgb(r, g, b))
    }
}

fn lerp(a: f32, b: f32, bias: f32) -> f32 {
    a + (b - a) * bias
}

/// Blends `from` into `to` channel by channel in HSV space.
///
/// Hue is blended on its raw degree value, so red to blue sweeps through green rather than
/// taking the short way round through magenta.
pub fn interpolate_hsv(from: Color, to: Color, bias: f32) -> Color {
    if bias <= 0.0 {
        return from;
    }
    if bias >= 1.0 {
        return to;
    }

    let a: Hsv = Hsv::from_color(from.0.into_format::<f32>());
    let b: Hsv = Hsv::from_color(to.0.into_format::<f32>());

    let blended: Hsv = Hsv::new(
        lerp(
            a.hue.into_positive_degrees(),
            b.hue.into_positive_degrees(),
            bias,
        ),
        lerp(a.saturation, b.saturation, bias),
        lerp(a.value, b.value, bias),
    );

    let rgb: Srgb = Srgb::from_color(blended);
    Color(rgb.into_format())
}
