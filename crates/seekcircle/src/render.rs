use crate::color::{self, Color};
use crate::geometry::{Layout, Rect};
use crate::progress::ProgressRange;
use crate::style::{INACTIVE_SCALE, Style};
use std::f64::consts::TAU;

/// Drawing surface the ring paints onto.
///
/// Transformations accumulate the way they do on a cairo context: each call is applied on top
/// of the current matrix, and `save`/`restore` push and pop that state.
pub trait Canvas {
    type Error;

    fn save(&mut self) -> Result<(), Self::Error>;
    fn restore(&mut self) -> Result<(), Self::Error>;
    fn translate(&mut self, dx: f64, dy: f64);
    /// Clockwise rotation in radians (y axis pointing down).
    fn rotate(&mut self, radians: f64);
    fn scale(&mut self, sx: f64, sy: f64);
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), Self::Error>;
}

pub struct CairoCanvas<'a>(&'a cairo::Context);

impl<'a> CairoCanvas<'a> {
    pub fn new(cr: &'a cairo::Context) -> Self {
        Self(cr)
    }
}

impl Canvas for CairoCanvas<'_> {
    type Error = cairo::Error;

    fn save(&mut self) -> Result<(), cairo::Error> {
        self.0.save()
    }

    fn restore(&mut self) -> Result<(), cairo::Error> {
        self.0.restore()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.0.translate(dx, dy);
    }

    fn rotate(&mut self, radians: f64) {
        self.0.rotate(radians);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.0.scale(sx, sy);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), cairo::Error> {
        let rgb = color.to_f64();
        self.0.set_source_rgb(rgb.red, rgb.green, rgb.blue);
        self.0.rectangle(rect.x, rect.y, rect.width, rect.height);
        self.0.fill()
    }
}

/// One tick of the ring, positioned by its rotation from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub rotation: f64,
    pub active: bool,
    pub color: Color,
    pub scale: f64,
}

pub fn segments<'a>(range: &ProgressRange, style: &'a Style) -> impl Iterator<Item = Segment> + 'a {
    let count = range.span().max(0) as usize;
    let filled = range.relative().max(0) as usize;
    let step = if count > 0 { TAU / count as f64 } else { 0.0 };

    (0..count).map(move |index| {
        let rotation = index as f64 * step;
        if index < filled {
            // a lone segment has nothing to blend towards
            let bias = if count > 1 {
                index as f32 / (count - 1) as f32
            } else {
                0.0
            };
            Segment {
                index,
                rotation,
                active: true,
                color: color::interpolate_hsv(style.start_color, style.end_color, bias),
                scale: 1.0,
            }
        } else {
            Segment {
                index,
                rotation,
                active: false,
                color: style.inactive_color,
                scale: INACTIVE_SCALE,
            }
        }
    })
}

/// Paints every segment of `range`. The canvas save stack is left as it was found, even when a
/// fill fails part way round.
pub fn render<C: Canvas>(
    canvas: &mut C,
    range: &ProgressRange,
    style: &Style,
    layout: &Layout,
) -> Result<(), C::Error> {
    canvas.save()?;
    canvas.translate(layout.center.x, layout.center.y);
    let painted = paint_segments(canvas, range, style, layout);
    canvas.restore()?;
    painted
}

fn paint_segments<C: Canvas>(
    canvas: &mut C,
    range: &ProgressRange,
    style: &Style,
    layout: &Layout,
) -> Result<(), C::Error> {
    let rect = layout.section_rect();

    for segment in segments(range, style) {
        canvas.save()?;
        canvas.rotate(segment.rotation);
        canvas.translate(0.0, -layout.radius);
        if segment.scale != 1.0 {
            canvas.scale(segment.scale, segment.scale);
        }
        let filled = canvas.fill_rect(rect, segment.color);
        canvas.restore()?;
        filled?;
    }

    Ok(())
}
