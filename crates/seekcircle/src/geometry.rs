#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis aligned rectangle, `x`/`y` being the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn centered(width: f64, height: f64) -> Self {
        Self {
            x: -width / 2.0,
            y: -height / 2.0,
            width,
            height,
        }
    }
}

/// Derived drawing attributes for a ring laid out inside a `width` x `height` box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    pub center: Point,
    pub outer_radius: f64,
    /// Radius the segment centers sit on, inset by half a segment.
    pub radius: f64,
    /// Radial size of a segment.
    pub thickness: f64,
    /// Tangential size of a segment.
    pub section_width: f64,
}

impl Layout {
    pub fn calculate(width: f64, height: f64, ring_bias: f64, section_ratio: f64) -> Self {
        let outer_radius = width.min(height) / 2.0;
        let thickness = outer_radius * ring_bias;
        let section_width = thickness / section_ratio;

        Self {
            center: Point::new(width / 2.0, height / 2.0),
            outer_radius,
            radius: outer_radius - thickness / 2.0,
            thickness,
            section_width,
        }
    }

    /// Segment rectangle centered on the origin, ready to be rotated into place.
    pub fn section_rect(&self) -> Rect {
        Rect::centered(self.section_width, self.thickness)
    }

    /// Whether `point` lies on the ring, allowing one segment thickness either side.
    pub fn hit_test(&self, point: Point) -> bool {
        (self.center.distance(point) - self.radius).abs() <= self.thickness
    }

    /// Offset of `point` from the center in a right handed frame (x right, y up).
    pub fn to_local(&self, point: Point) -> Point {
        Point::new(point.x - self.center.x, self.center.y - point.y)
    }
}
