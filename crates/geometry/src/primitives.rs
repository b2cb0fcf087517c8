use dash_theme::Color;

/// A point in drawing-area coordinates (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A straight stroked line, the only primitive the chart and gauge emit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start:        Point,
    pub end:          Point,
    pub stroke_width: f32,
    pub color:        Color,
}

impl Segment {
    /// A zero-length segment carrying only the stroke; positioned later.
    pub const fn blank(stroke_width: f32, color: Color) -> Self {
        Self {
            start: Point::ORIGIN,
            end: Point::ORIGIN,
            stroke_width,
            color,
        }
    }
}

/// A stroked, unfilled circle (the gauge track).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center:       Point,
    pub radius:       f32,
    pub stroke_width: f32,
    pub color:        Color,
}
