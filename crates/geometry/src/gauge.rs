use crate::primitives::{Circle, Point, Segment};
use dash_config::GaugeConfig;
use dash_theme::{Color, Palette};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Angle of the arc's starting point: straight up.
pub const START_ANGLE: f64 = -FRAC_PI_2;

/// Stroke and resolution settings for the gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeStyle {
    /// Chords used for a full circle.
    pub max_segments:       usize,
    /// Radius = `min(width, height) / 2 - inset`.
    pub inset:              f32,
    pub stroke_width:       f32,
    pub fill:               Color,
    pub track_stroke_width: f32,
    pub track:              Color,
}

impl GaugeStyle {
    pub fn from_config(cfg: &GaugeConfig, palette: &Palette) -> Self {
        Self {
            max_segments:       cfg.max_segments,
            inset:              cfg.inset,
            stroke_width:       cfg.stroke_width,
            fill:               palette.fill,
            track_stroke_width: cfg.track_stroke_width,
            track:              palette.track,
        }
    }
}

impl Default for GaugeStyle {
    fn default() -> Self {
        Self::from_config(&GaugeConfig::default(), &Palette::default())
    }
}

/// Radial usage gauge: a full-circle track with a clockwise arc from twelve
/// o'clock drawn on top, the arc approximated by straight chords.
#[derive(Debug, Clone)]
pub struct GaugeGeometry {
    style:  GaugeStyle,
    chords: Vec<Segment>,
    track:  Option<Circle>,
}

impl GaugeGeometry {
    pub fn new(style: GaugeStyle) -> Self {
        Self {
            style,
            chords: Vec::new(),
            track:  None,
        }
    }

    /// Restyle; applied on the next update.
    pub fn set_style(&mut self, style: GaugeStyle) {
        self.style = style;
    }

    /// Rebuild for `usage` percent in a `width` × `height` drawing area.
    ///
    /// Usage outside `[0, 100]` is clamped; NaN counts as 0. If the area is
    /// too small to leave a positive radius, nothing is drawn.
    pub fn update(&mut self, usage: f64, width: f32, height: f32) -> &[Segment] {
        let cx = f64::from(width) / 2.0;
        let cy = f64::from(height) / 2.0;
        let radius = f64::from(width.min(height)) / 2.0 - f64::from(self.style.inset);

        // `!(r > 0)` also catches NaN from degenerate sizes.
        if !(radius > 0.0) {
            self.chords.clear();
            self.track = None;
            return &self.chords;
        }

        self.track = Some(Circle {
            center:       Point::new(cx as f32, cy as f32),
            radius:       radius as f32,
            stroke_width: self.style.track_stroke_width,
            color:        self.style.track,
        });

        let usage = clamp_usage(usage);
        let count = chord_count(usage, self.style.max_segments);
        if count == 0 {
            self.chords.clear();
            return &self.chords;
        }

        let step = sweep_angle(usage) / count as f64;
        let at = |angle: f64| {
            Point::new(
                (cx + radius * angle.cos()) as f32,
                (cy + radius * angle.sin()) as f32,
            )
        };

        self.chords
            .resize(count, Segment::blank(self.style.stroke_width, self.style.fill));

        // Each chord starts at the previous chord's end angle, so consecutive
        // chords share an exact endpoint.
        let mut angle = START_ANGLE;
        let mut from = at(angle);
        for chord in &mut self.chords {
            angle += step;
            let to = at(angle);
            chord.start = from;
            chord.end = to;
            chord.stroke_width = self.style.stroke_width;
            chord.color = self.style.fill;
            from = to;
        }

        &self.chords
    }

    /// Chords produced by the last update, in sweep order.
    pub fn chords(&self) -> &[Segment] {
        &self.chords
    }

    /// Background track; draw it before the chords. `None` when the drawing
    /// area was too small.
    pub fn track(&self) -> Option<&Circle> {
        self.track.as_ref()
    }
}

impl Default for GaugeGeometry {
    fn default() -> Self {
        Self::new(GaugeStyle::default())
    }
}

fn clamp_usage(usage: f64) -> f64 {
    if usage.is_nan() {
        0.0
    } else {
        usage.clamp(0.0, 100.0)
    }
}

/// Swept angle in radians for `usage` percent: 100% is a full turn.
pub fn sweep_angle(usage: f64) -> f64 {
    clamp_usage(usage) / 100.0 * TAU
}

/// Chords needed for `usage` percent: `floor(usage / 100 * max_segments)`,
/// but at least one for any non-zero usage so small values stay visible.
pub fn chord_count(usage: f64, max_segments: usize) -> usize {
    let usage = clamp_usage(usage);
    let n = (usage / 100.0 * max_segments as f64).floor() as usize;
    if n == 0 && usage > 0.0 && max_segments > 0 {
        1
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: f32 = 150.0;
    const EPS: f32 = 1e-3;

    fn gauge() -> GaugeGeometry {
        GaugeGeometry::default()
    }

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < EPS
    }

    #[test]
    fn chord_counts() {
        assert_eq!(chord_count(0.0, 100), 0);
        assert_eq!(chord_count(0.2, 100), 1);
        assert_eq!(chord_count(50.0, 100), 50);
        assert_eq!(chord_count(33.3, 100), 33);
        assert_eq!(chord_count(100.0, 100), 100);
        assert_eq!(chord_count(250.0, 100), 100);
        assert_eq!(chord_count(-5.0, 100), 0);
        assert_eq!(chord_count(f64::NAN, 100), 0);
    }

    #[test]
    fn sweep_angles() {
        assert_eq!(sweep_angle(0.0), 0.0);
        assert_eq!(sweep_angle(100.0), TAU);
        assert!((sweep_angle(50.0) - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn zero_usage_draws_only_the_track() {
        let mut g = gauge();
        assert!(g.update(0.0, SIZE, SIZE).is_empty());
        let track = g.track().unwrap();
        assert_eq!(track.center, Point::new(75.0, 75.0));
        assert_eq!(track.radius, 65.0);
    }

    #[test]
    fn full_usage_closes_the_circle() {
        let mut g = gauge();
        let chords = g.update(100.0, SIZE, SIZE);
        assert_eq!(chords.len(), 100);

        let top = Point::new(75.0, 10.0);
        assert!(close(chords[0].start, top));
        assert!(close(chords[99].end, top));
    }

    #[test]
    fn half_usage_sweeps_clockwise_to_the_bottom() {
        let mut g = gauge();
        let chords = g.update(50.0, SIZE, SIZE);
        assert_eq!(chords.len(), 50);

        // Clockwise on screen (y down): the first chord heads right.
        assert!(chords[0].end.x > chords[0].start.x);
        assert!(close(chords[24].end, Point::new(140.0, 75.0)));
        assert!(close(chords[49].end, Point::new(75.0, 140.0)));
    }

    #[test]
    fn chords_are_contiguous_and_on_the_circle() {
        let mut g = gauge();
        let chords = g.update(73.0, SIZE, SIZE);
        assert_eq!(chords.len(), 73);

        for pair in chords.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        let center = Point::new(75.0, 75.0);
        for chord in chords {
            assert!((chord.start.distance(center) - 65.0).abs() < EPS);
            assert!((chord.end.distance(center) - 65.0).abs() < EPS);
        }
    }

    #[test]
    fn tiny_usage_still_shows_one_chord() {
        let mut g = gauge();
        assert_eq!(g.update(0.01, SIZE, SIZE).len(), 1);
    }

    #[test]
    fn usage_is_clamped() {
        let mut g = gauge();
        assert_eq!(g.update(180.0, SIZE, SIZE).len(), 100);
        assert!(g.update(f64::NAN, SIZE, SIZE).is_empty());
    }

    #[test]
    fn uses_the_smaller_dimension() {
        let mut g = gauge();
        g.update(25.0, 300.0, 100.0);
        let track = g.track().unwrap();
        assert_eq!(track.center, Point::new(150.0, 50.0));
        assert_eq!(track.radius, 40.0);
    }

    #[test]
    fn too_small_area_draws_nothing() {
        let mut g = gauge();
        g.update(60.0, SIZE, SIZE);
        assert!(g.update(60.0, 20.0, 20.0).is_empty());
        assert!(g.track().is_none());
        assert!(g.update(60.0, 0.0, 0.0).is_empty());
    }

    #[test]
    fn storage_grows_and_shrinks() {
        let mut g = gauge();
        assert_eq!(g.update(90.0, SIZE, SIZE).len(), 90);
        let cap = g.chords.capacity();
        assert_eq!(g.update(10.0, SIZE, SIZE).len(), 10);
        assert_eq!(g.chords.capacity(), cap);
        assert_eq!(g.update(40.0, SIZE, SIZE).len(), 40);
        assert_eq!(g.chords().len(), 40);
    }

    #[test]
    fn chords_carry_the_fill_style() {
        let mut g = gauge();
        let style = GaugeStyle {
            max_segments: 10,
            stroke_width: 3.0,
            fill: Color::TRANSPARENT,
            ..GaugeStyle::default()
        };
        g.set_style(style);
        let chords = g.update(100.0, SIZE, SIZE);
        assert_eq!(chords.len(), 10);
        assert!(chords.iter().all(|c| c.stroke_width == 3.0 && c.color == Color::TRANSPARENT));
    }
}
