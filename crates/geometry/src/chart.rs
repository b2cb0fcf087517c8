use crate::primitives::{Point, Segment};
use dash_config::ChartConfig;
use dash_core::HistoryBuffer;
use dash_theme::{Color, Palette};

/// Top of the value domain; samples are CPU percentages.
pub const MAX_VALUE: f64 = 100.0;

/// Narrowest horizontal step between samples, in pixels.
pub const MIN_STEP: f32 = 1.0;

/// Stroke applied to every chart segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub stroke_width: f32,
    pub color:        Color,
}

impl ChartStyle {
    pub fn from_config(cfg: &ChartConfig, palette: &Palette) -> Self {
        Self {
            stroke_width: cfg.stroke_width,
            color:        palette.line,
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default(), &Palette::default())
    }
}

/// Turns a sample history into a polyline of `count - 1` segments spanning
/// the drawing area, oldest sample on the left.
#[derive(Debug, Clone)]
pub struct ChartGeometry {
    style:    ChartStyle,
    samples:  Vec<f64>,
    segments: Vec<Segment>,
}

impl ChartGeometry {
    pub fn new(style: ChartStyle) -> Self {
        Self {
            style,
            samples:  Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Restyle; applied on the next update.
    pub fn set_style(&mut self, style: ChartStyle) {
        self.style = style;
    }

    /// Rebuild from the current contents of `history` for a `width` × `height`
    /// drawing area.
    pub fn update(&mut self, history: &HistoryBuffer, width: f32, height: f32) -> &[Segment] {
        history.copy_into(&mut self.samples);
        self.rebuild(width, height);
        &self.segments
    }

    /// Rebuild from samples given oldest to newest.
    pub fn update_from_samples<I>(&mut self, samples: I, width: f32, height: f32) -> &[Segment]
    where
        I: IntoIterator<Item = f64>,
    {
        self.samples.clear();
        self.samples.extend(samples);
        self.rebuild(width, height);
        &self.segments
    }

    /// Segments produced by the last update.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn rebuild(&mut self, width: f32, height: f32) {
        if self.samples.len() < 2 {
            self.segments.clear();
            return;
        }

        let count = self.samples.len() - 1;
        let step = step(self.samples.len(), width);
        let y = |v: f64| (f64::from(height) - v / MAX_VALUE * f64::from(height)) as f32;

        // Resizing keeps the allocation; every entry is overwritten below.
        self.segments
            .resize(count, Segment::blank(self.style.stroke_width, self.style.color));

        for (i, (seg, pair)) in self.segments.iter_mut().zip(self.samples.windows(2)).enumerate() {
            seg.start = Point::new(i as f32 * step, y(pair[0]));
            seg.end = Point::new((i + 1) as f32 * step, y(pair[1]));
            seg.stroke_width = self.style.stroke_width;
            seg.color = self.style.color;
        }
    }
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self::new(ChartStyle::default())
    }
}

/// Horizontal distance between consecutive samples: `width / (count - 1)`,
/// never below [`MIN_STEP`].
pub fn step(count: usize, width: f32) -> f32 {
    if count < 2 {
        return 0.0;
    }
    (width / (count - 1) as f32).max(MIN_STEP)
}
