use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `dash.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Sampling loop settings.
    pub sampler: SamplerConfig,
    /// CPU history chart settings.
    pub chart: ChartConfig,
    /// Memory gauge settings.
    pub gauge: GaugeConfig,
    /// Theme / colour settings.
    pub theme: ThemeConfig,
}

/// How often, and how much, to sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Tick period in milliseconds.  Must be non-zero.
    pub interval_ms: u64,
    /// Number of CPU samples kept for the chart.
    pub history_len: usize,
    /// Keep the first CPU reading out of the history (it is often 0).
    pub discard_first_sample: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1_000,
            history_len: 60,
            discard_first_sample: false,
        }
    }
}

/// CPU history line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Drawing area width in logical pixels.
    pub width: f32,
    /// Drawing area height in logical pixels.
    pub height: f32,
    /// Polyline stroke width.
    pub stroke_width: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width:        440.0,
            height:       150.0,
            stroke_width: 2.0,
        }
    }
}

/// Memory usage radial gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    /// Side of the square drawing area in logical pixels.
    pub size: f32,
    /// Chords used to draw a full circle.
    pub max_segments: usize,
    /// Gap between the drawing-area edge and the arc, for stroke clearance.
    pub inset: f32,
    /// Arc stroke width.
    pub stroke_width: f32,
    /// Background track stroke width.
    pub track_stroke_width: f32,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            size:               150.0,
            max_segments:       100,
            inset:              10.0,
            stroke_width:       15.0,
            track_stroke_width: 15.0,
        }
    }
}

/// Colours, as CSS-style hex strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Chart polyline colour.
    pub line: String,
    /// Gauge arc colour.
    pub fill: String,
    /// Gauge track colour (low emphasis).
    pub track: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            line:  "#cba6f7".to_string(), // Catppuccin Mocha mauve
            fill:  "#cba6f7".to_string(),
            track: "#585b70".to_string(), // Catppuccin Mocha surface2
        }
    }
}
