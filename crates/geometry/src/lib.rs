//! Screen-space geometry for the dashboard.
//!
//! Both builders are pull-based: the renderer calls `update` whenever it
//! redraws and strokes the returned segments. Each builder keeps its output
//! vector between calls so a steady-state refresh does not allocate.

pub mod chart;
pub mod gauge;
pub mod primitives;

pub use chart::{ChartGeometry, ChartStyle};
pub use gauge::{GaugeGeometry, GaugeStyle};
pub use primitives::{Circle, Point, Segment};
