//! Host metrics collection: the `sysinfo`-backed source, the periodic
//! [`Sampler`], and label formatting for the readings it produces.

pub mod memory;
pub mod sampler;
pub mod source;

pub use memory::{format_bytes, format_percent, memory_label};
pub use sampler::Sampler;
pub use source::{MetricsSource, SysinfoSource};
