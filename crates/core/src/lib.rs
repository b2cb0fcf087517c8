pub mod error;
pub mod history;
pub mod state;

pub use error::{DashError, Result};
pub use history::HistoryBuffer;
pub use state::{MemoryStats, MetricsSnapshot, SharedSnapshot};
