use chrono::{DateTime, Local, TimeZone};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// One memory reading from the metrics source.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemoryStats {
    /// Total RAM in bytes.
    pub total_bytes:  u64,
    /// RAM used in bytes.
    pub used_bytes:   u64,
    /// Used RAM as a percentage (0.0 – 100.0).
    pub used_percent: f64,
}

impl MemoryStats {
    /// Build stats from raw totals, deriving the percentage.
    pub fn from_totals(total_bytes: u64, used_bytes: u64) -> Self {
        let used_percent = if total_bytes == 0 {
            0.0
        } else {
            used_bytes as f64 / total_bytes as f64 * 100.0
        };
        Self { total_bytes, used_bytes, used_percent }
    }
}

/// The latest scalar readings, as a plain copy.
///
/// All fields are zero until the first successful reading.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricsSnapshot {
    /// Last CPU utilisation (0.0 – 100.0).
    pub cpu_percent:    f64,
    /// Memory utilisation (0.0 – 100.0).
    pub memory_percent: f64,
    /// Total RAM in bytes.
    pub memory_total:   u64,
    /// RAM used in bytes.
    pub memory_used:    u64,
}

impl MetricsSnapshot {
    /// RAM usage as a fraction in `[0, 1]`.
    #[must_use]
    pub fn memory_fraction(&self) -> f64 {
        (self.memory_percent / 100.0).clamp(0.0, 1.0)
    }
}

/// Latest readings shared between the sampler and renderers.
///
/// Every field lives in its own atomic and is written with relaxed ordering.
/// Readers always get whole field values, but a [`load`](Self::load) racing a
/// write may pair a new field with an old one (e.g. new `memory_used`, old
/// `memory_total`). The next tick repairs it: eventually consistent, not
/// atomic across fields.
#[derive(Debug, Default)]
pub struct SharedSnapshot {
    cpu_percent:    AtomicU64,
    memory_percent: AtomicU64,
    memory_total:   AtomicU64,
    memory_used:    AtomicU64,
    /// Unix millis of the last successful reading; 0 = never.
    sampled_at_ms:  AtomicI64,
}

impl SharedSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cpu_percent:    f64::from_bits(self.cpu_percent.load(Ordering::Relaxed)),
            memory_percent: f64::from_bits(self.memory_percent.load(Ordering::Relaxed)),
            memory_total:   self.memory_total.load(Ordering::Relaxed),
            memory_used:    self.memory_used.load(Ordering::Relaxed),
        }
    }

    pub fn cpu_percent(&self) -> f64 {
        f64::from_bits(self.cpu_percent.load(Ordering::Relaxed))
    }

    pub fn memory_percent(&self) -> f64 {
        f64::from_bits(self.memory_percent.load(Ordering::Relaxed))
    }

    pub fn set_cpu(&self, percent: f64) {
        self.cpu_percent.store(percent.to_bits(), Ordering::Relaxed);
        self.touch();
    }

    pub fn set_memory(&self, stats: MemoryStats) {
        self.memory_total.store(stats.total_bytes, Ordering::Relaxed);
        self.memory_used.store(stats.used_bytes, Ordering::Relaxed);
        self.memory_percent.store(stats.used_percent.to_bits(), Ordering::Relaxed);
        self.touch();
    }

    /// Wall-clock time of the last successful reading, `None` before the first.
    pub fn sampled_at(&self) -> Option<DateTime<Local>> {
        match self.sampled_at_ms.load(Ordering::Relaxed) {
            0 => None,
            ms => Local.timestamp_millis_opt(ms).single(),
        }
    }

    fn touch(&self) {
        self.sampled_at_ms.store(Local::now().timestamp_millis(), Ordering::Relaxed);
    }
}
