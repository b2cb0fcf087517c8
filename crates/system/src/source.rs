use dash_core::{DashError, MemoryStats, Result};
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};
use tracing::warn;

/// Where the sampler gets its readings from.
///
/// Either call may fail transiently; the sampler skips that reading for the
/// tick and keeps the previous value.
pub trait MetricsSource: Send + 'static {
    /// CPU utilisation since the previous call, in `[0, 100]`.
    fn cpu_percent(&mut self) -> Result<f64>;

    /// Current RAM totals.
    fn memory_stats(&mut self) -> Result<MemoryStats>;
}

impl<S: MetricsSource + ?Sized> MetricsSource for Box<S> {
    fn cpu_percent(&mut self) -> Result<f64> {
        (**self).cpu_percent()
    }

    fn memory_stats(&mut self) -> Result<MemoryStats> {
        (**self).memory_stats()
    }
}

/// [`MetricsSource`] backed by `sysinfo`, refreshing only CPU usage and RAM.
pub struct SysinfoSource {
    sys: System,
}

impl SysinfoSource {
    pub fn new() -> Self {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            warn!("sysinfo does not support this platform; readings will fail");
        }

        let mut sys = System::new_with_specifics(
            RefreshKind::nothing()
                .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
                .with_memory(MemoryRefreshKind::nothing().with_ram()),
        );
        // CPU usage is a delta between refreshes; take the baseline now so the
        // first tick measures a real interval.
        sys.refresh_cpu_usage();

        Self { sys }
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SysinfoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SysinfoSource")
            .field("cpus", &self.sys.cpus().len())
            .finish()
    }
}

impl MetricsSource for SysinfoSource {
    fn cpu_percent(&mut self) -> Result<f64> {
        self.sys.refresh_cpu_usage();
        if self.sys.cpus().is_empty() {
            return Err(DashError::Source("no CPUs reported".into()));
        }
        Ok(f64::from(self.sys.global_cpu_usage()).clamp(0.0, 100.0))
    }

    fn memory_stats(&mut self) -> Result<MemoryStats> {
        self.sys.refresh_memory_specifics(MemoryRefreshKind::nothing().with_ram());
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(DashError::Source("memory totals unavailable".into()));
        }
        Ok(MemoryStats::from_totals(total, self.sys.used_memory()))
    }
}
