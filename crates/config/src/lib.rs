pub mod schema;

pub use schema::{ChartConfig, DashConfig, GaugeConfig, SamplerConfig, ThemeConfig};

use dash_core::{DashError, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Load configuration from a TOML file.  Returns `DashConfig::default()` if
/// the file doesn't exist so the dashboard always has sensible defaults.
///
/// The result has already been through [`DashConfig::validate`].
pub fn load(path: impl AsRef<Path>) -> Result<DashConfig> {
    let path = path.as_ref();
    if !path.exists() {
        warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(DashConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| DashError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse and validate a TOML document.
pub fn parse(raw: &str) -> Result<DashConfig> {
    let config: DashConfig =
        toml::from_str(raw).map_err(|e| DashError::Config(format!("TOML parse error: {e}")))?;
    config.validate()
}

/// Return the config path: `$DASH_CONFIG` if set, otherwise
/// `$XDG_CONFIG_HOME/dash/dash.toml` (falling back to `~/.config`).
pub fn default_path() -> PathBuf {
    if let Ok(path) = std::env::var("DASH_CONFIG") {
        return PathBuf::from(path);
    }

    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("dash").join("dash.toml")
}

impl DashConfig {
    /// Reject settings the sampler cannot run with and clamp the rest.
    pub fn validate(mut self) -> Result<Self> {
        if self.sampler.interval_ms == 0 {
            return Err(DashError::Config("sampler.interval_ms must be > 0".into()));
        }

        if self.sampler.history_len == 0 {
            warn!("sampler.history_len = 0; clamping to 1");
            self.sampler.history_len = 1;
        }

        if self.gauge.max_segments == 0 {
            warn!("gauge.max_segments = 0; clamping to 1");
            self.gauge.max_segments = 1;
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, DashConfig::default());
        assert_eq!(config.sampler.history_len, 60);
        assert_eq!(config.sampler.interval_ms, 1_000);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sampler]\ninterval_ms = 250\n\n[gauge]\nmax_segments = 72").unwrap();

        let config = load(file.path()).unwrap();
        assert_eq!(config.sampler.interval_ms, 250);
        assert_eq!(config.sampler.history_len, 60);
        assert_eq!(config.gauge.max_segments, 72);
        assert_eq!(config.gauge.inset, 10.0);
        assert_eq!(config.theme, ThemeConfig::default());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = parse("[sampler]\ninterval_ms = 0").unwrap_err();
        assert!(matches!(err, DashError::Config(_)));
    }

    #[test]
    fn zero_lengths_are_clamped() {
        let config = parse("[sampler]\nhistory_len = 0\n[gauge]\nmax_segments = 0").unwrap();
        assert_eq!(config.sampler.history_len, 1);
        assert_eq!(config.gauge.max_segments, 1);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = parse("[sampler\ninterval_ms = ").unwrap_err();
        assert!(err.to_string().starts_with("config error: TOML parse error"));
    }
}
