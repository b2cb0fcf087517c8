//! dash: samples host CPU and memory and builds dashboard geometry.
//!
//! Headless runner: every tick it rebuilds the CPU chart and memory gauge
//! and logs a frame summary.  Run with:  `RUST_LOG=info dash`

use anyhow::Result;
use dash_config::{default_path, load as load_config, DashConfig};
use dash_geometry::{ChartGeometry, ChartStyle, GaugeGeometry, GaugeStyle};
use dash_system::{format_percent, memory_label, Sampler, SysinfoSource};
use dash_theme::Palette;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("dash v{} starting", env!("CARGO_PKG_VERSION"));

    let config = load_config(default_path())?;
    run(config).await
}

async fn run(config: DashConfig) -> Result<()> {
    let palette = Palette::from_config(&config.theme);
    let mut chart = ChartGeometry::new(ChartStyle::from_config(&config.chart, &palette));
    let mut gauge = GaugeGeometry::new(GaugeStyle::from_config(&config.gauge, &palette));

    let sampler = Sampler::new(SysinfoSource::new(), config.sampler.history_len)
        .discard_first_sample(config.sampler.discard_first_sample);
    let history = sampler.history();
    let snapshot = sampler.snapshot();

    // The callback runs on the sampling task: hand off and return at once.
    // A full channel means a redraw is already pending.
    let (tx, mut rx) = mpsc::channel::<()>(1);
    sampler.start(Duration::from_millis(config.sampler.interval_ms), move || {
        let _ = tx.try_send(());
    })?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received; shutting down");
                break;
            }
            update = rx.recv() => {
                if update.is_none() {
                    break;
                }

                let lines = chart.update(&history, config.chart.width, config.chart.height).len();
                let snap = snapshot.load();
                let chords = gauge
                    .update(snap.memory_percent, config.gauge.size, config.gauge.size)
                    .len();

                info!(
                    cpu = %format_percent(snap.cpu_percent),
                    memory = %format_percent(snap.memory_percent),
                    used = %memory_label(&snap),
                    "frame"
                );
                debug!(lines, chords, samples = history.count(), "geometry");
            }
        }
    }

    sampler.stop()?;
    sampler.join().await?;
    Ok(())
}
