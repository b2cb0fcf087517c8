use crate::source::MetricsSource;
use dash_core::{DashError, HistoryBuffer, Result, SharedSnapshot};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Periodic sampler feeding a [`HistoryBuffer`] and a [`SharedSnapshot`].
///
/// Lifecycle is `idle → running → stopped`. A stopped sampler cannot be
/// restarted; build a new one instead.
///
/// ```no_run
/// # async fn demo() -> dash_core::Result<()> {
/// use dash_system::{Sampler, SysinfoSource};
/// use std::time::Duration;
///
/// let sampler = Sampler::new(SysinfoSource::new(), 60);
/// sampler.start(Duration::from_secs(1), || {})?;
/// // ...
/// sampler.stop()?;
/// sampler.join().await
/// # }
/// ```
pub struct Sampler {
    history:              Arc<HistoryBuffer>,
    snapshot:             Arc<SharedSnapshot>,
    discard_first_sample: bool,
    state:                Mutex<State>,
}

enum State {
    Idle(Box<dyn MetricsSource>),
    Running {
        stop: watch::Sender<bool>,
        task: JoinHandle<()>,
    },
    Stopped {
        /// Taken by the first `join`.
        task: Option<JoinHandle<()>>,
    },
}

impl Sampler {
    /// Create an idle sampler keeping the last `history_len` CPU samples.
    pub fn new(source: impl MetricsSource, history_len: usize) -> Self {
        Self {
            history:              Arc::new(HistoryBuffer::new(history_len)),
            snapshot:             Arc::new(SharedSnapshot::new()),
            discard_first_sample: false,
            state:                Mutex::new(State::Idle(Box::new(source))),
        }
    }

    /// Keep the first successful CPU reading out of the history.
    ///
    /// The reading still reaches the snapshot.
    #[must_use]
    pub fn discard_first_sample(mut self, discard: bool) -> Self {
        self.discard_first_sample = discard;
        self
    }

    /// CPU history, oldest to newest.
    pub fn history(&self) -> Arc<HistoryBuffer> {
        Arc::clone(&self.history)
    }

    /// Latest readings.
    pub fn snapshot(&self) -> Arc<SharedSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn is_running(&self) -> bool {
        matches!(*self.lock(), State::Running { .. })
    }

    /// Spawn the sampling task on the current Tokio runtime.
    ///
    /// The first tick fires one `interval` after this call. After every tick
    /// `on_update` runs on the sampling task itself, so it must return quickly:
    /// the next tick waits for it, and ticks missed meanwhile are not replayed.
    pub fn start<F>(&self, interval: Duration, on_update: F) -> Result<()>
    where
        F: FnMut() + Send + 'static,
    {
        if interval.is_zero() {
            return Err(DashError::Sampler("interval must be non-zero".into()));
        }
        let runtime = Handle::try_current()
            .map_err(|_| DashError::Sampler("start requires a Tokio runtime".into()))?;

        let mut state = self.lock();
        let source = match std::mem::replace(&mut *state, State::Stopped { task: None }) {
            State::Idle(source) => source,
            other => {
                let reason = match other {
                    State::Running { .. } => "sampler is already running",
                    _ => "sampler was stopped; create a new one",
                };
                *state = other;
                return Err(DashError::Sampler(reason.into()));
            }
        };

        let (stop_tx, stop_rx) = watch::channel(false);
        let collector = Collector::new(
            source,
            Arc::clone(&self.history),
            Arc::clone(&self.snapshot),
            self.discard_first_sample,
        );
        let task = runtime.spawn(run(collector, interval, on_update, stop_rx));

        *state = State::Running { stop: stop_tx, task };
        info!(
            "Sampler started (every {interval:?}, {} samples of history)",
            self.history.capacity()
        );
        Ok(())
    }

    /// Ask the sampling task to exit.
    ///
    /// Observed while the task waits for its next tick; a tick already in
    /// progress (including its `on_update`) runs to completion. Stopping an
    /// idle sampler retires it without ever sampling. Calling this twice is an
    /// error.
    pub fn stop(&self) -> Result<()> {
        let mut state = self.lock();
        match std::mem::replace(&mut *state, State::Stopped { task: None }) {
            State::Idle(_) => {
                info!("Sampler stopped before it was started");
                Ok(())
            }
            State::Running { stop, task } => {
                // The task may already be gone; nothing left to signal then.
                let _ = stop.send(true);
                *state = State::Stopped { task: Some(task) };
                info!("Sampler stop requested");
                Ok(())
            }
            stopped @ State::Stopped { .. } => {
                *state = stopped;
                Err(DashError::Sampler("stop called more than once".into()))
            }
        }
    }

    /// Wait for the sampling task to finish after [`stop`](Self::stop).
    pub async fn join(&self) -> Result<()> {
        let task = match &mut *self.lock() {
            State::Stopped { task } => task.take(),
            _ => return Err(DashError::Sampler("join called before stop".into())),
        };

        if let Some(task) = task {
            task.await
                .map_err(|e| DashError::Sampler(format!("sampling task failed: {e}")))?;
            info!("Sampler stopped");
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match *self.lock() {
            State::Idle(_) => "idle",
            State::Running { .. } => "running",
            State::Stopped { .. } => "stopped",
        };
        f.debug_struct("Sampler")
            .field("state", &state)
            .field("samples", &self.history.count())
            .finish()
    }
}

async fn run<F>(
    mut collector: Collector,
    interval: Duration,
    mut on_update: F,
    mut stop: watch::Receiver<bool>,
) where
    F: FnMut() + Send + 'static,
{
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            // Err = the `Sampler` was dropped.
            _ = stop.changed() => break,
            _ = ticker.tick() => {}
        }

        collector.collect();
        on_update();
    }

    debug!("Sampling task exiting");
}

/// One tick's worth of work, independent of the timer.
struct Collector {
    source:       Box<dyn MetricsSource>,
    history:      Arc<HistoryBuffer>,
    snapshot:     Arc<SharedSnapshot>,
    skip_next:    bool,
    cpu_failing:  bool,
    mem_failing:  bool,
}

impl Collector {
    fn new(
        source: Box<dyn MetricsSource>,
        history: Arc<HistoryBuffer>,
        snapshot: Arc<SharedSnapshot>,
        discard_first_sample: bool,
    ) -> Self {
        Self {
            source,
            history,
            snapshot,
            skip_next:   discard_first_sample,
            cpu_failing: false,
            mem_failing: false,
        }
    }

    /// Query the source once. A failed reading leaves its fields (and, for
    /// CPU, the history) exactly as they were.
    fn collect(&mut self) {
        match self.source.cpu_percent() {
            Ok(percent) => {
                recovered("CPU", &mut self.cpu_failing);
                self.snapshot.set_cpu(percent);
                if self.skip_next {
                    self.skip_next = false;
                    debug!("Discarding first CPU sample ({percent:.1}%) from history");
                } else {
                    self.history.add(percent);
                }
            }
            Err(e) => failed("CPU", &mut self.cpu_failing, &e),
        }

        match self.source.memory_stats() {
            Ok(stats) => {
                recovered("memory", &mut self.mem_failing);
                self.snapshot.set_memory(stats);
            }
            Err(e) => failed("memory", &mut self.mem_failing, &e),
        }

        debug!(
            cpu = self.snapshot.cpu_percent(),
            memory = self.snapshot.memory_percent(),
            samples = self.history.count(),
            "tick"
        );
    }
}

fn failed(what: &str, failing: &mut bool, err: &DashError) {
    if *failing {
        debug!("{what} reading still failing: {err}");
    } else {
        warn!("{what} reading failed; keeping last value: {err}");
        *failing = true;
    }
}

fn recovered(what: &str, failing: &mut bool) {
    if std::mem::take(failing) {
        info!("{what} reading recovered");
    }
}
