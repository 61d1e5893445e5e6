//! Session clock: time source abstraction and the 1 s display ticker.
//!
//! `SessionClock::start()` spawns a background task on a dedicated tokio
//! runtime thread that refreshes the formatted display timestamp every
//! second. Saved records are stamped from the injected [`Clock`] at the
//! moment of commit; later ticks never alter them.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::runtime::Runtime;
use tokio::sync::{oneshot, watch};
use tokio::time::interval;

use crate::error::{MonitorError, Result};

/// Refresh cadence of the live display timestamp.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Time source. Production uses the system clock; tests inject fixed
/// instants.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Display form of an instant: `dd/mm/yy, HH:MM:SS`, 24-hour clock.
pub fn format_display(instant: DateTime<Local>) -> String {
    instant.format("%d/%m/%y, %H:%M:%S").to_string()
}

/// Live display clock.
///
/// The latest formatted timestamp is read through [`SessionClock::display`]
/// or observed through [`SessionClock::subscribe`]. The ticker is
/// fire-and-forget: it never blocks the caller and carries no ordering
/// dependency with commit, export or load.
pub struct SessionClock {
    display_rx: watch::Receiver<String>,
    shutdown: Option<oneshot::Sender<()>>,
    /// Keep the runtime alive as long as the clock exists.
    _runtime: Arc<Runtime>,
}

impl SessionClock {
    /// Start the ticker on a dedicated background runtime thread.
    pub fn start(clock: Arc<dyn Clock>) -> Result<Self> {
        let runtime = Arc::new(
            tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("ctmon-clock")
                .enable_all()
                .build()
                .map_err(|e| MonitorError::Other(e.to_string()))?,
        );

        let (display_tx, display_rx) = watch::channel(format_display(clock.now()));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        runtime.spawn(tick_task(clock, display_tx, shutdown_rx));

        Ok(Self {
            display_rx,
            shutdown: Some(shutdown_tx),
            _runtime: runtime,
        })
    }

    /// Latest formatted timestamp.
    pub fn display(&self) -> String {
        self.display_rx.borrow().clone()
    }

    /// Observe display updates as they tick.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.display_rx.clone()
    }

    /// Cancel the ticker.
    pub fn close(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for SessionClock {
    fn drop(&mut self) {
        self.close();
    }
}

async fn tick_task(
    clock: Arc<dyn Clock>,
    display: watch::Sender<String>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut ticker = interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                if display.send(format_display(clock.now())).is_err() {
                    break;
                }
            }
        }
    }
}
