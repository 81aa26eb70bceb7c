//! `SimulationClock`: the periodic driver thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use df_core::DfError;
use df_dispatch::AllocationPolicy;

use crate::{FleetService, SimObserver, SimResult};

/// Runs one [`Sim::step`][crate::Sim::step] per `period` on a background
/// thread until stopped.
///
/// The thread holds the service lock only while a tick runs.  Dropping the
/// clock stops it and waits for the tick in progress to finish.
pub struct SimulationClock {
    stop:   Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SimulationClock {
    pub fn spawn<P, O>(service: FleetService<P>, period: Duration, mut observer: O) -> SimResult<Self>
    where
        P: AllocationPolicy,
        O: SimObserver + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("fleet-clock".into())
            .spawn(move || {
                tracing::info!(period_ms = period.as_millis() as u64, "simulation clock started");
                while !flag.load(Ordering::Acquire) {
                    let deadline = Instant::now() + period;
                    service.step(&mut observer);
                    wait_until(deadline, &flag);
                }
                let tick = service.current_tick();
                observer.on_sim_end(tick);
                tracing::info!(%tick, "simulation clock stopped");
            })
            .map_err(DfError::Io)?;

        Ok(Self { stop, handle: Some(handle) })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop after the tick in progress and wait for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        self.stop.store(true, Ordering::Release);
        handle.thread().unpark();
        if handle.join().is_err() {
            tracing::error!("simulation clock thread panicked");
        }
    }
}

impl Drop for SimulationClock {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Park until `deadline` or until `stop` is set.  `park_timeout` may return
/// early, so the deadline is re-checked after every wake-up.
pub(crate) fn wait_until(deadline: Instant, stop: &AtomicBool) {
    while !stop.load(Ordering::Acquire) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return;
        }
        thread::park_timeout(remaining);
    }
}
