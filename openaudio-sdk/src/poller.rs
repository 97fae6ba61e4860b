//! Background poll scheduler
//!
//! Runs one reconciliation cycle per scan interval on a dedicated thread.
//! Refresh requests from the controller wake it early; requests that arrive
//! while a cycle is running are coalesced into one follow-up cycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use openaudio_state::PollReport;
use parking_lot::{Condvar, Mutex};

use crate::error::Result;
use crate::system::Cycle;

/// Commands sent to the poll thread
#[derive(Debug)]
pub(crate) enum Command {
    Refresh,
    Shutdown,
}

/// Where refresh requests go
///
/// Wakes the attached poller if there is one, otherwise remembers the request
/// until the next cycle runs.
#[derive(Debug, Default)]
pub(crate) struct RefreshSignal {
    pending: AtomicBool,
    waker: Mutex<Option<mpsc::Sender<Command>>>,
}

impl RefreshSignal {
    pub(crate) fn request(&self) {
        if let Some(waker) = self.waker.lock().as_ref() {
            if waker.send(Command::Refresh).is_ok() {
                return;
            }
        }
        self.pending.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    pub(crate) fn take_pending(&self) -> bool {
        self.pending.swap(false, Ordering::SeqCst)
    }

    fn attach(&self, waker: mpsc::Sender<Command>) {
        *self.waker.lock() = Some(waker);
    }

    fn detach(&self) {
        *self.waker.lock() = None;
    }
}

/// Outcome of the cycles run so far
#[derive(Debug, Clone, Default)]
pub struct PollStatus {
    pub cycles: u64,
    pub failures: u64,
    /// Whether the most recent cycle succeeded
    pub available: bool,
    pub last_report: Option<PollReport>,
    pub last_error: Option<String>,
    pub last_success: Option<Instant>,
}

#[derive(Default)]
struct SharedStatus {
    status: Mutex<PollStatus>,
    cycle_done: Condvar,
}

impl SharedStatus {
    fn record(&self, result: Result<PollReport>) {
        let mut status = self.status.lock();
        status.cycles += 1;
        match result {
            Ok(report) => {
                status.available = true;
                status.last_report = Some(report);
                status.last_error = None;
                status.last_success = Some(Instant::now());
            }
            Err(e) => {
                tracing::warn!("OpenAudio poll failed, keeping last known state: {}", e);
                status.available = false;
                status.failures += 1;
                status.last_error = Some(e.to_string());
            }
        }
        drop(status);
        self.cycle_done.notify_all();
    }
}

/// Handle to the poll thread; stops it on drop
pub struct Poller {
    commands: mpsc::Sender<Command>,
    shared: Arc<SharedStatus>,
    refresh: Arc<RefreshSignal>,
    worker: Option<JoinHandle<()>>,
}

impl Poller {
    pub(crate) fn spawn(cycle: Arc<Cycle>, interval: Duration, refresh: Arc<RefreshSignal>) -> Self {
        let (commands, command_rx) = mpsc::channel();
        let shared = Arc::new(SharedStatus::default());

        refresh.attach(commands.clone());
        // requests raised before the poller existed are covered by the first cycle
        refresh.take_pending();

        let worker = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || run_poll_loop(cycle, interval, command_rx, shared))
        };

        Self {
            commands,
            shared,
            refresh,
            worker: Some(worker),
        }
    }

    /// Run a cycle now instead of waiting for the interval
    pub fn request_refresh(&self) {
        let _ = self.commands.send(Command::Refresh);
    }

    pub fn status(&self) -> PollStatus {
        self.shared.status.lock().clone()
    }

    /// Block until at least `cycles` cycles have finished or `timeout` passes
    ///
    /// Returns `true` if the count was reached.
    pub fn wait_for_cycles(&self, cycles: u64, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut status = self.shared.status.lock();
        while status.cycles < cycles {
            if self
                .shared
                .cycle_done
                .wait_until(&mut status, deadline)
                .timed_out()
            {
                return status.cycles >= cycles;
            }
        }
        true
    }

    /// Stop the poll thread after its current cycle
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.refresh.detach();
        let _ = self.commands.send(Command::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("OpenAudio poll thread panicked");
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_poll_loop(
    cycle: Arc<Cycle>,
    interval: Duration,
    commands: mpsc::Receiver<Command>,
    shared: Arc<SharedStatus>,
) {
    tracing::info!("OpenAudio poller started, interval {:?}", interval);

    loop {
        shared.record(cycle.run());

        match commands.recv_timeout(interval) {
            Ok(Command::Refresh) => tracing::debug!("Refresh requested"),
            Err(RecvTimeoutError::Timeout) => {}
            Ok(Command::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
        }

        if !drain_refreshes(&commands) {
            break;
        }
    }

    tracing::info!("OpenAudio poller stopped");
}

/// Swallow queued refresh requests; `false` if a shutdown was queued
fn drain_refreshes(commands: &mpsc::Receiver<Command>) -> bool {
    loop {
        match commands.try_recv() {
            Ok(Command::Refresh) => continue,
            Err(TryRecvError::Empty) => return true,
            Ok(Command::Shutdown) | Err(TryRecvError::Disconnected) => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_poller_is_remembered() {
        let signal = RefreshSignal::default();
        signal.request();
        assert!(signal.is_pending());
        assert!(signal.take_pending());
        assert!(!signal.is_pending());
    }

    #[test]
    fn test_request_wakes_attached_poller() {
        let signal = RefreshSignal::default();
        let (tx, rx) = mpsc::channel();
        signal.attach(tx);

        signal.request();
        assert!(matches!(rx.try_recv(), Ok(Command::Refresh)));
        assert!(!signal.is_pending());

        signal.detach();
        signal.request();
        assert!(signal.is_pending());
    }

    #[test]
    fn test_drain_stops_on_shutdown() {
        let (tx, rx) = mpsc::channel();
        tx.send(Command::Refresh).unwrap();
        tx.send(Command::Refresh).unwrap();
        assert!(drain_refreshes(&rx));

        tx.send(Command::Refresh).unwrap();
        tx.send(Command::Shutdown).unwrap();
        assert!(!drain_refreshes(&rx));
    }
}
