//! Background flush worker
//!
//! One thread per logger waits on whichever comes first: an explicit request
//! on a depth-1 channel, or a timer armed with the target's current flush
//! interval. Either runs one flush cycle and re-arms the timer. When the
//! request channel disconnects the worker runs a last cycle and exits.

use crossbeam_channel::{after, bounded, select, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Work the scheduler drives
pub trait FlushTarget: Send + Sync + 'static {
    /// Delay before the next timed cycle, re-read every time the timer is armed
    fn flush_interval(&self) -> Duration;

    /// Run one complete flush cycle
    fn flush_cycle(&self);
}

/// Result of [`FlushScheduler::request`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushRequest {
    /// A new request was queued
    Queued,
    /// A request was already pending; this one folds into it
    Coalesced,
    /// The worker has stopped or never started
    Closed,
}

pub struct FlushScheduler {
    requests: Mutex<Option<Sender<()>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl FlushScheduler {
    /// Spawn the worker thread for `target`
    ///
    /// # Errors
    ///
    /// Returns the spawn error if the OS refuses a new thread.
    pub fn start<T: FlushTarget>(target: Arc<T>) -> io::Result<Self> {
        let (tx, rx) = bounded(1);
        let worker = thread::Builder::new()
            .name("log-flush".to_string())
            .spawn(move || run(target.as_ref(), &rx))?;

        Ok(Self {
            requests: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
        })
    }

    /// A scheduler with no worker; every request reports [`FlushRequest::Closed`]
    pub fn stopped() -> Self {
        Self {
            requests: Mutex::new(None),
            worker: Mutex::new(None),
        }
    }

    /// Ask for a flush cycle without blocking
    ///
    /// Requests coalesce: while one is pending, further requests return
    /// [`FlushRequest::Coalesced`] immediately. The pending request has not
    /// been consumed yet, so a cycle still starts after this call returns.
    pub fn request(&self) -> FlushRequest {
        let requests = self.requests.lock();
        let Some(tx) = requests.as_ref() else {
            return FlushRequest::Closed;
        };
        match tx.try_send(()) {
            Ok(()) => FlushRequest::Queued,
            Err(TrySendError::Full(())) => FlushRequest::Coalesced,
            Err(TrySendError::Disconnected(())) => FlushRequest::Closed,
        }
    }

    /// Disconnect the request channel and wait for the worker to exit
    ///
    /// The worker runs its last cycle before exiting. Calling this again is a
    /// no-op returning `Ok`.
    ///
    /// # Errors
    ///
    /// Returns the worker's panic payload if it panicked.
    pub fn stop(&self) -> thread::Result<()> {
        drop(self.requests.lock().take());
        match self.worker.lock().take() {
            Some(worker) => worker.join(),
            None => Ok(()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.requests.lock().is_some()
    }
}

fn run<T: FlushTarget + ?Sized>(target: &T, requests: &Receiver<()>) {
    loop {
        let timer = after(target.flush_interval());
        select! {
            recv(requests) -> msg => match msg {
                Ok(()) => target.flush_cycle(),
                Err(_) => {
                    target.flush_cycle();
                    return;
                }
            },
            recv(timer) -> _ => target.flush_cycle(),
        }
    }
}
