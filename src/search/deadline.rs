//! Deadline-bounded execution of a search iteration.
//!
//! The task runs on a dedicated worker thread while the caller blocks on a
//! channel with a timeout. When the deadline passes the caller stops waiting,
//! raises the task's `CancelToken` and reports `TimedOut`; the worker notices
//! the token at its next poll and exits on its own. The task only ever sees
//! owned or shared-immutable data, so an abandoned iteration cannot leave a
//! half-updated position behind.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Cooperative stop flag shared between the caller and the worker.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Why a task gave up before producing a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// The token was raised or the host reported no more time.
    Cancelled,
    /// The task's own work budget ran out.
    BudgetExhausted,
}

/// Outcome of `run_with_limited_time`.
#[derive(Debug)]
pub enum Execution<T> {
    Completed { value: T, elapsed: Duration },
    TimedOut,
    ResourceExhausted(String),
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_owned()
    }
}

/// Runs `task` with a wall-clock allowance of `budget_secs` seconds.
///
/// A non-positive or non-finite budget times out immediately without starting
/// a worker. Panics inside the task (for example allocation `capacity
/// overflow`) and a failure to spawn the worker are reported as
/// `ResourceExhausted`, as is `Interrupt::BudgetExhausted`.
pub fn run_with_limited_time<T, F>(budget_secs: f64, task: F) -> Execution<T>
where
    T: Send + 'static,
    F: FnOnce(&CancelToken) -> Result<T, Interrupt> + Send + 'static,
{
    let Ok(budget) = Duration::try_from_secs_f64(budget_secs) else {
        return Execution::TimedOut;
    };
    if budget.is_zero() {
        return Execution::TimedOut;
    }

    let token = CancelToken::new();
    let worker_token = token.clone();
    let (tx, rx) = mpsc::channel();
    let started = Instant::now();

    let spawned = thread::Builder::new()
        .name("checkers-search".to_owned())
        .spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| task(&worker_token)));
            // The receiver is gone once the caller has timed out.
            let _ = tx.send(outcome);
        });
    if let Err(e) = spawned {
        return Execution::ResourceExhausted(format!("could not start search worker: {e}"));
    }

    match rx.recv_timeout(budget) {
        Ok(Ok(Ok(value))) => Execution::Completed {
            value,
            elapsed: started.elapsed(),
        },
        Ok(Ok(Err(Interrupt::Cancelled))) => Execution::TimedOut,
        Ok(Ok(Err(Interrupt::BudgetExhausted))) => {
            Execution::ResourceExhausted("search work budget exhausted".to_owned())
        }
        Ok(Err(payload)) => Execution::ResourceExhausted(panic_message(payload.as_ref())),
        Err(RecvTimeoutError::Timeout) => {
            token.cancel();
            Execution::TimedOut
        }
        Err(RecvTimeoutError::Disconnected) => {
            Execution::ResourceExhausted("search worker exited without a result".to_owned())
        }
    }
}
