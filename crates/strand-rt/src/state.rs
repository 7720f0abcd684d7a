// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Shared task state and the worker entry point.
//!
//! One `TaskState` per launched task, shared through `Arc` between every
//! `FutureHandle` and the worker while it runs. The last reference to go
//! away destroys it. Completion is a one-shot flag plus condvar; the worker
//! `JoinHandle` is taken out and joined by exactly one observer.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread::{self, JoinHandle, ThreadId};

use tracing::{debug, trace, warn};

use crate::callable::{Adapter, Callable};
use crate::config::LaunchConfig;
use crate::error::JoinError;

/// Result slot plus the completion flag that guards it.
struct Slot<T> {
    outcome: Option<Result<T, JoinError>>,
    complete: bool,
}

pub(crate) struct TaskState<T> {
    attributes: LaunchConfig,
    slot: Mutex<Slot<T>>,
    complete_notify: Condvar,
    /// Taken by whichever observer reaps the worker.
    thread: Mutex<Option<JoinHandle<()>>>,
    worker: OnceLock<ThreadId>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Nothing panics while holding these locks; recover rather than propagate.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> TaskState<T> {
    pub fn new(attributes: LaunchConfig) -> Arc<Self> {
        Arc::new(Self {
            attributes,
            slot: Mutex::new(Slot {
                outcome: None,
                complete: false,
            }),
            complete_notify: Condvar::new(),
            thread: Mutex::new(None),
            worker: OnceLock::new(),
        })
    }

    pub fn attributes(&self) -> &LaunchConfig {
        &self.attributes
    }

    /// Record the worker thread. Called once by the launcher after spawn.
    pub fn attach(&self, handle: JoinHandle<()>) {
        let _ = self.worker.set(handle.thread().id());
        *lock(&self.thread) = Some(handle);
    }

    /// Store the task outcome. Only the first write is kept.
    fn publish(&self, outcome: Result<T, JoinError>) {
        let mut slot = lock(&self.slot);
        if slot.outcome.is_none() {
            slot.outcome = Some(outcome);
        }
    }

    /// Mark complete and wake every thread blocked in `wait_complete`.
    fn mark_complete(&self) {
        let mut slot = lock(&self.slot);
        slot.complete = true;
        self.complete_notify.notify_all();
    }

    pub fn is_complete(&self) -> bool {
        lock(&self.slot).complete
    }

    /// Block until the outcome is published, then reap the worker if no
    /// sibling has already done so.
    pub fn wait_complete(&self) -> Result<(), JoinError> {
        if self.worker.get() == Some(&thread::current().id()) {
            return Err(JoinError::Deadlock);
        }

        {
            let mut slot = lock(&self.slot);
            while !slot.complete {
                slot = self
                    .complete_notify
                    .wait(slot)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        }

        self.reap();
        Ok(())
    }

    /// Join the worker thread. A missing handle means a sibling already
    /// reaped it, which is fine.
    ///
    /// The lock is held across the join, so no observer returns before the
    /// worker thread has actually exited.
    fn reap(&self) {
        let mut thread = lock(&self.thread);
        let Some(handle) = thread.take() else {
            return;
        };
        let id = handle.thread().id();
        match handle.join() {
            Ok(()) => debug!(thread = ?id, "Reaped worker thread"),
            // The body runs under catch_unwind, so only the trampoline
            // itself can get here. The slot tells the rest.
            Err(_) => warn!(thread = ?id, "Worker thread unwound outside the task body"),
        }
    }

    /// Wait for completion and return a clone of the stored outcome.
    pub fn outcome(&self) -> Result<T, JoinError>
    where
        T: Clone,
    {
        self.wait_complete()?;
        match &lock(&self.slot).outcome {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(err)) => Err(err.clone()),
            None => Err(JoinError::Missing),
        }
    }

    /// Wait for completion and report only whether the body succeeded.
    pub fn status(&self) -> Result<(), JoinError> {
        self.wait_complete()?;
        match &lock(&self.slot).outcome {
            Some(Ok(_)) => Ok(()),
            Some(Err(err)) => Err(err.clone()),
            None => Err(JoinError::Missing),
        }
    }
}

impl<T> Drop for TaskState<T> {
    fn drop(&mut self) {
        let thread = self.thread.get_mut().unwrap_or_else(PoisonError::into_inner);
        if thread.take().is_some() {
            // Dropping the JoinHandle detaches; the OS reclaims the thread on exit.
            trace!("Detached worker thread that no handle joined");
        }
    }
}

/// Signals completion when dropped, so observers wake up even if the
/// worker unwinds while publishing.
struct CompleteOnDrop<'a, T>(&'a TaskState<T>);

impl<T> Drop for CompleteOnDrop<'_, T> {
    fn drop(&mut self) {
        self.0.mark_complete();
    }
}

/// Worker thread entry point.
///
/// Holds its own reference to the state for the whole run, so handles can
/// all be dropped mid-task. Invokes the adapter exactly once.
pub(crate) fn execute<F, Args>(state: Arc<TaskState<F::Output>>, adapter: Adapter<F, Args>)
where
    F: Callable<Args>,
{
    let _complete = CompleteOnDrop(&*state);

    let outcome = match panic::catch_unwind(AssertUnwindSafe(|| adapter.invoke())) {
        Ok(value) => {
            trace!("Task finished");
            Ok(value)
        }
        Err(payload) => {
            let err = JoinError::from_panic(payload.as_ref());
            warn!(error = %err, "Task body panicked");
            Err(err)
        }
    };
    state.publish(outcome);
}
