// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Future handles.

use std::fmt;
use std::sync::Arc;

use crate::error::JoinError;
use crate::state::TaskState;

/// Shared handle to a launched task's eventual result.
///
/// Cloning adds an observer of the same task; every clone sees the same
/// value. The task state is freed when the last clone and the worker
/// itself are gone.
pub struct FutureHandle<T> {
    state: Arc<TaskState<T>>,
}

impl<T> FutureHandle<T> {
    pub(crate) fn new(state: Arc<TaskState<T>>) -> Self {
        Self { state }
    }

    /// Block until the task finishes and return a copy of its result.
    ///
    /// Repeated calls, on this handle or any clone, return the same value
    /// and never rerun the task. Whichever call first observes completion
    /// reaps the worker thread. Concurrent calls wait for that join to
    /// finish, and later calls find the thread already reaped.
    pub fn value(&self) -> Result<T, JoinError>
    where
        T: Clone,
    {
        self.state.outcome()
    }

    /// Block until the task finishes without copying the result out.
    pub fn wait(&self) -> Result<(), JoinError> {
        self.state.status()
    }

    /// Whether the task has published its outcome. Never blocks.
    pub fn is_finished(&self) -> bool {
        self.state.is_complete()
    }

    /// Live references to the task state: every handle, plus the worker
    /// while it is still running.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.state)
    }

    /// Name given to the worker thread at launch, if any.
    pub fn thread_name(&self) -> Option<&str> {
        self.state.attributes().name.as_deref()
    }
}

impl<T> Clone for FutureHandle<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T> fmt::Debug for FutureHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FutureHandle")
            .field("thread_name", &self.thread_name())
            .field("finished", &self.is_finished())
            .field("ref_count", &self.ref_count())
            .finish()
    }
}
