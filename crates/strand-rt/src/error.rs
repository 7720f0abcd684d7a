// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Launch and join errors.

use std::io;

use thiserror::Error;

/// Returned by the launcher when the worker thread could not be created.
///
/// Fatal for that launch; nothing is retried.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),
}

/// Returned by `FutureHandle::value()` and `FutureHandle::wait()`.
///
/// A second join on a thread that a sibling handle already reaped is not
/// an error and never shows up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    /// The task body panicked on its worker thread.
    #[error("task panicked: {0}")]
    Panicked(String),

    /// The accessor was called from the task's own worker thread, which
    /// would block forever on itself.
    #[error("task cannot wait on its own result (deadlock)")]
    Deadlock,

    /// The worker terminated without publishing an outcome.
    #[error("worker thread exited without publishing a result")]
    Missing,
}

impl JoinError {
    /// Build a `Panicked` error from a panic payload.
    pub(crate) fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let msg = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        JoinError::Panicked(msg)
    }
}
