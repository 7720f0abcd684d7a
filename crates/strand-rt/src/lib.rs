// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Strand: run a callable on its own OS thread, get a shared future back.
//!
//! `run(f, (a, b))` moves `f` and its arguments onto a fresh thread and
//! returns a `FutureHandle`. Clone the handle to give the result to several
//! observers; any of them may block on `value()`.
//!
//! Components:
//! - callable — `Callable` trait over argument tuples (0 to 8), `Bound`/`BoundMut` methods
//! - state    — shared task state, worker entry point
//! - handle   — `FutureHandle` (value/wait/is_finished)
//! - launch   — `Launcher`, `run`, `run_method`, `run_method_mut`
//! - config   — worker thread attributes
//! - error    — `LaunchError`, `JoinError`
//!
//! A panic in the task body does not cross the thread boundary. It is
//! stored and handed back as `JoinError::Panicked` from every handle.

pub mod callable;
pub mod config;
pub mod error;
pub mod handle;
pub mod launch;
mod state;

pub use callable::{Adapter, Bound, BoundMut, Callable};
pub use config::LaunchConfig;
pub use error::{JoinError, LaunchError};
pub use handle::FutureHandle;
pub use launch::{run, run_method, run_method_mut, Launcher, MethodMutOutput, MethodOutput};
