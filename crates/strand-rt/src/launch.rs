// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Launching tasks.
//!
//! Every launch creates one OS thread. There is no pool and no queue.

use std::any::type_name;

use tracing::{debug, error};

use crate::callable::{Adapter, Bound, BoundMut, Callable};
use crate::config::LaunchConfig;
use crate::error::LaunchError;
use crate::handle::FutureHandle;
use crate::state::{execute, TaskState};

/// Output type of a bound-method launch.
pub type MethodOutput<P, M, Args> = <Bound<P, M> as Callable<Args>>::Output;

/// Output type of a mutating bound-method launch.
pub type MethodMutOutput<P, M, Args> = <BoundMut<P, M> as Callable<Args>>::Output;

/// Starts tasks with a fixed set of thread attributes.
#[derive(Debug, Clone, Default)]
pub struct Launcher {
    config: LaunchConfig,
}

impl Launcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LaunchConfig) -> Self {
        Self { config }
    }

    /// Name every worker thread this launcher creates.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    /// Stack size, in bytes, for every worker thread.
    pub fn stack_size(mut self, size: usize) -> Self {
        self.config.stack_size = Some(size);
        self
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// Run `callable(args...)` on a new thread.
    ///
    /// `args` is a tuple of zero to eight values, moved into the task at
    /// launch. Thread creation failure is returned, not retried. That
    /// includes attributes the OS or std refuse, such as a name with a NUL
    /// byte or a stack that cannot be mapped.
    pub fn run<F, Args>(
        &self,
        callable: F,
        args: Args,
    ) -> Result<FutureHandle<F::Output>, LaunchError>
    where
        F: Callable<Args> + Send + 'static,
        Args: Send + 'static,
        F::Output: Send + 'static,
    {
        let state = TaskState::new(self.config.clone());
        let worker = state.clone();
        let adapter = Adapter::new(callable, args);

        let handle = self
            .config
            .thread_builder()
            .and_then(|builder| builder.spawn(move || execute(worker, adapter)))
            .map_err(|err| {
                error!(error = %err, name = ?self.config.name, "Failed to spawn worker thread");
                LaunchError::Spawn(err)
            })?;

        debug!(
            thread = ?handle.thread().id(),
            name = ?self.config.name,
            args = type_name::<Args>(),
            "Launched task"
        );
        state.attach(handle);
        Ok(FutureHandle::new(state))
    }

    /// Run `method(&*object, args...)` on a new thread.
    ///
    /// `object` is a shared pointer such as `Arc<C>`; the caller may keep
    /// its own clone and observe the object while the task runs.
    pub fn run_method<P, M, Args>(
        &self,
        object: P,
        method: M,
        args: Args,
    ) -> Result<FutureHandle<MethodOutput<P, M, Args>>, LaunchError>
    where
        Bound<P, M>: Callable<Args> + Send + 'static,
        Args: Send + 'static,
        MethodOutput<P, M, Args>: Send + 'static,
    {
        self.run(Bound::new(object, method), args)
    }

    /// Run `method(&mut *object, args...)` on a new thread.
    ///
    /// `object` is an owning pointer such as `Box<C>`. It moves into the
    /// task, which may mutate it freely.
    pub fn run_method_mut<P, M, Args>(
        &self,
        object: P,
        method: M,
        args: Args,
    ) -> Result<FutureHandle<MethodMutOutput<P, M, Args>>, LaunchError>
    where
        BoundMut<P, M>: Callable<Args> + Send + 'static,
        Args: Send + 'static,
        MethodMutOutput<P, M, Args>: Send + 'static,
    {
        self.run(BoundMut::new(object, method), args)
    }
}

/// Run `callable(args...)` on a new thread with default attributes.
///
/// ```
/// fn square(x: i32) -> i32 {
///     x * x
/// }
///
/// let handle = strand_rt::run(square, (5,)).unwrap();
/// assert_eq!(handle.value().unwrap(), 25);
/// ```
pub fn run<F, Args>(callable: F, args: Args) -> Result<FutureHandle<F::Output>, LaunchError>
where
    F: Callable<Args> + Send + 'static,
    Args: Send + 'static,
    F::Output: Send + 'static,
{
    Launcher::new().run(callable, args)
}

/// Run a method bound to a shared object on a new thread with default
/// attributes.
pub fn run_method<P, M, Args>(
    object: P,
    method: M,
    args: Args,
) -> Result<FutureHandle<MethodOutput<P, M, Args>>, LaunchError>
where
    Bound<P, M>: Callable<Args> + Send + 'static,
    Args: Send + 'static,
    MethodOutput<P, M, Args>: Send + 'static,
{
    Launcher::new().run_method(object, method, args)
}

/// Run a mutating method on an owned object on a new thread with default
/// attributes.
pub fn run_method_mut<P, M, Args>(
    object: P,
    method: M,
    args: Args,
) -> Result<FutureHandle<MethodMutOutput<P, M, Args>>, LaunchError>
where
    BoundMut<P, M>: Callable<Args> + Send + 'static,
    Args: Send + 'static,
    MethodMutOutput<P, M, Args>: Send + 'static,
{
    Launcher::new().run_method_mut(object, method, args)
}
