// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Worker thread attributes.

use std::io;
use std::thread;

/// Attributes applied to every worker thread a `Launcher` creates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Thread name. `None` leaves the thread unnamed.
    pub name: Option<String>,
    /// Stack size in bytes. `None` uses the standard library default.
    pub stack_size: Option<usize>,
}

impl LaunchConfig {
    /// Thread builder carrying these attributes.
    ///
    /// A name with an interior NUL is rejected here; `Builder::spawn`
    /// would panic on it.
    pub(crate) fn thread_builder(&self) -> io::Result<thread::Builder> {
        let mut builder = thread::Builder::new();
        if let Some(name) = &self.name {
            if name.contains('\0') {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "thread name may not contain NUL bytes",
                ));
            }
            builder = builder.name(name.clone());
        }
        if let Some(size) = self.stack_size {
            builder = builder.stack_size(size);
        }
        Ok(builder)
    }
}
