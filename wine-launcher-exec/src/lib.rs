//! Launching of the external tools.
//!
//! A launch goes through three steps:
//!
//! - an [`Environment`] is built with [`build_env`]: a full copy of the current environment where
//!   `WINEPREFIX` may point to a user-chosen runtime directory;
//! - a [`LaunchRequest`] collects the program, its arguments, the working directory and the
//!   environment;
//! - the [`Launcher`] checks that the requested tool was discovered and hands a
//!   [`SpawnCommand`] to a [`Spawner`].
//!
//! The launched processes are detached from the launcher's session and the launch never waits
//! for them: once the OS accepted the new process the launch is complete. The exit status of a
//! launched program is collected in the background and discarded.
//!
//! The [`Spawner`] trait is the only place where processes are created. [`OsSpawner`] is the real
//! one, while [`RecordingSpawner`] and [`FailingSpawner`] never touch the OS process table and
//! are meant for testing.

#![deny(missing_docs)]

#[macro_use]
extern crate log;

mod detect_exe;
mod env;
mod launcher;
mod request;
mod spawner;

pub use detect_exe::{detect_exe, ExecutableFormat};
pub use env::{build_env, build_env_from, Environment, WINEPREFIX};
pub use launcher::{LaunchError, Launcher};
pub use request::{LaunchRequest, Started};
pub use spawner::{FailingSpawner, OsSpawner, RecordingSpawner, SpawnCommand, Spawner};
