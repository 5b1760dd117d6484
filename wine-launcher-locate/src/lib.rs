//! Discovery of the external tools used by the launcher.
//!
//! The launcher depends on two programs installed on the host: the Wine compatibility runner
//! (`wine`) and the helper script `winetricks`. This crate finds them once, at startup, and
//! stores the outcome in an immutable [`Discovery`] that the rest of the program borrows.
//!
//! A tool is searched with three strategies, the first success wins:
//!
//! 1. a `which`-like query against `PATH`;
//! 2. a fixed list of platform-conventional binary directories;
//! 3. a manual scan of the `PATH` segments.
//!
//! A tool that cannot be found is not an error: it just disables the actions that need it.

#![deny(missing_docs)]

#[macro_use]
extern crate log;

mod discovery;
mod locator;
mod tool;

pub use discovery::Discovery;
pub use locator::{
    conventional_dirs, is_executable, Locator, NoQuery, PathQuery, Strategy, WhichQuery,
};
pub use tool::ToolName;
