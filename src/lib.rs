//! # wine-launcher
//!
//! This is both an application and a library, the library can be used to achieve the same
//! functionalities of the `wine-launcher` binary inside your application: find `wine` and
//! `winetricks` on the host, then launch Windows executables and the Wine tools, optionally inside
//! a separate prefix.
//!
//! The tools are searched once with [`Discovery::discover`](wine_launcher_locate::Discovery), the
//! result drives which [`Action`]s a [`Session`] allows.

#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;

mod actions;
pub mod error;
mod local;
pub mod opt;
pub mod report;
mod session;
mod status;
pub mod tools;

pub use actions::{Action, ActionInput, ActionTable, Handler, InputError, PreparedLaunch};
pub use local::{main_local, run_action};
pub use opt::Opt;
pub use session::{Session, SessionError};
pub use status::StatusLine;
