use anyhow::Error;

use wine_launcher_exec::{OsSpawner, Started};
use wine_launcher_locate::{Discovery, Locator};

use crate::{Action, ActionInput, Session, StatusLine};

/// Entry point shared by the binaries: look for the tools on this host and run `action`.
///
/// The outcome is printed on the status line on stdout. A failed action is returned as a
/// [`SessionError`](crate::SessionError) wrapped in the error.
pub fn run_action(action: Action, input: &ActionInput) -> Result<Started, Error> {
    let discovery = Discovery::discover(&Locator::from_env());
    let mut session = Session::new(discovery, OsSpawner, StatusLine::stdout());
    let started = session.trigger(action, input)?;
    debug!("{} has pid {}", action, started.pid);
    Ok(started)
}

/// Entry point of `wine-launcher`.
pub fn main_local(opt: crate::Opt) -> Result<(), Error> {
    run_action(Action::RunExecutable, &opt.action_input())?;
    Ok(())
}
