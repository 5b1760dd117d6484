use termcolor::WriteColor;
use thiserror::Error;

use wine_launcher_diagnostics::Diagnostic;
use wine_launcher_exec::{LaunchError, Launcher, Spawner, Started};
use wine_launcher_locate::{Discovery, ToolName};

use crate::report::StatusReport;
use crate::{Action, ActionInput, ActionTable, InputError, StatusLine};

/// Why an action did not launch anything.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The action needs a tool that was not discovered.
    #[error("{action} is not available: {missing} was not found")]
    Disabled {
        /// The action that was triggered.
        action: Action,
        /// The first required tool that is missing.
        missing: ToolName,
    },
    /// The input of the action is not valid.
    #[error(transparent)]
    Input(#[from] InputError),
    /// The launch failed.
    #[error("Cannot launch {description}")]
    Launch {
        /// What was being launched.
        description: String,
        /// Why the launch failed.
        #[source]
        source: LaunchError,
    },
}

impl SessionError {
    /// The message to show to the user as a dialog, if any.
    ///
    /// The disabled actions are only reported on the status line.
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match self {
            SessionError::Disabled { .. } => None,
            SessionError::Input(InputError::NoInputSelected) => Some(
                Diagnostic::error("No File Selected")
                    .with_note("Please select a Windows executable file (.exe) to run."),
            ),
            SessionError::Input(InputError::InvalidInput(path)) => Some(
                Diagnostic::error("File Not Found").with_note(format!(
                    "The selected item is not a valid file:\n{}",
                    path.display()
                )),
            ),
            SessionError::Input(e @ InputError::Unsupported(_)) => {
                Some(Diagnostic::error(e.to_string()))
            }
            SessionError::Launch {
                description,
                source: LaunchError::ToolUnavailable(tool),
            } => Some(
                Diagnostic::error(format!("{} Not Found", tool.display_name()))
                    .with_note(format!("Cannot run {}.", description))
                    .with_help(format!(
                        "Install {} and make sure it is in your PATH",
                        tool.command_name()
                    )),
            ),
            SessionError::Launch {
                description,
                source,
            } => Some(
                Diagnostic::error(format!("{} Error", description)).with_note(source.to_string()),
            ),
        }
    }
}

/// The state of the launcher while it is running: the tools found at startup, the actions and
/// where the feedback goes.
pub struct Session<S, W: WriteColor> {
    discovery: Discovery,
    table: ActionTable,
    spawner: S,
    status: StatusLine<W>,
}

impl<S: Spawner, W: WriteColor> Session<S, W> {
    /// Start a session over the tools in `discovery`, reporting their state.
    pub fn new(discovery: Discovery, spawner: S, status: StatusLine<W>) -> Session<S, W> {
        let mut session = Session {
            discovery,
            table: ActionTable::new(),
            spawner,
            status,
        };
        for line in StatusReport::new(&session.discovery).tool_lines() {
            info!("{}", line);
        }
        if session.discovery.is_available(ToolName::Wine) {
            session
                .status
                .push("Ready. Select an executable or use tools.");
        } else {
            session
                .status
                .error("Wine command not found. Check installation.");
        }
        session
    }

    /// The status line of this session.
    pub fn status(&self) -> &StatusLine<W> {
        &self.status
    }

    /// Whether all the tools needed by `action` were found.
    pub fn is_enabled(&self, action: Action) -> bool {
        self.missing_tool(action).is_none()
    }

    fn missing_tool(&self, action: Action) -> Option<ToolName> {
        action
            .required_tools()
            .iter()
            .copied()
            .find(|tool| !self.discovery.is_available(*tool))
    }

    /// Run `action` with the given input.
    ///
    /// Every outcome is reported on the status line; the returned error also carries the dialog
    /// to show, see [`SessionError::diagnostic`].
    pub fn trigger(
        &mut self,
        action: Action,
        input: &ActionInput,
    ) -> Result<Started, SessionError> {
        if let Some(missing) = self.missing_tool(action) {
            self.status.error(format!(
                "{} command not found. Check installation.",
                missing.display_name()
            ));
            return Err(SessionError::Disabled { action, missing });
        }
        let prepared = match self.table.prepare(action, &self.discovery, input) {
            Ok(prepared) => prepared,
            Err(e) => {
                self.status.error(e.to_string());
                return Err(e.into());
            }
        };
        if let Some(warning) = &prepared.warning {
            self.status.warning(warning);
        }
        let request = prepared.request;
        let description = request.description().to_owned();
        self.status.push(format!("Launching {}...", description));
        let launcher = Launcher::new(&self.discovery, &self.spawner);
        match launcher.launch(&request) {
            Ok(started) => {
                self.status.push(format!("Launched {}.", description));
                Ok(started)
            }
            Err(source) => {
                self.status.error(source.to_string());
                Err(SessionError::Launch {
                    description,
                    source,
                })
            }
        }
    }
}
