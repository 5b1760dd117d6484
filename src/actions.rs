//! The actions the user can trigger and how each of them becomes a [`LaunchRequest`].

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use wine_launcher_exec::{build_env, detect_exe, Environment, LaunchRequest};
use wine_launcher_locate::{Discovery, ToolName};

/// Something the user asked to launch.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Run the selected Windows executable.
    RunExecutable,
    /// `wine winecfg`
    Configure,
    /// `wine uninstaller`
    Uninstall,
    /// `wine regedit`
    EditRegistry,
    /// `winetricks`
    Winetricks,
}

impl Action {
    /// All the actions.
    pub const ALL: [Action; 5] = [
        Action::RunExecutable,
        Action::Configure,
        Action::Uninstall,
        Action::EditRegistry,
        Action::Winetricks,
    ];

    /// Human readable name of the action.
    pub fn label(&self) -> &'static str {
        match self {
            Action::RunExecutable => "Run Executable",
            Action::Configure => "Wine Configuration",
            Action::Uninstall => "Wine Uninstaller",
            Action::EditRegistry => "Registry Editor",
            Action::Winetricks => "Winetricks",
        }
    }

    /// The tools that must be discovered for this action to be enabled.
    pub fn required_tools(&self) -> &'static [ToolName] {
        match self {
            Action::Winetricks => &[ToolName::Wine, ToolName::Winetricks],
            _ => &[ToolName::Wine],
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What the user selected before triggering an action.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ActionInput {
    /// The Windows executable to run, only used by [`Action::RunExecutable`].
    pub executable: Option<PathBuf>,
    /// The prefix directory to use, if any. A relative path is resolved against the current
    /// directory of the launcher, not the one of the launched program.
    pub prefix: Option<PathBuf>,
}

/// A request ready to be handed to the launcher.
#[derive(Debug, Clone)]
pub struct PreparedLaunch {
    /// What to launch.
    pub request: LaunchRequest,
    /// A non-fatal problem with the input, the launch is still attempted.
    pub warning: Option<String>,
}

/// The input of an action is not acceptable.
#[derive(Debug, Error)]
pub enum InputError {
    /// No executable was selected.
    #[error("No File Selected")]
    NoInputSelected,
    /// The selected path is not an existing regular file.
    #[error("File Not Found: {}", .0.display())]
    InvalidInput(PathBuf),
    /// The action has no handler.
    #[error("{0} is not supported")]
    Unsupported(Action),
}

/// Turns the input of an action into a launch.
pub type Handler = fn(&Discovery, &ActionInput) -> Result<PreparedLaunch, InputError>;

/// The handlers of all the actions.
#[derive(Clone)]
pub struct ActionTable {
    handlers: BTreeMap<Action, Handler>,
}

impl ActionTable {
    /// Build the table with the handler of every action.
    pub fn new() -> ActionTable {
        let mut handlers: BTreeMap<Action, Handler> = BTreeMap::new();
        handlers.insert(Action::RunExecutable, run_executable);
        handlers.insert(Action::Configure, configure);
        handlers.insert(Action::Uninstall, uninstall);
        handlers.insert(Action::EditRegistry, edit_registry);
        handlers.insert(Action::Winetricks, winetricks);
        ActionTable { handlers }
    }

    /// The handler of `action`.
    pub fn handler(&self, action: Action) -> Option<Handler> {
        self.handlers.get(&action).copied()
    }

    /// Validate `input` and build the launch for `action`.
    pub fn prepare(
        &self,
        action: Action,
        discovery: &Discovery,
        input: &ActionInput,
    ) -> Result<PreparedLaunch, InputError> {
        let handler = self.handler(action).ok_or(InputError::Unsupported(action))?;
        handler(discovery, input)
    }
}

impl Default for ActionTable {
    fn default() -> Self {
        ActionTable::new()
    }
}

/// The program to run for `tool`: the discovered path or, when missing, the bare name, which the
/// launcher refuses.
fn tool_program(discovery: &Discovery, tool: ToolName) -> PathBuf {
    discovery
        .path(tool)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(tool.command_name()))
}

/// The environment of a launch. The prefix is made absolute since the program may be started in
/// another directory.
fn launch_env(input: &ActionInput) -> Environment {
    let prefix = input
        .prefix
        .as_deref()
        .map(|prefix| std::path::absolute(prefix).unwrap_or_else(|_| prefix.to_path_buf()));
    build_env(prefix.as_deref())
}

fn run_executable(
    discovery: &Discovery,
    input: &ActionInput,
) -> Result<PreparedLaunch, InputError> {
    let exe = match &input.executable {
        Some(exe) if !exe.as_os_str().is_empty() => exe,
        _ => return Err(InputError::NoInputSelected),
    };
    let exe = std::path::absolute(exe).map_err(|_| InputError::InvalidInput(exe.clone()))?;
    if !exe.is_file() {
        return Err(InputError::InvalidInput(exe));
    }
    let file_name = exe
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let warning = match detect_exe(&exe) {
        Ok(Some(format)) if format.is_windows() => None,
        Ok(format) => {
            debug!("{} detected as {:?}", exe.display(), format);
            Some(format!("'{}' may not be an executable.", file_name))
        }
        Err(e) => {
            warn!("Cannot check the format of {}: {:?}", exe.display(), e);
            Some(format!("'{}' may not be an executable.", file_name))
        }
    };
    let mut request = LaunchRequest::new(
        tool_program(discovery, ToolName::Wine),
        launch_env(input),
        format!("'{}'", file_name),
    )
    .arg(exe.as_os_str());
    if let Some(parent) = exe.parent() {
        request = request.current_dir(parent);
    }
    Ok(PreparedLaunch { request, warning })
}

/// `wine <subcommand>` in the default working directory.
fn wine_tool(
    discovery: &Discovery,
    input: &ActionInput,
    subcommand: &str,
    action: Action,
) -> PreparedLaunch {
    let request = LaunchRequest::new(
        tool_program(discovery, ToolName::Wine),
        launch_env(input),
        action.label(),
    )
    .arg(subcommand);
    PreparedLaunch {
        request,
        warning: None,
    }
}

fn configure(discovery: &Discovery, input: &ActionInput) -> Result<PreparedLaunch, InputError> {
    Ok(wine_tool(discovery, input, "winecfg", Action::Configure))
}

fn uninstall(discovery: &Discovery, input: &ActionInput) -> Result<PreparedLaunch, InputError> {
    Ok(wine_tool(discovery, input, "uninstaller", Action::Uninstall))
}

fn edit_registry(
    discovery: &Discovery,
    input: &ActionInput,
) -> Result<PreparedLaunch, InputError> {
    Ok(wine_tool(discovery, input, "regedit", Action::EditRegistry))
}

fn winetricks(discovery: &Discovery, input: &ActionInput) -> Result<PreparedLaunch, InputError> {
    let request = LaunchRequest::new(
        tool_program(discovery, ToolName::Winetricks),
        launch_env(input),
        Action::Winetricks.label(),
    );
    Ok(PreparedLaunch {
        request,
        warning: None,
    })
}
