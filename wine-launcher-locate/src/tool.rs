use std::ffi::OsStr;
use std::fmt::{Display, Formatter};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// The external tools the launcher knows about.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolName {
    /// The Windows compatibility runner.
    Wine,
    /// The helper script for installing runtime components into a prefix.
    Winetricks,
}

impl ToolName {
    /// All the known tools, in discovery order.
    pub const ALL: [ToolName; 2] = [ToolName::Wine, ToolName::Winetricks];

    /// The name of the command on the host.
    pub fn command_name(&self) -> &'static str {
        match self {
            ToolName::Wine => "wine",
            ToolName::Winetricks => "winetricks",
        }
    }

    /// Human readable name of the tool.
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolName::Wine => "Wine",
            ToolName::Winetricks => "Winetricks",
        }
    }

    /// Match the basename of `program` against the known tool names.
    ///
    /// `/usr/bin/wine` and `wine` both map to [`ToolName::Wine`]; anything else is `None`.
    pub fn from_program<P: AsRef<Path>>(program: P) -> Option<ToolName> {
        let basename = program.as_ref().file_name()?;
        ToolName::ALL
            .into_iter()
            .find(|tool| basename == OsStr::new(tool.command_name()))
    }
}

impl Display for ToolName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.command_name())
    }
}
