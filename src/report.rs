use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Error};
use serde::{Deserialize, Serialize};
use termcolor::{Color, ColorSpec, WriteColor};

use wine_launcher_diagnostics::Diagnostic;
use wine_launcher_locate::{Discovery, ToolName};

use crate::Action;

/// The state of the tools on this host and what can be done with them.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Where the tools were found.
    pub tools: Discovery,
    /// Whether each action is enabled.
    pub actions: BTreeMap<Action, bool>,
    /// Where Wine keeps its data when no prefix is selected.
    pub default_prefix: Option<PathBuf>,
}

impl StatusReport {
    /// Build the report from the discovered tools.
    pub fn new(discovery: &Discovery) -> StatusReport {
        let actions = Action::ALL
            .iter()
            .map(|action| {
                let enabled = action
                    .required_tools()
                    .iter()
                    .all(|tool| discovery.is_available(*tool));
                (*action, enabled)
            })
            .collect();
        StatusReport {
            tools: discovery.clone(),
            actions,
            default_prefix: default_prefix(),
        }
    }

    /// One line for each tool, telling whether it is ready.
    pub fn tool_lines(&self) -> Vec<String> {
        ToolName::ALL
            .iter()
            .map(|tool| match self.tools.path(*tool) {
                Some(path) => format!(
                    "{}: Ready ({})",
                    tool.display_name(),
                    path.file_name()
                        .map(|name| name.to_string_lossy())
                        .unwrap_or_else(|| path.to_string_lossy())
                ),
                None => match tool {
                    ToolName::Wine => "Wine not found! Most functions disabled.".to_string(),
                    ToolName::Winetricks => "Winetricks not found (optional tool).".to_string(),
                },
            })
            .collect()
    }

    /// The problems with the installation: missing Wine is an error, missing winetricks only a
    /// warning.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        ToolName::ALL
            .iter()
            .filter(|tool| !self.tools.is_available(**tool))
            .map(|tool| {
                let diagnostic = match tool {
                    ToolName::Wine => Diagnostic::error("Wine not found")
                        .with_note("Running executables and all the Wine tools are disabled."),
                    ToolName::Winetricks => Diagnostic::warning("Winetricks not found")
                        .with_note("Winetricks is optional, only its action is disabled."),
                };
                diagnostic.with_help(format!(
                    "Install {} and make sure it is in your PATH",
                    tool.command_name()
                ))
            })
            .collect()
    }

    /// Print the report in a human readable form.
    pub fn print<W: WriteColor>(&self, stream: &mut W) -> Result<(), Error> {
        let mut bold = ColorSpec::new();
        bold.set_bold(true);
        let mut green = ColorSpec::new();
        green.set_fg(Some(Color::Green));
        let mut red = ColorSpec::new();
        red.set_fg(Some(Color::Red));

        stream.set_color(&bold)?;
        writeln!(stream, "Tools")?;
        stream.reset()?;
        for line in self.tool_lines() {
            writeln!(stream, "  {}", line)?;
        }
        stream.set_color(&bold)?;
        writeln!(stream, "Actions")?;
        stream.reset()?;
        for (action, enabled) in &self.actions {
            write!(stream, "  {:<20} ", action.label())?;
            if *enabled {
                stream.set_color(&green)?;
                writeln!(stream, "enabled")?;
            } else {
                stream.set_color(&red)?;
                writeln!(stream, "disabled")?;
            }
            stream.reset()?;
        }
        if let Some(prefix) = &self.default_prefix {
            stream.set_color(&bold)?;
            write!(stream, "Default prefix:")?;
            stream.reset()?;
            writeln!(stream, " {}", prefix.display())?;
        }
        Ok(())
    }

    /// The report as a JSON string.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).context("Failed to serialize the status report")
    }
}

/// `~/.wine`, the prefix Wine uses when `WINEPREFIX` is not set.
pub fn default_prefix() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".wine"))
}
