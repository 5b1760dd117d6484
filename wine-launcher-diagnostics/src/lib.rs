//! Rendering of the messages shown to the user when an action cannot be completed.
//!
//! A [`Diagnostic`] is the terminal counterpart of a message dialog: a title, an optional
//! explanation and an optional hint on how to fix the problem.

use std::fmt::{Display, Formatter};

use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Warning,
    Error,
}

impl DiagnosticLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticLevel::Error => "Error",
            DiagnosticLevel::Warning => "Warning",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DiagnosticLevel::Warning => Color::BrightYellow,
            DiagnosticLevel::Error => Color::BrightRed,
        }
    }
}

impl Display for DiagnosticLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    level: DiagnosticLevel,
    title: String,
    note: Option<String>,
    help: Option<String>,
}

impl Diagnostic {
    pub fn error(title: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            title: title.into(),
            note: None,
            help: None,
        }
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            title: title.into(),
            note: None,
            help: None,
        }
    }

    /// Attach the secondary text of the message. It may span multiple lines.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn print(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let level = self.level.as_str();
        let pad = level.len();
        writeln!(
            f,
            "{}: {}",
            level.color(self.level.color()).bold(),
            self.title
        )?;
        if let Some(note) = &self.note {
            write!(f, "{:>pad$}: ", "Note".bold(), pad = pad)?;
            let mut lines = note.lines();
            if let Some(line) = lines.next() {
                writeln!(f, "{}", line)?;
            }
            for line in lines {
                writeln!(f, "{:>pad$}  {}", "", line, pad = pad)?;
            }
        }
        if let Some(help) = &self.help {
            writeln!(f, "{:>pad$}: {}", "Help".bold(), help, pad = pad)?;
        }
        Ok(())
    }

    /// Show the diagnostic to the user, on stderr.
    pub fn emit(&self) {
        eprint!("{}", self);
    }

    pub fn level(&self) -> DiagnosticLevel {
        self.level
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.print(f)
    }
}
