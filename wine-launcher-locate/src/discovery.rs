use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Locator, ToolName};

/// Where the external tools were found, if anywhere.
///
/// It is built once at startup and never changes afterwards: a tool installed while the launcher
/// runs is only seen after a restart.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Discovery {
    /// Path of the `wine` executable.
    wine: Option<PathBuf>,
    /// Path of the `winetricks` executable.
    winetricks: Option<PathBuf>,
}

impl Discovery {
    /// Search all the known tools using `locator`.
    pub fn discover(locator: &Locator) -> Discovery {
        let mut discovery = Discovery::default();
        for tool in ToolName::ALL {
            let found = locator.locate_with_strategy(tool.command_name());
            match &found {
                Some((path, strategy)) => {
                    debug!("Found {} at {} ({:?})", tool, path.display(), strategy)
                }
                None => debug!("{} not found", tool),
            }
            *discovery.slot(tool) = found.map(|(path, _)| path);
        }
        discovery
    }

    /// Build a discovery result from known paths.
    pub fn from_paths<W, T>(wine: Option<W>, winetricks: Option<T>) -> Discovery
    where
        W: Into<PathBuf>,
        T: Into<PathBuf>,
    {
        Discovery {
            wine: wine.map(Into::into),
            winetricks: winetricks.map(Into::into),
        }
    }

    /// The path of `tool`, if it was found.
    pub fn path(&self, tool: ToolName) -> Option<&Path> {
        match tool {
            ToolName::Wine => self.wine.as_deref(),
            ToolName::Winetricks => self.winetricks.as_deref(),
        }
    }

    /// Whether `tool` was found.
    pub fn is_available(&self, tool: ToolName) -> bool {
        self.path(tool).is_some()
    }

    fn slot(&mut self, tool: ToolName) -> &mut Option<PathBuf> {
        match tool {
            ToolName::Wine => &mut self.wine,
            ToolName::Winetricks => &mut self.winetricks,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    use tempfile::TempDir;

    use crate::NoQuery;

    use super::*;

    #[test]
    fn test_discover() {
        let tmpdir = TempDir::new().unwrap();
        let wine = tmpdir.path().join("wine");
        std::fs::write(&wine, "").unwrap();
        std::fs::set_permissions(&wine, Permissions::from_mode(0o755)).unwrap();

        let locator = Locator::new(NoQuery).conventional_dirs([tmpdir.path()]);
        let discovery = Discovery::discover(&locator);
        assert_eq!(discovery.path(ToolName::Wine), Some(wine.as_path()));
        assert!(discovery.is_available(ToolName::Wine));
        assert!(!discovery.is_available(ToolName::Winetricks));
    }

    #[test]
    fn test_from_paths() {
        let discovery = Discovery::from_paths(None::<PathBuf>, Some("/usr/bin/winetricks"));
        assert_eq!(discovery.path(ToolName::Wine), None);
        assert_eq!(
            discovery.path(ToolName::Winetricks),
            Some(Path::new("/usr/bin/winetricks"))
        );
    }
}
