use std::io::ErrorKind;
use std::path::PathBuf;

use itertools::Itertools;
use thiserror::Error;

use wine_launcher_locate::{Discovery, ToolName};

use crate::{LaunchRequest, SpawnCommand, Spawner, Started};

/// Why a launch did not start.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The request names a known tool that was not found on this host.
    #[error("{} is not available, check the installation", .0.display_name())]
    ToolUnavailable(ToolName),
    /// The OS could not find the program.
    #[error("Command not found: '{}'. Check installation.", .program.display())]
    CommandNotFound {
        /// The program that was not found.
        program: PathBuf,
        /// The error reported by the OS.
        #[source]
        source: std::io::Error,
    },
    /// The OS refused to start the program.
    #[error("Failed to launch {description}: {source}")]
    SpawnFailed {
        /// What was being launched.
        description: String,
        /// The error reported by the OS.
        #[source]
        source: std::io::Error,
    },
}

impl LaunchError {
    /// Whether the process creation was attempted and failed, as opposed to being rejected
    /// before reaching the OS.
    pub fn is_launch_failure(&self) -> bool {
        !matches!(self, LaunchError::ToolUnavailable(_))
    }
}

/// Launches the programs, checking them against the discovered tools.
#[derive(Debug)]
pub struct Launcher<'a, S> {
    /// The tools found at startup.
    discovery: &'a Discovery,
    /// Where the processes are actually created.
    spawner: S,
}

impl<'a, S: Spawner> Launcher<'a, S> {
    /// Make a new launcher over the given discovery result.
    pub fn new(discovery: &'a Discovery, spawner: S) -> Launcher<'a, S> {
        Launcher { discovery, spawner }
    }

    /// Start the program of `request` without waiting for it.
    ///
    /// If `argv[0]` is a known tool that was not discovered the spawner is not called at all.
    pub fn launch(&self, request: &LaunchRequest) -> Result<Started, LaunchError> {
        if let Some(tool) = ToolName::from_program(request.program()) {
            if !self.discovery.is_available(tool) {
                warn!("Refusing to launch {}: {} was not found", request.description(), tool);
                return Err(LaunchError::ToolUnavailable(tool));
            }
        }
        let command = SpawnCommand {
            argv: request.argv(),
            env: request.env().clone(),
            current_dir: request.working_dir().map(ToOwned::to_owned),
            detached: true,
        };
        info!(
            "Executing: {}",
            command.argv.iter().map(|arg| arg.to_string_lossy()).join(" ")
        );
        if let Some(dir) = &command.current_dir {
            debug!("Working directory: {}", dir.display());
        }
        match self.spawner.spawn(&command) {
            Ok(pid) => {
                debug!("{} started with pid {}", request.description(), pid);
                Ok(Started { pid })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(LaunchError::CommandNotFound {
                program: request.program().to_owned(),
                source: e,
            }),
            Err(e) => Err(LaunchError::SpawnFailed {
                description: request.description().to_owned(),
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use speculoos::prelude::*;
    use tempfile::TempDir;

    use crate::{build_env_from, Environment, FailingSpawner, OsSpawner, RecordingSpawner};

    use super::*;

    fn wine_only() -> Discovery {
        Discovery::from_paths(Some("/usr/bin/wine"), None::<PathBuf>)
    }

    #[test]
    fn test_undiscovered_tool_is_not_spawned() {
        let discovery = Discovery::default();
        let spawner = RecordingSpawner::new();
        let launcher = Launcher::new(&discovery, &spawner);
        let request = LaunchRequest::new("wine", Environment::new(), "Wine Configuration")
            .arg("winecfg");
        let res = launcher.launch(&request);
        assert!(matches!(res, Err(LaunchError::ToolUnavailable(ToolName::Wine))));
        assert!(!res.unwrap_err().is_launch_failure());
        assert_that!(spawner.commands()).is_empty();
    }

    #[test]
    fn test_missing_winetricks_only_blocks_winetricks() {
        let discovery = wine_only();
        let spawner = RecordingSpawner::new();
        let launcher = Launcher::new(&discovery, &spawner);
        let request = LaunchRequest::new("/usr/bin/winetricks", Environment::new(), "Winetricks");
        let res = launcher.launch(&request);
        assert!(matches!(res, Err(LaunchError::ToolUnavailable(ToolName::Winetricks))));
        let request = LaunchRequest::new("/usr/bin/wine", Environment::new(), "Registry Editor")
            .arg("regedit");
        assert!(launcher.launch(&request).is_ok());
        assert_eq!(spawner.commands().len(), 1);
    }

    #[test]
    fn test_run_executable_command() {
        let discovery = wine_only();
        let spawner = RecordingSpawner::new();
        let launcher = Launcher::new(&discovery, &spawner);
        let env = build_env_from(vec![("HOME".into(), "/home/u".into())], None);
        let request = LaunchRequest::new("/usr/bin/wine", env.clone(), "'app.exe'")
            .arg("/home/u/app.exe")
            .current_dir("/home/u");
        let started = launcher.launch(&request).unwrap();
        assert_eq!(started.pid, 1);

        let commands = spawner.commands();
        assert_eq!(
            commands,
            vec![SpawnCommand {
                argv: vec![
                    OsString::from("/usr/bin/wine"),
                    OsString::from("/home/u/app.exe")
                ],
                env,
                current_dir: Some(PathBuf::from("/home/u")),
                detached: true,
            }]
        );
    }

    #[test]
    fn test_unknown_program_is_not_checked() {
        let discovery = Discovery::default();
        let spawner = RecordingSpawner::new();
        let launcher = Launcher::new(&discovery, &spawner);
        let request = LaunchRequest::new("/bin/true", Environment::new(), "true");
        assert!(launcher.launch(&request).is_ok());
    }

    #[test]
    fn test_not_found_error() {
        let discovery = wine_only();
        let launcher = Launcher::new(&discovery, FailingSpawner(ErrorKind::NotFound));
        let request = LaunchRequest::new("/usr/bin/wine", Environment::new(), "Wine Uninstaller")
            .arg("uninstaller");
        let err = launcher.launch(&request).unwrap_err();
        assert!(err.is_launch_failure());
        assert_eq!(
            err.to_string(),
            "Command not found: '/usr/bin/wine'. Check installation."
        );
    }

    #[test]
    fn test_spawn_failed_error() {
        let discovery = wine_only();
        let launcher = Launcher::new(&discovery, FailingSpawner(ErrorKind::PermissionDenied));
        let request = LaunchRequest::new("/usr/bin/wine", Environment::new(), "Registry Editor")
            .arg("regedit");
        let err = launcher.launch(&request).unwrap_err();
        assert!(err.is_launch_failure());
        assert_that!(err.to_string()).starts_with("Failed to launch Registry Editor: ");
    }

    #[test]
    fn test_os_spawner_missing_program() {
        let tmpdir = TempDir::new().unwrap();
        let discovery = Discovery::default();
        let launcher = Launcher::new(&discovery, OsSpawner);
        let program = tmpdir.path().join("missing-tool");
        let request = LaunchRequest::new(&program, Environment::new(), "missing-tool");
        let err = launcher.launch(&request).unwrap_err();
        assert!(matches!(err, LaunchError::CommandNotFound { .. }));
    }

    #[test]
    fn test_os_spawner_real_process() {
        if !Path::new("/bin/true").exists() {
            return;
        }
        let discovery = Discovery::default();
        let launcher = Launcher::new(&discovery, OsSpawner);
        let request = LaunchRequest::new("/bin/true", Environment::new(), "true");
        let started = launcher.launch(&request).unwrap();
        assert_that!(started.pid).is_greater_than(0);
    }
}
