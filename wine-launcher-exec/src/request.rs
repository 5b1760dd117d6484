use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::Environment;

/// A request to launch a program.
///
/// It lives only for the duration of a single launch.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LaunchRequest {
    /// The program to run, `argv[0]`.
    program: PathBuf,
    /// The arguments after the program.
    args: Vec<OsString>,
    /// The working directory, if different from the launcher's.
    current_dir: Option<PathBuf>,
    /// The full environment of the new process.
    env: Environment,
    /// Human readable name of what is being launched, used in the status messages.
    description: String,
}

/// A program has been launched.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Started {
    /// The process id of the launched program.
    pub pid: u32,
}

impl LaunchRequest {
    /// Make a request for running `program` with the given environment, without arguments.
    pub fn new<P: Into<PathBuf>, S: Into<String>>(
        program: P,
        env: Environment,
        description: S,
    ) -> LaunchRequest {
        LaunchRequest {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            env,
            description: description.into(),
        }
    }

    /// Append an argument.
    pub fn arg<S: Into<OsString>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set the working directory of the launched program.
    pub fn current_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// The program to run.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// The arguments after the program.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// The full command line: the program followed by the arguments.
    pub fn argv(&self) -> Vec<OsString> {
        std::iter::once(self.program.clone().into_os_string())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// The working directory, if any.
    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// The environment of the launched program.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// What is being launched.
    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argv() {
        let request = LaunchRequest::new("/usr/bin/wine", Environment::new(), "Registry Editor")
            .arg("regedit");
        assert_eq!(
            request.argv(),
            vec![OsString::from("/usr/bin/wine"), OsString::from("regedit")]
        );
        assert_eq!(request.working_dir(), None);
        assert_eq!(request.description(), "Registry Editor");
    }
}
