use std::ffi::OsString;
use std::io::ErrorKind;
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

use crate::Environment;

/// What the launcher asks the OS to start.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SpawnCommand {
    /// The command line, `argv[0]` is the program.
    pub argv: Vec<OsString>,
    /// The full environment of the new process, nothing else is inherited.
    pub env: Environment,
    /// The working directory of the new process, if any.
    pub current_dir: Option<PathBuf>,
    /// Whether the process should be detached from the launcher's session.
    pub detached: bool,
}

/// Something able to start a process and forget about it.
pub trait Spawner {
    /// Start the process described by `command`, returning its PID as soon as the OS accepted it.
    ///
    /// Implementations must not wait for the process to exit.
    fn spawn(&self, command: &SpawnCommand) -> std::io::Result<u32>;
}

/// Spawns real processes.
///
/// Each child is handed to a thread that waits for it and discards the exit status, so a
/// long-running launcher does not leave zombie processes behind.
#[derive(Default, Debug, Clone, Copy)]
pub struct OsSpawner;

impl Spawner for OsSpawner {
    fn spawn(&self, command: &SpawnCommand) -> std::io::Result<u32> {
        let (program, args) = command
            .argv
            .split_first()
            .ok_or_else(|| std::io::Error::new(ErrorKind::InvalidInput, "Empty command line"))?;
        let mut cmd = Command::new(program);
        cmd.args(args)
            .env_clear()
            .envs(&command.env)
            .stdin(Stdio::null());
        if let Some(dir) = &command.current_dir {
            cmd.current_dir(dir);
        }
        if command.detached {
            // SAFETY: setsid is async-signal-safe and nothing is allocated between fork and exec.
            unsafe {
                cmd.pre_exec(|| {
                    nix::unistd::setsid()?;
                    Ok(())
                });
            }
        }
        trace!("Spawning {:?}", cmd);
        let mut child = cmd.spawn()?;
        let pid = child.id();
        let reaper = std::thread::Builder::new()
            .name(format!("Reaper of {}", pid))
            .spawn(move || match child.wait() {
                Ok(status) => debug!("Process {} exited with {}", pid, status),
                Err(e) => warn!("Cannot wait for process {}: {}", pid, e),
            });
        // the process is running anyway, the launch succeeded
        if let Err(e) = reaper {
            warn!("Process {} will not be reaped: {}", pid, e);
        }
        Ok(pid)
    }
}

/// A fake spawner that doesn't spawn anything: it remembers the commands it has been asked to
/// start and always succeeds.
#[derive(Default, Debug, Clone)]
pub struct RecordingSpawner {
    /// The commands received so far.
    commands: Arc<Mutex<Vec<SpawnCommand>>>,
}

impl RecordingSpawner {
    /// Make a new `RecordingSpawner` with no recorded commands.
    pub fn new() -> RecordingSpawner {
        RecordingSpawner::default()
    }

    /// The commands received so far, in order.
    pub fn commands(&self) -> Vec<SpawnCommand> {
        self.commands.lock().unwrap().clone()
    }
}

impl Spawner for RecordingSpawner {
    fn spawn(&self, command: &SpawnCommand) -> std::io::Result<u32> {
        let mut commands = self.commands.lock().unwrap();
        commands.push(command.clone());
        Ok(commands.len() as u32)
    }
}

/// A fake spawner that doesn't spawn anything and always fails with the given kind of error.
#[derive(Debug, Clone, Copy)]
pub struct FailingSpawner(pub ErrorKind);

impl Spawner for FailingSpawner {
    fn spawn(&self, command: &SpawnCommand) -> std::io::Result<u32> {
        Err(std::io::Error::new(
            self.0,
            format!("Refusing to spawn {:?}", command.argv.first()),
        ))
    }
}

impl<S: Spawner + ?Sized> Spawner for &S {
    fn spawn(&self, command: &SpawnCommand) -> std::io::Result<u32> {
        (**self).spawn(command)
    }
}

impl<S: Spawner + ?Sized> Spawner for Arc<S> {
    fn spawn(&self, command: &SpawnCommand) -> std::io::Result<u32> {
        self.as_ref().spawn(command)
    }
}
