#![allow(dead_code)]

use std::fs::Permissions;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use termcolor::Buffer;

use wine_launcher::Session;
use wine_launcher_exec::Spawner;

pub fn setup() {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_nanos()
        .is_test(true)
        .try_init();
}

/// Create an executable shell script named `name` inside `dir`.
pub fn fake_tool(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
    std::fs::set_permissions(&path, Permissions::from_mode(0o755)).unwrap();
    path
}

/// Create a file with a DOS header named `name` inside `dir`.
pub fn fake_exe(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"MZ\x90\x00\x03\x00\x00\x00\x04\x00").unwrap();
    path
}

/// What has been written on the status line of the session.
pub fn status_output<S: Spawner>(session: &Session<S, Buffer>) -> Vec<String> {
    String::from_utf8_lossy(session.status().get_ref().as_slice())
        .lines()
        .map(String::from)
        .collect()
}
