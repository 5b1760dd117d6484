use std::path::Path;
use std::process::Command;

/// The output of `git describe`, if this is a git checkout with at least one tag.
fn git_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--dirty=+dirty", "--long"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let revision = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if revision.is_empty() {
        None
    } else {
        Some(revision)
    }
}

fn main() {
    let out_dir = std::env::var("OUT_DIR").expect("missing OUT_DIR");
    let version_file_path = Path::new(&out_dir).join("version.txt");

    let mut version = env!("CARGO_PKG_VERSION").to_string();
    if let Some(revision) = git_revision() {
        version = format!("{version}\n\nRevision: {revision}");
    }
    if let Err(e) = std::fs::write(&version_file_path, version) {
        panic!(
            "Failed to write the version file at {}: {}",
            version_file_path.display(),
            e
        );
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    println!("cargo:rerun-if-changed=.git/index");
}
