use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Error};

/// The format of an executable file, recognized from its header.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum ExecutableFormat {
    /// DOS/PE executable, the one Wine is able to run.
    Windows,
    /// Native Linux executable.
    Elf,
    /// Native macOS executable, including the universal ones.
    MachO,
    /// Script with a shebang line.
    Script,
}

impl ExecutableFormat {
    /// Whether this is a file that Wine can run directly.
    pub fn is_windows(&self) -> bool {
        matches!(self, ExecutableFormat::Windows)
    }
}

/// The magic bytes at the start of the executables of the various formats.
const PATTERNS: [(&[u8], ExecutableFormat); 7] = [
    (b"MZ", ExecutableFormat::Windows),
    (b"#!", ExecutableFormat::Script),
    (b"\x7FELF", ExecutableFormat::Elf),
    (b"\xCE\xFA\xED\xFE", ExecutableFormat::MachO),
    (b"\xCF\xFA\xED\xFE", ExecutableFormat::MachO),
    (b"\xBE\xBA\xFE\xCA", ExecutableFormat::MachO),
    (b"\xBF\xBA\xFE\xCA", ExecutableFormat::MachO),
];

/// The length of the longest pattern.
const HEADER_LEN: usize = 4;

/// Given a path to a file, detect the format of the executable from its first bytes.
///
/// - If there is an error opening or reading the file, `Err(_)` is returned.
/// - If the file is not recognized as an executable (this includes files too short to contain a
///   header), `Ok(None)` is returned.
/// - Otherwise `Ok(Some(format))` is returned.
pub fn detect_exe<P: AsRef<Path>>(path: P) -> Result<Option<ExecutableFormat>, Error> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open file {} for detecting exe", path.display()))?;
    let mut header = Vec::with_capacity(HEADER_LEN);
    file.take(HEADER_LEN as u64)
        .read_to_end(&mut header)
        .with_context(|| {
            format!(
                "Failed to read file content of {} for detecting exe",
                path.display()
            )
        })?;
    Ok(PATTERNS
        .iter()
        .find(|(bytes, _)| header.starts_with(bytes))
        .map(|(_, format)| *format))
}
