use std::ffi::OsString;
use std::path::{Path, PathBuf};

use nix::unistd::{access, AccessFlags};

/// The strategy that found a tool.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// The `which`-like query.
    PathQuery,
    /// One of the platform-conventional binary directories.
    ConventionalDir,
    /// The manual scan of the `PATH` segments.
    PathScan,
}

/// A query that resolves a command name to a path, like the `which` command does.
pub trait PathQuery {
    /// Resolve `name`, returning `None` if the command is unknown.
    fn query(&self, name: &str) -> Option<PathBuf>;
}

/// [`PathQuery`] backed by the `which` crate.
#[derive(Debug, Clone)]
pub struct WhichQuery {
    /// The value of `PATH` to search in.
    path: Option<OsString>,
    /// Directory against which relative `PATH` entries are resolved.
    cwd: PathBuf,
}

/// A [`PathQuery`] that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoQuery;

/// Finds the external tools on the host.
///
/// The default locator uses the process' `PATH` and the conventional directories of the current
/// platform. Every strategy can be replaced, which is what the tests do to avoid depending on
/// the host.
pub struct Locator {
    /// Strategy 1.
    query: Box<dyn PathQuery>,
    /// Strategy 2.
    conventional_dirs: Vec<PathBuf>,
    /// Strategy 3, the raw value of `PATH`.
    search_path: Option<OsString>,
}

/// The binary directories where the tools are usually installed on this platform.
pub fn conventional_dirs() -> &'static [&'static str] {
    if cfg!(target_os = "macos") {
        &["/usr/local/bin/", "/opt/homebrew/bin/"]
    } else if cfg!(target_os = "linux") {
        &["/usr/bin/", "/bin/", "/usr/local/bin/"]
    } else {
        &[]
    }
}

/// Whether `path` is a regular file that the current user can execute.
pub fn is_executable<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    path.is_file() && access(path, AccessFlags::X_OK).is_ok()
}

impl WhichQuery {
    /// Search the commands in the given `PATH` value.
    pub fn new(path: Option<OsString>) -> WhichQuery {
        WhichQuery {
            path,
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")),
        }
    }
}

impl PathQuery for WhichQuery {
    fn query(&self, name: &str) -> Option<PathBuf> {
        let path = self.path.as_ref()?;
        match which::which_in(name, Some(path), &self.cwd) {
            Ok(found) => Some(found),
            Err(e) => {
                trace!("which({}) failed: {}", name, e);
                None
            }
        }
    }
}

impl PathQuery for NoQuery {
    fn query(&self, _name: &str) -> Option<PathBuf> {
        None
    }
}

impl Default for Locator {
    fn default() -> Self {
        Locator::from_env()
    }
}

impl Locator {
    /// A locator that only uses `query`: no conventional directories and no `PATH` scan.
    pub fn new<Q: PathQuery + 'static>(query: Q) -> Locator {
        Locator {
            query: Box::new(query),
            conventional_dirs: Vec::new(),
            search_path: None,
        }
    }

    /// The locator for the current process and platform.
    pub fn from_env() -> Locator {
        let path = std::env::var_os("PATH");
        Locator::new(WhichQuery::new(path.clone()))
            .conventional_dirs(conventional_dirs().iter().copied())
            .search_path(path)
    }

    /// Replace the list of conventional directories probed by the second strategy.
    pub fn conventional_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.conventional_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the `PATH` value scanned by the third strategy.
    pub fn search_path<S: Into<OsString>>(mut self, path: Option<S>) -> Self {
        self.search_path = path.map(Into::into);
        self
    }

    /// Find the absolute path of the command `name`, if any.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        self.locate_with_strategy(name).map(|(path, _)| path)
    }

    /// Like [`Locator::locate`], but also tell which strategy found the command.
    pub fn locate_with_strategy(&self, name: &str) -> Option<(PathBuf, Strategy)> {
        if let Some(path) = self.query.query(name) {
            return Some((path, Strategy::PathQuery));
        }
        if let Some(path) = self.probe_dirs(name, self.conventional_dirs.iter()) {
            return Some((path, Strategy::ConventionalDir));
        }
        let segments = self
            .search_path
            .as_ref()
            .map(std::env::split_paths)
            .into_iter()
            .flatten()
            .filter(|segment| segment.is_absolute())
            .collect::<Vec<_>>();
        if let Some(path) = self.probe_dirs(name, segments.iter()) {
            return Some((path, Strategy::PathScan));
        }
        None
    }

    /// Return the first `dir/name` that is executable.
    fn probe_dirs<'a, I>(&self, name: &str, dirs: I) -> Option<PathBuf>
    where
        I: Iterator<Item = &'a PathBuf>,
    {
        dirs.map(|dir| dir.join(name)).find(|candidate| {
            let found = is_executable(candidate);
            trace!("Probing {}: {}", candidate.display(), found);
            found
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    use speculoos::prelude::*;
    use tempfile::TempDir;

    use super::*;

    fn fake_tool(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&path, Permissions::from_mode(mode)).unwrap();
        path
    }

    /// A query that always answers with the same path.
    struct FixedQuery(PathBuf);

    impl PathQuery for FixedQuery {
        fn query(&self, _name: &str) -> Option<PathBuf> {
            Some(self.0.clone())
        }
    }

    #[test]
    fn test_missing_everywhere() {
        let tmpdir = TempDir::new().unwrap();
        let locator = Locator::new(WhichQuery::new(Some(tmpdir.path().into())))
            .conventional_dirs([tmpdir.path()])
            .search_path(Some(tmpdir.path()));
        let found = locator.locate("wine");
        assert_that!(found).is_none();
    }

    #[test]
    fn test_which_query() {
        let tmpdir = TempDir::new().unwrap();
        let wine = fake_tool(tmpdir.path(), "wine", 0o755);
        let locator = Locator::new(WhichQuery::new(Some(tmpdir.path().into())));
        assert_eq!(
            locator.locate_with_strategy("wine"),
            Some((wine, Strategy::PathQuery))
        );
    }

    #[test]
    fn test_conventional_dir() {
        let tmpdir = TempDir::new().unwrap();
        let wine = fake_tool(tmpdir.path(), "wine", 0o755);
        let locator = Locator::new(NoQuery).conventional_dirs([tmpdir.path()]);
        assert_eq!(
            locator.locate_with_strategy("wine"),
            Some((wine, Strategy::ConventionalDir))
        );
    }

    #[test]
    fn test_path_scan() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let winetricks = fake_tool(second.path(), "winetricks", 0o755);
        let path = std::env::join_paths([first.path(), second.path()]).unwrap();
        let locator = Locator::new(NoQuery).search_path(Some(path));
        assert_eq!(
            locator.locate_with_strategy("winetricks"),
            Some((winetricks, Strategy::PathScan))
        );
    }

    #[test]
    fn test_first_strategy_wins() {
        let query_dir = TempDir::new().unwrap();
        let conventional = TempDir::new().unwrap();
        let from_query = fake_tool(query_dir.path(), "wine", 0o755);
        fake_tool(conventional.path(), "wine", 0o755);
        let locator = Locator::new(FixedQuery(from_query.clone()))
            .conventional_dirs([conventional.path()])
            .search_path(Some(conventional.path()));
        assert_eq!(
            locator.locate_with_strategy("wine"),
            Some((from_query, Strategy::PathQuery))
        );
    }

    #[test]
    fn test_conventional_dir_before_path_scan() {
        let conventional = TempDir::new().unwrap();
        let on_path = TempDir::new().unwrap();
        let wine = fake_tool(conventional.path(), "wine", 0o755);
        fake_tool(on_path.path(), "wine", 0o755);
        let locator = Locator::new(NoQuery)
            .conventional_dirs([conventional.path()])
            .search_path(Some(on_path.path()));
        let found = locator.locate("wine");
        assert_that!(found).is_some().is_equal_to(wine);
    }

    #[test]
    fn test_not_executable_is_skipped() {
        let tmpdir = TempDir::new().unwrap();
        fake_tool(tmpdir.path(), "wine", 0o644);
        let locator = Locator::new(NoQuery)
            .conventional_dirs([tmpdir.path()])
            .search_path(Some(tmpdir.path()));
        let found = locator.locate("wine");
        assert_that!(found).is_none();
    }

    #[test]
    fn test_directory_is_skipped() {
        let tmpdir = TempDir::new().unwrap();
        std::fs::create_dir(tmpdir.path().join("wine")).unwrap();
        let locator = Locator::new(NoQuery).conventional_dirs([tmpdir.path()]);
        let found = locator.locate("wine");
        assert_that!(found).is_none();
    }

    #[test]
    fn test_relative_path_segments_are_skipped() {
        let locator = Locator::new(NoQuery).search_path(Some("::.:relative/bin"));
        let found = locator.locate("sh");
        assert_that!(found).is_none();
    }
}
