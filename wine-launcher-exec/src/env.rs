use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::Path;

/// The variable that redirects the private runtime directory of Wine.
pub const WINEPREFIX: &str = "WINEPREFIX";

/// The environment variables passed to a launched process.
pub type Environment = BTreeMap<OsString, OsString>;

/// Build the environment for a launch: a copy of the environment of the current process, with
/// `WINEPREFIX` set to `prefix` if it is an existing directory.
///
/// When `prefix` is not given, or it is not a directory, the environment is left untouched and
/// Wine falls back to its default location (or to an inherited `WINEPREFIX`).
pub fn build_env(prefix: Option<&Path>) -> Environment {
    build_env_from(std::env::vars_os(), prefix)
}

/// Like [`build_env`], but starting from the variables in `base`.
pub fn build_env_from<I>(base: I, prefix: Option<&Path>) -> Environment
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut env: Environment = base.into_iter().collect();
    match prefix {
        Some(prefix) if prefix.is_dir() => {
            debug!("Using {}={}", WINEPREFIX, prefix.display());
            env.insert(WINEPREFIX.into(), prefix.as_os_str().to_owned());
        }
        Some(prefix) => {
            warn!(
                "{} is not a directory, {} is left unchanged",
                prefix.display(),
                WINEPREFIX
            );
        }
        None => {}
    }
    env
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn base() -> Vec<(OsString, OsString)> {
        vec![
            ("HOME".into(), "/home/u".into()),
            ("PATH".into(), "/usr/bin:/bin".into()),
        ]
    }

    #[test]
    fn test_no_prefix() {
        let env = build_env_from(base(), None);
        assert_eq!(env, base().into_iter().collect::<Environment>());
    }

    #[test]
    fn test_existing_prefix() {
        let tmpdir = TempDir::new().unwrap();
        let env = build_env_from(base(), Some(tmpdir.path()));
        let mut expected: Environment = base().into_iter().collect();
        expected.insert(WINEPREFIX.into(), tmpdir.path().into());
        assert_eq!(env, expected);
    }

    #[test]
    fn test_prefix_overrides_inherited_value() {
        let tmpdir = TempDir::new().unwrap();
        let mut inherited = base();
        inherited.push((WINEPREFIX.into(), "/home/u/.wine".into()));
        let env = build_env_from(inherited, Some(tmpdir.path()));
        assert_eq!(env.len(), 3);
        assert_eq!(
            env.get(OsStr::new(WINEPREFIX)).map(OsString::as_os_str),
            Some(tmpdir.path().as_os_str())
        );
    }

    #[test]
    fn test_nonexistent_prefix() {
        let tmpdir = TempDir::new().unwrap();
        let missing = tmpdir.path().join("missing");
        let env = build_env_from(base(), Some(&missing));
        assert_eq!(env, build_env_from(base(), None));
    }

    #[test]
    fn test_file_prefix() {
        let tmpdir = TempDir::new().unwrap();
        let file = tmpdir.path().join("file");
        std::fs::write(&file, "").unwrap();
        let env = build_env_from(base(), Some(&file));
        assert_eq!(env, build_env_from(base(), None));
    }

    #[test]
    fn test_process_environment() {
        let env = build_env(None);
        assert_eq!(env, std::env::vars_os().collect::<Environment>());
    }
}
