use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::ActionInput;

/// The version shown by `--version`, including the git revision when available.
pub(crate) const LONG_VERSION: &str = include_str!(concat!(env!("OUT_DIR"), "/version.txt"));

#[derive(Parser, Debug)]
#[clap(name = "wine-launcher", long_version = LONG_VERSION)]
pub struct Opt {
    #[clap(flatten)]
    pub logger: LoggerOpt,

    #[clap(flatten)]
    pub prefix: PrefixOpt,

    /// The Windows executable to run.
    ///
    /// Relative paths are resolved against the current directory. The program is started inside
    /// the directory that contains it.
    pub executable: Option<OsString>,
}

#[derive(Parser, Debug, Clone)]
pub struct LoggerOpt {
    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct PrefixOpt {
    /// The Wine prefix to use, a directory with a separate Windows installation.
    ///
    /// It is ignored if the directory does not exist. Without this option the inherited
    /// WINEPREFIX, or Wine's default location, is used.
    #[clap(long = "prefix", short = 'p')]
    pub prefix: Option<OsString>,
}

impl Opt {
    /// The input of the actions, as selected from the command line.
    pub fn action_input(&self) -> ActionInput {
        ActionInput {
            executable: self.executable.as_deref().and_then(non_blank),
            prefix: self.prefix.prefix(),
        }
    }
}

impl LoggerOpt {
    /// The log level selected with `-v`, if any.
    pub fn level(&self) -> Option<LevelFilter> {
        match self.verbose {
            0 => None,
            1 => Some(LevelFilter::Info),
            2 => Some(LevelFilter::Debug),
            _ => Some(LevelFilter::Trace),
        }
    }

    /// Initialize the global logger.
    ///
    /// The process environment is not touched: it is copied verbatim into the launched programs.
    pub fn enable_log(&self) {
        let mut builder = env_logger::Builder::from_default_env();
        if let Some(level) = self.level() {
            builder.filter_level(level);
        }
        builder.format_timestamp_nanos().init();
        better_panic::install();
    }
}

impl PrefixOpt {
    /// The selected prefix, with the surrounding whitespace removed. An empty value is the same
    /// as no value.
    pub fn prefix(&self) -> Option<PathBuf> {
        self.prefix.as_deref().and_then(non_blank)
    }
}

/// `value` as a path, without the surrounding whitespace. Paths that are not valid UTF-8 are kept
/// as they are.
fn non_blank(value: &OsStr) -> Option<PathBuf> {
    let path = match value.to_str() {
        Some(value) => PathBuf::from(value.trim()),
        None => PathBuf::from(value),
    };
    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_trimmed() {
        let opt = Opt::parse_from(["wine-launcher", "--prefix", "  /home/u/.wine-games \n"]);
        assert_eq!(
            opt.prefix.prefix(),
            Some(PathBuf::from("/home/u/.wine-games"))
        );
    }

    #[test]
    fn test_empty_prefix() {
        let opt = Opt::parse_from(["wine-launcher", "--prefix", "   "]);
        assert_eq!(opt.prefix.prefix(), None);
        let opt = Opt::parse_from(["wine-launcher"]);
        assert_eq!(opt.prefix.prefix(), None);
    }

    #[test]
    fn test_action_input() {
        let opt = Opt::parse_from(["wine-launcher", "-vv", "app.exe"]);
        assert_eq!(opt.logger.level(), Some(LevelFilter::Debug));
        let input = opt.action_input();
        assert_eq!(input.executable, Some(PathBuf::from("app.exe")));
        assert_eq!(input.prefix, None);
    }

    #[test]
    fn test_blank_executable() {
        let opt = Opt::parse_from(["wine-launcher", " "]);
        assert_eq!(opt.action_input().executable, None);
    }

    #[test]
    fn test_non_utf8_paths() {
        use std::os::unix::ffi::OsStrExt;

        let prefix = OsStr::from_bytes(b" /tmp/pfx-\xff");
        let exe = OsStr::from_bytes(b"setup-\xfe.exe");
        let opt = Opt::parse_from([OsStr::new("wine-launcher"), OsStr::new("-p"), prefix, exe]);
        let input = opt.action_input();
        assert_eq!(input.prefix, Some(PathBuf::from(prefix)));
        assert_eq!(input.executable, Some(PathBuf::from(exe)));
    }

    #[test]
    fn test_verbosity() {
        let opt = Opt::parse_from(["wine-launcher"]);
        assert_eq!(opt.logger.level(), None);
        let opt = Opt::parse_from(["wine-launcher", "-vvvv"]);
        assert_eq!(opt.logger.level(), Some(LevelFilter::Trace));
    }
}
