use clap::{Parser, Subcommand};

use crate::opt::{LoggerOpt, PrefixOpt, LONG_VERSION};
use crate::tools::gen_autocompletion::GenAutocompletionOpt;
use crate::ActionInput;

#[derive(Parser, Debug)]
#[clap(name = "wine-launcher-tools", long_version = LONG_VERSION)]
pub struct Opt {
    #[clap(flatten)]
    pub logger: LoggerOpt,

    /// Which tool to use
    #[clap(subcommand)]
    pub tool: Tool,
}

#[derive(Subcommand, Debug)]
pub enum Tool {
    /// Open the Wine configuration panel (wine winecfg)
    Winecfg(LaunchToolOpt),
    /// Open the Wine program uninstaller (wine uninstaller)
    Uninstaller(LaunchToolOpt),
    /// Open the Windows registry editor (wine regedit)
    Regedit(LaunchToolOpt),
    /// Open winetricks, for installing runtime components into the prefix
    Winetricks(LaunchToolOpt),
    /// Show which tools were found and which actions are available
    Status(StatusOpt),
    /// Generate the autocompletion files for the shell
    GenAutocompletion(GenAutocompletionOpt),
}

#[derive(Parser, Debug, Clone)]
pub struct LaunchToolOpt {
    #[clap(flatten)]
    pub prefix: PrefixOpt,
}

#[derive(Parser, Debug, Clone)]
pub struct StatusOpt {
    /// Produce JSON output.
    #[clap(long, short)]
    pub json: bool,
}

impl LaunchToolOpt {
    /// The input of the launched action.
    pub fn action_input(&self) -> ActionInput {
        ActionInput {
            executable: None,
            prefix: self.prefix.prefix(),
        }
    }
}
