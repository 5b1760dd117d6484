use clap::Parser;

use wine_launcher::error::NiceError;
use wine_launcher::tools::gen_autocompletion::main_get_autocompletion;
use wine_launcher::tools::launch_tool::main_launch_tool;
use wine_launcher::tools::opt::{Opt, Tool};
use wine_launcher::tools::status::main_status;
use wine_launcher::Action;

fn main() {
    let base_opt = Opt::parse();
    base_opt.logger.enable_log();

    match base_opt.tool {
        Tool::Winecfg(opt) => main_launch_tool(Action::Configure, opt),
        Tool::Uninstaller(opt) => main_launch_tool(Action::Uninstall, opt),
        Tool::Regedit(opt) => main_launch_tool(Action::EditRegistry, opt),
        Tool::Winetricks(opt) => main_launch_tool(Action::Winetricks, opt),
        Tool::Status(opt) => main_status(opt),
        Tool::GenAutocompletion(opt) => main_get_autocompletion(opt),
    }
    .nice_unwrap()
}
