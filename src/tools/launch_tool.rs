use anyhow::Error;

use crate::tools::opt::LaunchToolOpt;
use crate::{run_action, Action};

pub fn main_launch_tool(action: Action, opt: LaunchToolOpt) -> Result<(), Error> {
    run_action(action, &opt.action_input())?;
    Ok(())
}
