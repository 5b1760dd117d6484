//! The auxiliary tools of `wine-launcher-tools`.

pub mod gen_autocompletion;
pub mod launch_tool;
pub mod opt;
pub mod status;
