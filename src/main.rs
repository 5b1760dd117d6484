use clap::Parser;

use wine_launcher::error::NiceError;
use wine_launcher::main_local;
use wine_launcher::Opt;

fn main() {
    let opt = Opt::parse();
    opt.logger.enable_log();

    main_local(opt).nice_unwrap()
}
