use anyhow::Error;
use termcolor::{ColorChoice, StandardStream};

use wine_launcher_locate::{Discovery, Locator};

use crate::report::StatusReport;
use crate::tools::opt::StatusOpt;

pub fn main_status(opt: StatusOpt) -> Result<(), Error> {
    let discovery = Discovery::discover(&Locator::from_env());
    let report = StatusReport::new(&discovery);
    if opt.json {
        println!("{}", report.to_json()?);
    } else {
        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        report.print(&mut stdout)?;
        for diagnostic in report.diagnostics() {
            diagnostic.emit();
        }
    }
    Ok(())
}
