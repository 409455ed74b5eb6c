use std::process;

use clap::Parser;
use clap::error::ErrorKind;

use xsd_validate::{Cli, validate};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            process::exit(code);
        }
    };

    // The verdict goes to stdout; the exit status only reflects usage errors.
    validate(&cli.xml_file, &cli.xsd_file);
}
