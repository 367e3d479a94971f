use clap::Parser;
use color_eyre::eyre::Result;
use std::process::ExitCode;

use qsskit::cli::Cli;
use qsskit::{commands, logging};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    commands::run(cli)
}
