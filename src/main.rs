// src/main.rs
#![allow(clippy::multiple_crate_versions)]

use std::{io, process::ExitCode};

use clap::Parser;
use suite_select::{
    EXIT_CONFIGURATION, app,
    args::Args,
    config::RunConfig,
    logging,
    presentation::{write_failures, write_report},
};
use suite_select_shared_kernel::Result;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.output.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            if err.is_configuration() { ExitCode::from(EXIT_CONFIGURATION) } else { ExitCode::FAILURE }
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let config = RunConfig::from_args(args)?;
    let execution = app::execute(&config)?;

    write_report(&mut io::stdout().lock(), &execution.report, config.format)?;
    write_failures(&mut io::stderr().lock(), &execution.report)?;

    match execution.matched {
        Err(err) if config.fail_on_no_match => {
            eprintln!("error: {err}");
            Ok(ExitCode::FAILURE)
        }
        _ => Ok(ExitCode::SUCCESS),
    }
}
