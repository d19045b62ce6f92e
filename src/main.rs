use std::process::ExitCode;

use clap::Parser;

use courtchess::cli::command_loop::run_stdio_loop;
use courtchess::config::{init_tracing, CliArgs};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config = args.sync_config();
    if let Err(err) = init_tracing(&config) {
        eprintln!("courtchess: {err}");
        return ExitCode::FAILURE;
    }

    match run_stdio_loop(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("courtchess: {err}");
            ExitCode::FAILURE
        }
    }
}
