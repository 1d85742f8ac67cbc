//! bb-run-bot - build-bot dispatcher
//!
//! Looks up the steps configured for a bot id and runs them in order,
//! annotating step boundaries for the buildbot log viewer.

use bb_run_bot::commands::Cli;
use bb_run_bot::common::logging;
use bb_run_bot::{cli, Error};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

fn main() {
    logging::init_cli();

    let args = Cli::parse();

    let code = match cli::run(args, std::io::stdout().lock()) {
        Ok(code) => code,
        Err(e @ Error::MissingBotId) => Cli::command()
            .error(ErrorKind::MissingRequiredArgument, e)
            .exit(),
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    };

    std::process::exit(code);
}
