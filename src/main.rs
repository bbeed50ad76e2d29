use std::process::ExitCode;

use clap::Parser;
use codemine::adapter::inbound::cli::command::Cli;
use codemine::adapter::inbound::cli::{self, diagnostic};

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let args = Cli::parse();
    cli::configure(&args);

    match cli::execute(&args) {
        Ok(()) => ExitCode::from(cli::EXIT_OK),
        Err(e) => {
            diagnostic::report(&e);
            ExitCode::from(cli::exit_code(&e))
        }
    }
}
