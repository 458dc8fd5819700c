//! Trolley CLI

use std::process::ExitCode;

use clap::Parser;

mod cli;

#[expect(clippy::print_stderr, reason = "Final error report for the shopper")]
fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    match cli.run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{error:#}");

            ExitCode::FAILURE
        }
    }
}
