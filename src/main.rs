//! Binary entrypoint for the `gitdraw` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match gitdraw::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
