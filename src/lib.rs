//! Core library entry for the `gitdraw` CLI.
//!
//! `gitdraw` renders text with a 5x7 pixel font onto the 53x7 grid of a
//! contribution calendar, maps every lit cell to a date of the target year,
//! and creates a repository whose history commits on exactly those dates by
//! streaming a `git fast-import` script.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod draw;
pub mod error;
pub mod font;
pub mod logging;
pub mod plan;
pub mod ports;
pub mod session;
pub mod stream;

use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;

use crate::config::Settings;
use crate::context::ServiceContext;

/// Run the CLI with the provided arguments.
///
/// Help and version requests print their text and succeed.
///
/// # Errors
///
/// Returns an error string when argument parsing fails, settings cannot be
/// loaded, or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion) => {
            err.print().map_err(|e| e.to_string())?;
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };

    logging::init();
    let settings = Settings::load().map_err(|err| err.to_string())?;
    let ctx = ServiceContext::live(settings);
    commands::dispatch(cli.command.as_ref(), &ctx).map_err(|err| {
        tracing::debug!(kind = ?err.kind(), "command failed");
        err.to_string()
    })
}
