//! Command dispatch and handlers.

pub mod draw;
pub mod export;
pub mod interactive;
pub mod plan;
pub mod preview;

use chrono::{DateTime, Utc};

use crate::cli::{Command, DesignArgs};
use crate::context::ServiceContext;
use crate::draw::calendar::Year;
use crate::error::Error;
use crate::plan::DrawRequest;
use crate::session::Session;

/// Dispatch a parsed command to its handler.
///
/// With no command the interactive flow runs on the terminal.
///
/// # Errors
///
/// Returns an error if the selected command handler fails.
pub fn dispatch(command: Option<&Command>, ctx: &ServiceContext) -> Result<(), Error> {
    match command {
        None => interactive::run(ctx, &mut Session::terminal()),
        Some(Command::Preview { text }) => preview::run(text),
        Some(Command::Plan { design, json }) => plan::run(ctx, design, *json),
        Some(Command::Draw { design, output, remote, force }) => {
            draw::run(ctx, design, output.as_deref(), remote.as_deref(), *force)
        }
        Some(Command::Export { design }) => export::run(ctx, design),
    }
}

/// Builds a validated request from command-line arguments.
///
/// Missing year and intensity fall back to the current year and the
/// configured intensity.
fn request_from_args(
    ctx: &ServiceContext,
    design: &DesignArgs,
    now: DateTime<Utc>,
) -> Result<DrawRequest, Error> {
    let year = match design.year {
        Some(year) => Year::new(year)?,
        None => Year::current(now),
    };
    let intensity = design.intensity.unwrap_or(ctx.settings.intensity);
    let request = DrawRequest::new(&design.text, year, intensity)?;
    if design.fill {
        request.with_background(ctx.settings.background_intensity)
    } else {
        Ok(request)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use crate::adapters::memory::{FixedClock, MemoryBackend};
    use crate::cli::DesignArgs;
    use crate::config::Settings;
    use crate::context::ServiceContext;

    /// A context frozen at the start of 2025 backed by `backend`.
    pub fn context(backend: Arc<MemoryBackend>) -> ServiceContext {
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        ServiceContext::new(Box::new(clock), backend, Settings::default())
    }

    pub fn design(text: &str, year: Option<i32>, intensity: Option<u32>, fill: bool) -> DesignArgs {
        DesignArgs { text: text.to_string(), year, intensity, fill }
    }
}
