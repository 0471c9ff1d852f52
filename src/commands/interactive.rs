//! The guided prompt flow that runs when no subcommand is given.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::draw::calendar::Year;
use crate::draw::Grid;
use crate::error::Error;
use crate::plan::{DrawPlan, DrawRequest};
use crate::session::Session;
use crate::stream::clamp_intensity;

use super::draw::{generate, normalize_remote, prepare_output};

/// Walks the operator from text entry to a pushed repository.
///
/// Declining a confirmation ends the flow successfully. Remote setup and
/// push failures are reported as warnings; commit generation failures are
/// returned.
///
/// # Errors
///
/// Returns an error for blank text, terminal I/O failures, or a failing
/// repository step before the remote stage.
pub fn run<R: BufRead, W: Write>(
    ctx: &ServiceContext,
    session: &mut Session<R, W>,
) -> Result<(), Error> {
    let now = ctx.clock.now();
    let tty = |e: io::Error| Error::io("terminal I/O", e);

    session.line("").map_err(tty)?;
    session.line("  gitdraw: text on your contribution graph").map_err(tty)?;
    session.line("").map_err(tty)?;

    let text = session.ask("Text to draw:").map_err(tty)?;
    if text.is_empty() {
        return Err(Error::EmptyText);
    }
    let text = text.to_uppercase();

    session.line("").map_err(tty)?;
    for row in Grid::from_text(&text).render().lines() {
        session.line(&format!("  {row}")).map_err(tty)?;
    }
    session.line("").map_err(tty)?;
    if !session.confirm("Continue with this design").map_err(tty)? {
        session.note("Cancelled.").map_err(tty)?;
        return Ok(());
    }

    let current = Year::current(now);
    let answer = session.ask_with_default("Target year:", &current.to_string()).map_err(tty)?;
    let year = match answer.parse::<i32>().ok().and_then(|y| Year::new(y).ok()) {
        Some(year) => year,
        None => {
            session.warn(&format!("unusable year {answer:?}, using {current}")).map_err(tty)?;
            current
        }
    };

    let fill = session.confirm("Fill background for contrast").map_err(tty)?;
    let default_intensity = ctx.settings.intensity.to_string();
    let answer = session
        .ask_with_default("Commits per pixel (1-50):", &default_intensity)
        .map_err(tty)?;
    let intensity = clamp_intensity(answer.parse::<i64>().unwrap_or(0));

    let mut request = DrawRequest::new(&text, year, intensity)?;
    if fill {
        request = request.with_background(ctx.settings.background_intensity)?;
    }
    let plan = DrawPlan::build(&request, now);

    session.line("").map_err(tty)?;
    session.info("text pixels", plan.foreground.dates.len()).map_err(tty)?;
    if fill {
        session.info("background pixels", plan.background.dates.len()).map_err(tty)?;
    }
    session.info("total commits", plan.total_commits()).map_err(tty)?;
    session.info("target year", plan.year).map_err(tty)?;
    session.line("").map_err(tty)?;

    let default_dir = ctx.settings.output_dir.display().to_string();
    let path = PathBuf::from(session.ask_with_default("Output directory:", &default_dir).map_err(tty)?);
    if path.is_dir() {
        session.warn(&format!("{} already exists", path.display())).map_err(tty)?;
        if !session.confirm("Overwrite").map_err(tty)? {
            session.note("Cancelled.").map_err(tty)?;
            return Ok(());
        }
        prepare_output(&path, true)?;
    }
    let repo = ctx.repo.init(&path)?;

    let total = plan.total_commits();
    if !session.confirm(&format!("Generate {total} commits")).map_err(tty)? {
        session.note("Repository created but empty.").map_err(tty)?;
        return Ok(());
    }

    let bar = session.progress_bar(total);
    let outcome = generate(ctx, &plan, &repo, &mut |p| bar.set_position(p.committed));
    bar.finish_and_clear();
    if let Err(err) = outcome {
        session.warn(&format!("commit generation failed: {err}")).map_err(tty)?;
        return Err(err);
    }
    session.success(&format!("Repository ready at {}", repo.display())).map_err(tty)?;
    session.line("").map_err(tty)?;

    if !session.confirm("Configure GitHub remote").map_err(tty)? {
        return next_steps(session, &repo).map_err(tty);
    }
    let url = session.ask("Repository URL:").map_err(tty)?;
    if url.is_empty() {
        return next_steps(session, &repo).map_err(tty);
    }
    let url = normalize_remote(&url);
    if let Err(err) = ctx.repo.add_remote(&repo, &url) {
        session.warn(&format!("could not add remote: {err}")).map_err(tty)?;
        return next_steps(session, &repo).map_err(tty);
    }
    match ctx.repo.push(&repo) {
        Ok(()) => session.success(&format!("Done. Pushed to {url}")).map_err(tty)?,
        Err(err) => session.warn(&format!("push failed: {err}")).map_err(tty)?,
    }
    Ok(())
}

fn next_steps<R: BufRead, W: Write>(session: &mut Session<R, W>, repo: &Path) -> io::Result<()> {
    session.note("Next steps:")?;
    session.note(&format!("  cd {}", repo.display()))?;
    session.note("  git remote add origin <url>")?;
    session.note("  git push -u origin main")
}
