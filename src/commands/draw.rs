//! `gitdraw draw` command and the repository steps shared with the
//! interactive flow.

use std::path::Path;

use indicatif::ProgressBar;

use crate::cli::DesignArgs;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::plan::DrawPlan;
use crate::stream::{Outcome, Progress};

/// Renders, initializes a repository, writes the commits, and optionally
/// pushes.
///
/// # Errors
///
/// Returns an error for invalid input, an existing output directory without
/// `force`, or any failing repository step.
pub fn run(
    ctx: &ServiceContext,
    design: &DesignArgs,
    output: Option<&Path>,
    remote: Option<&str>,
    force: bool,
) -> Result<(), Error> {
    let now = ctx.clock.now();
    let request = super::request_from_args(ctx, design, now)?;
    let plan = DrawPlan::build(&request, now);
    let path = output.map_or_else(|| ctx.settings.output_dir.clone(), Path::to_path_buf);

    prepare_output(&path, force)?;
    let repo = ctx.repo.init(&path)?;

    let bar = ProgressBar::new(plan.total_commits());
    let outcome = generate(ctx, &plan, &repo, &mut |p| bar.set_position(p.committed));
    bar.finish_and_clear();
    let outcome = outcome?;
    println!("Wrote {} commits to {}", outcome.commits, repo.display());

    if let Some(url) = remote {
        let url = normalize_remote(url);
        ctx.repo.add_remote(&repo, &url)?;
        ctx.repo.push(&repo)?;
        println!("Pushed to {url}");
    }
    Ok(())
}

/// Streams the plan's commits into the repository at `repo`.
///
/// # Errors
///
/// Returns an error if no usable identity exists or the stream fails.
pub fn generate(
    ctx: &ServiceContext,
    plan: &DrawPlan,
    repo: &Path,
    on_progress: &mut dyn FnMut(Progress),
) -> Result<Outcome, Error> {
    let synthesizer = ctx.synthesizer()?;
    let outcome =
        synthesizer.synthesize(&*ctx.repo, repo, &plan.background, &plan.foreground, on_progress)?;
    tracing::info!(commits = outcome.commits, repo = %repo.display(), "drawing written");
    Ok(outcome)
}

/// Makes sure `path` can be used as a fresh repository directory.
///
/// An existing directory is removed when `force` is set and rejected
/// otherwise.
///
/// # Errors
///
/// Returns [`Error::OutputExists`] or an I/O error from the removal.
pub fn prepare_output(path: &Path, force: bool) -> Result<(), Error> {
    if !path.is_dir() {
        return Ok(());
    }
    if !force {
        return Err(Error::OutputExists(path.to_path_buf()));
    }
    tracing::warn!(path = %path.display(), "replacing existing directory");
    std::fs::remove_dir_all(path).map_err(|e| Error::io(format!("removing {}", path.display()), e))
}

/// Adds `https://` to URLs that have neither a scheme nor an scp-style
/// `git@` prefix.
#[must_use]
pub fn normalize_remote(url: &str) -> String {
    let url = url.trim();
    if url.contains("://") || url.starts_with("git@") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use super::*;
    use crate::adapters::memory::MemoryBackend;
    use crate::commands::test_support::{context, design};

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn normalizes_remote_urls() {
        assert_eq!(normalize_remote("github.com/a/b"), "https://github.com/a/b");
        assert_eq!(normalize_remote("https://github.com/a/b"), "https://github.com/a/b");
        assert_eq!(normalize_remote("git@github.com:a/b.git"), "git@github.com:a/b.git");
        assert_eq!(normalize_remote("  ssh://host/repo "), "ssh://host/repo");
    }

    #[test]
    fn existing_directory_requires_force() {
        let dir = scratch("gitdraw_prepare_output_force");
        std::fs::create_dir_all(&dir).unwrap();

        assert!(matches!(prepare_output(&dir, false), Err(Error::OutputExists(_))));
        prepare_output(&dir, true).unwrap();
        assert!(!dir.exists());
        // A missing directory is fine either way.
        prepare_output(&dir, false).unwrap();
    }

    #[test]
    fn draws_into_backend_and_pushes() {
        let backend = Arc::new(MemoryBackend::new().with_identity("Ada", "ada@example.com"));
        let ctx = context(Arc::clone(&backend));
        let dir = scratch("gitdraw_draw_command");

        let args = design("HI", Some(2024), Some(1), false);
        run(&ctx, &args, Some(dir.as_path()), Some("github.com/a/b"), false).unwrap();

        assert_eq!(backend.inits(), vec![dir.clone()]);
        assert_eq!(backend.consumer_runs(), 1);
        let stream = backend.captured_text();
        assert_eq!(stream.matches("\ncommit refs/heads/main\n").count(), 28);
        assert!(stream.contains("author Ada <ada@example.com>"));
        assert_eq!(backend.remotes(), vec!["https://github.com/a/b".to_string()]);
        assert_eq!(backend.pushes(), 1);
    }

    #[test]
    fn failed_stream_skips_push() {
        let backend = Arc::new(MemoryBackend::new().failing_consumer("fatal: nope"));
        let ctx = context(Arc::clone(&backend));
        let dir = scratch("gitdraw_draw_command_failure");

        let args = design("HI", Some(2024), None, false);
        let err = run(&ctx, &args, Some(dir.as_path()), Some("x/y"), false).unwrap_err();
        assert!(err.to_string().contains("fatal: nope"));
        assert_eq!(backend.pushes(), 0);
        assert!(backend.remotes().is_empty());
    }
}
