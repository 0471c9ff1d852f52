//! End-to-end synthesis through the library: plan a drawing, stream it, and
//! check the resulting instruction stream or repository.

use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use gitdraw::adapters::live::git::LiveGitBackend;
use gitdraw::adapters::memory::{FixedClock, MemoryBackend};
use gitdraw::commands::draw;
use gitdraw::config::Settings;
use gitdraw::context::ServiceContext;
use gitdraw::draw::calendar::Year;
use gitdraw::plan::{DrawPlan, DrawRequest};
use gitdraw::ports::RepositoryBackend;

fn memory_context(backend: Arc<MemoryBackend>) -> ServiceContext {
    let clock = FixedClock(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    ServiceContext::new(Box::new(clock), backend, Settings::default())
}

fn plan(text: &str, year: i32, intensity: u32) -> DrawPlan {
    let request = DrawRequest::new(text, Year::new(year).unwrap(), intensity).unwrap();
    DrawPlan::build(&request, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
}

/// Pulls `(commit mark, parent mark)` pairs out of a stream.
fn chain(stream: &str) -> Vec<(u64, Option<u64>)> {
    let mut out = Vec::new();
    for record in stream.split("commit refs/heads/main\n").skip(1) {
        let mark = record
            .lines()
            .find_map(|l| l.strip_prefix("mark :"))
            .and_then(|m| m.parse().ok())
            .unwrap();
        let parent = record.lines().find_map(|l| l.strip_prefix("from :")).and_then(|m| m.parse().ok());
        out.push((mark, parent));
    }
    out
}

#[test]
fn commits_form_a_single_linear_chain() {
    let backend = Arc::new(MemoryBackend::new());
    let ctx = memory_context(Arc::clone(&backend));
    let plan = plan("GIT", 2024, 3);

    let outcome = draw::generate(&ctx, &plan, Path::new("/unused"), &mut |_| {}).unwrap();

    let links = chain(&backend.captured_text());
    assert_eq!(links.len() as u64, outcome.commits);
    assert_eq!(links[0].1, None);
    for pair in links.windows(2) {
        assert_eq!(pair[1].1, Some(pair[0].0));
    }
}

#[test]
fn maximum_intensity_spreads_over_distinct_hours() {
    let backend = Arc::new(MemoryBackend::new());
    let ctx = memory_context(Arc::clone(&backend));
    let plan = plan("-", 2024, 50);
    let pixels = plan.foreground.dates.len();

    let mut seen = Vec::new();
    draw::generate(&ctx, &plan, Path::new("/unused"), &mut |p| seen.push(p.committed)).unwrap();

    let stream = backend.captured_text();
    let mut stamps: Vec<&str> = stream
        .lines()
        .filter_map(|l| l.strip_prefix("author "))
        .map(|l| l.rsplit(' ').nth(1).unwrap())
        .collect();
    assert_eq!(stamps.len(), pixels * 50);
    stamps.sort_unstable();
    stamps.dedup();
    assert_eq!(stamps.len(), pixels * 50);
    assert_eq!(seen, (1..=(pixels as u64 * 50)).collect::<Vec<_>>());
}

fn git_available() -> bool {
    Command::new("git").arg("--version").output().is_ok_and(|o| o.status.success())
}

#[test]
fn real_repository_has_one_commit_per_pixel() {
    if !git_available() {
        eprintln!("git not found; skipping");
        return;
    }
    let dir = std::env::temp_dir().join("gitdraw_real_repository");
    let _ = std::fs::remove_dir_all(&dir);

    let backend = Arc::new(LiveGitBackend::new("git"));
    let clock = FixedClock(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    let ctx = ServiceContext::new(Box::new(clock), backend.clone(), Settings::default());
    let repo = backend.init(&dir).unwrap();
    let plan = plan("HI", 2024, 1);

    let outcome = draw::generate(&ctx, &plan, &repo, &mut |_| {}).unwrap();
    assert_eq!(outcome.commits, 28);

    let count = Command::new("git")
        .args(["rev-list", "--count", "main"])
        .current_dir(&repo)
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&count.stdout).trim(), "28");

    let _ = std::fs::remove_dir_all(&dir);
}
