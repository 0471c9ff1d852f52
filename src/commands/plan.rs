//! `gitdraw plan` command.

use crate::cli::DesignArgs;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::plan::{DrawPlan, PlanSummary};

/// Prints pixel and commit counts for a drawing without touching a
/// repository.
///
/// # Errors
///
/// Returns an error for invalid input or if JSON serialization fails.
pub fn run(ctx: &ServiceContext, design: &DesignArgs, json: bool) -> Result<(), Error> {
    let summary = summarize(ctx, design)?;
    if json {
        let text = serde_json::to_string_pretty(&summary)
            .map_err(|e| Error::io("serializing plan", e.into()))?;
        println!("{text}");
    } else {
        print!("{}", format_summary(&summary));
    }
    Ok(())
}

fn summarize(ctx: &ServiceContext, design: &DesignArgs) -> Result<PlanSummary, Error> {
    let now = ctx.clock.now();
    let request = super::request_from_args(ctx, design, now)?;
    Ok(DrawPlan::build(&request, now).summary())
}

fn format_summary(summary: &PlanSummary) -> String {
    let mut rows = vec![
        ("text", summary.text.clone()),
        ("target year", summary.year.to_string()),
        ("text pixels", summary.text_pixels.to_string()),
    ];
    if summary.background_intensity > 0 {
        rows.push(("background pixels", summary.background_pixels.to_string()));
    }
    rows.push(("total commits", summary.total_commits.to_string()));
    if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
        rows.push(("date range", format!("{first} .. {last}")));
    }

    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter().map(|(label, value)| format!("{label:<width$}  {value}\n")).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::memory::MemoryBackend;
    use crate::commands::test_support::{context, design};

    #[test]
    fn summarizes_without_touching_repository() {
        let backend = Arc::new(MemoryBackend::new());
        let ctx = context(Arc::clone(&backend));
        let summary = summarize(&ctx, &design("HI", Some(2024), Some(2), false)).unwrap();
        assert_eq!(summary.text_pixels, 28);
        assert_eq!(summary.total_commits, 56);
        assert!(backend.inits().is_empty());
        assert_eq!(backend.consumer_runs(), 0);
    }

    #[test]
    fn text_summary_lists_background_only_when_filled() {
        let ctx = context(Arc::new(MemoryBackend::new()));
        let plain = format_summary(&summarize(&ctx, &design("HI", Some(2024), None, false)).unwrap());
        let filled = format_summary(&summarize(&ctx, &design("HI", Some(2024), None, true)).unwrap());
        assert!(!plain.contains("background pixels"));
        assert!(filled.contains("background pixels"));
        assert!(plain.contains("total commits"));
    }

    #[test]
    fn json_output_runs() {
        let ctx = context(Arc::new(MemoryBackend::new()));
        assert!(run(&ctx, &design("A", Some(2024), None, false), true).is_ok());
    }
}
