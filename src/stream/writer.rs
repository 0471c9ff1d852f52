//! Fast-import record emission.
//!
//! Every commit is written as a blob followed by a commit that replaces the
//! single tracked file with that blob. Marks come from the running sequence
//! number `n`: the blob is `2n`, the commit `2n + 1`, so they never collide.

use std::io::{self, Write};

use chrono::{DateTime, Duration, Utc};

use super::identity::Identity;
use super::{Layer, Progress};
use crate::draw::calendar::midday;

/// Branch every commit is written to.
pub const BRANCH_REF: &str = "refs/heads/main";

/// The single file overwritten by every commit.
pub const FILE_PATH: &str = "gitdraw.txt";

/// Writes a linear chain of commits to `out`.
///
/// Owns the sequence counter and the parent cursor; one writer per stream.
pub struct StreamWriter<'a, W: Write> {
    out: W,
    identity: &'a Identity,
    total: u64,
    sequence: u64,
    parent: Option<u64>,
}

impl<'a, W: Write> StreamWriter<'a, W> {
    /// Creates a writer for a stream of `total` commits.
    pub fn new(out: W, identity: &'a Identity, total: u64) -> Self {
        Self { out, identity, total, sequence: 0, parent: None }
    }

    /// Number of commits written completely so far.
    #[must_use]
    pub fn committed(&self) -> u64 {
        self.sequence
    }

    /// Writes one blob and one commit dated at `instant`.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_commit(&mut self, instant: DateTime<Utc>) -> io::Result<Progress> {
        let n = self.sequence + 1;
        let epoch = instant.timestamp();
        let blob_mark = n * 2;
        let commit_mark = n * 2 + 1;

        // Offsetting by the sequence keeps every blob unique.
        let content = format!("{}\n", epoch.saturating_add(i64::try_from(n).unwrap_or(i64::MAX)));
        let message = format!("draw {n}/{}", self.total);
        let (name, email) = (self.identity.name(), self.identity.email());

        let out = &mut self.out;
        write!(out, "blob\nmark :{blob_mark}\ndata {}\n{content}\n", content.len())?;
        write!(out, "commit {BRANCH_REF}\nmark :{commit_mark}\n")?;
        writeln!(out, "author {name} <{email}> {epoch} +0000")?;
        writeln!(out, "committer {name} <{email}> {epoch} +0000")?;
        write!(out, "data {}\n{message}\n", message.len())?;
        if let Some(parent) = self.parent {
            writeln!(out, "from :{parent}")?;
        }
        write!(out, "M 100644 :{blob_mark} {FILE_PATH}\n\n")?;

        self.sequence = n;
        self.parent = Some(commit_mark);
        Ok(Progress { committed: n, total: self.total })
    }

    /// Writes `layer.intensity` commits per date, each repetition one hour
    /// later than the previous, reporting progress after every commit.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_layer(
        &mut self,
        layer: &Layer,
        on_progress: &mut dyn FnMut(Progress),
    ) -> io::Result<()> {
        for date in &layer.dates {
            let base = midday(*date);
            for hour in 0..layer.intensity {
                let progress = self.write_commit(base + Duration::hours(i64::from(hour)))?;
                on_progress(progress);
            }
        }
        Ok(())
    }

    /// Flushes the writer and returns the number of commits written.
    ///
    /// # Errors
    ///
    /// Returns any error from flushing the underlying writer.
    pub fn finish(mut self) -> io::Result<u64> {
        self.out.flush()?;
        Ok(self.sequence)
    }
}
