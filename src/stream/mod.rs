//! Commit-stream synthesis.
//!
//! Turns layers of dates into a linear fast-import stream and hands it to a
//! [`StreamConsumer`]. Background commits are always written before
//! foreground commits so the text sits at the tip of the history.

pub mod identity;
pub mod writer;

use std::io::{self, Write};
use std::path::Path;

use chrono::NaiveDate;

pub use identity::Identity;
pub use writer::{StreamWriter, BRANCH_REF, FILE_PATH};

use crate::error::Error;
use crate::ports::StreamConsumer;

/// Highest accepted commits-per-date.
pub const MAX_INTENSITY: u32 = 50;

/// Validates a text intensity.
///
/// # Errors
///
/// Returns [`Error::IntensityOutOfRange`] outside `1..=MAX_INTENSITY`.
pub fn validate_intensity(intensity: u32) -> Result<u32, Error> {
    if (1..=MAX_INTENSITY).contains(&intensity) {
        Ok(intensity)
    } else {
        Err(Error::IntensityOutOfRange(intensity))
    }
}

/// Clamps an intensity into `1..=MAX_INTENSITY`.
#[must_use]
pub fn clamp_intensity(intensity: i64) -> u32 {
    u32::try_from(intensity.clamp(1, i64::from(MAX_INTENSITY))).unwrap_or(1)
}

/// A set of dates and how many commits each one receives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layer {
    /// Dates in ascending order; the order becomes the parent-chain order.
    pub dates: Vec<NaiveDate>,
    /// Commits per date.
    pub intensity: u32,
}

impl Layer {
    /// Creates a layer.
    #[must_use]
    pub fn new(dates: Vec<NaiveDate>, intensity: u32) -> Self {
        Self { dates, intensity }
    }

    /// A layer that produces no commits.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of commits this layer produces.
    #[must_use]
    pub fn work(&self) -> u64 {
        self.dates.len() as u64 * u64::from(self.intensity)
    }
}

/// Progress after a commit has been written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Commits written so far, including this one.
    pub committed: u64,
    /// Commits the stream will contain in total.
    pub total: u64,
}

impl Progress {
    /// Completed fraction in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.committed as f64 / self.total as f64
        }
    }
}

/// Result of a successful synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Commits written and accepted by the consumer.
    pub commits: u64,
}

/// Lifecycle of a single [`Synthesizer::synthesize`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisState {
    /// Nothing written yet.
    Idle,
    /// The stream is open and being appended to.
    Streaming,
    /// The consumer accepted the whole stream.
    Succeeded,
    /// Writing or consuming failed; repository state is unknown.
    Failed,
}

/// Writes layered commit streams for one identity.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    identity: Identity,
}

impl Synthesizer {
    /// Creates a synthesizer that signs every commit as `identity`.
    #[must_use]
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    /// The identity written into every commit.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Streams `background` then `foreground` commits into `consumer`.
    ///
    /// When both layers are empty nothing is started and the outcome has zero
    /// commits. Otherwise the outcome is the consumer's verdict; there are no
    /// retries.
    ///
    /// # Errors
    ///
    /// Returns the consumer's error, or the write error if the consumer
    /// itself reported success.
    pub fn synthesize<C: StreamConsumer + ?Sized>(
        &self,
        consumer: &C,
        repo: &Path,
        background: &Layer,
        foreground: &Layer,
        on_progress: &mut dyn FnMut(Progress),
    ) -> Result<Outcome, Error> {
        let total = background.work() + foreground.work();
        if total == 0 {
            tracing::info!("nothing to draw; skipping stream");
            return Ok(Outcome { commits: 0 });
        }

        let mut state = SynthesisState::Idle;
        let mut committed = 0;
        transition(&mut state, SynthesisState::Streaming, total);

        let result = consumer.run_consumer(repo, &mut |out| {
            self.write_stream(out, total, [background, foreground], &mut *on_progress, &mut committed)
        });

        match result {
            Ok(()) => {
                debug_assert_eq!(committed, total);
                transition(&mut state, SynthesisState::Succeeded, total);
                Ok(Outcome { commits: committed })
            }
            Err(err) => {
                transition(&mut state, SynthesisState::Failed, total);
                tracing::error!(error = %err, committed, total, "commit stream failed");
                Err(err)
            }
        }
    }

    /// Writes every layer in order, leaving the number of fully written
    /// commits in `committed` even when a write fails.
    fn write_stream(
        &self,
        out: &mut dyn Write,
        total: u64,
        layers: [&Layer; 2],
        on_progress: &mut dyn FnMut(Progress),
        committed: &mut u64,
    ) -> io::Result<()> {
        let mut writer = StreamWriter::new(out, &self.identity, total);
        for layer in layers {
            let written = writer.write_layer(layer, &mut *on_progress);
            *committed = writer.committed();
            written?;
        }
        writer.finish()?;
        Ok(())
    }
}

fn transition(state: &mut SynthesisState, next: SynthesisState, total: u64) {
    tracing::debug!(from = ?*state, to = ?next, total, "synthesis state");
    *state = next;
}
