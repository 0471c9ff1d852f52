//! Repository backend port for the external version-control tool.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Identity read from the version-control tool's configuration.
///
/// Either field may be missing; callers fall back to configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfiguredIdentity {
    /// The configured author name, if any.
    pub name: Option<String>,
    /// The configured author email, if any.
    pub email: Option<String>,
}

/// Consumes a fast-import instruction stream.
///
/// The consumer starts whatever reads the stream, hands a writer to `feed`,
/// closes the writer once `feed` returns, and reports the reader's verdict.
pub trait StreamConsumer {
    /// Runs the consumer against the repository at `repo`.
    ///
    /// # Errors
    ///
    /// Returns an error if the consumer cannot be started, if `feed` fails,
    /// or if the consumer rejects the stream. When both `feed` and the
    /// consumer fail, the consumer's diagnostic is reported.
    fn run_consumer(
        &self,
        repo: &Path,
        feed: &mut dyn FnMut(&mut dyn Write) -> std::io::Result<()>,
    ) -> Result<(), Error>;
}

/// The operations the drawing flow needs from a version-control tool.
pub trait RepositoryBackend: StreamConsumer + Send + Sync {
    /// Creates `path` if needed and initializes an empty repository there.
    ///
    /// Returns the absolute repository path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the tool fails.
    fn init(&self, path: &Path) -> Result<PathBuf, Error>;

    /// Reads the operator's configured identity.
    fn identity(&self) -> ConfiguredIdentity;

    /// Adds `url` as the `origin` remote.
    ///
    /// # Errors
    ///
    /// Returns an error carrying the tool's diagnostic output.
    fn add_remote(&self, repo: &Path, url: &str) -> Result<(), Error>;

    /// Pushes the `main` branch to `origin`.
    ///
    /// # Errors
    ///
    /// Returns an error carrying the tool's diagnostic output.
    fn push(&self, repo: &Path) -> Result<(), Error>;
}
