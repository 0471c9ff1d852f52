//! Service context bundling the port trait objects and settings.

use std::sync::Arc;

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::git::LiveGitBackend;
use crate::config::Settings;
use crate::error::Error;
use crate::ports::{Clock, RepositoryBackend};
use crate::stream::{Identity, Synthesizer};

/// Everything a command needs from the outside world.
///
/// Constructors wire up different adapters (live or in-memory); commands
/// never reach for the system clock or spawn processes themselves.
pub struct ServiceContext {
    /// Clock used to drop future dates.
    pub clock: Box<dyn Clock>,
    /// Version-control backend.
    pub repo: Arc<dyn RepositoryBackend>,
    /// Loaded settings.
    pub settings: Settings,
}

impl ServiceContext {
    /// Creates a live context: system clock and the configured `git` program.
    #[must_use]
    pub fn live(settings: Settings) -> Self {
        let repo = Arc::new(LiveGitBackend::new(settings.git_program.clone()));
        Self { clock: Box::new(LiveClock), repo, settings }
    }

    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(clock: Box<dyn Clock>, repo: Arc<dyn RepositoryBackend>, settings: Settings) -> Self {
        Self { clock, repo, settings }
    }

    /// Resolves the commit identity: git's configuration first, then the
    /// configured fallbacks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentity`] if no usable identity results.
    pub fn identity(&self) -> Result<Identity, Error> {
        Identity::resolve(
            &self.repo.identity(),
            &self.settings.author_name,
            &self.settings.author_email,
        )
    }

    /// A synthesizer signing commits with [`ServiceContext::identity`].
    ///
    /// # Errors
    ///
    /// Same as [`ServiceContext::identity`].
    pub fn synthesizer(&self) -> Result<Synthesizer, Error> {
        let identity = self.identity()?;
        tracing::debug!(name = identity.name(), email = identity.email(), "commit identity");
        Ok(Synthesizer::new(identity))
    }
}
