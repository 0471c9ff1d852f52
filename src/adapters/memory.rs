//! In-process adapters for tests and dry runs.
//!
//! [`MemoryBackend`] captures the instruction stream instead of handing it to
//! a real version-control tool, and records every other call so the flow can
//! be asserted on without touching disk.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::error::Error;
use crate::ports::{Clock, ConfiguredIdentity, RepositoryBackend, StreamConsumer};

/// A clock frozen at a fixed instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Default)]
struct Calls {
    stream: Vec<u8>,
    consumer_runs: usize,
    inits: Vec<PathBuf>,
    remotes: Vec<String>,
    pushes: usize,
}

/// Repository backend that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    identity: ConfiguredIdentity,
    consumer_failure: Option<String>,
    calls: Mutex<Calls>,
}

impl MemoryBackend {
    /// Creates a backend with no configured identity that accepts any stream.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports `name`/`email` as the configured identity.
    #[must_use]
    pub fn with_identity(mut self, name: &str, email: &str) -> Self {
        self.identity =
            ConfiguredIdentity { name: Some(name.to_string()), email: Some(email.to_string()) };
        self
    }

    /// Makes the consumer reject every stream with `message`, after reading it.
    #[must_use]
    pub fn failing_consumer(mut self, message: &str) -> Self {
        self.consumer_failure = Some(message.to_string());
        self
    }

    /// Bytes written by the last consumer run.
    #[must_use]
    pub fn captured(&self) -> Vec<u8> {
        self.lock().stream.clone()
    }

    /// The last captured stream as text.
    #[must_use]
    pub fn captured_text(&self) -> String {
        String::from_utf8_lossy(&self.lock().stream).into_owned()
    }

    /// How many times the consumer was started.
    #[must_use]
    pub fn consumer_runs(&self) -> usize {
        self.lock().consumer_runs
    }

    /// Paths passed to `init`.
    #[must_use]
    pub fn inits(&self) -> Vec<PathBuf> {
        self.lock().inits.clone()
    }

    /// Remote URLs passed to `add_remote`.
    #[must_use]
    pub fn remotes(&self) -> Vec<String> {
        self.lock().remotes.clone()
    }

    /// Number of pushes.
    #[must_use]
    pub fn pushes(&self) -> usize {
        self.lock().pushes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Calls> {
        self.calls.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl StreamConsumer for MemoryBackend {
    fn run_consumer(
        &self,
        _repo: &Path,
        feed: &mut dyn FnMut(&mut dyn Write) -> std::io::Result<()>,
    ) -> Result<(), Error> {
        let mut buf = Vec::new();
        let fed = feed(&mut buf);
        {
            let mut calls = self.lock();
            calls.consumer_runs += 1;
            calls.stream = buf;
        }
        if let Some(message) = &self.consumer_failure {
            return Err(Error::backend("memory consumer", message.clone()));
        }
        fed.map_err(|e| Error::io("writing commit stream", e))
    }
}

impl RepositoryBackend for MemoryBackend {
    fn init(&self, path: &Path) -> Result<PathBuf, Error> {
        self.lock().inits.push(path.to_path_buf());
        Ok(path.to_path_buf())
    }

    fn identity(&self) -> ConfiguredIdentity {
        self.identity.clone()
    }

    fn add_remote(&self, _repo: &Path, url: &str) -> Result<(), Error> {
        self.lock().remotes.push(url.to_string());
        Ok(())
    }

    fn push(&self, _repo: &Path) -> Result<(), Error> {
        self.lock().pushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn captures_fed_bytes() {
        let backend = MemoryBackend::new();
        backend.run_consumer(Path::new("/r"), &mut |out| out.write_all(b"blob\n")).unwrap();
        assert_eq!(backend.captured(), b"blob\n");
        assert_eq!(backend.consumer_runs(), 1);
    }

    #[test]
    fn feed_errors_surface_as_resource_errors() {
        let backend = MemoryBackend::new();
        let err = backend
            .run_consumer(Path::new("/r"), &mut |_| {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            })
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Resource);
    }

    #[test]
    fn records_repository_calls() {
        let backend = MemoryBackend::new().with_identity("Ada", "ada@example.com");
        backend.init(Path::new("/r")).unwrap();
        backend.add_remote(Path::new("/r"), "https://example.com/a.git").unwrap();
        backend.push(Path::new("/r")).unwrap();
        assert_eq!(backend.inits(), vec![PathBuf::from("/r")]);
        assert_eq!(backend.remotes(), vec!["https://example.com/a.git".to_string()]);
        assert_eq!(backend.pushes(), 1);
        assert_eq!(backend.identity().name.as_deref(), Some("Ada"));
    }

    #[test]
    fn fixed_clock_is_fixed() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let clock = FixedClock(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }
}
