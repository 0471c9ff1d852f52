//! Error types shared across the crate.

use thiserror::Error;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-correctable input problems, caught before any stream starts.
    Input,
    /// The external version-control tool failed or is missing.
    Collaborator,
    /// Local resources (pipes, directories) could not be obtained.
    Resource,
}

/// Errors produced while rendering, planning, or synthesizing commits.
#[derive(Debug, Error)]
pub enum Error {
    /// The text to draw was empty.
    #[error("text cannot be empty")]
    EmptyText,

    /// The target year is outside the supported range.
    #[error("year {0} is outside the supported range 2008..=2099")]
    YearOutOfRange(i32),

    /// The commit intensity is outside the supported range.
    #[error("intensity {0} is outside the supported range 1..=50")]
    IntensityOutOfRange(u32),

    /// The author identity would corrupt the instruction stream.
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    /// The output directory exists and replacing it was not allowed.
    #[error("directory already exists: {} (use --force to replace it)", .0.display())]
    OutputExists(std::path::PathBuf),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// An external program exited unsuccessfully.
    #[error("{program} failed: {message}")]
    Backend {
        /// The command that failed, e.g. `git fast-import`.
        program: String,
        /// Trimmed diagnostic output from the program.
        message: String,
    },

    /// An I/O operation failed.
    #[error("{context}: {source}")]
    Io {
        /// What was being attempted.
        context: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Builds an [`Error::Backend`].
    pub fn backend(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend { program: program.into(), message: message.into() }
    }

    /// Builds an [`Error::Io`] with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Classifies the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyText
            | Self::YearOutOfRange(_)
            | Self::IntensityOutOfRange(_)
            | Self::InvalidIdentity(_)
            | Self::OutputExists(_)
            | Self::Config(_) => ErrorKind::Input,
            Self::Backend { .. } => ErrorKind::Collaborator,
            Self::Io { .. } => ErrorKind::Resource,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_errors() {
        assert_eq!(Error::EmptyText.kind(), ErrorKind::Input);
        assert_eq!(Error::backend("git init", "boom").kind(), ErrorKind::Collaborator);
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        assert_eq!(Error::io("writing stream", io).kind(), ErrorKind::Resource);
    }

    #[test]
    fn backend_message_includes_program() {
        let err = Error::backend("git fast-import", "fatal: bad mark");
        assert_eq!(err.to_string(), "git fast-import failed: fatal: bad mark");
    }
}
