//! Live repository backend that shells out to the `git` CLI.

use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use crate::error::Error;
use crate::ports::{ConfiguredIdentity, RepositoryBackend, StreamConsumer};

/// Runs `git` (or a configured replacement) as a child process.
pub struct LiveGitBackend {
    program: String,
}

impl LiveGitBackend {
    /// Creates a backend that invokes `program` for every operation.
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    /// Runs `program args...` in `dir` and returns trimmed stdout.
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String, Error> {
        let label = format!("{} {}", self.program, args.first().copied().unwrap_or_default());
        tracing::debug!(command = %label, dir = %dir.display(), "running git");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| Error::backend(&label, format!("could not start: {e}")))?;

        if !output.status.success() {
            let mut message = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if message.is_empty() {
                message = String::from_utf8_lossy(&output.stdout).trim().to_string();
            }
            if message.is_empty() {
                message = output.status.to_string();
            }
            return Err(Error::backend(label, message));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn config_value(&self, key: &str) -> Option<String> {
        let output = Command::new(&self.program).args(["config", key]).output().ok()?;
        if !output.status.success() {
            return None;
        }
        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!value.is_empty()).then_some(value)
    }
}

impl StreamConsumer for LiveGitBackend {
    fn run_consumer(
        &self,
        repo: &Path,
        feed: &mut dyn FnMut(&mut dyn Write) -> std::io::Result<()>,
    ) -> Result<(), Error> {
        let label = format!("{} fast-import", self.program);
        let mut child = Command::new(&self.program)
            .args(["fast-import", "--quiet"])
            .current_dir(repo)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::backend(&label, format!("could not start: {e}")))?;

        // Drain stderr concurrently so a chatty consumer cannot stall the pipe.
        let stderr = child.stderr.take();
        let drain = thread::spawn(move || {
            let mut text = String::new();
            if let Some(mut stderr) = stderr {
                let _ = stderr.read_to_string(&mut text);
            }
            text
        });

        let fed = match child.stdin.take() {
            Some(stdin) => {
                let mut writer = BufWriter::new(stdin);
                feed(&mut writer).and_then(|()| writer.flush())
                // Dropping the writer closes stdin and signals end of stream.
            }
            None => Err(std::io::Error::other("consumer stdin was not captured")),
        };

        let status = child.wait().map_err(|e| Error::io(format!("waiting for {label}"), e))?;
        let diagnostic = drain.join().unwrap_or_default();

        if !status.success() {
            let message = diagnostic.trim();
            let message = if message.is_empty() { status.to_string() } else { message.to_string() };
            return Err(Error::backend(label, message));
        }
        fed.map_err(|e| Error::io("writing commit stream", e))?;
        tracing::debug!(repo = %repo.display(), "fast-import finished");
        Ok(())
    }
}

impl RepositoryBackend for LiveGitBackend {
    fn init(&self, path: &Path) -> Result<PathBuf, Error> {
        let abs = std::path::absolute(path)
            .map_err(|e| Error::io(format!("resolving {}", path.display()), e))?;
        std::fs::create_dir_all(&abs)
            .map_err(|e| Error::io(format!("creating {}", abs.display()), e))?;
        self.run(&abs, &["init"])?;
        tracing::info!(path = %abs.display(), "initialized repository");
        Ok(abs)
    }

    fn identity(&self) -> ConfiguredIdentity {
        ConfiguredIdentity {
            name: self.config_value("user.name"),
            email: self.config_value("user.email"),
        }
    }

    fn add_remote(&self, repo: &Path, url: &str) -> Result<(), Error> {
        self.run(repo, &["remote", "add", "origin", url])?;
        Ok(())
    }

    fn push(&self, repo: &Path) -> Result<(), Error> {
        if let Err(err) = self.run(repo, &["branch", "-M", "main"]) {
            tracing::debug!(error = %err, "branch rename skipped");
        }
        self.run(repo, &["push", "-u", "origin", "main"])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn missing_program_is_a_collaborator_error() {
        let backend = LiveGitBackend::new("gitdraw-no-such-program");
        let err = backend
            .run_consumer(&std::env::temp_dir(), &mut |out| out.write_all(b"blob\n"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Collaborator);
        assert!(err.to_string().contains("could not start"));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_fails_the_stream() {
        // `false` ignores its arguments and exits 1.
        let backend = LiveGitBackend::new("false");
        let err = backend
            .run_consumer(&std::env::temp_dir(), &mut |out| out.write_all(b"blob\n"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Collaborator);
    }

    #[test]
    fn missing_identity_reads_as_none() {
        let backend = LiveGitBackend::new("gitdraw-no-such-program");
        assert_eq!(backend.identity(), ConfiguredIdentity::default());
    }
}
