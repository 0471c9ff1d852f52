//! Interactive prompting over explicit reader/writer handles.

use std::io::{self, BufRead, Write};

use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Width of the commit progress bar, in cells.
const BAR_WIDTH: usize = 40;

/// A prompt/answer session.
///
/// Owns its input and output so the interactive flow can be driven from a
/// terminal or from in-memory buffers.
pub struct Session<R, W> {
    input: R,
    output: W,
    show_progress: bool,
}

impl Session<io::StdinLock<'static>, io::Stdout> {
    /// A session on the process's stdin and stdout with a live progress bar.
    #[must_use]
    pub fn terminal() -> Self {
        Self { input: io::stdin().lock(), output: io::stdout(), show_progress: true }
    }
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// A session over arbitrary handles; progress bars are hidden.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output, show_progress: false }
    }

    /// Consumes the session and returns the output handle.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads one trimmed answer to `prompt`. End of input reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "  {} ", style(prompt).bold())?;
        self.read_answer()
    }

    /// Like [`Session::ask`], returning `default` for an empty answer.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn ask_with_default(&mut self, prompt: &str, default: &str) -> io::Result<String> {
        write!(self.output, "  {} {} ", style(prompt).bold(), style(format!("({default})")).dim())?;
        let answer = self.read_answer()?;
        Ok(if answer.is_empty() { default.to_string() } else { answer })
    }

    /// Asks a yes/no question; only `y` (any case) counts as yes.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        write!(self.output, "  {} {} ", style(format!("{prompt}?")).bold(), style("(y/n)").dim())?;
        Ok(self.read_answer()?.eq_ignore_ascii_case("y"))
    }

    /// Prints a dimmed `label: value` line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn info(&mut self, label: &str, value: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.output, "  {} {value}", style(format!("{label}:")).dim())
    }

    /// Prints a success line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "  {} {message}", style("✓").green().bold())
    }

    /// Prints a warning line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn warn(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "  {} {message}", style("!").yellow().bold())
    }

    /// Prints dimmed free text.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn note(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", style(message).dim())
    }

    /// Prints a line verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Creates a progress bar for `total` commits.
    #[must_use]
    pub fn progress_bar(&self, total: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
        let template = format!("  {{bar:{BAR_WIDTH}.cyan}} {{percent:>3}}%");
        let bar_style = ProgressStyle::with_template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█░");
        bar.set_style(bar_style);
        bar
    }

    fn read_answer(&mut self) -> io::Result<String> {
        self.output.flush()?;
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }
}
