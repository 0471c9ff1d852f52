//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI parser for `gitdraw`.
///
/// Without a subcommand the interactive flow runs.
#[derive(Debug, Parser)]
#[command(
    name = "gitdraw",
    version,
    about = "Draw text on your contribution graph",
    disable_version_flag = true
)]
pub struct Cli {
    /// Print version.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: (),

    /// The command to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Text and density shared by the non-interactive commands.
#[derive(Debug, Clone, Args)]
pub struct DesignArgs {
    /// Text to draw.
    pub text: String,
    /// Target year (defaults to the current year).
    #[arg(short, long)]
    pub year: Option<i32>,
    /// Commits per text date, 1 to 50 (defaults to the configured value).
    #[arg(short, long)]
    pub intensity: Option<u32>,
    /// Also commit on every other date of the year for contrast.
    #[arg(long)]
    pub fill: bool,
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the rendered grid.
    Preview {
        /// Text to draw.
        text: String,
    },
    /// Show how many dates and commits a drawing needs.
    Plan {
        /// What to draw.
        #[command(flatten)]
        design: DesignArgs,
        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Create a repository containing the drawing.
    Draw {
        /// What to draw.
        #[command(flatten)]
        design: DesignArgs,
        /// Repository directory (defaults to the configured value).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Remote URL to add as `origin` and push to.
        #[arg(long)]
        remote: Option<String>,
        /// Replace the output directory if it already exists.
        #[arg(long)]
        force: bool,
    },
    /// Write the fast-import stream to stdout.
    Export {
        /// What to draw.
        #[command(flatten)]
        design: DesignArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::parse_from(["gitdraw"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_preview() {
        let cli = Cli::parse_from(["gitdraw", "preview", "HI"]);
        assert!(matches!(cli.command, Some(Command::Preview { text }) if text == "HI"));
    }

    #[test]
    fn parses_draw_flags() {
        let cli = Cli::parse_from([
            "gitdraw", "draw", "HELLO", "--year", "2023", "-i", "20", "--fill", "-o", "out",
            "--force",
        ]);
        let Some(Command::Draw { design, output, remote, force }) = cli.command else {
            panic!("expected draw");
        };
        assert_eq!(design.text, "HELLO");
        assert_eq!(design.year, Some(2023));
        assert_eq!(design.intensity, Some(20));
        assert!(design.fill);
        assert_eq!(output.unwrap().to_str(), Some("out"));
        assert!(remote.is_none());
        assert!(force);
    }

    #[test]
    fn parses_plan_json() {
        let cli = Cli::parse_from(["gitdraw", "plan", "A", "--json"]);
        assert!(matches!(cli.command, Some(Command::Plan { json: true, .. })));
    }

    #[test]
    fn lowercase_v_prints_version() {
        for flag in ["-v", "--version"] {
            let err = Cli::try_parse_from(["gitdraw", flag]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        }
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["gitdraw", "paint"]).is_err());
    }
}
