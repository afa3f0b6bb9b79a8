//! CLI argument parsing via clap.

use clap::Parser;
use std::path::PathBuf;

/// Capture tmux or GNU screen scrollback into a file.
#[derive(Debug, Parser)]
#[command(name = "muxgrab", disable_version_flag = true)]
pub struct Args {
    /// Destination path for the captured content.
    pub file: Option<PathBuf>,

    /// Append to the destination instead of overwriting it.
    #[arg(short = 'a', long = "append")]
    pub append: bool,

    /// Prefix every output line with its 1-based line number.
    #[arg(short = 'n', long = "number")]
    pub number: bool,

    /// Capture the last N lines of scrollback. 0 captures the entire
    /// history. Defaults to the terminal's visible row count, or the entire
    /// history when that cannot be determined.
    #[arg(short = 'l', long = "length", value_name = "N")]
    pub length: Option<u32>,

    /// Suppress progress notices.
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print progress notices (the default).
    #[arg(short = 'v', long = "verbose", conflicts_with = "quiet")]
    pub verbose: bool,

    /// Print version information and exit.
    #[arg(short = 'V', long = "version")]
    pub version: bool,
}

impl Args {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Verbose
        }
    }
}

/// Progress-notice verbosity, passed explicitly into the capture path
/// rather than held as process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Verbose,
    Quiet,
}

impl Verbosity {
    pub fn is_verbose(self) -> bool {
        matches!(self, Verbosity::Verbose)
    }

    /// Number of progress-notice lines the tool prints before capturing.
    /// They land inside the captured scrollback and must be trimmed back
    /// out of the window.
    pub fn diagnostic_lines(self) -> usize {
        if self.is_verbose() { 1 } else { 0 }
    }
}

/// The builtin clap version flag prints only name and version; the license
/// line is part of the contract, so the flag is handled by hand.
pub fn print_version() {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::{Args, Verbosity};
    use clap::Parser;

    #[test]
    fn defaults_are_overwrite_unnumbered_verbose() {
        let args = Args::parse_from(["muxgrab", "out.txt"]);
        assert_eq!(args.file.as_deref().unwrap().to_str(), Some("out.txt"));
        assert!(!args.append);
        assert!(!args.number);
        assert_eq!(args.length, None);
        assert_eq!(args.verbosity(), Verbosity::Verbose);
    }

    #[test]
    fn file_is_optional_at_parse_level() {
        let args = Args::parse_from(["muxgrab"]);
        assert!(args.file.is_none());
    }

    #[test]
    fn length_parses() {
        let args = Args::parse_from(["muxgrab", "out.txt", "--length", "40"]);
        assert_eq!(args.length, Some(40));
        let args = Args::parse_from(["muxgrab", "out.txt", "-l", "0"]);
        assert_eq!(args.length, Some(0));
    }

    #[test]
    fn quiet_selects_quiet_verbosity() {
        let args = Args::parse_from(["muxgrab", "out.txt", "--quiet"]);
        assert_eq!(args.verbosity(), Verbosity::Quiet);
        assert_eq!(args.verbosity().diagnostic_lines(), 0);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["muxgrab", "out.txt", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn verbose_counts_one_diagnostic_line() {
        let args = Args::parse_from(["muxgrab", "out.txt", "--verbose"]);
        assert_eq!(args.verbosity().diagnostic_lines(), 1);
    }
}
