//! Command-line interface definitions for tandem.
//!
//! Uses `clap` derive macros, with clap's own help flag replaced so that
//! `-h`, `--help`, and a bare invocation all print the same usage text.

mod run;

pub use run::run_mode;

use clap::{ArgAction, CommandFactory, Parser};
use std::path::PathBuf;

const EXAMPLES: &str = "\
Example:
  tandem example.com
  tandem -f targets.txt";

/// Chain naabu port discovery into nmap service detection.
///
/// Results are kept under scans/<target>/<timestamp>/ and can be compiled
/// into a single report at the end of the run.
#[derive(Parser, Debug)]
#[command(name = "tandem")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Chain naabu port discovery into nmap service detection", long_about = None)]
#[command(override_usage = "tandem <TARGET> | -f <TARGET_FILE> | -h")]
#[command(disable_help_flag = true)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Scan a single target domain or IP address
    #[arg(value_name = "TARGET", conflicts_with = "file")]
    pub target: Option<String>,

    /// Scan multiple targets from a file, one per line
    #[arg(short = 'f', value_name = "TARGET_FILE", num_args = 0..=1)]
    pub file: Option<Option<PathBuf>>,

    /// Display this help message
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    pub help: bool,

    /// Path to a JSON settings file
    #[arg(long, env = "TANDEM_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// What an invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Print usage and exit successfully.
    Help,
    /// Scan one target given on the command line.
    Single(String),
    /// Scan every line of a file; `None` when `-f` had no path.
    File(Option<PathBuf>),
}

impl Cli {
    /// Decide the mode. Help wins over everything else, and an invocation
    /// with neither a target nor `-f` is treated as a request for help.
    pub fn mode(&self) -> Mode {
        if self.help {
            return Mode::Help;
        }

        match (&self.target, &self.file) {
            (_, Some(file)) => Mode::File(file.clone()),
            (Some(target), None) => Mode::Single(target.clone()),
            (None, None) => Mode::Help,
        }
    }
}

/// The usage text shown for every help request.
pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode_of(args: &[&str]) -> Mode {
        Cli::try_parse_from(args).unwrap().mode()
    }

    #[test]
    fn test_help_modes() {
        assert_eq!(mode_of(&["tandem"]), Mode::Help);
        assert_eq!(mode_of(&["tandem", "-h"]), Mode::Help);
        assert_eq!(mode_of(&["tandem", "--help"]), Mode::Help);
    }

    #[test]
    fn test_help_text_mentions_usage_and_examples() {
        let text = help_text();
        assert!(text.contains("tandem <TARGET> | -f <TARGET_FILE> | -h"));
        assert!(text.contains("tandem example.com"));
        assert!(text.contains("tandem -f targets.txt"));
        assert_eq!(text, help_text());
    }

    #[test]
    fn test_single_target() {
        assert_eq!(
            mode_of(&["tandem", "example.com"]),
            Mode::Single("example.com".to_string())
        );
        // Not validated at parse time.
        assert_eq!(
            mode_of(&["tandem", "not_valid"]),
            Mode::Single("not_valid".to_string())
        );
    }

    #[test]
    fn test_file_mode() {
        assert_eq!(
            mode_of(&["tandem", "-f", "targets.txt"]),
            Mode::File(Some(PathBuf::from("targets.txt")))
        );
        assert_eq!(mode_of(&["tandem", "-f"]), Mode::File(None));
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(mode_of(&["tandem", "-h", "-f", "targets.txt"]), Mode::Help);
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::try_parse_from(["tandem", "-v", "--config", "s.json", "10.0.0.1"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("s.json")));
        assert_eq!(cli.mode(), Mode::Single("10.0.0.1".to_string()));
    }

    #[test]
    fn test_target_and_file_conflict() {
        assert!(Cli::try_parse_from(["tandem", "example.com", "-f", "t.txt"]).is_err());
    }
}
