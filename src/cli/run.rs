//! Execution of a parsed command line.

use super::{help_text, Cli, Mode};
use crate::batch::{BatchRunner, RunTally};
use crate::config::Settings;
use crate::error::{CliError, CliResult};
use crate::output;
use crate::report::{Confirm, ReportCompiler, StdinConfirm};
use crate::runner::{SystemRunner, ToolRunner};
use tracing::debug;

impl Cli {
    /// Execute the invocation against the real tools and the real terminal.
    pub async fn execute(&self) -> CliResult<()> {
        let mode = self.mode();
        if mode == Mode::Help {
            print!("{}", help_text());
            return Ok(());
        }

        let settings = Settings::load(self.config.as_deref())?;
        debug!(?settings, "settings loaded");
        let runner = SystemRunner::from_settings(&settings);

        run_mode(mode, &runner, &settings, &StdinConfirm).await?;
        Ok(())
    }
}

/// Run a mode to completion: scan, summarize, then offer the report.
///
/// Returns the tally of what was scanned. A failure to write the report is
/// reported but does not fail the run, since every scan has already finished.
pub async fn run_mode<R: ToolRunner + ?Sized>(
    mode: Mode,
    runner: &R,
    settings: &Settings,
    confirm: &dyn Confirm,
) -> CliResult<RunTally> {
    let mut batch = BatchRunner::new(runner, settings);

    match mode {
        Mode::Help => {
            print!("{}", help_text());
            return Ok(RunTally::default());
        }
        Mode::Single(target) => batch.run_single(&target).await?,
        Mode::File(None) => return Err(CliError::MissingFilePath),
        Mode::File(Some(path)) => batch.run_file(&path).await?,
    }

    let tally = batch.into_tally();
    output::print_summary(&tally, &settings.scans_root);

    let compiler = ReportCompiler::from_settings(settings);
    if let Err(e) = compiler.compile_if_confirmed(&tally.targets, confirm) {
        output::print_warning(&format!("could not compile results: {}", e));
    }

    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TargetError;
    use crate::runner::scripted::ScriptedRunner;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn settings_in(dir: &TempDir) -> Settings {
        Settings {
            scans_root: dir.path().join("scans"),
            report_file: dir.path().join("compiled_nmap_results.txt"),
            ..Settings::default()
        }
    }

    fn never(_: &str) -> bool {
        panic!("confirmation should not be requested")
    }

    #[tokio::test]
    async fn test_help_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let runner = ScriptedRunner::succeeding("80\n");

        let tally = run_mode(Mode::Help, &runner, &settings, &never).await.unwrap();

        assert_eq!(tally, RunTally::default());
        assert!(runner.calls().is_empty());
        assert!(!settings.scans_root.exists());
    }

    #[tokio::test]
    async fn test_missing_file_path() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let runner = ScriptedRunner::succeeding("80\n");

        let result = run_mode(Mode::File(None), &runner, &settings, &never).await;
        assert!(matches!(result, Err(CliError::MissingFilePath)));
    }

    #[tokio::test]
    async fn test_missing_target_file() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let runner = ScriptedRunner::succeeding("80\n");
        let path = dir.path().join("nope.txt");

        let result = run_mode(Mode::File(Some(path.clone())), &runner, &settings, &never).await;
        assert!(matches!(result, Err(CliError::FileNotFound(p)) if p == path));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_single_target_skips_summary_and_report() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let runner = ScriptedRunner::succeeding("80\n");

        let result = run_mode(
            Mode::Single("bad_target".to_string()),
            &runner,
            &settings,
            &never,
        )
        .await;

        assert!(matches!(result, Err(CliError::Target(TargetError::Invalid(_)))));
        assert!(!settings.report_file.exists());
    }

    #[tokio::test]
    async fn test_declined_report() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let runner = ScriptedRunner::succeeding("example.com:80\n");

        let tally = run_mode(
            Mode::Single("example.com".to_string()),
            &runner,
            &settings,
            &|_: &str| false,
        )
        .await
        .unwrap();

        assert_eq!(tally.scanned, 1);
        assert_eq!(tally.completed, 1);
        assert!(!settings.report_file.exists());
    }

    #[tokio::test]
    async fn test_file_run_with_accepted_report() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let targets: PathBuf = dir.path().join("targets.txt");
        fs::write(&targets, "example.com\n300.1.1.1\n10.0.0.7\n").unwrap();
        let runner = ScriptedRunner::succeeding("80\n");

        let tally = run_mode(Mode::File(Some(targets)), &runner, &settings, &|_: &str| true)
            .await
            .unwrap();

        assert_eq!(tally.scanned, 2);
        assert_eq!(tally.rejected, 1);

        let report = fs::read_to_string(&settings.report_file).unwrap();
        assert!(report.starts_with("# Compiled Nmap Results - "));
        let example = report.find("## example.com - ").unwrap();
        let other = report.find("## 10.0.0.7 - ").unwrap();
        assert!(example < other);
        assert_eq!(report.matches(&"#".repeat(60)).count(), 2);
        assert_eq!(report.matches("80/tcp open  http").count(), 2);
    }
}
