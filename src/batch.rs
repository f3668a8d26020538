//! Batch runner - validates targets and drives one session per target.
//!
//! The runner owns a [`RunTally`] that each session outcome is folded into.
//! The batch loop is the recovery boundary: a rejected target, a failed
//! tool, or a filesystem error in one session never stops the next target.

use crate::config::Settings;
use crate::error::{CliError, CliResult};
use crate::output;
use crate::runner::ToolRunner;
use crate::session::{ScanSession, SessionOutcome};
use crate::types::Target;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Counters and target list for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTally {
    /// Targets handed to a session, whatever the outcome.
    pub scanned: usize,
    /// Sessions where both tools ran cleanly.
    pub completed: usize,
    /// Inputs that failed validation.
    pub rejected: usize,
    /// Dispatched targets, in order.
    pub targets: Vec<Target>,
}

impl RunTally {
    /// Note that `target` is about to be scanned.
    pub fn dispatched(&mut self, target: Target) {
        self.scanned += 1;
        self.targets.push(target);
    }

    /// Fold a session outcome into the counters.
    pub fn record(&mut self, outcome: &SessionOutcome) {
        if outcome.is_completed() {
            self.completed += 1;
        }
    }

    pub fn reject(&mut self) {
        self.rejected += 1;
    }
}

/// Drives sessions for single targets or target files.
pub struct BatchRunner<'a, R: ToolRunner + ?Sized> {
    session: ScanSession<'a, R>,
    tally: RunTally,
}

impl<'a, R: ToolRunner + ?Sized> BatchRunner<'a, R> {
    pub fn new(runner: &'a R, settings: &'a Settings) -> Self {
        Self {
            session: ScanSession::new(runner, settings),
            tally: RunTally::default(),
        }
    }

    pub fn tally(&self) -> &RunTally {
        &self.tally
    }

    pub fn into_tally(self) -> RunTally {
        self.tally
    }

    /// Scan one explicit target. An invalid target is an error here.
    pub async fn run_single(&mut self, raw: &str) -> CliResult<()> {
        let target = Target::parse(raw)?;
        self.dispatch(target).await;
        Ok(())
    }

    /// Scan every non-blank line of `path`. Invalid lines are reported and
    /// skipped; only a missing or unreadable file is an error.
    pub async fn run_file(&mut self, path: &Path) -> CliResult<()> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| CliError::TargetFile {
            path: path.to_path_buf(),
            source,
        })?;
        info!(file = %path.display(), "reading targets");

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match Target::parse(line) {
                Ok(target) => self.dispatch(target).await,
                Err(e) => {
                    output::print_invalid(&e);
                    self.tally.reject();
                }
            }
        }

        Ok(())
    }

    async fn dispatch(&mut self, target: Target) {
        debug!(host = %target, kind = %target.kind(), "dispatching session");
        self.tally.dispatched(target.clone());

        match self.session.run(&target).await {
            Ok(outcome) => self.tally.record(&outcome),
            Err(e) => output::print_error(&format!("{}: {}", target, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TargetError;
    use crate::runner::scripted::{ScriptedRunner, Step};
    use tempfile::TempDir;

    fn settings_in(dir: &TempDir) -> Settings {
        Settings {
            scans_root: dir.path().join("scans"),
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn test_file_with_valid_and_invalid_lines() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let targets = dir.path().join("targets.txt");
        fs::write(&targets, "example.com\nnot a target\n").unwrap();
        let runner = ScriptedRunner::succeeding("example.com:80\n");

        let mut batch = BatchRunner::new(&runner, &settings);
        batch.run_file(&targets).await.unwrap();
        let tally = batch.into_tally();

        assert_eq!(tally.scanned, 1);
        assert_eq!(tally.completed, 1);
        assert_eq!(tally.rejected, 1);
        assert_eq!(tally.targets, vec![Target::parse("example.com").unwrap()]);
        assert!(settings.scans_root.join("example.com").is_dir());
        assert!(!settings.scans_root.join("not a target").exists());
    }

    #[tokio::test]
    async fn test_file_lines_trimmed_and_blank_skipped() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let targets = dir.path().join("targets.txt");
        fs::write(&targets, "\n  10.0.0.1  \n\n\t\nscanme.example.org\r\n").unwrap();
        let runner = ScriptedRunner::succeeding("80\n");

        let mut batch = BatchRunner::new(&runner, &settings);
        batch.run_file(&targets).await.unwrap();

        assert_eq!(batch.tally().scanned, 2);
        assert_eq!(batch.tally().rejected, 0);
        assert_eq!(
            batch.tally().targets,
            vec![
                Target::parse("10.0.0.1").unwrap(),
                Target::parse("scanme.example.org").unwrap(),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_sessions_still_counted_as_scanned() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let targets = dir.path().join("targets.txt");
        fs::write(&targets, "10.0.0.1\n10.0.0.2\n").unwrap();
        let runner = ScriptedRunner::new(Step::Exit(0, String::new()), Step::Missing);

        let mut batch = BatchRunner::new(&runner, &settings);
        batch.run_file(&targets).await.unwrap();

        assert_eq!(batch.tally().scanned, 2);
        assert_eq!(batch.tally().completed, 0);
    }

    #[tokio::test]
    async fn test_service_failure_not_completed() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let runner = ScriptedRunner::new(
            Step::Exit(0, "80\n".to_string()),
            Step::Exit(1, String::new()),
        );

        let mut batch = BatchRunner::new(&runner, &settings);
        batch.run_single("example.com").await.unwrap();

        assert_eq!(batch.tally().scanned, 1);
        assert_eq!(batch.tally().completed, 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let runner = ScriptedRunner::succeeding("80\n");

        let mut batch = BatchRunner::new(&runner, &settings);
        let result = batch.run_file(&dir.path().join("absent.txt")).await;

        assert!(matches!(result, Err(CliError::FileNotFound(_))));
        assert!(runner.calls().is_empty());
        assert_eq!(batch.tally(), &RunTally::default());
    }

    #[tokio::test]
    async fn test_single_invalid_target_is_error() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let runner = ScriptedRunner::succeeding("80\n");

        let mut batch = BatchRunner::new(&runner, &settings);
        let result = batch.run_single("999.1.1.1").await;

        assert!(matches!(
            result,
            Err(CliError::Target(TargetError::Invalid(ref s))) if s == "999.1.1.1"
        ));
        assert_eq!(batch.tally().scanned, 0);
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_targets_kept_in_order() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let runner = ScriptedRunner::succeeding("80\n");

        let mut batch = BatchRunner::new(&runner, &settings);
        batch.run_single("example.com").await.unwrap();
        batch.run_single("example.com").await.unwrap();

        assert_eq!(batch.tally().scanned, 2);
        assert_eq!(batch.tally().targets.len(), 2);
    }
}
