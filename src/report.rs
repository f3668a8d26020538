//! Combined report of every fingerprinting result from this run.
//!
//! After the batch finishes, the user may opt in to concatenating each
//! scanned target's `nmap.txt` files into a single text report.

use crate::config::Settings;
use crate::error::{ReportError, ReportResult};
use crate::session::{target_dir, SERVICE_SCAN_FILE};
use crate::types::Target;
use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Question asked before compiling.
pub const COMPILE_PROMPT: &str =
    "\n[?] Do you want to compile all Nmap results into one file? (y/n): ";

/// Width of the `#` rule closing each section.
pub const SEPARATOR_WIDTH: usize = 60;

/// A yes/no decision source.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> io::Result<bool>;
}

/// Closures make convenient stand-ins for a user.
impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> io::Result<bool> {
        Ok(self(prompt))
    }
}

/// Asks on stdout and reads the answer from stdin. Only `y` (any case,
/// surrounding whitespace ignored) counts as yes.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> io::Result<bool> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(is_yes(&input))
    }
}

fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Concatenates fingerprinting reports for a list of targets.
#[derive(Debug, Clone)]
pub struct ReportCompiler {
    scans_root: PathBuf,
    output: PathBuf,
}

impl ReportCompiler {
    pub fn new(scans_root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            scans_root: scans_root.into(),
            output: output.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.scans_root, &settings.report_file)
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Ask first; compile only on a yes. Returns the report path if written.
    pub fn compile_if_confirmed(
        &self,
        targets: &[Target],
        confirm: &dyn Confirm,
    ) -> ReportResult<Option<PathBuf>> {
        if !confirm.confirm(COMPILE_PROMPT)? {
            debug!("report compilation declined");
            return Ok(None);
        }

        let path = self.compile(targets, &Local::now())?;
        println!("[+] Compiled Nmap results saved to: {}", path.display());
        Ok(Some(path))
    }

    /// Write the report, overwriting any previous one.
    ///
    /// Targets are visited in the order given (duplicates included); a target
    /// without a directory under the scans root is skipped.
    pub fn compile(&self, targets: &[Target], now: &DateTime<Local>) -> ReportResult<PathBuf> {
        let file = File::create(&self.output).map_err(|e| self.write_error(e))?;
        let mut out = BufWriter::new(file);

        write!(
            out,
            "# Compiled Nmap Results - {}\n\n",
            now.format("%Y-%m-%d %H:%M:%S%.6f")
        )
        .map_err(|e| self.write_error(e))?;

        for target in targets {
            let dir = target_dir(&self.scans_root, target.as_str());
            if !dir.exists() {
                debug!(host = %target, "no scan directory, skipping");
                continue;
            }

            let mut reports = Vec::new();
            collect_reports(&dir, &mut reports)?;

            for report in reports {
                let contents = fs::read(&report).map_err(|source| ReportError::Read {
                    path: report.clone(),
                    source,
                })?;

                self.write_section(&mut out, target, &report, &contents)
                    .map_err(|e| self.write_error(e))?;
            }
        }

        out.flush().map_err(|e| self.write_error(e))?;
        Ok(self.output.clone())
    }

    fn write_section(
        &self,
        out: &mut impl Write,
        target: &Target,
        report: &Path,
        contents: &[u8],
    ) -> io::Result<()> {
        writeln!(out, "## {} - {}", target, report.display())?;
        out.write_all(contents)?;
        write!(out, "\n{}\n\n", "#".repeat(SEPARATOR_WIDTH))
    }

    fn write_error(&self, source: io::Error) -> ReportError {
        ReportError::Write {
            path: self.output.clone(),
            source,
        }
    }
}

/// Walk `dir` top-down in name order, collecting fingerprinting reports.
/// Files in a directory come before its subdirectories.
fn collect_reports(dir: &Path, found: &mut Vec<PathBuf>) -> ReportResult<()> {
    let read_error = |source| ReportError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(read_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut subdirs = Vec::new();
    for entry in entries {
        let file_type = entry.file_type().map_err(read_error)?;
        if file_type.is_dir() {
            subdirs.push(entry.path());
        } else if entry.file_name() == SERVICE_SCAN_FILE {
            found.push(entry.path());
        }
    }

    for subdir in subdirs {
        collect_reports(&subdir, found)?;
    }

    Ok(())
}
