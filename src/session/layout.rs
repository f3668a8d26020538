//! On-disk layout of scan results.
//!
//! Every session gets `<scans_root>/<target>/<YYYYMMDD-HHMM>/` holding the raw
//! discovery output, the fingerprinting report, and the session log.

use crate::error::{SessionError, SessionResult};
use crate::types::Target;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// Raw port-discovery output.
pub const PORT_SCAN_FILE: &str = "naabu.txt";
/// Fingerprinting report written by the service scanner.
pub const SERVICE_SCAN_FILE: &str = "nmap.txt";
/// Human-readable session narrative.
pub const LOG_FILE: &str = "scan.log";

/// Directory-name format for a session's timestamp (minute resolution).
pub const DIR_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M";

/// Root of all sessions for one target.
pub fn target_dir(scans_root: &Path, target: &str) -> PathBuf {
    scans_root.join(target)
}

/// A created scan directory and the files it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanDirectory {
    path: PathBuf,
}

impl ScanDirectory {
    /// Compute the directory for `target` at time `now` without touching disk.
    pub fn path_for(scans_root: &Path, target: &Target, now: &DateTime<Local>) -> PathBuf {
        target_dir(scans_root, target.as_str()).join(now.format(DIR_TIMESTAMP_FORMAT).to_string())
    }

    /// Create (or reuse, within the same minute) the directory for `target`.
    pub fn create(
        scans_root: &Path,
        target: &Target,
        now: &DateTime<Local>,
    ) -> SessionResult<Self> {
        let path = Self::path_for(scans_root, target, now);
        fs::create_dir_all(&path).map_err(|source| SessionError::CreateDir {
            path: path.clone(),
            source,
        })?;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn port_scan_file(&self) -> PathBuf {
        self.path.join(PORT_SCAN_FILE)
    }

    pub fn service_scan_file(&self) -> PathBuf {
        self.path.join(SERVICE_SCAN_FILE)
    }

    pub fn log_file(&self) -> PathBuf {
        self.path.join(LOG_FILE)
    }
}
