//! Timestamped session narrative, echoed to the terminal and appended to
//! the session's `scan.log`.

use crate::error::{SessionError, SessionResult};
use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const LINE_TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Render one log line.
pub fn format_line(at: &DateTime<Local>, message: &str) -> String {
    format!("[{}] {}", at.format(LINE_TIMESTAMP_FORMAT), message)
}

/// Appends lines to a session log file.
#[derive(Debug, Clone)]
pub struct SessionLog {
    path: PathBuf,
}

impl SessionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Print a line stamped with the current time and append it to the file.
    pub fn log(&self, message: &str) -> SessionResult<()> {
        let line = format_line(&Local::now(), message);
        println!("{}", line);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.write_error(source))?;

        writeln!(file, "{}", line).map_err(|source| self.write_error(source))
    }

    fn write_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
