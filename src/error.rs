//! Error types for tandem.
//!
//! Uses `thiserror` for ergonomic error definitions. Soft failures of a scan
//! (no open ports, a tool exiting non-zero) are not errors; they are
//! reported through [`crate::session::SessionOutcome`].

use std::path::PathBuf;
use thiserror::Error;

pub use crate::types::TargetError;

/// Failure to launch or wait on an external tool.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting on '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Filesystem failures inside a single scan session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("failed to create scan directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors while compiling the combined report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read confirmation: {0}")]
    Prompt(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read config file {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid configuration format: {0}")]
    InvalidFormat(String),
}

/// Top-level errors surfaced by the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Please provide a file path.")]
    MissingFilePath,

    #[error("File '{0}' not found.")]
    FileNotFound(PathBuf),

    #[error("failed to read target file {path}: {source}")]
    TargetFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    Target(#[from] TargetError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for tool invocations.
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Result type alias for scan sessions.
pub type SessionResult<T> = Result<T, SessionError>;

/// Result type alias for report compilation.
pub type ReportResult<T> = Result<T, ReportError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
