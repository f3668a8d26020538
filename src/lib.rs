//! # tandem - naabu → nmap scan orchestration
//!
//! tandem runs a fast port discoverer and a service fingerprinting tool back
//! to back for each target, keeps their raw output under
//! `scans/<target>/<timestamp>/`, and can fold every fingerprinting report
//! into one combined file at the end of a run.
//!
//! ## Features
//!
//! - **Syntactic Target Checks**: dotted-quad IPv4 or domain-shaped names
//! - **Two-Phase Scans**: discovered ports are handed straight to `nmap -sS -sV`
//! - **Batch Mode**: scan every line of a target file, skipping bad lines
//! - **Persistent Results**: raw outputs plus a timestamped log per session
//! - **Compiled Report**: optional concatenation of all `nmap.txt` results
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use tandem::config::Settings;
//! use tandem::runner::SystemRunner;
//! use tandem::session::ScanSession;
//! use tandem::types::Target;
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = Settings::default();
//!     let runner = SystemRunner::from_settings(&settings);
//!     let target = Target::parse("scanme.nmap.org").unwrap();
//!
//!     let outcome = ScanSession::new(&runner, &settings).run(&target).await.unwrap();
//!     println!("completed: {}", outcome.is_completed());
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated targets and port lists
//! - [`runner`] - The `ToolRunner` trait and the process-spawning runner
//! - [`session`] - One discovery + fingerprinting cycle and its files
//! - [`batch`] - Per-target dispatch and the run tally
//! - [`report`] - Compiled report and the confirmation strategy
//! - [`config`] - Settings loading
//! - [`error`] - Error types
//! - [`output`] - Terminal output helpers

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod report;
pub mod runner;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use batch::{BatchRunner, RunTally};
pub use error::{CliError, SessionError};
pub use runner::{SystemRunner, ToolOutput, ToolRunner};
pub use session::{ScanSession, SessionOutcome};
pub use types::{PortList, Target};
