//! Tool runner trait abstraction.
//!
//! Defines the narrow interface the scan session needs from the two external
//! tools, so a scripted runner can stand in for real processes in tests.

use crate::error::RunnerResult;
use crate::types::{PortList, Target};
use async_trait::async_trait;
use std::fmt;
use std::path::Path;

/// What an external tool left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Captured output text (empty when the tool writes its own file).
    pub text: String,
}

impl ToolOutput {
    /// Create an output record.
    pub fn new(exit_code: Option<i32>, text: impl Into<String>) -> Self {
        Self {
            exit_code,
            text: text.into(),
        }
    }

    /// Check whether the tool exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

impl fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exit_code {
            Some(code) => write!(f, "exit status {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Trait over the two external scanners.
///
/// # Example
///
/// ```ignore
/// use tandem::runner::{ToolRunner, SystemRunner};
///
/// async fn discover<R: ToolRunner>(runner: &R, target: &Target) -> bool {
///     runner.discover_ports(target, "80,443").await.map_or(false, |o| o.success())
/// }
/// ```
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run port discovery against `target` over the given port list.
    ///
    /// The returned text is the tool's combined stdout and stderr.
    async fn discover_ports(&self, target: &Target, ports: &str) -> RunnerResult<ToolOutput>;

    /// Run SYN + version detection against `target` on `ports`, with the
    /// tool writing its normal-format report to `report`.
    async fn fingerprint_services(
        &self,
        target: &Target,
        ports: &PortList,
        report: &Path,
    ) -> RunnerResult<ToolOutput>;
}
