//! Scripted runner used by the session and batch tests.

use super::traits::{ToolOutput, ToolRunner};
use crate::error::{RunnerError, RunnerResult};
use crate::types::{PortList, Target};
use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::sync::Mutex;

/// Canned behaviour for one tool.
#[derive(Debug, Clone)]
pub enum Step {
    /// Exit with the given code, producing the given text.
    Exit(i32, String),
    /// Fail to start at all.
    Missing,
}

/// A [`ToolRunner`] that replays canned results and records every call.
pub struct ScriptedRunner {
    discovery: Step,
    fingerprint: Step,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new(discovery: Step, fingerprint: Step) -> Self {
        Self {
            discovery,
            fingerprint,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Discovery succeeds with `text`; fingerprinting writes a small report.
    pub fn succeeding(text: &str) -> Self {
        Self::new(
            Step::Exit(0, text.to_string()),
            Step::Exit(0, "PORT   STATE SERVICE\n80/tcp open  http\n".to_string()),
        )
    }

    /// Calls made so far, as `"<tool> <target> <ports>"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn missing(program: &str) -> RunnerError {
    RunnerError::Spawn {
        program: program.to_string(),
        source: io::Error::new(io::ErrorKind::NotFound, "not found"),
    }
}

#[async_trait]
impl ToolRunner for ScriptedRunner {
    async fn discover_ports(&self, target: &Target, ports: &str) -> RunnerResult<ToolOutput> {
        self.record(format!("naabu {} {}", target, ports));
        match &self.discovery {
            Step::Exit(code, text) => Ok(ToolOutput::new(Some(*code), text.clone())),
            Step::Missing => Err(missing("naabu")),
        }
    }

    async fn fingerprint_services(
        &self,
        target: &Target,
        ports: &PortList,
        report: &Path,
    ) -> RunnerResult<ToolOutput> {
        self.record(format!("nmap {} {}", target, ports));
        match &self.fingerprint {
            Step::Exit(code, text) => {
                // Like the real tool, the report is written even on failure.
                std::fs::write(report, text).map_err(|source| RunnerError::Wait {
                    program: "nmap".to_string(),
                    source,
                })?;
                Ok(ToolOutput::new(Some(*code), String::new()))
            }
            Step::Missing => Err(missing("nmap")),
        }
    }
}
