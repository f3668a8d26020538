//! Runner that spawns the real executables.

use super::traits::{ToolOutput, ToolRunner};
use crate::config::Settings;
use crate::error::{RunnerError, RunnerResult};
use crate::types::{PortList, Target};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Spawns `naabu` and `nmap` (or whatever the settings name) as child
/// processes and waits for each to finish. No timeout is applied.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    port_scanner: String,
    service_scanner: String,
}

impl SystemRunner {
    /// Create a runner for the given executables.
    pub fn new(port_scanner: impl Into<String>, service_scanner: impl Into<String>) -> Self {
        Self {
            port_scanner: port_scanner.into(),
            service_scanner: service_scanner.into(),
        }
    }

    /// Create a runner from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.port_scanner, &settings.service_scanner)
    }

    /// Arguments for the discovery tool, in invocation order.
    pub fn discovery_args(target: &Target, ports: &str) -> Vec<OsString> {
        vec![
            "-host".into(),
            target.as_str().into(),
            "-p".into(),
            ports.into(),
            "-silent".into(),
        ]
    }

    /// Arguments for the fingerprinting tool, in invocation order.
    pub fn fingerprint_args(target: &Target, ports: &PortList, report: &Path) -> Vec<OsString> {
        vec![
            "-sS".into(),
            "-sV".into(),
            "-Pn".into(),
            "-p".into(),
            ports.to_arg().into(),
            "-oN".into(),
            report.as_os_str().to_os_string(),
            target.as_str().into(),
        ]
    }
}

#[async_trait]
impl ToolRunner for SystemRunner {
    async fn discover_ports(&self, target: &Target, ports: &str) -> RunnerResult<ToolOutput> {
        let args = Self::discovery_args(target, ports);
        debug!(program = %self.port_scanner, ?args, "spawning port discovery");

        let output = Command::new(&self.port_scanner)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| RunnerError::Spawn {
                program: self.port_scanner.clone(),
                source,
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        debug!(status = ?output.status.code(), bytes = text.len(), "port discovery finished");
        Ok(ToolOutput::new(output.status.code(), text))
    }

    async fn fingerprint_services(
        &self,
        target: &Target,
        ports: &PortList,
        report: &Path,
    ) -> RunnerResult<ToolOutput> {
        let args = Self::fingerprint_args(target, ports, report);
        debug!(program = %self.service_scanner, ?args, "spawning service fingerprinting");

        // The tool's own progress goes straight to the terminal; its report
        // lands in `report` via -oN.
        let mut child = Command::new(&self.service_scanner)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                program: self.service_scanner.clone(),
                source,
            })?;

        let status = child.wait().await.map_err(|source| RunnerError::Wait {
            program: self.service_scanner.clone(),
            source,
        })?;

        debug!(status = ?status.code(), "service fingerprinting finished");
        Ok(ToolOutput::new(status.code(), String::new()))
    }
}
