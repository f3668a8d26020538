//! Scan session - one discovery + fingerprinting cycle for one target.
//!
//! A session creates the target's timestamped directory, runs port
//! discovery, turns its output into a port list, and hands that list to the
//! service scanner. Tool failures and empty discovery results end the
//! session with a [`SessionOutcome`]; only filesystem trouble is an error.

pub mod layout;
pub mod log;

pub use layout::{target_dir, ScanDirectory, LOG_FILE, PORT_SCAN_FILE, SERVICE_SCAN_FILE};
pub use log::SessionLog;

use crate::config::Settings;
use crate::error::{SessionError, SessionResult};
use crate::runner::ToolRunner;
use crate::types::{PortList, Target};
use chrono::{DateTime, Local};
use std::fs;
use tracing::{debug, warn};

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Both tools ran and exited cleanly.
    Completed {
        directory: ScanDirectory,
        ports: PortList,
    },
    /// Port discovery could not run or exited non-zero.
    PortScanFailed,
    /// Port discovery produced no output.
    NoOpenPorts,
    /// Service fingerprinting could not run or exited non-zero.
    ServiceScanFailed,
}

impl SessionOutcome {
    /// Check whether the full cycle completed.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Runs sessions with a given tool runner and settings.
pub struct ScanSession<'a, R: ToolRunner + ?Sized> {
    runner: &'a R,
    settings: &'a Settings,
}

impl<'a, R: ToolRunner + ?Sized> ScanSession<'a, R> {
    pub fn new(runner: &'a R, settings: &'a Settings) -> Self {
        Self { runner, settings }
    }

    /// Scan `target`, stamping its directory with the current local time.
    pub async fn run(&self, target: &Target) -> SessionResult<SessionOutcome> {
        self.run_at(target, &Local::now()).await
    }

    /// Scan `target`, stamping its directory with `now`.
    pub async fn run_at(
        &self,
        target: &Target,
        now: &DateTime<Local>,
    ) -> SessionResult<SessionOutcome> {
        let directory = ScanDirectory::create(&self.settings.scans_root, target, now)?;
        let log = SessionLog::new(directory.log_file());
        let port_file = directory.port_scan_file();
        let service_file = directory.service_scan_file();

        log.log(&format!("[*] Running Naabu on {}...", target))?;

        let discovery = match self
            .runner
            .discover_ports(target, &self.settings.discovery_ports)
            .await
        {
            Ok(output) if output.success() => output,
            Ok(output) => {
                warn!(host = %target, %output, "port discovery failed");
                log.log("[-] Naabu failed to run.")?;
                return Ok(SessionOutcome::PortScanFailed);
            }
            Err(e) => {
                warn!(host = %target, error = %e, "port discovery failed");
                log.log("[-] Naabu failed to run.")?;
                return Ok(SessionOutcome::PortScanFailed);
            }
        };

        println!("{}", discovery.text);
        fs::write(&port_file, &discovery.text).map_err(|source| SessionError::Write {
            path: port_file.clone(),
            source,
        })?;

        let size = fs::metadata(&port_file)
            .map_err(|source| SessionError::Read {
                path: port_file.clone(),
                source,
            })?
            .len();
        if size == 0 {
            log.log("[-] No open ports found by Naabu.")?;
            return Ok(SessionOutcome::NoOpenPorts);
        }

        let raw = fs::read_to_string(&port_file).map_err(|source| SessionError::Read {
            path: port_file.clone(),
            source,
        })?;
        let ports = PortList::parse(&raw);
        debug!(host = %target, count = ports.len(), ports = %ports, "parsed discovery output");

        log.log(&format!(
            "[*] Running Nmap on {} with ports: {}",
            target, ports
        ))?;

        match self
            .runner
            .fingerprint_services(target, &ports, &service_file)
            .await
        {
            Ok(output) if output.success() => {}
            Ok(output) => {
                warn!(host = %target, %output, "service fingerprinting failed");
                log.log("[-] Nmap failed to run.")?;
                return Ok(SessionOutcome::ServiceScanFailed);
            }
            Err(e) => {
                warn!(host = %target, error = %e, "service fingerprinting failed");
                log.log("[-] Nmap failed to run.")?;
                return Ok(SessionOutcome::ServiceScanFailed);
            }
        }

        log.log("[+] Scan complete:")?;
        log.log(&format!("    - Naabu output: {}", port_file.display()))?;
        log.log(&format!("    - Nmap output:  {}", service_file.display()))?;
        log.log(&format!("    - Log file:     {}", log.path().display()))?;

        Ok(SessionOutcome::Completed { directory, ports })
    }
}
