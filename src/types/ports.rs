//! Port lists handed from port discovery to service fingerprinting.

use std::fmt;

/// Ports probed during discovery unless the settings override them.
pub const DEFAULT_DISCOVERY_PORTS: &str = "80,81,8000,8080,8888,3000,5000,10000,2082,2095";

/// Ordered port tokens parsed from port-discovery output.
///
/// Tokens are kept as strings in the order they were seen. Nothing is
/// de-duplicated or range-checked; the discovery tool is trusted to emit
/// either `host:port` or bare `port` lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortList {
    tokens: Vec<String>,
}

impl PortList {
    /// Parse discovery output.
    ///
    /// Each line is trimmed and blank lines are skipped. A line splitting on
    /// `:` into two segments contributes the second; a line without a colon
    /// contributes itself; anything else (IPv6-style `a:b:c`) contributes
    /// nothing.
    pub fn parse(output: &str) -> Self {
        let tokens = output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| {
                let parts: Vec<&str> = line.split(':').collect();
                match parts.as_slice() {
                    [_, port] => Some(port.to_string()),
                    [bare] => Some(bare.to_string()),
                    _ => None,
                }
            })
            .collect();

        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The comma-joined form passed to the fingerprinting tool's `-p` flag.
    pub fn to_arg(&self) -> String {
        self.tokens.join(",")
    }
}

impl fmt::Display for PortList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_arg())
    }
}
