//! Target validation.
//!
//! A target is accepted when it is shaped like a dotted-quad IPv4 address or
//! like a domain name. Validation is purely syntactic: nothing is resolved
//! and nothing is contacted.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static IPV4_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").expect("valid IPv4 pattern"));

static DOMAIN_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}$").expect("valid domain pattern")
});

/// Check whether `s` is a dotted-quad IPv4 address.
///
/// The pattern alone admits groups such as `999`, so every octet is also
/// range-checked after the shape matches.
pub fn is_valid_ip(s: &str) -> bool {
    if !IPV4_SHAPE.is_match(s) {
        return false;
    }

    s.split('.')
        .all(|octet| octet.parse::<u16>().map_or(false, |n| n <= 255))
}

/// Check whether `s` looks like a domain name (`label.` groups followed by an
/// alphabetic TLD of at least two characters).
pub fn is_valid_domain(s: &str) -> bool {
    DOMAIN_SHAPE.is_match(s)
}

/// Which rule accepted a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Ipv4,
    Domain,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv4 => write!(f, "ipv4"),
            Self::Domain => write!(f, "domain"),
        }
    }
}

/// Error type for target validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("'{0}' is not a valid IP or domain.")]
    Invalid(String),
}

/// A target that passed validation.
///
/// Only constructible through [`Target::parse`], so holding one means the
/// string is IPv4-shaped or domain-shaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target(String);

impl Target {
    /// Validate a target string.
    ///
    /// The input is taken verbatim; callers reading from files trim first.
    pub fn parse(s: &str) -> Result<Self, TargetError> {
        if is_valid_ip(s) || is_valid_domain(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(TargetError::Invalid(s.to_string()))
        }
    }

    /// The target string as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Which rule accepted this target.
    pub fn kind(&self) -> TargetKind {
        if is_valid_ip(&self.0) {
            TargetKind::Ipv4
        } else {
            TargetKind::Domain
        }
    }
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Target {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
