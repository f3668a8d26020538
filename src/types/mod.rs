//! Core type definitions using newtype patterns for type safety.
//!
//! A [`Target`] can only exist once it has passed validation, and a
//! [`PortList`] keeps discovery output in the order the tool reported it.

mod ports;
mod target;

pub use ports::{PortList, DEFAULT_DISCOVERY_PORTS};
pub use target::{is_valid_domain, is_valid_ip, Target, TargetError, TargetKind};
