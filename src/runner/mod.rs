//! Runner module - launches the external scanning tools.
//!
//! The session talks to the tools only through [`ToolRunner`]. The real
//! implementation spawns child processes with `tokio::process`.

pub mod system;
pub mod traits;

#[cfg(test)]
pub(crate) mod scripted;

pub use system::SystemRunner;
pub use traits::{ToolOutput, ToolRunner};
