//! Configuration management for tandem.
//!
//! Provides XDG-aware loading of the JSON settings file.

mod settings;

pub use settings::{Paths, Settings};
