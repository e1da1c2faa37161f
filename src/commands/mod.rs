//! Command implementations for Preflight CLI

pub mod completions;
pub mod health;
pub mod preload;
pub mod version;
