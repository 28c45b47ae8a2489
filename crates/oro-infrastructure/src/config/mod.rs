//! Configuration
//!
//! TOML configuration merged with environment variables through Figment.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
