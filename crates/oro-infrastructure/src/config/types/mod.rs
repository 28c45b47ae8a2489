//! Configuration types module

pub mod app;
pub mod codegen;
pub mod factory;
pub mod logging;

// Re-export main types
pub use app::*;
