//! Ambient context
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`context`] | Shared and thread-local swappable slots |
//! | [`globals`] | `Globals`, the application root object owning the slots |
//! | [`id`] | Tick-seeded unique-id generator |

pub mod context;
pub mod globals;
pub mod id;

pub use context::{AmbientContext, ThreadLocalAmbientContext};
pub use globals::Globals;
pub use id::TickIdGenerator;
