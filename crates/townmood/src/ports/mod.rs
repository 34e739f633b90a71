//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the call-flow interacts with the
//! hosted services (search, forum, model, store).
//!
//! Implementations of these traits live in `services/`.

pub mod repositories;
pub mod services;

// Re-exports
pub use repositories::*;
pub use services::*;
