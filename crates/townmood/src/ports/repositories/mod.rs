//! Repository Ports
//!
//! Abstract interfaces for remote data access. Everything here is read-only.

mod geo;
mod mood_cache;

pub use geo::*;
pub use mood_cache::*;
