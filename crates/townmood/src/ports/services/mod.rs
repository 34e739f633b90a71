//! Service Ports
//!
//! Abstract interfaces for external hosted services.

mod forum;
mod llm_provider;
mod web_search;

pub use forum::*;
pub use llm_provider::*;
pub use web_search::*;
