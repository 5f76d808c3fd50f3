//! Type definitions for the Specify runtime configuration and domain catalogs

mod agent_types;
mod project_types;
mod runtime_config;

pub use agent_types::*;
pub use project_types::*;
pub use runtime_config::*;
