//! Common test infrastructure for specify-release tests
//!
//! - `constants`: tags, asset names, archive bytes
//! - `builders`: fluent builder for release JSON payloads
//! - `mock_server`: wiremock setup for the release API and asset host

#![allow(dead_code)]

pub mod builders;
pub mod constants;
pub mod mock_server;

pub use builders::*;
pub use constants::*;
pub use mock_server::*;
