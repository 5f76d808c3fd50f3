//! Common test infrastructure for specify-project tests
//!
//! - `fixtures`: in-memory zip archives shaped like template releases
//! - `mock_server`: wiremock release API serving those archives
//! - `recorder`: a step observer that records every event

#![allow(dead_code)]

pub mod fixtures;
pub mod mock_server;
pub mod recorder;

pub use fixtures::*;
pub use mock_server::*;
pub use recorder::*;
