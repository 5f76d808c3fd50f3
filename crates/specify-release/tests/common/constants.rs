//! Shared constants for test infrastructure

pub const TAG_V0_0_79: &str = "v0.0.79";
pub const PUBLISHED_AT: &str = "2025-10-01T08:00:00Z";

pub const ASSET_CLAUDE_SH: &str = "spec-kit-template-claude-sh-v0.0.79.zip";
pub const ASSET_CLAUDE_PS: &str = "spec-kit-template-claude-ps-v0.0.79.zip";
pub const ASSET_COPILOT_SH: &str = "spec-kit-template-copilot-sh-v0.0.79.zip";

pub const LATEST_RELEASE_PATH: &str = "/repos/mb-etc/spec-kit-etc/releases/latest";

pub const FAKE_ARCHIVE_CONTENT: &[u8] = b"PK\x03\x04 not really a zip but good enough to stream";
