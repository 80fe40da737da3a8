//! Shared utilities

pub mod config;
pub mod fs;
pub mod jsonc;

pub use config::ToolConfig;
pub use jsonc::JsoncDocument;
