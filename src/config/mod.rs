//! Configuration management for the solo arena module
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values.

pub mod app;
pub mod solo;
pub mod talents;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use solo::SoloQueueSettings;
pub use talents::TalentTabSettings;
