//! Configuration management module
//!
//! Responsible for loading and managing application configuration from environment variables and prompt files.

pub mod persona;
pub mod settings;

pub use persona::{PersonaConfig, PromptSource, DEFAULT_SYSTEM_PROMPT};
pub use settings::Settings;
