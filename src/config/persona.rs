//! Persona (system prompt) configuration
//!
//! The system prompt is resolved from, in order: the `SYSTEM_PROMPT` variable,
//! the file named by `SYSTEM_PROMPT_FILE`, then the built-in persona.

use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;

/// Built-in airline customer service persona
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Aria, a helpful and friendly AI assistant for Air New Zealand. You help customers with:
- Flight bookings and searches
- Flight status updates
- Check-in assistance
- Baggage information
- Travel policies
- General inquiries

Be professional, warm, and concise. Always prioritize customer service.";

/// Where the active system prompt came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    /// Built-in persona
    Default,
    /// `SYSTEM_PROMPT` environment variable
    Env,
    /// File referenced by `SYSTEM_PROMPT_FILE`
    File(PathBuf),
}

impl fmt::Display for PromptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptSource::Default => write!(f, "built-in persona"),
            PromptSource::Env => write!(f, "SYSTEM_PROMPT"),
            PromptSource::File(path) => write!(f, "file {}", path.display()),
        }
    }
}

/// Persona configuration
#[derive(Debug, Clone)]
pub struct PersonaConfig {
    /// System prompt sent with every upstream request
    pub system_prompt: String,
    /// Origin of the prompt (for startup logging)
    pub source: PromptSource,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            source: PromptSource::Default,
        }
    }
}

impl PersonaConfig {
    /// Resolve the persona from the given inline prompt and prompt file path
    pub fn resolve(inline: Option<String>, file: Option<String>) -> Result<Self> {
        if let Some(prompt) = inline.filter(|p| !p.trim().is_empty()) {
            return Ok(Self {
                system_prompt: prompt,
                source: PromptSource::Env,
            });
        }

        if let Some(path) = file.filter(|p| !p.trim().is_empty()) {
            let path = PathBuf::from(path);
            let prompt = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read system prompt file {}", path.display()))?;
            let prompt = prompt.trim_end().to_string();

            if prompt.trim().is_empty() {
                anyhow::bail!("System prompt file {} is empty", path.display());
            }

            return Ok(Self {
                system_prompt: prompt,
                source: PromptSource::File(path),
            });
        }

        Ok(Self::default())
    }
}
