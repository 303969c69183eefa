//! Service layer module
//!
//! Contains the upstream completion client

pub mod client;

pub use client::{AnthropicClient, CompletionClient};
