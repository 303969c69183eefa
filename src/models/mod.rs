//! Data models module
//!
//! Defines the relay endpoint bodies and the Anthropic Messages API structures

pub mod anthropic;
pub mod chat;

pub use anthropic::{MessagesRequest, MessagesResponse, Usage};
pub use chat::{ChatRequest, ChatResponse, ErrorBody};
