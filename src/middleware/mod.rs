//! Middleware module
//!
//! Cross-cutting request handling shared by all routes

pub mod logging;
