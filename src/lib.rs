//! HealthAI Pro+: medical question answering over a cascade of tiers:
//! greeting shortcut, response cache, offline knowledge base and an
//! external text generator.
//!
//! The binary entry point is `src/main.rs`; everything is exposed here so
//! integration tests can drive the pipeline and the HTTP router directly.

mod core;

pub mod bootstrap;
pub mod knowledge;
pub mod llm;
pub mod pipeline;
pub mod subsystems;

pub use crate::core::{config, error};
pub use bootstrap::logger;
