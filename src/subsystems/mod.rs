//! Subsystem modules for the HealthAI service.

pub mod cache;
pub mod comms;
pub mod llm;
pub mod runtime;
