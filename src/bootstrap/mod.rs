//! Bootstrap layer: modules that run before the pipeline starts serving.
//!
//! - **logger**: tracing-subscriber initialisation.

pub mod logger;
