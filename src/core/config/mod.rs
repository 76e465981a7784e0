//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory
//! (or the `-f` path), then applies `HEALTHAI_BIND`, `HEALTHAI_LOG_LEVEL`
//! and `GEMINI_API_KEY` from the environment.
//!
//! # Module layout
//!
//! - **types**: Public configuration structs (`Config`, `CacheConfig`, …).
//! - **raw**: Raw TOML deserialization types. These mirror the file shape
//!   and use serde defaults; kept private.
//! - **load**: Loading logic: `merge_toml`, `load_raw_merged`, `load`,
//!   `load_from`, `expand_home`.

mod load;
mod raw;
mod types;

pub use load::{expand_home, load, load_from};
pub use types::*;

impl Config {
    /// Config for tests and embedding: dummy generator, no credential,
    /// built-in knowledge, default cache TTL.
    pub fn test_default() -> Self {
        Self {
            server: ServerConfig {
                name: "test".into(),
                log_level: "info".into(),
                bind: raw::default_bind(),
                workers: 2,
                index_file: raw::default_index_file().into(),
            },
            cache: CacheConfig {
                ttl: std::time::Duration::from_secs(raw::default_ttl_seconds()),
                sweep_interval: None,
            },
            knowledge: KnowledgeConfig { builtin: true, path: None },
            llm: LlmConfig {
                provider: "dummy".into(),
                gemini: GeminiConfig {
                    api_base_url: raw::default_gemini_api_base_url(),
                    model: raw::default_gemini_model(),
                    connect_timeout_seconds: 1,
                    read_timeout_seconds: 1,
                },
            },
            gemini_api_key: None,
        }
    }
}
