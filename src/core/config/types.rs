//! Public configuration types.
//!
//! These are the resolved, ready-to-use structs that the pipeline and the
//! comms channel consume. Raw TOML deserialization types live in `raw.rs`.

use std::path::PathBuf;
use std::time::Duration;

/// HTTP server and process settings (`[server]`).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Display name used in logs and `/health`.
    pub name: String,
    pub log_level: String,
    /// Socket address the axum channel binds to.
    pub bind: String,
    /// Size of the fixed tokio worker pool.
    pub workers: usize,
    /// Front-end page served verbatim at `GET /`.
    pub index_file: PathBuf,
}

/// Response cache settings (`[cache]`).
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
    /// `None` when the background sweeper is disabled.
    pub sweep_interval: Option<Duration>,
}

/// Knowledge base sources (`[knowledge]`).
#[derive(Debug, Clone)]
pub struct KnowledgeConfig {
    /// Load the built-in seed entries.
    pub builtin: bool,
    /// Optional TOML file with extra `[[entry]]` tables.
    pub path: Option<PathBuf>,
}

/// Gemini `generateContent` backend (`[llm.gemini]`).
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Models collection URL; `/{model}:generateContent` is appended.
    pub api_base_url: String,
    pub model: String,
    pub connect_timeout_seconds: u64,
    pub read_timeout_seconds: u64,
}

/// Generator configuration (`[llm]`).
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider is active: `"gemini"`, `"dummy"` or `"none"`.
    pub provider: String,
    pub gemini: GeminiConfig,
}

/// Fully-resolved service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub knowledge: KnowledgeConfig,
    pub llm: LlmConfig,
    /// Generator credential from `GEMINI_API_KEY`. Never sourced from TOML.
    pub gemini_api_key: Option<String>,
}

/// Values taken from the process environment that override the file.
///
/// Tests build this directly instead of mutating env vars.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind: Option<String>,
    pub log_level: Option<String>,
    pub gemini_api_key: Option<String>,
}

impl Overrides {
    /// Read `HEALTHAI_BIND`, `HEALTHAI_LOG_LEVEL` and `GEMINI_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            bind: std::env::var("HEALTHAI_BIND").ok(),
            log_level: std::env::var("HEALTHAI_LOG_LEVEL").ok(),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
        }
    }
}
