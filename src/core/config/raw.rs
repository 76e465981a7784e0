//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape and use `serde` defaults, so an
//! empty file (or no file at all) resolves to a working configuration.
//! The `load` module converts them into the public `types` structs.

use serde::Deserialize;

// ── Top-level ────────────────────────────────────────────────────────────────

/// Raw TOML shape: serde target before resolution.
#[derive(Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub server: RawServer,
    #[serde(default)]
    pub cache: RawCache,
    #[serde(default)]
    pub knowledge: RawKnowledge,
    #[serde(default)]
    pub llm: RawLlm,
}

// ── Server ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawServer {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

impl Default for RawServer {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
            bind: default_bind(),
            workers: default_workers(),
            index_file: default_index_file(),
        }
    }
}

// ── Cache ────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawCache {
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    /// `0` disables the background sweeper; expiry stays lazy.
    #[serde(default)]
    pub sweep_interval_seconds: u64,
}

impl Default for RawCache {
    fn default() -> Self {
        Self { ttl_seconds: default_ttl_seconds(), sweep_interval_seconds: 0 }
    }
}

// ── Knowledge ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawKnowledge {
    #[serde(default = "default_true")]
    pub builtin: bool,
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for RawKnowledge {
    fn default() -> Self {
        Self { builtin: true, path: None }
    }
}

// ── LLM ──────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawLlm {
    /// Maps to `default = "..."` in `[llm]`.
    #[serde(rename = "default", default = "default_llm_provider")]
    pub provider: String,
    #[serde(default)]
    pub gemini: RawGeminiConfig,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self { provider: default_llm_provider(), gemini: RawGeminiConfig::default() }
    }
}

#[derive(Deserialize)]
pub(super) struct RawGeminiConfig {
    #[serde(default = "default_gemini_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,
    #[serde(default = "default_read_timeout_seconds")]
    pub read_timeout_seconds: u64,
}

impl Default for RawGeminiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_gemini_api_base_url(),
            model: default_gemini_model(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            read_timeout_seconds: default_read_timeout_seconds(),
        }
    }
}

// ── Defaults ─────────────────────────────────────────────────────────────────

pub(super) fn default_name() -> String { "HealthAI Pro+".to_string() }
pub(super) fn default_log_level() -> String { "info".to_string() }
pub(super) fn default_bind() -> String { "127.0.0.1:8080".to_string() }
pub(super) fn default_workers() -> usize { 16 }
pub(super) fn default_index_file() -> String { "static/index.html".to_string() }
pub(super) fn default_ttl_seconds() -> u64 { 6 * 60 * 60 }
fn default_llm_provider() -> String { "gemini".to_string() }
pub(super) fn default_gemini_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}
pub(super) fn default_gemini_model() -> String { "gemini-2.5-flash".to_string() }
fn default_connect_timeout_seconds() -> u64 { 8 }
fn default_read_timeout_seconds() -> u64 { 16 }

fn default_true() -> bool {
    true
}
