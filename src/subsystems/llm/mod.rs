//! Generator adapter: the last tier of the answer cascade.
//!
//! Wraps an optional [`LlmProvider`]. Every failure (no credential, transport
//! error, timeout, HTTP error status, unrecognised reply) is logged here and
//! reported to the caller only as `None`.

pub mod prompt;

use tracing::{debug, info, warn};

use crate::config::LlmConfig;
use crate::llm::{LlmProvider, ProviderError, providers};

const PLACEHOLDER_PREFIX: &str = "YOUR_";

/// `Some(key)` only for a non-blank credential that is not a template placeholder.
pub fn usable_credential(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty() && !k.starts_with(PLACEHOLDER_PREFIX))
}

#[derive(Debug, Clone, Default)]
pub struct GeneratorAdapter {
    provider: Option<LlmProvider>,
}

impl GeneratorAdapter {
    pub fn new(provider: LlmProvider) -> Self {
        Self { provider: Some(provider) }
    }

    /// An adapter that never calls out.
    pub fn disabled() -> Self {
        Self { provider: None }
    }

    /// Build from `[llm]` and the raw `GEMINI_API_KEY` value.
    ///
    /// A missing or placeholder credential disables the adapter with a
    /// warning; only an unknown provider name or a client build failure is
    /// an error.
    pub fn from_config(config: &LlmConfig, api_key: Option<String>) -> Result<Self, ProviderError> {
        let api_key = usable_credential(api_key);
        if config.provider == "gemini" && api_key.is_none() {
            warn!("GEMINI_API_KEY missing or placeholder — generator disabled");
        }
        let provider = providers::build(config, api_key)?;
        match &provider {
            Some(p) => info!(provider = p.name(), "generator ready"),
            None => info!(configured = %config.provider, "generator disabled"),
        }
        Ok(Self { provider })
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(LlmProvider::name)
    }

    /// Ask the provider about `user_message`. Never fails; `None` means
    /// no usable answer.
    pub async fn generate(&self, user_message: &str) -> Option<String> {
        let Some(provider) = &self.provider else {
            debug!("generator disabled — skipping external call");
            return None;
        };

        let prompt = prompt::build(user_message);
        match provider.complete(&prompt).await {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                warn!(provider = provider.name(), "generator returned empty text");
                None
            }
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "generator call failed");
                None
            }
        }
    }
}
