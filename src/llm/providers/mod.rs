//! Provider implementations.
//!
//! `build(config, api_key)` is the factory: called once at startup.
//! Adding a new backend = new module + new match arm.

pub mod dummy;
#[cfg(feature = "provider-gemini")]
pub mod gemini;

use crate::config::LlmConfig;
use crate::llm::{LlmProvider, ProviderError};

/// Construct the configured provider.
///
/// Returns `Ok(None)` when generation is switched off (`"none"`), when the
/// backend needs a credential and `api_key` is `None`, or when the backend
/// is not compiled in. The caller is expected to have filtered placeholder
/// credentials already.
pub fn build(config: &LlmConfig, api_key: Option<String>) -> Result<Option<LlmProvider>, ProviderError> {
    match config.provider.as_str() {
        "none" => Ok(None),
        "dummy" => Ok(Some(LlmProvider::Dummy(dummy::DummyProvider))),
        #[cfg(feature = "provider-gemini")]
        "gemini" => match api_key {
            Some(key) => {
                let p = gemini::GeminiProvider::new(&config.gemini, key)?;
                Ok(Some(LlmProvider::Gemini(p)))
            }
            None => Ok(None),
        },
        #[cfg(not(feature = "provider-gemini"))]
        "gemini" => {
            let _ = api_key;
            tracing::warn!("gemini provider configured but not compiled in");
            Ok(None)
        }
        other => Err(ProviderError::UnknownProvider(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn llm_config(provider: &str) -> LlmConfig {
        let mut cfg = Config::test_default().llm;
        cfg.provider = provider.into();
        cfg
    }

    #[test]
    fn none_builds_nothing() {
        assert!(build(&llm_config("none"), None).unwrap().is_none());
    }

    #[test]
    fn dummy_needs_no_key() {
        let p = build(&llm_config("dummy"), None).unwrap().unwrap();
        assert_eq!(p.name(), "dummy");
    }

    #[test]
    fn gemini_without_key_builds_nothing() {
        assert!(build(&llm_config("gemini"), None).unwrap().is_none());
    }

    #[cfg(feature = "provider-gemini")]
    #[test]
    fn gemini_with_key() {
        let p = build(&llm_config("gemini"), Some("k".into())).unwrap().unwrap();
        assert_eq!(p.name(), "gemini");
    }

    #[test]
    fn unknown_provider_errors() {
        let err = build(&llm_config("openai"), None).unwrap_err();
        assert!(matches!(err, ProviderError::UnknownProvider(ref n) if n == "openai"));
    }
}
