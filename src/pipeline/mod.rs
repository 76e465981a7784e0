//! Query resolution pipeline.
//!
//! Greeting shortcut first, then each [`Stage`] in order. Knowledge and
//! generator replies are written through to the cache. Every path returns
//! a well-formed [`AnswerResult`]; nothing here can fail.
//!
//! The cache write happens after the generator future resolves, in the same
//! poll. A request dropped while the generator call is in flight therefore
//! never touches the cache.

pub mod classifier;
pub mod stage;

pub use classifier::{QueryKind, classify};
pub use stage::Stage;

use std::sync::Arc;

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::knowledge::{KnowledgeBase, normalize_key};
use crate::subsystems::cache::{Clock, ResponseCache};
use crate::subsystems::llm::GeneratorAdapter;

pub const GREETING_REPLY: &str = "👋 Hello — I’m HealthAI Pro+. Ask about diseases, symptoms, prevention, and general treatments. This assistant provides informational content only.";

pub const APOLOGY_REPLY: &str = "Sorry, I couldn't fetch details at the moment. Try again later.";

/// Which tier produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Greeting shortcut or knowledge base.
    Local,
    Cache,
    /// External generator.
    Gemini,
    /// Every tier missed.
    None,
}

/// Reply envelope returned for every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// RFC 3339 UTC instant the answer was produced.
    pub timestamp: String,
    /// The message as received.
    pub query: String,
    pub structured: bool,
    pub reply: String,
    pub source: Source,
}

pub struct Pipeline {
    knowledge: Arc<KnowledgeBase>,
    cache: Arc<ResponseCache>,
    generator: GeneratorAdapter,
    clock: Arc<dyn Clock>,
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        cache: Arc<ResponseCache>,
        generator: GeneratorAdapter,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            knowledge,
            cache,
            generator,
            clock,
            stages: Stage::DEFAULT_ORDER.to_vec(),
        }
    }

    /// Replace the stage order.
    pub fn with_stages(mut self, stages: impl Into<Vec<Stage>>) -> Self {
        self.stages = stages.into();
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn generator(&self) -> &GeneratorAdapter {
        &self.generator
    }

    /// Answer one message. Callers reject blank input first; a blank
    /// message still gets the apology rather than a panic.
    pub async fn answer(&self, raw: &str) -> AnswerResult {
        if classify(raw) == QueryKind::Greeting {
            debug!(source = "local", "greeting shortcut");
            return self.finish(raw, false, GREETING_REPLY.to_string(), Source::Local);
        }

        let key = normalize_key(raw);
        if !key.is_empty() {
            for &stage in &self.stages {
                let Some(text) = stage.try_resolve(self, &key, raw).await else {
                    continue;
                };
                if stage.writes_through() {
                    self.cache.put(key.as_str(), text.as_str());
                    debug!(%key, ?stage, "cached reply");
                }
                let source = stage.source();
                debug!(?source, "answered");
                return self.finish(raw, true, text, source);
            }
        }

        debug!(source = "none", "all tiers missed");
        self.finish(raw, false, APOLOGY_REPLY.to_string(), Source::None)
    }

    fn finish(&self, raw: &str, structured: bool, reply: String, source: Source) -> AnswerResult {
        AnswerResult {
            timestamp: self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true),
            query: raw.to_string(),
            structured,
            reply,
            source,
        }
    }
}
