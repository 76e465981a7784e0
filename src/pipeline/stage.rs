//! Resolver stages, tried in order until one produces a reply.

use tracing::debug;

use super::{Pipeline, Source};
use crate::knowledge::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Fresh entry in the response cache.
    Cache,
    /// Offline knowledge base match, rendered to prose.
    KnowledgeBase,
    /// External text generator.
    Generator,
}

impl Stage {
    pub const DEFAULT_ORDER: [Stage; 3] = [Stage::Cache, Stage::KnowledgeBase, Stage::Generator];

    /// Provenance tag for replies produced by this stage.
    pub fn source(self) -> Source {
        match self {
            Stage::Cache => Source::Cache,
            Stage::KnowledgeBase => Source::Local,
            Stage::Generator => Source::Gemini,
        }
    }

    /// Whether a reply from this stage is stored in the cache.
    pub fn writes_through(self) -> bool {
        !matches!(self, Stage::Cache)
    }

    /// `key` is the normalized query, `raw` the message as received.
    pub(super) async fn try_resolve(self, pipeline: &Pipeline, key: &str, raw: &str) -> Option<String> {
        match self {
            Stage::Cache => pipeline.cache.get(key),
            Stage::KnowledgeBase => pipeline.knowledge.resolve_with_tier(key).map(|(tier, entry)| {
                debug!(?tier, entry = %entry.name, "knowledge match");
                render(entry)
            }),
            Stage::Generator => pipeline.generator.generate(raw).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order() {
        assert_eq!(Stage::DEFAULT_ORDER, [Stage::Cache, Stage::KnowledgeBase, Stage::Generator]);
    }

    #[test]
    fn only_cache_skips_write_through() {
        assert!(!Stage::Cache.writes_through());
        assert!(Stage::KnowledgeBase.writes_through());
        assert!(Stage::Generator.writes_through());
    }

    #[test]
    fn sources() {
        assert_eq!(Stage::Cache.source(), Source::Cache);
        assert_eq!(Stage::KnowledgeBase.source(), Source::Local);
        assert_eq!(Stage::Generator.source(), Source::Gemini);
    }
}
