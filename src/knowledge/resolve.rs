//! Query → entry matching and reply rendering.

use std::cmp::Reverse;

use super::{KnowledgeBase, KnowledgeEntry, normalize_key};

const DISCLAIMER: &str = "⚕️ Disclaimer: This information is for educational purposes only.";

/// Which rule produced a knowledge match. Earlier tiers win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// Query equals a key.
    Exact,
    /// Query contains a key, or a key contains the whole query.
    /// Among several candidates the longest key wins; equal lengths fall
    /// back to insertion order.
    Contains,
    /// A whitespace-separated token of the query equals a key.
    Token,
}

impl KnowledgeBase {
    /// Like [`KnowledgeBase::resolve`] but also reports the matching tier.
    pub fn resolve_with_tier(&self, query: &str) -> Option<(MatchTier, &KnowledgeEntry)> {
        let q = normalize_key(query);
        if q.is_empty() {
            return None;
        }

        if let Some(entry) = self.get(&q) {
            return Some((MatchTier::Exact, entry));
        }

        if let Some(entry) = self.match_contains(&q) {
            return Some((MatchTier::Contains, entry));
        }

        self.match_token(&q).map(|entry| (MatchTier::Token, entry))
    }

    fn match_contains(&self, q: &str) -> Option<&KnowledgeEntry> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, (key, _))| q.contains(key.as_str()) || key.contains(q))
            .min_by_key(|(pos, (key, _))| (Reverse(key.len()), *pos))
            .map(|(_, (_, entry))| entry)
    }

    fn match_token(&self, q: &str) -> Option<&KnowledgeEntry> {
        q.split_whitespace().find_map(|token| self.get(token))
    }
}

/// Upper-case the first character of every whitespace-separated word and
/// re-join with single spaces.
pub fn capitalize_words(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render an entry as the multi-section reply text.
///
/// Empty symptom or prevention lists drop their section entirely.
pub fn render(entry: &KnowledgeEntry) -> String {
    let mut out = String::new();
    out.push_str(&capitalize_words(&entry.name));
    out.push_str("\n\n");
    out.push_str(&entry.description);
    out.push_str("\n\n");
    if !entry.symptoms.is_empty() {
        out.push_str("Symptoms: ");
        out.push_str(&entry.symptoms.join(", "));
        out.push_str(".\n\n");
    }
    if !entry.prevention.is_empty() {
        out.push_str("Prevention: ");
        out.push_str(&entry.prevention.join(", "));
        out.push_str(".\n\n");
    }
    out.push_str(DISCLAIMER);
    out
}
