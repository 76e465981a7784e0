//! Offline knowledge base of disease records.
//!
//! The base is assembled once at startup (built-in seed, then an optional
//! TOML file) and shared read-only behind an `Arc` afterwards, so lookups
//! need no locking.
//!
//! Keys are the entry name trimmed and lower-cased. Insertion order is kept
//! because the resolver uses it as the final tie-break.

mod resolve;
mod seed;

pub use resolve::{MatchTier, capitalize_words, render};

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::KnowledgeConfig;
use crate::error::AppError;

/// One disease record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KnowledgeEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub prevention: Vec<String>,
}

/// Trim and lower-case a name or query into lookup-key form.
pub fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Shape of a knowledge file: a list of `[[entry]]` tables.
#[derive(Deserialize)]
struct KnowledgeFile {
    #[serde(default)]
    entry: Vec<KnowledgeEntry>,
}

/// Insertion-ordered map from normalized name to [`KnowledgeEntry`].
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<(String, KnowledgeEntry)>,
    index: HashMap<String, usize>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// A base holding only the built-in seed records.
    pub fn with_builtin() -> Self {
        let mut kb = Self::new();
        for entry in seed::builtin() {
            // Seed names are non-blank constants.
            let _ = kb.insert(entry);
        }
        kb
    }

    /// Build the base described by `[knowledge]`.
    pub fn from_config(config: &KnowledgeConfig) -> Result<Self, AppError> {
        let mut kb = if config.builtin { Self::with_builtin() } else { Self::new() };
        if let Some(path) = &config.path {
            kb.load_file(path)?;
        }
        info!(entries = kb.len(), builtin = config.builtin, "knowledge base ready");
        Ok(kb)
    }

    /// Insert or replace an entry. A replaced entry keeps its original position.
    pub fn insert(&mut self, entry: KnowledgeEntry) -> Result<(), AppError> {
        let key = normalize_key(&entry.name);
        if key.is_empty() {
            return Err(AppError::Knowledge("entry name must not be blank".into()));
        }
        match self.index.get(&key) {
            Some(&pos) => {
                debug!(%key, "replacing knowledge entry");
                self.entries[pos].1 = entry;
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, entry));
            }
        }
        Ok(())
    }

    /// Merge every `[[entry]]` of a TOML file. Returns the number read.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, AppError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| AppError::Knowledge(format!("cannot read {}: {e}", path.display())))?;
        let file: KnowledgeFile = toml::from_str(&raw)
            .map_err(|e| AppError::Knowledge(format!("parse error in {}: {e}", path.display())))?;
        let count = file.entry.len();
        for entry in file.entry {
            self.insert(entry)
                .map_err(|e| AppError::Knowledge(format!("{}: {e}", path.display())))?;
        }
        debug!(path = %path.display(), count, "knowledge file loaded");
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup by key (normalized before comparison).
    pub fn get(&self, key: &str) -> Option<&KnowledgeEntry> {
        self.index.get(&normalize_key(key)).map(|&i| &self.entries[i].1)
    }

    /// `(key, entry)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KnowledgeEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Best entry for `query`, or `None`. See [`MatchTier`] for the order.
    pub fn resolve(&self, query: &str) -> Option<&KnowledgeEntry> {
        self.resolve_with_tier(query).map(|(_, e)| e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn entry(name: &str) -> KnowledgeEntry {
        KnowledgeEntry {
            name: name.into(),
            description: format!("about {name}"),
            symptoms: vec![],
            prevention: vec![],
        }
    }

    #[test]
    fn builtin_has_seed_entries() {
        let kb = KnowledgeBase::with_builtin();
        assert_eq!(kb.len(), 9);
        assert!(kb.get("malaria").is_some());
        assert!(kb.get("  Jock Itch ").is_some());
        assert!(kb.get("gout").is_none());
    }

    #[test]
    fn insert_normalizes_key() {
        let mut kb = KnowledgeBase::new();
        kb.insert(entry("  Gout ")).unwrap();
        assert_eq!(kb.iter().next().unwrap().0, "gout");
        assert_eq!(kb.get("GOUT").unwrap().name, "  Gout ");
    }

    #[test]
    fn blank_name_rejected() {
        let mut kb = KnowledgeBase::new();
        let err = kb.insert(entry("   ")).unwrap_err();
        assert!(err.to_string().contains("blank"));
        assert!(kb.is_empty());
    }

    #[test]
    fn replacement_keeps_position() {
        let mut kb = KnowledgeBase::new();
        kb.insert(entry("a")).unwrap();
        kb.insert(entry("b")).unwrap();
        let mut replaced = entry("A");
        replaced.description = "new".into();
        kb.insert(replaced).unwrap();
        let keys: Vec<_> = kb.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(kb.get("a").unwrap().description, "new");
    }

    #[test]
    fn load_file_adds_entries() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(
            br#"
[[entry]]
name = "gout"
description = "Gout is a form of inflammatory arthritis."
symptoms = ["Joint pain", "Swelling"]
prevention = ["Limit alcohol"]

[[entry]]
name = "Malaria"
description = "overridden"
"#,
        )
        .unwrap();
        let mut kb = KnowledgeBase::with_builtin();
        let n = kb.load_file(f.path()).unwrap();
        assert_eq!(n, 2);
        assert_eq!(kb.len(), 10);
        assert_eq!(kb.get("gout").unwrap().symptoms, vec!["Joint pain", "Swelling"]);
        assert_eq!(kb.get("malaria").unwrap().description, "overridden");
        assert!(kb.get("malaria").unwrap().symptoms.is_empty());
    }

    #[test]
    fn load_file_bad_toml_errors() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"[[entry]\nname = ").unwrap();
        let err = KnowledgeBase::new().load_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("knowledge error"));
    }

    #[test]
    fn from_config_without_builtin() {
        let cfg = KnowledgeConfig { builtin: false, path: None };
        let kb = KnowledgeBase::from_config(&cfg).unwrap();
        assert!(kb.is_empty());
    }

    #[test]
    fn from_config_missing_file_errors() {
        let cfg = KnowledgeConfig {
            builtin: true,
            path: Some("/nonexistent/knowledge.toml".into()),
        };
        assert!(KnowledgeBase::from_config(&cfg).is_err());
    }
}
