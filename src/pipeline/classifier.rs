//! Greeting detection.

use crate::knowledge::normalize_key;

/// Phrases that mark a message as a greeting when found anywhere in it.
pub const GREETING_PHRASES: [&str; 6] = [
    "hi",
    "hello",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Greeting,
    Substantive,
}

/// Substring match against [`GREETING_PHRASES`] after trimming and
/// lower-casing. Note that this also catches words like "which" or "this".
pub fn classify(raw: &str) -> QueryKind {
    let text = normalize_key(raw);
    if GREETING_PHRASES.iter().any(|p| text.contains(p)) {
        QueryKind::Greeting
    } else {
        QueryKind::Substantive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greetings() {
        for msg in ["hi", "Hello there", "  HEY  ", "good Morning doc", "oh hello", "Good evening!"] {
            assert_eq!(classify(msg), QueryKind::Greeting, "{msg}");
        }
    }

    #[test]
    fn substantive() {
        for msg in ["malaria", "explain gout", "what is dengue?", "good night", "jock itch"] {
            assert_eq!(classify(msg), QueryKind::Substantive, "{msg}");
        }
    }

    #[test]
    fn substring_not_word() {
        assert_eq!(classify("which vaccine"), QueryKind::Greeting);
        assert_eq!(classify("chikungunya"), QueryKind::Greeting);
    }
}
