use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::messaging::RawMessage;

/// Mentions inside free text. `\b` is Unicode-aware, so a key glued to a
/// non-ASCII letter is not a mention.
static KEY_IN_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][A-Z0-9]+-\d+\b").expect("valid key pattern"));

/// A whole string that is exactly one key.
static WHOLE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9]+-\d+$").expect("valid key pattern"));

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid ticket key: {0:?}")]
pub struct InvalidTicketKey(pub String);

/// A Jira issue key such as `OPS-42`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketKey(String);

impl TicketKey {
    pub fn parse(s: &str) -> Result<Self, InvalidTicketKey> {
        if WHOLE_KEY.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidTicketKey(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TicketKey {
    type Err = InvalidTicketKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TicketKey {
    type Error = InvalidTicketKey;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<TicketKey> for String {
    fn from(key: TicketKey) -> Self {
        key.0
    }
}

/// Unique keys mentioned across `messages`.
pub fn extract_keys(messages: &[RawMessage]) -> BTreeSet<TicketKey> {
    messages
        .iter()
        .flat_map(|m| KEY_IN_TEXT.find_iter(&m.text))
        .map(|m| TicketKey(m.as_str().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msgs(texts: &[&str]) -> Vec<RawMessage> {
        texts.iter().map(|t| RawMessage::new("1.0", *t)).collect()
    }

    fn keys(set: &BTreeSet<TicketKey>) -> Vec<&str> {
        set.iter().map(|k| k.as_str()).collect()
    }

    #[test]
    fn test_parse_valid_keys() {
        assert!(TicketKey::parse("ABC-123").is_ok());
        assert!(TicketKey::parse("A1-9").is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["abc-123", "A-1", "ABC-", "ABC-12a", "1AB-3", " ABC-1", ""] {
            assert!(TicketKey::parse(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_extract_deduplicates() {
        let set = extract_keys(&msgs(&[
            "Deploying PROJ-1 now",
            "PROJ-1 done, next OPS-9",
            "no tickets here",
        ]));
        assert_eq!(keys(&set), vec!["OPS-9", "PROJ-1"]);
    }

    #[test]
    fn test_extract_respects_word_boundaries() {
        let set = extract_keys(&msgs(&[
            "xPROJ-1 PROJ-2x pr-3 A-4 (CHG-5), <https://jira/browse/CHG-6|CHG-6>",
        ]));
        assert_eq!(keys(&set), vec!["CHG-5", "CHG-6"]);
    }

    #[test]
    fn test_extract_ignores_keys_touching_non_ascii_letters() {
        let set = extract_keys(&msgs(&["ÄPROJ-1 and OPS-2é", "naïveCHG-3"]));
        assert!(set.is_empty());

        let set = extract_keys(&msgs(&["Ä PROJ-1 → OPS-2 é"]));
        assert_eq!(keys(&set), vec!["OPS-2", "PROJ-1"]);
    }

    #[test]
    fn test_extract_every_match_is_a_valid_key() {
        let set = extract_keys(&msgs(&["AB-1-2 AB12-345 X9Y-0 ab-1 AB_1-2"]));
        for key in &set {
            assert!(WHOLE_KEY.is_match(key.as_str()));
        }
        assert!(set.contains(&TicketKey::parse("AB12-345").unwrap()));
        assert!(set.contains(&TicketKey::parse("X9Y-0").unwrap()));
    }

    #[test]
    fn test_extract_is_order_independent() {
        let forward = msgs(&["CHG-1 and OPS-2", "OPS-2", "INFRA-77 CHG-1"]);
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(extract_keys(&forward), extract_keys(&reversed));
    }

    #[test]
    fn test_extract_empty_text() {
        assert!(extract_keys(&msgs(&["", ""])).is_empty());
        assert!(extract_keys(&[]).is_empty());
    }

    #[test]
    fn test_key_serde_validates() {
        let key: TicketKey = serde_json::from_str(r#""OPS-1""#).unwrap();
        assert_eq!(key.to_string(), "OPS-1");
        assert!(serde_json::from_str::<TicketKey>(r#""ops-1""#).is_err());
    }
}
