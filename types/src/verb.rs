//! The verb of a statement: what the actor did.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Map of RFC 5646 language tag to display string, ordered by tag.
pub type LanguageMap = BTreeMap<String, String>;

/// Action identifier plus optional human-readable display entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verb {
    /// IRI naming the action, e.g. `http://adlnet.gov/expapi/verbs/completed`.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub display: Option<LanguageMap>,
}

#[derive(Debug, Error)]
#[error("verb id must be a non-empty IRI")]
pub struct EmptyVerbId;

impl Verb {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display: None,
        }
    }

    #[must_use]
    pub fn with_display(
        id: impl Into<String>,
        language: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let mut display = LanguageMap::new();
        display.insert(language.into(), text.into());
        Self {
            id: id.into(),
            display: Some(display),
        }
    }

    pub fn validate(&self) -> Result<(), EmptyVerbId> {
        if self.id.trim().is_empty() {
            Err(EmptyVerbId)
        } else {
            Ok(())
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Display text: the `en` entry if present, else any entry, else the IRI.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.display
            .as_ref()
            .and_then(|display| display.get("en").or_else(|| display.values().next()))
            .map_or(self.id.as_str(), String::as_str)
    }
}

impl From<&str> for Verb {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Verb {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::Verb;

    #[test]
    fn empty_id_is_invalid() {
        assert!(!Verb::new("").is_valid());
        assert!(!Verb::new("   ").is_valid());
        assert!(Verb::new("http://example.org/verbs/did").is_valid());
    }

    #[test]
    fn display_text_prefers_english() {
        let mut verb = Verb::with_display("http://example.org/verbs/did", "sv", "gjorde");
        assert_eq!(verb.display_text(), "gjorde");
        verb.display
            .as_mut()
            .unwrap()
            .insert("en".to_owned(), "did".to_owned());
        assert_eq!(verb.display_text(), "did");
    }

    #[test]
    fn display_text_falls_back_to_iri() {
        let verb = Verb::new("http://example.org/verbs/did");
        assert_eq!(verb.display_text(), "http://example.org/verbs/did");
    }

    #[test]
    fn display_omitted_from_wire_when_absent() {
        let json = serde_json::to_value(Verb::new("http://example.org/verbs/did")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "http://example.org/verbs/did" })
        );
    }
}
