//! Activities: the things statements are about.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::verb::LanguageMap;

/// Something an actor interacted with, identified by IRI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub definition: Option<ActivityDefinition>,
}

/// Optional descriptive metadata attached to an activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDefinition {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<LanguageMap>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<LanguageMap>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub activity_type: Option<String>,
}

#[derive(Debug, Error)]
#[error("activity id must be a non-empty IRI")]
pub struct EmptyActivityId;

impl Activity {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            definition: None,
        }
    }

    pub fn validate(&self) -> Result<(), EmptyActivityId> {
        if self.id.trim().is_empty() {
            Err(EmptyActivityId)
        } else {
            Ok(())
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl From<&str> for Activity {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Activity {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::Activity;

    #[test]
    fn bare_iri_builds_an_activity() {
        let activity = Activity::from("http://example.org/activities/x");
        assert_eq!(activity.id, "http://example.org/activities/x");
        assert!(activity.definition.is_none());
        assert!(activity.is_valid());
    }

    #[test]
    fn empty_id_is_invalid() {
        assert!(!Activity::new("").is_valid());
    }

    #[test]
    fn definition_round_trips() {
        let value = serde_json::json!({
            "id": "http://example.org/activities/x",
            "definition": {
                "name": { "en": "Example" },
                "type": "http://adlnet.gov/expapi/activities/course"
            }
        });
        let activity: Activity = serde_json::from_value(value.clone()).unwrap();
        let definition = activity.definition.as_ref().unwrap();
        assert_eq!(
            definition.activity_type.as_deref(),
            Some("http://adlnet.gov/expapi/activities/course")
        );
        assert_eq!(serde_json::to_value(&activity).unwrap(), value);
    }
}
