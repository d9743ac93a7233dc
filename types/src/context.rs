//! Optional context substructure of a statement.
//!
//! `context` stays absent until a mutation helper needs it; the `_mut`
//! accessors get-or-create exactly the missing level and hand back the live
//! reference, so a second call never resets what the first one built.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::activity::Activity;
use crate::ids::Registration;

/// Named ordered lists of activities related to a statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextActivities {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parent: Option<Vec<Activity>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub grouping: Option<Vec<Activity>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub other: Option<Vec<Activity>>,
}

impl ContextActivities {
    /// Parent list, created empty on first access.
    pub fn parent_mut(&mut self) -> &mut Vec<Activity> {
        self.parent.get_or_insert_default()
    }

    /// Grouping list, created empty on first access.
    pub fn grouping_mut(&mut self) -> &mut Vec<Activity> {
        self.grouping.get_or_insert_default()
    }

    /// Other-context list, created empty on first access.
    pub fn other_mut(&mut self) -> &mut Vec<Activity> {
        self.other.get_or_insert_default()
    }
}

/// Context a statement happened in. Only `registration` and
/// `contextActivities` are modeled; everything else (instructor, platform,
/// revision, ...) passes through `extra` verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub registration: Option<Registration>,
    #[serde(
        rename = "contextActivities",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub context_activities: Option<ContextActivities>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Context {
    /// Context-activities substructure, created empty on first access.
    pub fn activities_mut(&mut self) -> &mut ContextActivities {
        self.context_activities.get_or_insert_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Context, ContextActivities};
    use crate::activity::Activity;

    #[test]
    fn accessors_create_missing_structure() {
        let mut context = Context::default();
        assert!(context.context_activities.is_none());
        let parent = context.activities_mut().parent_mut();
        assert!(parent.is_empty());
    }

    #[test]
    fn second_access_returns_the_same_list() {
        let mut activities = ContextActivities::default();
        activities
            .parent_mut()
            .push(Activity::from("http://example.org/activities/a"));
        // no reset: the entry pushed through the first reference survives
        let parent = activities.parent_mut();
        assert_eq!(parent.len(), 1);
        assert_eq!(parent[0].id, "http://example.org/activities/a");
    }

    #[test]
    fn unmodeled_fields_pass_through() {
        let value = json!({
            "registration": "019545f0-9923-7a7b-8e2b-333333333333",
            "platform": "Example LMS",
            "language": "en"
        });
        let context: Context = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(context.extra["platform"], "Example LMS");
        assert_eq!(serde_json::to_value(&context).unwrap(), value);
    }
}
