//! The `object` slot of a statement: what the action was done to.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::activity::{Activity, EmptyActivityId};
use crate::actor::{ActorError, Agent, Group};
use crate::ids::StatementId;
use crate::statement::{SubStatement, ValidationError};
use crate::wire;

/// Reference to another statement already held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRef {
    pub id: StatementId,
}

impl StatementRef {
    #[must_use]
    pub fn new(id: StatementId) -> Self {
        Self { id }
    }
}

#[derive(Debug, Error)]
pub enum ObjectError {
    #[error(transparent)]
    Activity(EmptyActivityId),
    #[error(transparent)]
    Actor(ActorError),
    #[error("sub-statement object is invalid")]
    SubStatement(#[source] Box<ValidationError>),
    #[error("object objectType names a variant this crate does not model")]
    Unrecognized,
}

/// Concrete variants an object can resolve to.
///
/// `Unrecognized` keeps values whose discriminator this crate does not model;
/// they round-trip verbatim and fail validation.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementObject {
    Activity(Activity),
    Agent(Agent),
    Group(Group),
    StatementRef(StatementRef),
    SubStatement(Box<SubStatement>),
    Unrecognized(Value),
}

impl StatementObject {
    /// Decide the concrete variant from the `objectType` discriminator.
    ///
    /// `"Activity"` or no discriminator yields an activity; `"Agent"`,
    /// `"Group"`, `"StatementRef"` and `"SubStatement"` dispatch to their
    /// variants; any other tag is stored raw. Resolving the serialization of
    /// an already-resolved object yields an equal object.
    pub fn resolve(value: Value) -> Result<Self, serde_json::Error> {
        let tag = wire::object_type(&value).map(str::to_owned);
        match tag.as_deref() {
            Some("Agent") => Ok(Self::Agent(serde_json::from_value(value)?)),
            Some("Group") => Ok(Self::Group(serde_json::from_value(value)?)),
            Some("StatementRef") => Ok(Self::StatementRef(serde_json::from_value(value)?)),
            Some("SubStatement") => Ok(Self::SubStatement(Box::new(SubStatement::from_value(
                value,
            )?))),
            Some("Activity") | None => Ok(Self::Activity(serde_json::from_value(value)?)),
            Some(_) => Ok(Self::Unrecognized(value)),
        }
    }

    pub fn validate(&self) -> Result<(), ObjectError> {
        match self {
            Self::Activity(activity) => activity.validate().map_err(ObjectError::Activity),
            Self::Agent(agent) => agent.validate().map_err(ObjectError::Actor),
            Self::Group(group) => group.validate().map_err(ObjectError::Actor),
            Self::StatementRef(_) => Ok(()),
            Self::SubStatement(sub) => sub
                .validate()
                .map_err(|err| ObjectError::SubStatement(Box::new(err))),
            Self::Unrecognized(_) => Err(ObjectError::Unrecognized),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Display identifier used when rendering a sub-statement description.
    #[must_use]
    pub fn identifier(&self) -> Option<String> {
        match self {
            Self::Activity(activity) => Some(activity.id.clone()),
            Self::Agent(agent) => agent.identifier().map(str::to_owned),
            Self::Group(group) => group.identifier().map(str::to_owned),
            Self::StatementRef(reference) => Some(reference.id.to_string()),
            Self::SubStatement(_) | Self::Unrecognized(_) => None,
        }
    }
}

impl From<Activity> for StatementObject {
    fn from(activity: Activity) -> Self {
        Self::Activity(activity)
    }
}

impl From<Agent> for StatementObject {
    fn from(agent: Agent) -> Self {
        Self::Agent(agent)
    }
}

impl From<Group> for StatementObject {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

impl From<StatementRef> for StatementObject {
    fn from(reference: StatementRef) -> Self {
        Self::StatementRef(reference)
    }
}

impl From<SubStatement> for StatementObject {
    fn from(sub: SubStatement) -> Self {
        Self::SubStatement(Box::new(sub))
    }
}

/// A bare string is shorthand for an activity identified by IRI.
impl From<&str> for StatementObject {
    fn from(id: &str) -> Self {
        Self::Activity(Activity::new(id))
    }
}

impl Serialize for StatementObject {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // In object position every variant carries its tag; without one the
        // resolver would read an agent or group back as an activity.
        match self {
            Self::Activity(activity) => wire::tagged(activity, "Activity", serializer),
            Self::Agent(agent) => wire::tagged(agent, "Agent", serializer),
            Self::Group(group) => wire::tagged(group, "Group", serializer),
            Self::StatementRef(reference) => wire::tagged(reference, "StatementRef", serializer),
            // SubStatement emits its own discriminator.
            Self::SubStatement(sub) => sub.serialize(serializer),
            Self::Unrecognized(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for StatementObject {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::resolve(value).map_err(serde::de::Error::custom)
    }
}
