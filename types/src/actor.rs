//! Actors: who performed the action.
//!
//! The wire shape is loosely typed; [`Actor::resolve`] decides the concrete
//! variant from the `objectType` discriminator (or its absence) and keeps
//! unrecognized tags raw rather than dropping them.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::wire;

/// An individual identity.
///
/// Valid only when it carries at least one inverse functional identifier;
/// `name` alone does not identify anyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mbox: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mbox_sha1sum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub openid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub account: Option<AgentAccount>,
}

/// Account on some system, an inverse functional identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentAccount {
    #[serde(rename = "homePage")]
    pub home_page: String,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum ActorError {
    #[error("agent has no inverse functional identifier")]
    MissingIdentifier,
    #[error("anonymous group has no members")]
    EmptyAnonymousGroup,
    #[error("group member is not a valid agent")]
    InvalidMember(#[source] Box<ActorError>),
    #[error("actor objectType names a variant this crate does not model")]
    Unrecognized,
}

impl Agent {
    #[must_use]
    pub fn with_mbox(mbox: impl Into<String>) -> Self {
        Self {
            mbox: Some(mbox.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_account(home_page: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            account: Some(AgentAccount {
                home_page: home_page.into(),
                name: name.into(),
            }),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ActorError> {
        if self.identifier().is_some() {
            Ok(())
        } else {
            Err(ActorError::MissingIdentifier)
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// First present inverse functional identifier, as display text.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.mbox
            .as_deref()
            .or(self.mbox_sha1sum.as_deref())
            .or(self.openid.as_deref())
            .or_else(|| self.account.as_ref().map(|account| account.name.as_str()))
    }
}

/// A group of agents, identified or anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub member: Vec<Agent>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mbox: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mbox_sha1sum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub openid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub account: Option<AgentAccount>,
}

impl Group {
    #[must_use]
    pub fn anonymous(member: Vec<Agent>) -> Self {
        Self {
            member,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mbox(mbox: impl Into<String>) -> Self {
        Self {
            mbox: Some(mbox.into()),
            ..Self::default()
        }
    }

    /// An identified group needs an inverse functional identifier; an
    /// anonymous one needs at least one member, each a valid agent.
    pub fn validate(&self) -> Result<(), ActorError> {
        if self.identifier().is_some() {
            return Ok(());
        }
        if self.member.is_empty() {
            return Err(ActorError::EmptyAnonymousGroup);
        }
        for member in &self.member {
            member
                .validate()
                .map_err(|err| ActorError::InvalidMember(Box::new(err)))?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.mbox
            .as_deref()
            .or(self.mbox_sha1sum.as_deref())
            .or(self.openid.as_deref())
            .or_else(|| self.account.as_ref().map(|account| account.name.as_str()))
    }
}

/// The `actor` slot of a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Actor {
    Agent(Agent),
    Group(Group),
    /// The discriminator named a variant this crate does not model; the raw
    /// value is kept verbatim so it round-trips.
    Unrecognized(Value),
}

impl Actor {
    /// Decide the concrete variant from the `objectType` discriminator.
    ///
    /// `"Agent"` or no discriminator yields [`Actor::Agent`], `"Group"` a
    /// [`Actor::Group`]; any other tag is stored raw. Known tags whose leaf
    /// fields are malformed are rejected by the variant's own deserializer.
    /// Resolving the serialization of an already-resolved actor yields an
    /// equal actor.
    pub fn resolve(value: Value) -> Result<Self, serde_json::Error> {
        let tag = wire::object_type(&value).map(str::to_owned);
        match tag.as_deref() {
            Some("Group") => Ok(Self::Group(serde_json::from_value(value)?)),
            Some("Agent") | None => Ok(Self::Agent(serde_json::from_value(value)?)),
            Some(_) => Ok(Self::Unrecognized(value)),
        }
    }

    pub fn validate(&self) -> Result<(), ActorError> {
        match self {
            Self::Agent(agent) => agent.validate(),
            Self::Group(group) => group.validate(),
            Self::Unrecognized(_) => Err(ActorError::Unrecognized),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Agent(agent) => agent.identifier(),
            Self::Group(group) => group.identifier(),
            Self::Unrecognized(_) => None,
        }
    }
}

impl From<Agent> for Actor {
    fn from(agent: Agent) -> Self {
        Self::Agent(agent)
    }
}

impl From<Group> for Actor {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

/// A bare string is shorthand for an agent identified by mbox IRI.
impl From<&str> for Actor {
    fn from(mbox: &str) -> Self {
        Self::Agent(Agent::with_mbox(mbox))
    }
}

impl Serialize for Actor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            // Agent is the wire default and carries no tag.
            Self::Agent(agent) => agent.serialize(serializer),
            Self::Group(group) => wire::tagged(group, "Group", serializer),
            Self::Unrecognized(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Actor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::resolve(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Actor, ActorError, Agent, Group};

    #[test]
    fn absent_discriminator_resolves_to_agent() {
        let actor = Actor::resolve(json!({ "mbox": "mailto:a@b.com" })).unwrap();
        assert!(matches!(actor, Actor::Agent(_)));
    }

    #[test]
    fn group_discriminator_resolves_to_group() {
        let actor = Actor::resolve(json!({
            "objectType": "Group",
            "mbox": "mailto:team@example.org"
        }))
        .unwrap();
        assert!(matches!(actor, Actor::Group(_)));
    }

    #[test]
    fn unknown_discriminator_passes_through_raw() {
        let raw = json!({ "objectType": "Robot", "serial": 7 });
        let actor = Actor::resolve(raw.clone()).unwrap();
        assert_eq!(actor, Actor::Unrecognized(raw.clone()));
        assert!(!actor.is_valid());
        // round-trips verbatim
        assert_eq!(serde_json::to_value(&actor).unwrap(), raw);
    }

    #[test]
    fn resolve_is_idempotent_over_serialization() {
        let actor = Actor::resolve(json!({
            "objectType": "Group",
            "name": "team",
            "member": [{ "mbox": "mailto:a@b.com" }]
        }))
        .unwrap();
        let round = Actor::resolve(serde_json::to_value(&actor).unwrap()).unwrap();
        assert_eq!(round, actor);
    }

    #[test]
    fn malformed_leaf_fields_are_rejected() {
        assert!(Actor::resolve(json!({ "mbox": 5 })).is_err());
    }

    #[test]
    fn agent_without_identifier_is_invalid() {
        let agent = Agent {
            name: Some("Anonymous".to_owned()),
            ..Agent::default()
        };
        assert!(matches!(
            agent.validate(),
            Err(ActorError::MissingIdentifier)
        ));
        assert!(Agent::with_mbox("mailto:a@b.com").is_valid());
        assert!(Agent::with_account("http://example.org", "alice").is_valid());
    }

    #[test]
    fn anonymous_group_needs_members() {
        assert!(matches!(
            Group::default().validate(),
            Err(ActorError::EmptyAnonymousGroup)
        ));
        assert!(Group::anonymous(vec![Agent::with_mbox("mailto:a@b.com")]).is_valid());
        assert!(Group::with_mbox("mailto:team@example.org").is_valid());
    }

    #[test]
    fn anonymous_group_rejects_invalid_members() {
        let group = Group::anonymous(vec![Agent::default()]);
        assert!(matches!(
            group.validate(),
            Err(ActorError::InvalidMember(_))
        ));
    }

    #[test]
    fn identifier_prefers_mbox() {
        let mut agent = Agent::with_mbox("mailto:a@b.com");
        agent.openid = Some("http://openid.example.org/a".to_owned());
        assert_eq!(agent.identifier(), Some("mailto:a@b.com"));
    }
}
