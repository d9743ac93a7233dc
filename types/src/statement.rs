//! The statement record and its restricted nested form.
//!
//! Construction is tolerant: missing or loosely-typed pieces yield an
//! instance whose [`Statement::validate`] errs rather than a constructor
//! failure. The only hard failures are serde rejections of malformed leaf
//! data inside a known-tagged value.

use std::fmt;

use serde::de::Unexpected;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::activity::Activity;
use crate::actor::{Actor, ActorError};
use crate::context::Context;
use crate::ids::{IdSource, Registration, StatementId};
use crate::object::{ObjectError, StatementObject};
use crate::verb::{EmptyVerbId, Verb};

/// Fields a nested sub-statement must never carry. Stripped from raw input
/// at construction and rejected by validation afterwards.
const RESTRICTED_FIELDS: [&str; 4] = ["id", "stored", "version", "authority"];

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("statement has no actor")]
    MissingActor,
    #[error("statement has no verb")]
    MissingVerb,
    #[error("statement has no object")]
    MissingObject,
    #[error("invalid actor")]
    Actor(#[source] ActorError),
    #[error("invalid verb")]
    Verb(#[source] EmptyVerbId),
    #[error("invalid object")]
    Object(#[source] ObjectError),
    #[error("sub-statement object is itself a sub-statement")]
    NestedSubStatement,
    #[error("sub-statement carries restricted field `{0}`")]
    RestrictedField(&'static str),
}

/// What to do with the `id` of a raw statement being reconstructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPolicy {
    /// Assign a fresh id even when the input carries one.
    Regenerate,
    /// Keep the input's id; generate only when it is absent.
    Preserve,
}

/// One reported event: an actor acted on an object via a verb.
///
/// Unmodeled fields (`timestamp`, `result`, `authority`, ...) live in
/// `extra` and round-trip verbatim, so a statement fetched back from a store
/// reconstructs without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<StatementId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub actor: Option<Actor>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub verb: Option<Verb>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub object: Option<StatementObject>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub context: Option<Context>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Statement {
    /// Build a statement from its parts with a fresh id.
    pub fn new(
        actor: impl Into<Actor>,
        verb: impl Into<Verb>,
        object: impl Into<StatementObject>,
        ids: &mut impl IdSource,
    ) -> Self {
        Self {
            id: Some(ids.statement_id()),
            actor: Some(actor.into()),
            verb: Some(verb.into()),
            object: Some(object.into()),
            context: None,
            extra: Map::new(),
        }
    }

    /// Reconstruct from a whole raw statement value.
    ///
    /// `actor` and `object` are resolved to their concrete variants, `verb`
    /// is typed, every other field is carried through unchanged — and the id
    /// is regenerated, so reconstructing a statement never preserves its
    /// identity. Use [`Statement::from_value_with_id_policy`] with
    /// [`IdPolicy::Preserve`] when reconstructing one fetched from a store.
    pub fn from_value(value: Value, ids: &mut impl IdSource) -> Result<Self, serde_json::Error> {
        Self::from_value_with_id_policy(value, ids, IdPolicy::Regenerate)
    }

    pub fn from_value_with_id_policy(
        value: Value,
        ids: &mut impl IdSource,
        policy: IdPolicy,
    ) -> Result<Self, serde_json::Error> {
        let mut statement: Self = serde_json::from_value(value)?;
        match policy {
            IdPolicy::Regenerate => statement.id = Some(ids.statement_id()),
            IdPolicy::Preserve => {
                if statement.id.is_none() {
                    statement.id = Some(ids.statement_id());
                }
            }
        }
        Ok(statement)
    }

    /// Cheap structural validity query: actor, verb and object are all
    /// present and each valid per its own variant's rules. Pass-through
    /// fields and `id` are not checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_triple(
            self.actor.as_ref(),
            self.verb.as_ref(),
            self.object.as_ref(),
        )
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Context substructure, created empty on first access.
    pub fn context_mut(&mut self) -> &mut Context {
        self.context.get_or_insert_default()
    }

    /// Assign a fresh registration, creating `context` if needed and
    /// overwriting any prior value.
    pub fn generate_registration(&mut self, ids: &mut impl IdSource) -> Registration {
        let registration = ids.registration();
        self.context_mut().registration = Some(registration);
        registration
    }

    /// Append to `context.contextActivities.parent`, creating the list if
    /// needed. Append-only; call order is preserved.
    pub fn add_parent_activity(&mut self, activity: impl Into<Activity>) {
        self.context_mut()
            .activities_mut()
            .parent_mut()
            .push(activity.into());
    }

    /// Append to `context.contextActivities.grouping`, creating the list if
    /// needed.
    pub fn add_grouping_activity(&mut self, activity: impl Into<Activity>) {
        self.context_mut()
            .activities_mut()
            .grouping_mut()
            .push(activity.into());
    }

    /// Append to `context.contextActivities.other`, creating the list if
    /// needed.
    pub fn add_other_activity(&mut self, activity: impl Into<Activity>) {
        self.context_mut()
            .activities_mut()
            .other_mut()
            .push(activity.into());
    }
}

/// Indented JSON rendering of the full instance. Debug aid, not the wire
/// serialization entry point.
impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

fn validate_triple(
    actor: Option<&Actor>,
    verb: Option<&Verb>,
    object: Option<&StatementObject>,
) -> Result<(), ValidationError> {
    actor
        .ok_or(ValidationError::MissingActor)?
        .validate()
        .map_err(ValidationError::Actor)?;
    verb.ok_or(ValidationError::MissingVerb)?
        .validate()
        .map_err(ValidationError::Verb)?;
    object
        .ok_or(ValidationError::MissingObject)?
        .validate()
        .map_err(ValidationError::Object)?;
    Ok(())
}

/// A self-contained statement usable only as another statement's object.
///
/// Same shape as [`Statement`] except it structurally has no `id`, its
/// constructors strip the restricted fields (`id`, `stored`, `version`,
/// `authority`) from raw input, and it always serializes with the
/// `objectType: "SubStatement"` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubStatement {
    #[serde(rename = "objectType", default)]
    tag: SubStatementTag,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub actor: Option<Actor>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub verb: Option<Verb>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub object: Option<StatementObject>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub context: Option<Context>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SubStatement {
    /// Build a nested record from its parts. No id source: a sub-statement
    /// never carries an identity.
    pub fn new(
        actor: impl Into<Actor>,
        verb: impl Into<Verb>,
        object: impl Into<StatementObject>,
    ) -> Self {
        Self {
            tag: SubStatementTag,
            actor: Some(actor.into()),
            verb: Some(verb.into()),
            object: Some(object.into()),
            context: None,
            extra: Map::new(),
        }
    }

    /// Reconstruct from a raw value, stripping the restricted fields even
    /// when the input carries them.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let mut sub: Self = serde_json::from_value(value)?;
        for key in RESTRICTED_FIELDS {
            sub.extra.remove(key);
        }
        Ok(sub)
    }

    /// Base triple validity, plus: the object is not itself a nested record,
    /// and none of the restricted fields crept back in through the public
    /// pass-through map.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_triple(
            self.actor.as_ref(),
            self.verb.as_ref(),
            self.object.as_ref(),
        )?;
        if matches!(self.object, Some(StatementObject::SubStatement(_))) {
            return Err(ValidationError::NestedSubStatement);
        }
        for key in RESTRICTED_FIELDS {
            if self.extra.contains_key(key) {
                return Err(ValidationError::RestrictedField(key));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// `"<actor>:<verb>:<object>"` display line, only for a valid instance.
    #[must_use]
    pub fn description(&self) -> Option<String> {
        if !self.is_valid() {
            return None;
        }
        let actor = self.actor.as_ref()?.identifier()?;
        let verb = self.verb.as_ref()?.display_text();
        let object = self.object.as_ref()?.identifier()?;
        Some(format!("{actor}:{verb}:{object}"))
    }

    /// Context substructure, created empty on first access.
    pub fn context_mut(&mut self) -> &mut Context {
        self.context.get_or_insert_default()
    }

    /// Assign a fresh registration, creating `context` if needed.
    pub fn generate_registration(&mut self, ids: &mut impl IdSource) -> Registration {
        let registration = ids.registration();
        self.context_mut().registration = Some(registration);
        registration
    }

    pub fn add_parent_activity(&mut self, activity: impl Into<Activity>) {
        self.context_mut()
            .activities_mut()
            .parent_mut()
            .push(activity.into());
    }

    pub fn add_grouping_activity(&mut self, activity: impl Into<Activity>) {
        self.context_mut()
            .activities_mut()
            .grouping_mut()
            .push(activity.into());
    }

    pub fn add_other_activity(&mut self, activity: impl Into<Activity>) {
        self.context_mut()
            .activities_mut()
            .other_mut()
            .push(activity.into());
    }
}

/// The fixed `objectType` discriminator of a nested record. A marker rather
/// than data: it always serializes as `"SubStatement"` and only deserializes
/// from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SubStatementTag;

const SUB_STATEMENT_TAG: &str = "SubStatement";

impl Serialize for SubStatementTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(SUB_STATEMENT_TAG)
    }
}

impl<'de> Deserialize<'de> for SubStatementTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        if tag == SUB_STATEMENT_TAG {
            Ok(Self)
        } else {
            Err(serde::de::Error::invalid_value(
                Unexpected::Str(&tag),
                &"\"SubStatement\"",
            ))
        }
    }
}
