//! Identifier newtypes and the injectable identifier source.
//!
//! Statements never mint their own ids; constructors take an [`IdSource`] so
//! callers (and tests) own the generator.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Identifier of a statement. Opaque and globally unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StatementId(Uuid);

impl StatementId {
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for StatementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StatementId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

/// Registration identifier carried by a statement's context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Registration(Uuid);

impl Registration {
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of fresh identifiers.
///
/// The one cross-call guarantee statements rely on: no two invocations ever
/// return the same value. Takes `&mut self` so deterministic test sources can
/// count.
pub trait IdSource {
    fn statement_id(&mut self) -> StatementId;
    fn registration(&mut self) -> Registration;
}

/// Production [`IdSource`]: random version-4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn statement_id(&mut self) -> StatementId {
        StatementId(Uuid::new_v4())
    }

    fn registration(&mut self) -> Registration {
        Registration(Uuid::new_v4())
    }
}
