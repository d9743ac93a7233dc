//! xAPI statement domain types.
//!
//! This crate contains pure domain types with no IO and no async: the
//! statement record (actor acted on object via verb), its concrete actor and
//! object variants resolved from the loosely-typed wire shape, and the
//! structural validity rules. Construction is tolerant — incomplete input
//! yields an instance whose `validate()` errs, never a panic — and unmodeled
//! wire fields round-trip verbatim.
//!
//! Identifiers come from an injectable [`IdSource`] so callers and tests own
//! the generator.

mod activity;
mod actor;
mod context;
mod ids;
mod object;
mod statement;
mod verb;
mod wire;

pub use activity::{Activity, ActivityDefinition, EmptyActivityId};
pub use actor::{Actor, ActorError, Agent, AgentAccount, Group};
pub use context::{Context, ContextActivities};
pub use ids::{IdSource, Registration, StatementId, UuidSource};
pub use object::{ObjectError, StatementObject, StatementRef};
pub use statement::{IdPolicy, Statement, SubStatement, ValidationError};
pub use verb::{EmptyVerbId, LanguageMap, Verb};
