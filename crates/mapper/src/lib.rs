//! recnorm-mapper: adapts expected records to what a destination can
//! actually store.
//!
//! Fixtures are authored once against the full logical type system.
//! Before they are compared with what a destination wrote, each value is
//! down-converted to the representation that destination produces:
//! JSON-like targets have no temporal types at all, some table formats
//! have no time-with-timezone, and so on.
//!
//! The moving parts:
//! - [`ValueMapper`]: walks a (schema, value) pair in lockstep and calls
//!   one overridable hook per logical type. Every hook defaults to
//!   identity, so a policy only overrides what its target lacks.
//! - [`policy`]: the concrete policies and the [`PolicyKind`] registry.
//! - [`map_record`]: applies a policy to a whole [`OutputRecord`].
//!
//! [`OutputRecord`]: recnorm_core::OutputRecord

pub mod context;
pub mod identity;
pub mod policy;
pub mod record;

pub use context::{Diagnostic, DiagnosticKind, MapContext};
pub use identity::{IdentityMapper, ValueMapper};
pub use policy::{DropTimeOffset, PolicyKind, StringifyTemporal, UnknownPolicy};
pub use record::{map_record, map_record_reporting, MapError};
