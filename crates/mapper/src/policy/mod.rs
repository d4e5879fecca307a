//! Concrete policies and the registry that names them.

pub mod stringify;
pub mod time_offset;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::identity::{IdentityMapper, ValueMapper};

pub use stringify::StringifyTemporal;
pub use time_offset::DropTimeOffset;

/// A named policy, as selected on the command line or in a destination
/// profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// Destination represents every logical type natively.
    Identity,
    /// Destination has no temporal types (JSON lines, CSV).
    StringifyTemporal,
    /// Destination has no time-with-timezone type.
    DropTimeOffset,
}

static IDENTITY: IdentityMapper = IdentityMapper;
static STRINGIFY_TEMPORAL: StringifyTemporal = StringifyTemporal;
static DROP_TIME_OFFSET: DropTimeOffset = DropTimeOffset;

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [
        PolicyKind::Identity,
        PolicyKind::StringifyTemporal,
        PolicyKind::DropTimeOffset,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::Identity => "identity",
            PolicyKind::StringifyTemporal => "stringify-temporal",
            PolicyKind::DropTimeOffset => "drop-time-offset",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PolicyKind::Identity => "leave every value unchanged",
            PolicyKind::StringifyTemporal => {
                "write dates, times and timestamps as plain strings"
            }
            PolicyKind::DropTimeOffset => {
                "drop the UTC offset from time-with-timezone values"
            }
        }
    }

    pub fn mapper(&self) -> &'static dyn ValueMapper {
        match self {
            PolicyKind::Identity => &IDENTITY,
            PolicyKind::StringifyTemporal => &STRINGIFY_TEMPORAL,
            PolicyKind::DropTimeOffset => &DROP_TIME_OFFSET,
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown policy '{0}' (expected identity, stringify-temporal or drop-time-offset)")]
pub struct UnknownPolicy(pub String);

impl FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownPolicy(s.to_string()))
    }
}
