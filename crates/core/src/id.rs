//! Identifiers for lift entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Backend-assigned identifier for catalog and routine entities.
pub type EntityId = u64;

/// Unique identifier for a live workout session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Ulid);

impl SessionId {
    /// Generate a new SessionId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for SessionId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Key of a record row, or of the parent row it points at.
///
/// Record graphs are built before any row exists, so every key starts out
/// `Unassigned` and the store fills it in while creating parents first.
/// Serialized as a plain integer where `0` means unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub enum RecordKey {
    /// Not yet created by the store
    #[default]
    Unassigned,
    /// Assigned by the store
    Assigned(EntityId),
}

impl RecordKey {
    /// Whether the store has assigned this key.
    pub fn is_assigned(&self) -> bool {
        matches!(self, RecordKey::Assigned(_))
    }

    /// The assigned id, if any.
    pub fn get(&self) -> Option<EntityId> {
        match self {
            RecordKey::Assigned(id) => Some(*id),
            RecordKey::Unassigned => None,
        }
    }
}

impl From<u64> for RecordKey {
    fn from(value: u64) -> Self {
        match value {
            0 => RecordKey::Unassigned,
            id => RecordKey::Assigned(id),
        }
    }
}

impl From<RecordKey> for u64 {
    fn from(key: RecordKey) -> Self {
        key.get().unwrap_or(0)
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKey::Assigned(id) => write!(f, "{}", id),
            RecordKey::Unassigned => f.write_str("unassigned"),
        }
    }
}
