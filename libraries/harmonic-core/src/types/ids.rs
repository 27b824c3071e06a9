/// ID types for Harmonic entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    sqlite::{SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef},
    Decode, Encode, Sqlite, Type,
};

/// Track identifier
///
/// Stable across sessions; it is the primary key of the persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random track ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(feature = "sqlx")]
impl Type<Sqlite> for TrackId {
    fn type_info() -> SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }
}

#[cfg(feature = "sqlx")]
impl<'q> Encode<'q, Sqlite> for TrackId {
    fn encode_by_ref(
        &self,
        args: &mut Vec<SqliteArgumentValue<'q>>,
    ) -> Result<IsNull, BoxDynError> {
        <String as Encode<Sqlite>>::encode_by_ref(&self.0, args)
    }
}

#[cfg(feature = "sqlx")]
impl<'r> Decode<'r, Sqlite> for TrackId {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let s = <String as Decode<Sqlite>>::decode(value)?;
        Ok(TrackId(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = TrackId::generate();
        let b = TrackId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = TrackId::new("track-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"track-1\"");
    }
}
