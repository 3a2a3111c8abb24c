//! Document identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use bson::oid::ObjectId;

use crate::error::DomainError;

/// Identifier of a stored document.
///
/// Wraps a 12-byte object id (timestamp + counter, so ids created later compare
/// greater). The text form is 24 lowercase hex characters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(ObjectId);

impl DocumentId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn from_object_id(oid: ObjectId) -> Self {
        Self(oid)
    }

    pub fn as_object_id(&self) -> &ObjectId {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialOrd for DocumentId {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DocumentId {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.0.bytes().cmp(&other.0.bytes())
    }
}

impl core::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl From<ObjectId> for DocumentId {
    fn from(value: ObjectId) -> Self {
        Self(value)
    }
}

impl From<DocumentId> for ObjectId {
    fn from(value: DocumentId) -> Self {
        value.0
    }
}

impl FromStr for DocumentId {
    type Err = DomainError;

    /// Only the canonical 24-hex-character form is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let oid = ObjectId::parse_str(s)
            .map_err(|e| DomainError::invalid_id(format!("DocumentId: {e}")))?;
        Ok(Self(oid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_canonical_hex() {
        let id: DocumentId = "65a1f0c2e4b0a1b2c3d4e5f6".parse().unwrap();
        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn rejects_short_and_non_hex_ids() {
        for bad in ["abc", "", "65a1f0c2e4b0a1b2c3d4e5f", "zza1f0c2e4b0a1b2c3d4e5f6"] {
            let err = bad.parse::<DocumentId>().unwrap_err();
            assert!(matches!(err, DomainError::InvalidId(_)), "accepted {bad:?}");
        }
    }

    #[test]
    fn later_ids_sort_after_earlier_ones() {
        let first = DocumentId::new();
        let second = DocumentId::new();
        assert!(second > first);
    }

    proptest! {
        #[test]
        fn display_then_parse_is_identity(bytes in proptest::array::uniform12(any::<u8>())) {
            let id = DocumentId::from_object_id(ObjectId::from_bytes(bytes));
            let parsed: DocumentId = id.to_string().parse().unwrap();
            prop_assert_eq!(parsed, id);
        }

        #[test]
        fn wrong_length_is_rejected(s in "[0-9a-f]{0,23}") {
            prop_assert!(s.parse::<DocumentId>().is_err());
        }
    }
}
