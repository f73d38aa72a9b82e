//! Typed identifiers for trails, regions, and difficulties
//!
//! Each entity type gets its own newtype over a random (v4) UUID so that a
//! region id can never be passed where a trail id is expected. Identifiers are
//! assigned once at creation and never reused.
//!
//! ```rust
//! use trails_service::ids::TrailId;
//! use std::str::FromStr;
//!
//! let id = TrailId::new();
//! let parsed = TrailId::from_str(&id.to_string()).unwrap();
//! assert_eq!(id, parsed);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a fresh random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identifier of a walking trail.
    TrailId
);

entity_id!(
    /// Identifier of a geographic region.
    RegionId
);

entity_id!(
    /// Identifier of a difficulty rating.
    DifficultyId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        let a = TrailId::new();
        let b = TrailId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_round_trip() {
        let id = RegionId::new();
        let parsed: RegionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<DifficultyId>().is_err());
    }

    #[test]
    fn test_serializes_as_bare_uuid() {
        let uuid = Uuid::nil();
        let json = serde_json::to_string(&TrailId::from_uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}
