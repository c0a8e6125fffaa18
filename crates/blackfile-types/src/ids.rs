//! Type-safe identifier wrappers.
//!
//! Every entity in the campaign has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. Game masters name
//! agents and teams by hand (`A1`, `ALPHA`), so identifiers wrap a
//! [`String`] rather than a raw UUID. When the caller does not supply one,
//! [`generate`](AgentId::generate) produces UUID v7 text (time-ordered).

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(String);

        impl $name {
            /// Wrap a caller-supplied identifier.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Create a fresh identifier from a UUID v7 (time-ordered).
            pub fn generate() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Borrow the identifier text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }

        impl core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an agent (player character or NPC operative).
    AgentId
}

define_id! {
    /// Unique identifier for a team of agents.
    TeamId
}

define_id! {
    /// Unique identifier for a mission.
    MissionId
}

define_id! {
    /// Unique identifier for a tracked threat.
    ThreatId
}

define_id! {
    /// Unique identifier for a narrative element.
    NarrativeId
}

define_id! {
    /// Unique identifier for an operation record created by a command.
    OperationId
}

define_id! {
    /// Unique identifier for a context snapshot.
    SnapshotId
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = AgentId::generate();
        let b = AgentId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = AgentId::new("A1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"A1\"");
        let back: AgentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn map_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(TeamId::new("ALPHA"), 1_u32);
        assert_eq!(map.get("ALPHA"), Some(&1));
        assert_eq!(map.get("BRAVO"), None);
    }
}
