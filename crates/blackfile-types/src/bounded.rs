//! Bounded scalar types.
//!
//! Morale, cohesion, stress, threat level, narrative intensity, and bond
//! strength all live on closed integer intervals. Each is a newtype whose
//! only constructors clamp, so an out-of-range value cannot be represented.
//! Deserialization clamps as well: a roster file declaring `morale: 140`
//! loads as 100.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// Generates a clamped `u8` newtype over the interval `[$min, $max]`.
macro_rules! define_bounded {
    (
        $(#[$meta:meta])*
        $name:ident, $min:literal, $max:literal, default = $default:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(u8);

        impl $name {
            /// Lowest representable value.
            pub const MIN: u8 = $min;
            /// Highest representable value.
            pub const MAX: u8 = $max;

            /// Clamp `raw` into the closed interval.
            pub fn clamped(raw: i64) -> Self {
                let bounded = raw.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
                Self(u8::try_from(bounded).unwrap_or(Self::MAX))
            }

            /// The inner value.
            pub const fn get(self) -> u8 {
                self.0
            }

            /// Shift by a signed delta, clamping at the bounds.
            pub fn saturating_shift(self, delta: i64) -> Self {
                Self::clamped(i64::from(self.0).saturating_add(delta))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self($default)
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                i64::deserialize(deserializer).map(Self::clamped)
            }
        }
    };
}

define_bounded! {
    /// A percentage in `[0, 100]` (morale, cohesion, stress).
    Percentage, 0, 100, default = 0
}

define_bounded! {
    /// Per-threat danger rating in `[1, 10]`.
    ThreatRating, 1, 10, default = 1
}

define_bounded! {
    /// Narrative element intensity in `[1, 10]`.
    Intensity, 1, 10, default = 5
}

define_bounded! {
    /// Strength of a bond between two agents in `[0, 10]`.
    BondStrength, 0, 10, default = 5
}
