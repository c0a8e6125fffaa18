//! Uniform dice rolls.
//!
//! The only randomness in the core. Expressions are `NdS` (`2d6`, `d20`)
//! or a bare side count (`100`, same as `1d100`). Seeding the roller from
//! configuration makes a session reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::CoreError;

/// Most dice accepted in one roll.
pub const MAX_DICE: u32 = 100;

/// Most sides accepted on one die.
pub const MAX_SIDES: u32 = 1000;

/// A parsed dice expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiceSpec {
    /// Number of dice.
    pub count: u32,
    /// Sides per die.
    pub sides: u32,
}

impl DiceSpec {
    /// Parse `NdS`, `dS`, or `S`.
    pub fn parse(expression: &str) -> Result<Self, CoreError> {
        let lowered = expression.trim().to_ascii_lowercase();
        let (count, sides) = match lowered.split_once('d') {
            Some(("", sides)) => (Ok(1), sides.parse::<u32>()),
            Some((count, sides)) => (count.parse::<u32>(), sides.parse::<u32>()),
            None => (Ok(1), lowered.parse::<u32>()),
        };
        let (Ok(count), Ok(sides)) = (count, sides) else {
            return Err(CoreError::InvalidDice {
                reason: format!("cannot parse '{expression}', expected NdS"),
            });
        };
        Self::new(count, sides)
    }

    /// Validate a count and side number.
    pub fn new(count: u32, sides: u32) -> Result<Self, CoreError> {
        if !(1..=MAX_DICE).contains(&count) {
            return Err(CoreError::InvalidDice {
                reason: format!("dice count must be between 1 and {MAX_DICE}, got {count}"),
            });
        }
        if !(2..=MAX_SIDES).contains(&sides) {
            return Err(CoreError::InvalidDice {
                reason: format!("sides must be between 2 and {MAX_SIDES}, got {sides}"),
            });
        }
        Ok(Self { count, sides })
    }
}

impl core::fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// Outcome of a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiceRoll {
    /// What was rolled.
    pub spec: DiceSpec,
    /// Each die, in roll order.
    pub rolls: Vec<u32>,
    /// Sum of all dice.
    pub total: u32,
}

/// Uniform dice roller.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: StdRng,
}

impl Dice {
    /// Seeded roller for reproducible sessions, or OS-seeded when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self { rng }
    }

    /// Roll every die in `spec`.
    pub fn roll(&mut self, spec: DiceSpec) -> DiceRoll {
        let rolls: Vec<u32> = (0..spec.count)
            .map(|_| self.rng.random_range(1..=spec.sides))
            .collect();
        let total = rolls.iter().fold(0_u32, |acc, r| acc.saturating_add(*r));
        DiceRoll { spec, rolls, total }
    }
}
