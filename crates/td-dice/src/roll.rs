//! Evaluating a [`RollSpec`] into concrete outcomes.

use std::fmt;

use serde::Serialize;

use crate::dice::Dice;
use crate::expr::RollSpec;

const POLYHEDRAL_CRIT_SIDES: u32 = 20;

/// The outcome of rolling one [`RollSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollResult {
    /// The spec that was rolled.
    pub spec: RollSpec,
    /// Faces in draw order, each in `1..=spec.sides()`.
    pub rolls: Vec<u32>,
    /// Sum of `rolls` plus the modifier.
    pub total: i64,
    /// A 20-sided die showed 20.
    pub is_critical_success: bool,
    /// A 20-sided die showed 1.
    pub is_critical_fail: bool,
    /// `None` when the spec had no comparison clause.
    pub comparison: Option<bool>,
}

impl RollResult {
    /// Sum of the faces without the modifier.
    pub fn dice_sum(&self) -> i64 {
        self.rolls.iter().map(|&v| i64::from(v)).sum()
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.rolls.iter().map(u32::to_string).collect();
        let faces = faces.join(" + ");
        match self.spec.modifier() {
            0 => write!(f, "{faces} = {}", self.total),
            m if m > 0 => write!(f, "({faces}) + {m} = {}", self.total),
            m => write!(f, "({faces}) - {} = {}", m.unsigned_abs(), self.total),
        }
    }
}

/// Roll every die of `spec` and derive the total, critical flags and
/// comparison outcome.
///
/// Critical flags look only at the faces of 20-sided dice and ignore the
/// modifier and comparison; a pool can carry both flags at once.
pub fn evaluate(spec: &RollSpec, dice: &mut Dice) -> RollResult {
    let rolls: Vec<u32> = (0..spec.count()).map(|_| dice.roll(spec.sides())).collect();

    let sum: i64 = rolls.iter().map(|&v| i64::from(v)).sum();
    let total = sum.saturating_add(spec.modifier());

    let d20 = spec.sides() == POLYHEDRAL_CRIT_SIDES;
    let is_critical_success = d20 && rolls.contains(&POLYHEDRAL_CRIT_SIDES);
    let is_critical_fail = d20 && rolls.contains(&1);

    let comparison = spec.comparison().map(|c| c.evaluate(total));

    RollResult {
        spec: *spec,
        rolls,
        total,
        is_critical_success,
        is_critical_fail,
        comparison,
    }
}
