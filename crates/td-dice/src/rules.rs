//! Guild-scoped rules configuration.
//!
//! Both rule structs are immutable once built and can only be constructed
//! through validating paths: [`DiceRules::new`], [`PercentileRules::new`],
//! `Default`, or deserialization (which runs the same checks). Serialized
//! key names match the `dnd_rules` / `coc_rules` objects of a guild config file.

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

const DEFAULT_MAX_DICE_COUNT: u32 = 50;
const DEFAULT_MAX_DICE_SIDES: u32 = 1000;
const DEFAULT_CRITICAL_SUCCESS_FACE: u32 = 20;
const DEFAULT_CRITICAL_FAIL_FACE: u32 = 1;

const DEFAULT_CRITICAL_SUCCESS_VALUE: u32 = 1;
const DEFAULT_CRITICAL_FAIL_VALUE: u32 = 100;
const DEFAULT_HARD_DIVISOR: u32 = 2;
const DEFAULT_EXTREME_DIVISOR: u32 = 5;

/// Limits for generic (D&D-style) dice expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDiceRules")]
pub struct DiceRules {
    #[serde(rename = "critical_success")]
    critical_success_face: u32,
    #[serde(rename = "critical_fail")]
    critical_fail_face: u32,
    max_dice_count: u32,
    max_dice_sides: u32,
}

impl DiceRules {
    /// Build dice rules with the given ceilings and the conventional
    /// critical faces (20 / 1).
    pub fn new(max_dice_count: u32, max_dice_sides: u32) -> Result<Self, RulesError> {
        if max_dice_count == 0 {
            return Err(RulesError::ZeroCeiling("max_dice_count"));
        }
        if max_dice_sides < 2 {
            return Err(RulesError::SidesCeilingTooLow(max_dice_sides));
        }
        Ok(Self {
            critical_success_face: DEFAULT_CRITICAL_SUCCESS_FACE,
            critical_fail_face: DEFAULT_CRITICAL_FAIL_FACE,
            max_dice_count,
            max_dice_sides,
        })
    }

    /// Replace the informational critical faces.
    ///
    /// These are only carried for display; polyhedral criticals are always
    /// decided on 20-sided dice showing 20 or 1.
    pub fn with_critical_faces(mut self, success: u32, fail: u32) -> Self {
        self.critical_success_face = success;
        self.critical_fail_face = fail;
        self
    }

    /// Ceiling on dice per roll, also used as the repeat-count ceiling.
    pub fn max_dice_count(&self) -> u32 {
        self.max_dice_count
    }

    /// Ceiling on the number of faces of a single die.
    pub fn max_dice_sides(&self) -> u32 {
        self.max_dice_sides
    }

    /// Configured critical-success face (informational).
    pub fn critical_success_face(&self) -> u32 {
        self.critical_success_face
    }

    /// Configured critical-fail face (informational).
    pub fn critical_fail_face(&self) -> u32 {
        self.critical_fail_face
    }
}

impl Default for DiceRules {
    fn default() -> Self {
        Self {
            critical_success_face: DEFAULT_CRITICAL_SUCCESS_FACE,
            critical_fail_face: DEFAULT_CRITICAL_FAIL_FACE,
            max_dice_count: DEFAULT_MAX_DICE_COUNT,
            max_dice_sides: DEFAULT_MAX_DICE_SIDES,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawDiceRules {
    critical_success: u32,
    critical_fail: u32,
    max_dice_count: u32,
    max_dice_sides: u32,
}

impl Default for RawDiceRules {
    fn default() -> Self {
        let rules = DiceRules::default();
        Self {
            critical_success: rules.critical_success_face,
            critical_fail: rules.critical_fail_face,
            max_dice_count: rules.max_dice_count,
            max_dice_sides: rules.max_dice_sides,
        }
    }
}

impl TryFrom<RawDiceRules> for DiceRules {
    type Error = RulesError;

    fn try_from(raw: RawDiceRules) -> Result<Self, Self::Error> {
        Ok(DiceRules::new(raw.max_dice_count, raw.max_dice_sides)?
            .with_critical_faces(raw.critical_success, raw.critical_fail))
    }
}

/// Thresholds for percentile (Call of Cthulhu 7e-style) skill checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPercentileRules")]
pub struct PercentileRules {
    #[serde(rename = "critical_success")]
    critical_success_value: u32,
    #[serde(rename = "critical_fail")]
    critical_fail_value: u32,
    #[serde(rename = "skill_divisor_hard")]
    hard_divisor: u32,
    #[serde(rename = "skill_divisor_extreme")]
    extreme_divisor: u32,
}

impl PercentileRules {
    /// Build percentile rules. Both divisors must be non-zero.
    pub fn new(
        critical_success_value: u32,
        critical_fail_value: u32,
        hard_divisor: u32,
        extreme_divisor: u32,
    ) -> Result<Self, RulesError> {
        if hard_divisor == 0 {
            return Err(RulesError::ZeroDivisor("skill_divisor_hard"));
        }
        if extreme_divisor == 0 {
            return Err(RulesError::ZeroDivisor("skill_divisor_extreme"));
        }
        Ok(Self {
            critical_success_value,
            critical_fail_value,
            hard_divisor,
            extreme_divisor,
        })
    }

    /// Roll value that always counts as a critical success.
    pub fn critical_success_value(&self) -> u32 {
        self.critical_success_value
    }

    /// Roll value that counts as a critical failure when skill is 50 or more.
    pub fn critical_fail_value(&self) -> u32 {
        self.critical_fail_value
    }

    /// Divisor applied to the skill value for a hard success.
    pub fn hard_divisor(&self) -> u32 {
        self.hard_divisor
    }

    /// Divisor applied to the skill value for an extreme success.
    pub fn extreme_divisor(&self) -> u32 {
        self.extreme_divisor
    }
}

impl Default for PercentileRules {
    fn default() -> Self {
        Self {
            critical_success_value: DEFAULT_CRITICAL_SUCCESS_VALUE,
            critical_fail_value: DEFAULT_CRITICAL_FAIL_VALUE,
            hard_divisor: DEFAULT_HARD_DIVISOR,
            extreme_divisor: DEFAULT_EXTREME_DIVISOR,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawPercentileRules {
    critical_success: u32,
    critical_fail: u32,
    skill_divisor_hard: u32,
    skill_divisor_extreme: u32,
}

impl Default for RawPercentileRules {
    fn default() -> Self {
        let rules = PercentileRules::default();
        Self {
            critical_success: rules.critical_success_value,
            critical_fail: rules.critical_fail_value,
            skill_divisor_hard: rules.hard_divisor,
            skill_divisor_extreme: rules.extreme_divisor,
        }
    }
}

impl TryFrom<RawPercentileRules> for PercentileRules {
    type Error = RulesError;

    fn try_from(raw: RawPercentileRules) -> Result<Self, Self::Error> {
        PercentileRules::new(
            raw.critical_success,
            raw.critical_fail,
            raw.skill_divisor_hard,
            raw.skill_divisor_extreme,
        )
    }
}
