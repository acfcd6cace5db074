//! Percentile skill checks (Call of Cthulhu 7e-style).
//!
//! A d100 roll is classified against a skill value into one of six ordered
//! tiers. Skills under 50 critically fail on 96-100 no matter what the
//! configured critical-fail value is; skills of 50 or more only critically
//! fail on exactly that value.

use std::fmt;

use serde::Serialize;

use crate::dice::Dice;
use crate::rules::PercentileRules;

const PERCENTILE_SIDES: u32 = 100;
const LOW_SKILL_LIMIT: u32 = 50;
const LOW_SKILL_FUMBLE_FLOOR: u32 = 96;

/// The six ordered outcomes of a percentile check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SuccessLevel {
    /// The configured critical-success value was rolled.
    CriticalSuccess,
    /// At or under a fifth of the skill (by default), or a natural 100.
    ExtremeSuccess,
    /// At or under half the skill (by default).
    HardSuccess,
    /// At or under the skill.
    RegularSuccess,
    /// Over the skill.
    Failure,
    /// A fumble.
    CriticalFailure,
}

impl SuccessLevel {
    /// All tiers, best first.
    pub const ALL: [SuccessLevel; 6] = [
        Self::CriticalSuccess,
        Self::ExtremeSuccess,
        Self::HardSuccess,
        Self::RegularSuccess,
        Self::Failure,
        Self::CriticalFailure,
    ];

    /// Numeric tier, 1 (critical success) through 6 (critical failure).
    pub fn tier(self) -> u8 {
        match self {
            Self::CriticalSuccess => 1,
            Self::ExtremeSuccess => 2,
            Self::HardSuccess => 3,
            Self::RegularSuccess => 4,
            Self::Failure => 5,
            Self::CriticalFailure => 6,
        }
    }

    /// Bilingual table label shown to players.
    pub fn label(self) -> &'static str {
        match self {
            Self::CriticalSuccess => "大成功 (Critical Success)",
            Self::ExtremeSuccess => "極限成功 (Extreme Success)",
            Self::HardSuccess => "困難成功 (Hard Success)",
            Self::RegularSuccess => "普通成功 (Regular Success)",
            Self::Failure => "失敗 (Failure)",
            Self::CriticalFailure => "大失敗 (Critical Failure)",
        }
    }

    /// Whether the tier counts as a success of any kind.
    pub fn is_success(self) -> bool {
        matches!(
            self,
            Self::CriticalSuccess | Self::ExtremeSuccess | Self::HardSuccess | Self::RegularSuccess
        )
    }
}

impl fmt::Display for SuccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CriticalSuccess => write!(f, "Critical Success"),
            Self::ExtremeSuccess => write!(f, "Extreme Success"),
            Self::HardSuccess => write!(f, "Hard Success"),
            Self::RegularSuccess => write!(f, "Regular Success"),
            Self::Failure => write!(f, "Failure"),
            Self::CriticalFailure => write!(f, "Critical Failure"),
        }
    }
}

/// The outcome of one percentile roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PercentileResult {
    /// The d100 roll, 1-100.
    pub roll: u32,
    /// The skill value rolled against.
    pub skill_value: u32,
    /// The classified tier.
    pub success_level: SuccessLevel,
    /// The roll equals the configured critical-success value.
    pub is_critical_success: bool,
    /// The roll is a fumble for this skill.
    pub is_critical_fail: bool,
}

/// Whether `roll` is a critical failure for `skill_value`.
pub fn is_critical_failure(roll: u32, skill_value: u32, rules: &PercentileRules) -> bool {
    if skill_value < LOW_SKILL_LIMIT {
        roll >= LOW_SKILL_FUMBLE_FLOOR
    } else {
        roll == rules.critical_fail_value()
    }
}

/// Classify a roll against a skill value.
///
/// Tiers are tested in order: critical success, critical failure, extreme,
/// hard, regular, failure. A natural 100 that is not a critical failure
/// lands on extreme success.
pub fn determine_success_level(
    roll: u32,
    skill_value: u32,
    rules: &PercentileRules,
) -> SuccessLevel {
    if roll == rules.critical_success_value() {
        return SuccessLevel::CriticalSuccess;
    }
    if is_critical_failure(roll, skill_value, rules) {
        return SuccessLevel::CriticalFailure;
    }

    if roll == PERCENTILE_SIDES
        || at_or_under_fraction(roll, skill_value, rules.extreme_divisor())
    {
        SuccessLevel::ExtremeSuccess
    } else if at_or_under_fraction(roll, skill_value, rules.hard_divisor()) {
        SuccessLevel::HardSuccess
    } else if roll <= skill_value {
        SuccessLevel::RegularSuccess
    } else {
        SuccessLevel::Failure
    }
}

/// `roll <= skill / divisor` over the reals, computed exactly in integers.
fn at_or_under_fraction(roll: u32, skill: u32, divisor: u32) -> bool {
    u64::from(roll) * u64::from(divisor) <= u64::from(skill)
}

/// Roll d100 once and classify it.
pub fn roll_percentile(
    skill_value: u32,
    rules: &PercentileRules,
    dice: &mut Dice,
) -> PercentileResult {
    let roll = dice.roll(PERCENTILE_SIDES);
    let success_level = determine_success_level(roll, skill_value, rules);
    tracing::debug!(roll, skill_value, tier = success_level.tier(), "percentile roll");

    PercentileResult {
        roll,
        skill_value,
        success_level,
        is_critical_success: roll == rules.critical_success_value(),
        is_critical_fail: is_critical_failure(roll, skill_value, rules),
    }
}

/// Roll `times` independent percentile checks, in call order.
///
/// `times` below 1 is treated as 1.
pub fn roll_percentile_multi(
    skill_value: u32,
    times: i64,
    rules: &PercentileRules,
    dice: &mut Dice,
) -> Vec<PercentileResult> {
    let times = times.max(1);
    (0..times)
        .map(|_| roll_percentile(skill_value, rules, dice))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rules() -> PercentileRules {
        PercentileRules::default()
    }

    #[test]
    fn tiers_at_skill_fifty() {
        let r = rules();
        assert_eq!(determine_success_level(1, 50, &r), SuccessLevel::CriticalSuccess);
        assert_eq!(determine_success_level(10, 50, &r), SuccessLevel::ExtremeSuccess);
        assert_eq!(determine_success_level(11, 50, &r), SuccessLevel::HardSuccess);
        assert_eq!(determine_success_level(25, 50, &r), SuccessLevel::HardSuccess);
        assert_eq!(determine_success_level(26, 50, &r), SuccessLevel::RegularSuccess);
        assert_eq!(determine_success_level(50, 50, &r), SuccessLevel::RegularSuccess);
        assert_eq!(determine_success_level(51, 50, &r), SuccessLevel::Failure);
        assert_eq!(determine_success_level(100, 50, &r), SuccessLevel::CriticalFailure);
    }

    #[test]
    fn division_is_not_truncated() {
        // 33 / 2 = 16.5 and 33 / 5 = 6.6
        let r = rules();
        assert_eq!(determine_success_level(6, 33, &r), SuccessLevel::ExtremeSuccess);
        assert_eq!(determine_success_level(7, 33, &r), SuccessLevel::HardSuccess);
        assert_eq!(determine_success_level(16, 33, &r), SuccessLevel::HardSuccess);
        assert_eq!(determine_success_level(17, 33, &r), SuccessLevel::RegularSuccess);
    }

    #[test]
    fn low_skill_fumble_band() {
        let r = rules();
        assert!(is_critical_failure(96, 40, &r));
        assert!(is_critical_failure(100, 49, &r));
        assert!(!is_critical_failure(95, 40, &r));
        assert_eq!(determine_success_level(97, 40, &r), SuccessLevel::CriticalFailure);
    }

    #[test]
    fn high_skill_fumbles_only_on_configured_value() {
        let r = rules();
        assert!(is_critical_failure(100, 60, &r));
        assert!(!is_critical_failure(99, 60, &r));
        assert!(!is_critical_failure(96, 50, &r));
    }

    #[test]
    fn low_skill_band_ignores_configured_value() {
        let r = PercentileRules::new(1, 99, 2, 5).unwrap();
        assert!(is_critical_failure(97, 30, &r));
        assert!(is_critical_failure(99, 80, &r));
        assert!(!is_critical_failure(100, 80, &r));
    }

    #[test]
    fn natural_hundred_without_fumble_is_extreme() {
        let r = PercentileRules::new(1, 99, 2, 5).unwrap();
        assert_eq!(determine_success_level(100, 80, &r), SuccessLevel::ExtremeSuccess);
    }

    #[test]
    fn critical_success_beats_fumble() {
        let r = PercentileRules::new(100, 100, 2, 5).unwrap();
        assert_eq!(determine_success_level(100, 60, &r), SuccessLevel::CriticalSuccess);
    }

    #[test]
    fn skill_below_divisor_has_no_extreme_band() {
        let r = rules();
        assert_eq!(determine_success_level(2, 4, &r), SuccessLevel::HardSuccess);
        assert_eq!(determine_success_level(3, 4, &r), SuccessLevel::RegularSuccess);
    }

    #[test]
    fn custom_divisors() {
        let r = PercentileRules::new(1, 100, 3, 10).unwrap();
        assert_eq!(determine_success_level(6, 60, &r), SuccessLevel::ExtremeSuccess);
        assert_eq!(determine_success_level(20, 60, &r), SuccessLevel::HardSuccess);
        assert_eq!(determine_success_level(21, 60, &r), SuccessLevel::RegularSuccess);
    }

    #[test]
    fn roll_percentile_flags() {
        let r = rules();
        let result = roll_percentile(70, &r, &mut Dice::from_scripted(vec![1]));
        assert!(result.is_critical_success);
        assert_eq!(result.success_level, SuccessLevel::CriticalSuccess);

        let result = roll_percentile(70, &r, &mut Dice::from_scripted(vec![100]));
        assert!(result.is_critical_fail);
        assert_eq!(result.success_level, SuccessLevel::CriticalFailure);
        assert_eq!(result.skill_value, 70);
    }

    #[test]
    fn multi_clamps_to_one() {
        let r = rules();
        let mut dice = Dice::from_seed(5);
        assert_eq!(roll_percentile_multi(50, 0, &r, &mut dice).len(), 1);
        assert_eq!(roll_percentile_multi(50, -3, &r, &mut dice).len(), 1);
        assert_eq!(roll_percentile_multi(50, 4, &r, &mut dice).len(), 4);
    }

    #[test]
    fn multi_rolls_are_independent_and_ordered() {
        let r = rules();
        let mut dice = Dice::from_scripted(vec![5, 60, 99]);
        let rolls: Vec<u32> = roll_percentile_multi(50, 3, &r, &mut dice)
            .iter()
            .map(|p| p.roll)
            .collect();
        assert_eq!(rolls, vec![5, 60, 99]);
    }

    #[test]
    fn tier_codes_and_labels() {
        let tiers: Vec<u8> = SuccessLevel::ALL.iter().map(|l| l.tier()).collect();
        assert_eq!(tiers, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(SuccessLevel::HardSuccess.label(), "困難成功 (Hard Success)");
        assert_eq!(SuccessLevel::Failure.to_string(), "Failure");
        assert!(SuccessLevel::RegularSuccess.is_success());
        assert!(!SuccessLevel::CriticalFailure.is_success());
    }

    proptest! {
        #[test]
        fn every_roll_classifies(roll in 1u32..=100, skill in 1u32..=100) {
            let r = rules();
            let level = determine_success_level(roll, skill, &r);
            if roll == 1 {
                prop_assert_eq!(level, SuccessLevel::CriticalSuccess);
            } else if is_critical_failure(roll, skill, &r) {
                prop_assert_eq!(level, SuccessLevel::CriticalFailure);
            } else if roll > skill && roll != 100 {
                prop_assert_eq!(level, SuccessLevel::Failure);
            } else {
                prop_assert!(level.is_success());
            }
        }

        #[test]
        fn rolls_stay_in_range(seed in any::<u64>(), skill in 1u32..=100) {
            let result = roll_percentile(skill, &rules(), &mut Dice::from_seed(seed));
            prop_assert!((1..=100).contains(&result.roll));
        }
    }
}
