//! Dice engine for tabledice.
//!
//! Parses dice expressions such as `2d6+1`, `d20>=15` or `+3 d4` into a
//! validated [`RollSpec`], evaluates them into [`RollResult`]s, and classifies
//! percentile skill checks into one of six [`SuccessLevel`]s.
//!
//! Every operation is a pure function of its inputs plus a caller-owned
//! [`Dice`] source; rules are passed in per call and never stored.

pub mod dice;
pub mod error;
pub mod expr;
pub mod percentile;
pub mod roll;
pub mod rules;

pub use dice::Dice;
pub use error::{CountSubject, DiceResult, RollError, RulesError};
pub use expr::{CompareOp, Comparison, RollPlan, RollSpec, parse_expression, parse_repeatable};
pub use percentile::{
    PercentileResult, SuccessLevel, determine_success_level, is_critical_failure, roll_percentile,
    roll_percentile_multi,
};
pub use roll::{RollResult, evaluate};
pub use rules::{DiceRules, PercentileRules};

/// Parse an expression (optionally prefixed with a repeat count) and roll it.
///
/// Returns one [`RollResult`] per repetition, in roll order.
pub fn parse_and_roll(
    text: &str,
    rules: &DiceRules,
    dice: &mut Dice,
) -> DiceResult<Vec<RollResult>> {
    let plan = parse_repeatable(text, rules)?;
    Ok(plan.roll(dice))
}
