use std::ops::Range;

use super::lexer::{self, Token};
use super::{Comparison, RollPlan, RollSpec};
use crate::error::{CountSubject, DiceResult, RollError};
use crate::rules::DiceRules;

const INVALID_FORMAT: &str = "invalid dice expression format";

/// Parse a single dice expression such as `2d6+1` or `d20 >= 15`.
///
/// Surrounding whitespace is ignored. The count defaults to 1, the modifier
/// to 0, and the comparison clause is optional.
pub fn parse_expression(text: &str, rules: &DiceRules) -> DiceResult<RollSpec> {
    let text = text.trim();
    let tokens = lexer::lex(text).map_err(|_| RollError::format(INVALID_FORMAT))?;
    let raw = Cursor::new(&tokens)
        .expression()
        .ok_or_else(|| RollError::format(INVALID_FORMAT))?;

    let count = match raw.count {
        Some(digits) => saturating_number(digits),
        None => 1,
    };
    if count == 0 {
        return Err(RollError::format("dice count must be at least 1"));
    }
    let count = within(count, rules.max_dice_count()).ok_or(RollError::CountOutOfRange {
        subject: CountSubject::Dice,
        max: rules.max_dice_count(),
    })?;

    let sides = saturating_number(raw.sides);
    if sides < 2 {
        return Err(RollError::format("dice must have at least 2 sides"));
    }
    let sides = within(sides, rules.max_dice_sides()).ok_or(RollError::SidesOutOfRange {
        max: rules.max_dice_sides(),
    })?;

    let modifier = match raw.modifier {
        Some((negative, digits)) => {
            let magnitude: i64 = digits
                .parse()
                .map_err(|_| RollError::format("modifier out of range"))?;
            if negative { -magnitude } else { magnitude }
        }
        None => 0,
    };

    let comparison = match raw.comparison {
        Some((op, digits)) => Some(Comparison {
            op,
            threshold: digits
                .parse()
                .map_err(|_| RollError::format("comparison threshold out of range"))?,
        }),
        None => None,
    };

    let spec = RollSpec {
        count,
        sides,
        modifier,
        comparison,
    };
    tracing::debug!(%spec, "parsed dice expression");
    Ok(spec)
}

/// Parse an expression that may carry a repeat prefix, e.g. `+3 d4` or `3 2d6+1`.
///
/// The repeat count shares the `max_dice_count` ceiling. Text without a
/// repeat prefix parses as a plan with a single repetition.
pub fn parse_repeatable(text: &str, rules: &DiceRules) -> DiceResult<RollPlan> {
    let text = text.trim();

    let Some((digits, rest)) = lexer::split_repeat(text) else {
        return Ok(RollPlan {
            repeat: 1,
            spec: parse_expression(text, rules)?,
        });
    };

    let repeat = saturating_number(digits);
    if repeat == 0 {
        return Err(RollError::format("roll count must be at least 1"));
    }
    let repeat = within(repeat, rules.max_dice_count()).ok_or(RollError::CountOutOfRange {
        subject: CountSubject::Rolls,
        max: rules.max_dice_count(),
    })?;

    let spec = parse_expression(rest, rules)?;
    tracing::debug!(repeat, %spec, "parsed repeated dice expression");
    Ok(RollPlan { repeat, spec })
}

/// Digits of an expression before range checks.
struct RawExpression<'src> {
    count: Option<&'src str>,
    sides: &'src str,
    modifier: Option<(bool, &'src str)>,
    comparison: Option<(super::CompareOp, &'src str)>,
}

struct Cursor<'t, 'src> {
    tokens: &'t [(Token<'src>, Range<usize>)],
    pos: usize,
}

impl<'t, 'src> Cursor<'t, 'src> {
    fn new(tokens: &'t [(Token<'src>, Range<usize>)]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'t Token<'src>> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn eat(&mut self, expected: &Token<'src>) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn number(&mut self) -> Option<&'src str> {
        match self.peek() {
            Some(Token::Number(digits)) => {
                self.pos += 1;
                Some(*digits)
            }
            _ => None,
        }
    }

    /// `[count] d sides [(+|-) modifier] [ws] [op [ws] threshold]`, then end of input.
    fn expression(mut self) -> Option<RawExpression<'src>> {
        let count = self.number();
        if !self.eat(&Token::Die) {
            return None;
        }
        let sides = self.number()?;

        let modifier = if self.eat(&Token::Plus) {
            Some((false, self.number()?))
        } else if self.eat(&Token::Minus) {
            Some((true, self.number()?))
        } else {
            None
        };

        self.eat(&Token::Space);
        let comparison = match self.peek() {
            Some(Token::Compare(op)) => {
                let op = *op;
                self.pos += 1;
                self.eat(&Token::Space);
                Some((op, self.number()?))
            }
            _ => None,
        };

        if self.pos != self.tokens.len() {
            return None;
        }
        Some(RawExpression {
            count,
            sides,
            modifier,
            comparison,
        })
    }
}

/// Decimal value of an ASCII digit run, saturating instead of overflowing so
/// that huge counts still compare as "too large".
fn saturating_number(digits: &str) -> u64 {
    digits.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10)
            .saturating_add(u64::from(b.wrapping_sub(b'0')))
    })
}

fn within(value: u64, max: u32) -> Option<u32> {
    u32::try_from(value).ok().filter(|v| *v <= max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::CompareOp;

    fn rules() -> DiceRules {
        DiceRules::default()
    }

    #[test]
    fn parse_count_sides_modifier() {
        let spec = parse_expression("2d6+1", &rules()).unwrap();
        assert_eq!(spec.count(), 2);
        assert_eq!(spec.sides(), 6);
        assert_eq!(spec.modifier(), 1);
        assert_eq!(spec.comparison(), None);
    }

    #[test]
    fn parse_default_count_and_comparison() {
        let spec = parse_expression("d20>=15", &rules()).unwrap();
        assert_eq!(spec.count(), 1);
        assert_eq!(spec.sides(), 20);
        assert_eq!(spec.modifier(), 0);
        assert_eq!(
            spec.comparison(),
            Some(Comparison {
                op: CompareOp::Ge,
                threshold: 15
            })
        );
    }

    #[test]
    fn parse_negative_modifier() {
        let spec = parse_expression("3d8-2", &rules()).unwrap();
        assert_eq!(spec.modifier(), -2);
    }

    #[test]
    fn whitespace_around_comparison() {
        let spec = parse_expression("  2d6+3  <  9 ", &rules()).unwrap();
        assert_eq!(
            spec.comparison(),
            Some(Comparison {
                op: CompareOp::Lt,
                threshold: 9
            })
        );
    }

    #[test]
    fn every_operator_parses() {
        for (text, op) in [
            ("d20>=1", CompareOp::Ge),
            ("d20>1", CompareOp::Gt),
            ("d20<=1", CompareOp::Le),
            ("d20<1", CompareOp::Lt),
            ("d20==1", CompareOp::Eq),
            ("d20!=1", CompareOp::Ne),
        ] {
            let spec = parse_expression(text, &rules()).unwrap();
            assert_eq!(spec.comparison().map(|c| c.op), Some(op), "{text}");
        }
    }

    #[test]
    fn one_sided_die_is_invalid_format() {
        assert_eq!(
            parse_expression("d1", &rules()),
            Err(RollError::InvalidFormat(
                "dice must have at least 2 sides".into()
            ))
        );
        assert!(matches!(
            parse_expression("2d0", &rules()),
            Err(RollError::InvalidFormat(_))
        ));
    }

    #[test]
    fn zero_count_is_invalid_format() {
        assert_eq!(
            parse_expression("0d6", &rules()),
            Err(RollError::InvalidFormat("dice count must be at least 1".into()))
        );
    }

    #[test]
    fn count_over_ceiling() {
        assert_eq!(
            parse_expression("51d6", &rules()),
            Err(RollError::CountOutOfRange {
                subject: CountSubject::Dice,
                max: 50
            })
        );
        assert!(parse_expression("50d6", &rules()).is_ok());
    }

    #[test]
    fn huge_count_is_out_of_range_not_format() {
        assert!(matches!(
            parse_expression("99999999999999999999999d6", &rules()),
            Err(RollError::CountOutOfRange { .. })
        ));
    }

    #[test]
    fn sides_over_ceiling() {
        assert_eq!(
            parse_expression("d1001", &rules()),
            Err(RollError::SidesOutOfRange { max: 1000 })
        );
        assert!(parse_expression("d1000", &rules()).is_ok());
    }

    #[test]
    fn count_checked_before_sides() {
        assert!(matches!(
            parse_expression("0d1", &rules()),
            Err(RollError::InvalidFormat(msg)) if msg.contains("count")
        ));
        assert!(matches!(
            parse_expression("51d5000", &rules()),
            Err(RollError::CountOutOfRange { .. })
        ));
    }

    #[test]
    fn custom_ceilings_apply() {
        let tight = DiceRules::new(3, 12).unwrap();
        assert!(parse_expression("3d12", &tight).is_ok());
        assert!(matches!(
            parse_expression("4d6", &tight),
            Err(RollError::CountOutOfRange { max: 3, .. })
        ));
        assert_eq!(
            parse_expression("d20", &tight),
            Err(RollError::SidesOutOfRange { max: 12 })
        );
    }

    #[test]
    fn malformed_expressions() {
        for text in [
            "",
            "d",
            "2d",
            "abc",
            "2x6",
            "2D6",
            "2 d6",
            "2d 6",
            "2d6+",
            "2d6 +1",
            "2d6+ 1",
            "+2d6",
            "-2d6",
            "2d6>=",
            "2d6=5",
            "2d6=>5",
            "2d6>>5",
            "2d6>=-5",
            "2d6+1+1",
            "2d6 5",
            "d20>=15 extra",
        ] {
            assert_eq!(
                parse_expression(text, &rules()),
                Err(RollError::InvalidFormat(INVALID_FORMAT.into())),
                "{text:?}"
            );
        }
    }

    #[test]
    fn oversized_modifier_is_invalid_format() {
        assert!(matches!(
            parse_expression("d6+99999999999999999999", &rules()),
            Err(RollError::InvalidFormat(msg)) if msg.contains("modifier")
        ));
    }

    #[test]
    fn oversized_threshold_is_invalid_format() {
        assert!(matches!(
            parse_expression("d20>=99999999999999999999", &rules()),
            Err(RollError::InvalidFormat(msg)) if msg.contains("threshold")
        ));
    }

    #[test]
    fn repeat_prefix_with_plus() {
        let plan = parse_repeatable("+3 d4", &rules()).unwrap();
        assert_eq!(plan.repeat(), 3);
        assert_eq!(plan.spec().count(), 1);
        assert_eq!(plan.spec().sides(), 4);
    }

    #[test]
    fn repeat_prefix_without_plus() {
        let plan = parse_repeatable("5 2d6+1>=8", &rules()).unwrap();
        assert_eq!(plan.repeat(), 5);
        assert_eq!(plan.spec().count(), 2);
        assert_eq!(plan.spec().modifier(), 1);
    }

    #[test]
    fn no_prefix_means_single_roll() {
        let plan = parse_repeatable("  2d6  ", &rules()).unwrap();
        assert_eq!(plan.repeat(), 1);
        assert_eq!(plan.spec().count(), 2);
    }

    #[test]
    fn zero_repeat_is_invalid_format() {
        assert_eq!(
            parse_repeatable("0 d6", &rules()),
            Err(RollError::InvalidFormat("roll count must be at least 1".into()))
        );
    }

    #[test]
    fn repeat_over_ceiling() {
        assert_eq!(
            parse_repeatable("+51 d6", &rules()),
            Err(RollError::CountOutOfRange {
                subject: CountSubject::Rolls,
                max: 50
            })
        );
    }

    #[test]
    fn repeat_checked_before_inner_expression() {
        assert!(matches!(
            parse_repeatable("99 nonsense", &rules()),
            Err(RollError::CountOutOfRange { subject: CountSubject::Rolls, .. })
        ));
        assert!(matches!(
            parse_repeatable("3 nonsense", &rules()),
            Err(RollError::InvalidFormat(_))
        ));
    }

    #[test]
    fn inner_expression_errors_propagate() {
        assert_eq!(
            parse_repeatable("3 d1001", &rules()),
            Err(RollError::SidesOutOfRange { max: 1000 })
        );
    }

    #[test]
    fn saturating_digits() {
        assert_eq!(saturating_number("007"), 7);
        assert_eq!(saturating_number("18446744073709551616"), u64::MAX);
    }
}
