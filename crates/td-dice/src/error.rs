//! Error types for the dice engine.

use std::fmt;

/// Convenience result type for parsing and rolling.
pub type DiceResult<T> = Result<T, RollError>;

/// Which count exceeded its ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSubject {
    /// The number of dice in a single roll (`3` in `3d6`).
    Dice,
    /// The repeat prefix of a repeated roll (`3` in `+3 d6`).
    Rolls,
}

impl fmt::Display for CountSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dice => write!(f, "dice"),
            Self::Rolls => write!(f, "rolls"),
        }
    }
}

/// Validation failures for dice expressions.
///
/// All variants are deterministic and not worth retrying; the message is
/// meant to be shown to the end user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RollError {
    /// The text does not match the dice grammar, a count is zero, or a die
    /// has fewer than two sides.
    #[error("{0}")]
    InvalidFormat(String),

    /// A dice count or repeat count exceeds the configured ceiling.
    #[error("too many {subject} (max {max})")]
    CountOutOfRange {
        /// Whether the dice count or the repeat count overflowed.
        subject: CountSubject,
        /// The configured ceiling.
        max: u32,
    },

    /// A die has more sides than the configured ceiling.
    #[error("dice has too many sides (max {max})")]
    SidesOutOfRange {
        /// The configured ceiling.
        max: u32,
    },
}

impl RollError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }
}

/// Rejected rules configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// A ceiling that must be positive was zero.
    #[error("{0} must be at least 1")]
    ZeroCeiling(&'static str),

    /// The sides ceiling would make every die invalid.
    #[error("max_dice_sides must be at least 2, got {0}")]
    SidesCeilingTooLow(u32),

    /// A percentile divisor was zero.
    #[error("{0} must not be zero")]
    ZeroDivisor(&'static str),
}
