//! The random source behind every roll.
//!
//! A [`Dice`] is owned by whoever rolls and borrowed mutably for each call,
//! so concurrent callers never share generator state. Hosting code keeps one
//! per task or thread (`Dice` is `Send`).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform die draws.
#[derive(Debug, Clone)]
pub struct Dice {
    source: Source,
}

#[derive(Debug, Clone)]
enum Source {
    Rng(StdRng),
    Scripted { values: Vec<u32>, cursor: usize },
}

impl Dice {
    /// A generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            source: Source::Rng(StdRng::from_os_rng()),
        }
    }

    /// A deterministic generator for reproducible sessions.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: Source::Rng(StdRng::seed_from_u64(seed)),
        }
    }

    /// Replay a recorded sequence of draws, cycling when it runs out.
    ///
    /// Values are returned verbatim regardless of the die being rolled, so
    /// the caller is responsible for recording in-range faces. An empty
    /// script always yields 1.
    pub fn from_scripted(values: Vec<u32>) -> Self {
        Self {
            source: Source::Scripted { values, cursor: 0 },
        }
    }

    /// Draw one face of a die with `sides` faces, in `1..=sides`.
    pub fn roll(&mut self, sides: u32) -> u32 {
        let value = match &mut self.source {
            Source::Rng(rng) => rng.random_range(1..=sides.max(1)),
            Source::Scripted { values, cursor } => {
                let value = if values.is_empty() {
                    1
                } else {
                    values[*cursor % values.len()]
                };
                *cursor += 1;
                value
            }
        };
        tracing::trace!(sides, value, "die drawn");
        value
    }
}
