//! Guild-scoped state around the dice engine.
//!
//! - [`ConfigStore`] caches per-guild configuration and the global developer
//!   list, persisted as a JSON file.
//! - [`SkillStore`] is a per-guild glossary of named skills with fuzzy lookup.
//! - [`crit`] turns critical percentile results into events and routes them
//!   to the channels a guild has configured.

pub mod config;
pub mod crit;
pub mod error;
pub mod skills;
pub mod store;

pub use config::{GlobalConfig, GuildConfig, StreamMode};
pub use crit::{CriticalEvent, CriticalKind, CriticalSink, critical_events, dispatch};
pub use error::{GuildError, GuildResult};
pub use skills::{SkillEntry, SkillStore};
pub use store::ConfigStore;

/// Identifier of a guild, channel or user.
pub type Snowflake = u64;
