//! Configuration records for guilds and the process as a whole.
//!
//! Key names match the `global` / `guilds` objects of an existing
//! `config.json`, and every key is optional when reading.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use td_dice::{DiceRules, PercentileRules};

use crate::Snowflake;

const DEFAULT_STREAM_THROTTLE_MS: u64 = 1000;

/// How roll logs are streamed to a guild's log channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamMode {
    /// Post every roll as it happens.
    #[serde(alias = "Live")]
    Live,
    /// Collect rolls and post them together.
    #[default]
    #[serde(alias = "Batch")]
    Batch,
}

impl fmt::Display for StreamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Batch => write!(f, "batch"),
        }
    }
}

impl FromStr for StreamMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "batch" => Ok(Self::Batch),
            other => Err(format!("unknown stream mode: {other} (expected live or batch)")),
        }
    }
}

/// Settings of one guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuildConfig {
    /// Channel that receives streamed roll logs, if streaming is on.
    pub log_channel: Option<Snowflake>,
    /// Streaming mode.
    pub stream_mode: StreamMode,
    /// Minimum delay between streamed posts.
    #[serde(rename = "stream_throttle")]
    pub stream_throttle_ms: u64,
    /// Channel that receives critical-success notices.
    pub crit_success_channel: Option<Snowflake>,
    /// Channel that receives critical-failure notices.
    pub crit_fail_channel: Option<Snowflake>,
    /// Limits for generic dice expressions.
    #[serde(rename = "dnd_rules", deserialize_with = "rules_or_default")]
    pub dice_rules: DiceRules,
    /// Percentile thresholds.
    #[serde(rename = "coc_rules", deserialize_with = "rules_or_default")]
    pub percentile_rules: PercentileRules,
}

/// Rules that fail validation are replaced by the defaults, so one bad value
/// does not make the rest of the file unreadable.
fn rules_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_else(|e| {
        tracing::warn!(
            rules = std::any::type_name::<T>(),
            error = %e,
            "invalid rules, using defaults"
        );
        T::default()
    }))
}

impl Default for GuildConfig {
    fn default() -> Self {
        Self {
            log_channel: None,
            stream_mode: StreamMode::default(),
            stream_throttle_ms: DEFAULT_STREAM_THROTTLE_MS,
            crit_success_channel: None,
            crit_fail_channel: None,
            dice_rules: DiceRules::default(),
            percentile_rules: PercentileRules::default(),
        }
    }
}

/// Settings shared by every guild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Users allowed to run admin commands.
    pub developers: Vec<Snowflake>,
    /// Whether rolls from every guild are mirrored to one channel.
    pub global_stream_enabled: bool,
    /// The mirror channel.
    pub global_stream_channel: Option<Snowflake>,
}
