//! Routing of critical percentile results to a guild's notice channels.

use std::fmt;

use serde::Serialize;
use td_dice::PercentileResult;

use crate::Snowflake;
use crate::config::GuildConfig;

/// Which kind of critical a roll produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CriticalKind {
    /// Critical success.
    Success,
    /// Critical failure.
    Fail,
}

impl CriticalKind {
    /// Heading used when the event is posted.
    pub fn title(self) -> &'static str {
        match self {
            Self::Success => "Critical Success Log",
            Self::Fail => "Critical Failure Log",
        }
    }
}

impl fmt::Display for CriticalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "crit-success"),
            Self::Fail => write!(f, "crit-fail"),
        }
    }
}

/// A critical roll worth announcing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriticalEvent {
    /// Success or failure.
    pub kind: CriticalKind,
    /// Human-readable notice.
    pub message: String,
}

/// Receives events routed to a channel.
pub trait CriticalSink {
    /// Deliver one event to `channel`.
    fn deliver(&mut self, channel: Snowflake, event: &CriticalEvent);
}

/// Records every delivery; useful when the caller posts them later.
impl CriticalSink for Vec<(Snowflake, CriticalEvent)> {
    fn deliver(&mut self, channel: Snowflake, event: &CriticalEvent) {
        self.push((channel, event.clone()));
    }
}

/// Build one event per critical flag of each result.
///
/// When more than one roll was made the message names which roll it was.
pub fn critical_events(
    results: &[PercentileResult],
    skill: u32,
    author: &str,
    channel: &str,
) -> Vec<CriticalEvent> {
    let multiple = results.len() > 1;
    let mut events = Vec::new();

    for (i, result) in results.iter().enumerate() {
        let which = if multiple {
            format!(" (roll {})", i + 1)
        } else {
            String::new()
        };
        let flags = [
            (result.is_critical_success, CriticalKind::Success, "critical success"),
            (result.is_critical_fail, CriticalKind::Fail, "critical failure"),
        ];
        for (set, kind, what) in flags {
            if set {
                let roll = result.roll;
                events.push(CriticalEvent {
                    kind,
                    message: format!(
                        "{author} rolled {roll} on `coc {skill}`{which} \
                         and triggered a {what} (channel: {channel})"
                    ),
                });
            }
        }
    }

    events
}

/// Send each event to the channel `config` assigns to its kind.
///
/// Kinds without a configured channel are dropped. Returns how many events
/// were delivered.
pub fn dispatch(
    config: &GuildConfig,
    events: &[CriticalEvent],
    sink: &mut impl CriticalSink,
) -> usize {
    let mut delivered = 0;
    for event in events {
        let channel = match event.kind {
            CriticalKind::Success => config.crit_success_channel,
            CriticalKind::Fail => config.crit_fail_channel,
        };
        match channel {
            Some(channel) => {
                sink.deliver(channel, event);
                delivered += 1;
            }
            None => tracing::debug!(kind = %event.kind, "no channel configured, event dropped"),
        }
    }
    delivered
}
