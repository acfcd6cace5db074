use colored::Colorize;
use td_dice::roll_percentile_multi;
use td_guild::{CriticalEvent, CriticalSink, Snowflake, critical_events, dispatch};

use super::Context;
use crate::render;

/// Prints routed notices in place of posting them to a channel.
struct PrintSink;

impl CriticalSink for PrintSink {
    fn deliver(&mut self, channel: Snowflake, event: &CriticalEvent) {
        println!("[{} -> {channel}] {}", event.kind, event.message);
    }
}

pub fn run(
    ctx: &Context,
    skill: u32,
    times: i64,
    user: &str,
    channel: &str,
    json: bool,
) -> Result<(), String> {
    let config = ctx.config()?.guild(ctx.guild);
    let mut dice = ctx.dice();

    let results = roll_percentile_multi(skill, times, &config.percentile_rules, &mut dice);

    if json {
        let out = serde_json::to_string_pretty(&results).map_err(|e| e.to_string())?;
        println!("{out}");
    } else if let [result] = results.as_slice() {
        println!("  {} {skill}", "skill:".dimmed());
        println!("  {}", render::percentile_line(result));
    } else {
        println!("  {} {skill}, {} rolls", "skill:".dimmed(), results.len());
        for (i, result) in results.iter().enumerate() {
            println!("  {:>2}. {}", i + 1, render::percentile_line(result));
        }
    }

    let events = critical_events(&results, skill, user, channel);
    let delivered = dispatch(&config, &events, &mut PrintSink);
    tracing::debug!(events = events.len(), delivered, "critical notices routed");

    Ok(())
}
