use td_guild::CriticalKind;

use super::Context;

pub fn run(ctx: &Context, kind: CriticalKind, channel: Option<u64>) -> Result<(), String> {
    let mut store = ctx.config()?;
    store
        .update_guild(ctx.guild, |cfg| match kind {
            CriticalKind::Success => cfg.crit_success_channel = channel,
            CriticalKind::Fail => cfg.crit_fail_channel = channel,
        })
        .map_err(|e| e.to_string())?;

    match channel {
        Some(channel) => println!("  {kind} notices go to channel {channel}"),
        None => println!("  {kind} notices cleared"),
    }
    Ok(())
}
