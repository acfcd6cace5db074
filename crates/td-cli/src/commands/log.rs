use td_guild::StreamMode;

use super::Context;

pub fn stream(ctx: &Context, on: bool, channel: Option<u64>) -> Result<(), String> {
    let log_channel = match (on, channel) {
        (true, Some(channel)) => Some(channel),
        (true, None) => return Err("--channel is required to turn streaming on".into()),
        (false, _) => None,
    };

    let mut store = ctx.config()?;
    store
        .update_guild(ctx.guild, |cfg| cfg.log_channel = log_channel)
        .map_err(|e| e.to_string())?;

    match log_channel {
        Some(channel) => println!("  log streaming on, channel {channel}"),
        None => println!("  log streaming off"),
    }
    Ok(())
}

pub fn mode(ctx: &Context, mode: StreamMode) -> Result<(), String> {
    let mut store = ctx.config()?;
    store
        .update_guild(ctx.guild, |cfg| cfg.stream_mode = mode)
        .map_err(|e| e.to_string())?;
    println!("  stream mode set to {mode}");
    Ok(())
}
