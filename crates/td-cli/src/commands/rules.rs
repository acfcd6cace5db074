use comfy_table::{ContentArrangement, Table};
use td_dice::{DiceRules, PercentileRules};
use td_guild::GuildConfig;

use super::Context;

/// Requested percentile changes; `None` keeps the current value.
pub struct CocChanges {
    pub critical_success: Option<u32>,
    pub critical_fail: Option<u32>,
    pub hard_divisor: Option<u32>,
    pub extreme_divisor: Option<u32>,
}

pub fn show(ctx: &Context) -> Result<(), String> {
    let config = ctx.config()?.guild(ctx.guild);
    print_rules(&config);
    Ok(())
}

pub fn dice(ctx: &Context, max_count: Option<u32>, max_sides: Option<u32>) -> Result<(), String> {
    let mut store = ctx.config()?;
    let current = store.guild(ctx.guild).dice_rules;

    let rules = DiceRules::new(
        max_count.unwrap_or(current.max_dice_count()),
        max_sides.unwrap_or(current.max_dice_sides()),
    )
    .map_err(|e| e.to_string())?
    .with_critical_faces(current.critical_success_face(), current.critical_fail_face());

    let config = store
        .update_guild(ctx.guild, |cfg| cfg.dice_rules = rules)
        .map_err(|e| e.to_string())?;
    print_rules(&config);
    Ok(())
}

pub fn coc(ctx: &Context, changes: CocChanges) -> Result<(), String> {
    let mut store = ctx.config()?;
    let current = store.guild(ctx.guild).percentile_rules;

    let rules = PercentileRules::new(
        changes
            .critical_success
            .unwrap_or(current.critical_success_value()),
        changes.critical_fail.unwrap_or(current.critical_fail_value()),
        changes.hard_divisor.unwrap_or(current.hard_divisor()),
        changes.extreme_divisor.unwrap_or(current.extreme_divisor()),
    )
    .map_err(|e| e.to_string())?;

    let config = store
        .update_guild(ctx.guild, |cfg| cfg.percentile_rules = rules)
        .map_err(|e| e.to_string())?;
    print_rules(&config);
    Ok(())
}

fn print_rules(config: &GuildConfig) {
    let dice = &config.dice_rules;
    let coc = &config.percentile_rules;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Rule", "Value"]);
    let rows = [
        ("max dice count", dice.max_dice_count()),
        ("max dice sides", dice.max_dice_sides()),
        ("d20 critical success", dice.critical_success_face()),
        ("d20 critical fail", dice.critical_fail_face()),
        ("coc critical success", coc.critical_success_value()),
        ("coc critical fail", coc.critical_fail_value()),
        ("hard divisor", coc.hard_divisor()),
        ("extreme divisor", coc.extreme_divisor()),
    ];
    for (rule, value) in rows {
        table.add_row(vec![rule.to_string(), value.to_string()]);
    }

    println!("{table}");
}
