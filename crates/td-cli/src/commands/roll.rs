use td_dice::parse_and_roll;

use super::Context;
use crate::render;

pub fn run(ctx: &Context, expression: &str, json: bool) -> Result<(), String> {
    let config = ctx.config()?.guild(ctx.guild);
    let mut dice = ctx.dice();

    let results =
        parse_and_roll(expression, &config.dice_rules, &mut dice).map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&results).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    if let [result] = results.as_slice() {
        println!("{}", render::roll_line(result));
    } else {
        for (i, result) in results.iter().enumerate() {
            println!("{:>2}. {}", i + 1, render::roll_line(result));
        }
    }

    Ok(())
}
