use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::Context;

pub fn add(
    ctx: &Context,
    name: &str,
    skill_type: &str,
    level: &str,
    effect: &str,
) -> Result<(), String> {
    let mut skills = ctx.skills()?;
    let entry = skills
        .add(ctx.guild, name, skill_type, level, effect)
        .map_err(|e| e.to_string())?;
    println!("  saved skill {}", entry.name.bold());
    Ok(())
}

pub fn show(ctx: &Context, name: &str) -> Result<(), String> {
    let skills = ctx.skills()?;
    let entry = skills.get(ctx.guild, name).map_err(|e| e.to_string())?;

    println!("  {} [{}]", entry.name.bold(), entry.skill_type.dimmed());
    println!();
    println!("  level:  {}", entry.level);
    println!("  effect: {}", entry.effect);
    Ok(())
}

pub fn delete(ctx: &Context, name: &str, confirmed: bool) -> Result<(), String> {
    let mut skills = ctx.skills()?;
    let entry = skills
        .get(ctx.guild, name)
        .map_err(|e| e.to_string())?
        .clone();

    if !confirmed {
        return Err(format!(
            "refusing to delete \"{}\" without --yes",
            entry.name
        ));
    }

    if skills
        .delete(ctx.guild, &entry.normalized_name)
        .map_err(|e| e.to_string())?
    {
        println!("  deleted skill {}", entry.name.bold());
        Ok(())
    } else {
        Err(format!("skill not found: {name}"))
    }
}

pub fn list(ctx: &Context) -> Result<(), String> {
    let skills = ctx.skills()?;
    let entries = skills.list(ctx.guild);

    if entries.is_empty() {
        println!("  No skills found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Type", "Level", "Effect"]);
    for entry in &entries {
        table.add_row(vec![&entry.name, &entry.skill_type, &entry.level, &entry.effect]);
    }

    println!("{table}");
    println!();
    println!("  {} skills", entries.len());
    Ok(())
}
