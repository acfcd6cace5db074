use td_guild::{ConfigStore, Snowflake};

use super::Context;

/// Check that `user` is a developer.
///
/// With `bootstrap`, the check is skipped while the store accepts a first
/// developer; only `dev-add` passes it.
fn require_developer(
    store: &ConfigStore,
    user: Option<Snowflake>,
    bootstrap: bool,
) -> Result<(), String> {
    if bootstrap && store.accepts_first_developer() {
        return Ok(());
    }
    let user = user.ok_or("admin commands require --user")?;
    if store.is_developer(user) {
        Ok(())
    } else {
        Err(format!("user {user} is not a developer"))
    }
}

pub fn dev_add(ctx: &Context, user: Option<Snowflake>, target: Snowflake) -> Result<(), String> {
    let mut store = ctx.config()?;
    require_developer(&store, user, true)?;

    if store.add_developer(target).map_err(|e| e.to_string())? {
        println!("  user {target} is now a developer");
    } else {
        println!("  user {target} already is a developer");
    }
    Ok(())
}

pub fn dev_remove(ctx: &Context, user: Option<Snowflake>, target: Snowflake) -> Result<(), String> {
    let mut store = ctx.config()?;
    require_developer(&store, user, false)?;

    if store.remove_developer(target).map_err(|e| e.to_string())? {
        println!("  user {target} is no longer a developer");
    } else {
        println!("  user {target} is not a developer");
    }
    Ok(())
}

pub fn dev_list(ctx: &Context, user: Option<Snowflake>) -> Result<(), String> {
    let store = ctx.config()?;
    require_developer(&store, user, false)?;

    for developer in store.developers() {
        println!("  {developer}");
    }
    Ok(())
}
