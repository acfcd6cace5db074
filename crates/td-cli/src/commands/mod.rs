pub mod admin;
pub mod coc;
pub mod crit;
pub mod log;
pub mod roll;
pub mod rules;
pub mod skill;

use std::path::PathBuf;

use td_dice::Dice;
use td_guild::{ConfigStore, SkillStore, Snowflake};

/// Options shared by every command.
pub struct Context {
    pub config_path: PathBuf,
    pub skills_path: PathBuf,
    pub guild: Snowflake,
    pub seed: Option<u64>,
}

impl Context {
    /// Open the configuration store.
    pub fn config(&self) -> Result<ConfigStore, String> {
        ConfigStore::open(&self.config_path).map_err(|e| e.to_string())
    }

    /// Open the skill glossary.
    pub fn skills(&self) -> Result<SkillStore, String> {
        SkillStore::open(&self.skills_path).map_err(|e| e.to_string())
    }

    /// A fresh dice source, seeded if `--seed` was given.
    pub fn dice(&self) -> Dice {
        match self.seed {
            Some(seed) => Dice::from_seed(seed),
            None => Dice::from_entropy(),
        }
    }
}
