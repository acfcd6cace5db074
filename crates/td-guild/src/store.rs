//! The configuration cache backed by a JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Snowflake;
use crate::config::{GlobalConfig, GuildConfig};
use crate::error::{GuildError, GuildResult};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    global: GlobalConfig,
    guilds: BTreeMap<Snowflake, GuildConfig>,
}

/// In-memory guild and global configuration, written back on every change.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    file: ConfigFile,
    read_only: bool,
}

impl ConfigStore {
    /// Load the store from `path`.
    ///
    /// A missing file is created with defaults. A file that is not valid
    /// configuration JSON is logged and served as defaults, but the store is
    /// read-only: every change fails with [`GuildError::ReadOnly`] and the
    /// file is left as it is.
    pub fn open(path: impl Into<PathBuf>) -> GuildResult<Self> {
        let path = path.into();

        if !path.exists() {
            let store = Self {
                path,
                file: ConfigFile::default(),
                read_only: false,
            };
            store.save()?;
            return Ok(store);
        }

        let text = fs::read_to_string(&path).map_err(|source| GuildError::Io {
            path: path.clone(),
            source,
        })?;
        let (file, read_only) = match serde_json::from_str(&text) {
            Ok(file) => (file, false),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "unreadable config, using defaults without saving"
                );
                (ConfigFile::default(), true)
            }
        };
        Ok(Self {
            path,
            file,
            read_only,
        })
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configuration of `guild`, or the defaults if it has none yet.
    pub fn guild(&self, guild: Snowflake) -> GuildConfig {
        self.file.guilds.get(&guild).cloned().unwrap_or_default()
    }

    /// Replace the configuration of `guild` and save.
    pub fn set_guild(&mut self, guild: Snowflake, config: GuildConfig) -> GuildResult<()> {
        self.file.guilds.insert(guild, config);
        self.save()
    }

    /// Apply `change` to the configuration of `guild`, save, and return the result.
    pub fn update_guild(
        &mut self,
        guild: Snowflake,
        change: impl FnOnce(&mut GuildConfig),
    ) -> GuildResult<GuildConfig> {
        let mut config = self.guild(guild);
        change(&mut config);
        self.set_guild(guild, config.clone())?;
        Ok(config)
    }

    /// Process-wide settings.
    pub fn global(&self) -> &GlobalConfig {
        &self.file.global
    }

    /// Users allowed to run admin commands, in the order they were added.
    pub fn developers(&self) -> &[Snowflake] {
        &self.file.global.developers
    }

    /// Whether the file could not be loaded and changes are refused.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Whether the first developer may be added without an existing one
    /// vouching for them: the list is empty and was actually loaded.
    pub fn accepts_first_developer(&self) -> bool {
        self.file.global.developers.is_empty() && !self.read_only
    }

    /// Whether `user` is a developer.
    pub fn is_developer(&self, user: Snowflake) -> bool {
        self.file.global.developers.contains(&user)
    }

    /// Add a developer. Returns `false` if `user` already was one.
    pub fn add_developer(&mut self, user: Snowflake) -> GuildResult<bool> {
        if self.is_developer(user) {
            return Ok(false);
        }
        self.file.global.developers.push(user);
        self.save()?;
        Ok(true)
    }

    /// Remove a developer. Returns `false` if `user` was not one.
    ///
    /// The last developer cannot be removed.
    pub fn remove_developer(&mut self, user: Snowflake) -> GuildResult<bool> {
        if !self.is_developer(user) {
            return Ok(false);
        }
        if self.file.global.developers.len() == 1 {
            return Err(GuildError::LastDeveloper);
        }
        self.file.global.developers.retain(|&d| d != user);
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> GuildResult<()> {
        if self.read_only {
            return Err(GuildError::ReadOnly(self.path.clone()));
        }
        let json = serde_json::to_string_pretty(&self.file).map_err(|source| GuildError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|source| GuildError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }
}
