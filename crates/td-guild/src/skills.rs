//! Per-guild skill glossary.
//!
//! Skills are keyed by their lowercased name, so "Spot Hidden" and
//! "spot hidden" are the same entry and the later one wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Snowflake;
use crate::error::{GuildError, GuildResult};

/// One glossary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    /// Name as it was entered.
    pub name: String,
    /// Lowercased name, the lookup key.
    pub normalized_name: String,
    /// Free-form category, e.g. "combat".
    pub skill_type: String,
    /// Free-form level or rank.
    pub level: String,
    /// What the skill does.
    pub effect: String,
}

/// Glossary of skills for every guild, persisted as pretty JSON.
#[derive(Debug)]
pub struct SkillStore {
    path: PathBuf,
    guilds: BTreeMap<Snowflake, BTreeMap<String, SkillEntry>>,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn required(value: &str, field: &'static str) -> GuildResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(GuildError::MissingField(field));
    }
    Ok(value.to_string())
}

impl SkillStore {
    /// Load the glossary from `path`. A missing file is an empty glossary.
    pub fn open(path: impl Into<PathBuf>) -> GuildResult<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                guilds: BTreeMap::new(),
            });
        }

        let text = fs::read_to_string(&path).map_err(|source| GuildError::Io {
            path: path.clone(),
            source,
        })?;
        let guilds = serde_json::from_str(&text).map_err(|source| GuildError::Json {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, guilds })
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a skill, replacing any entry with the same normalized name.
    pub fn add(
        &mut self,
        guild: Snowflake,
        name: &str,
        skill_type: &str,
        level: &str,
        effect: &str,
    ) -> GuildResult<SkillEntry> {
        let name = required(name, "name")?;
        let entry = SkillEntry {
            normalized_name: normalize(&name),
            name,
            skill_type: required(skill_type, "skill_type")?,
            level: required(level, "level")?,
            effect: required(effect, "effect")?,
        };

        self.guilds
            .entry(guild)
            .or_default()
            .insert(entry.normalized_name.clone(), entry.clone());
        self.save()?;
        Ok(entry)
    }

    /// Best fuzzy match for `query` in `guild`.
    ///
    /// Candidates are entries whose normalized name contains the lowercased
    /// query. An exact match wins, then the smallest difference in length,
    /// then the alphabetically first name.
    pub fn find(&self, guild: Snowflake, query: &str) -> Option<&SkillEntry> {
        let query = normalize(query);
        let query_len = query.chars().count();
        let rank = |entry: &SkillEntry| {
            (
                entry.normalized_name != query,
                entry.normalized_name.chars().count().abs_diff(query_len),
            )
        };

        self.guilds
            .get(&guild)?
            .values()
            .filter(|entry| entry.normalized_name.contains(&query))
            .min_by(|a, b| {
                rank(a)
                    .cmp(&rank(b))
                    .then_with(|| a.normalized_name.cmp(&b.normalized_name))
            })
    }

    /// Like [`find`](Self::find), but a miss is an error.
    pub fn get(&self, guild: Snowflake, query: &str) -> GuildResult<&SkillEntry> {
        self.find(guild, query)
            .ok_or_else(|| GuildError::SkillNotFound(query.to_string()))
    }

    /// Delete the entry with exactly this normalized name. Returns `false` if
    /// there was none.
    pub fn delete(&mut self, guild: Snowflake, normalized_name: &str) -> GuildResult<bool> {
        let key = normalize(normalized_name);
        let removed = self
            .guilds
            .get_mut(&guild)
            .and_then(|skills| skills.remove(&key))
            .is_some();
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    /// All entries of `guild`, sorted by normalized name.
    pub fn list(&self, guild: Snowflake) -> Vec<&SkillEntry> {
        self.guilds
            .get(&guild)
            .map(|skills| skills.values().collect())
            .unwrap_or_default()
    }

    fn save(&self) -> GuildResult<()> {
        let json = serde_json::to_string_pretty(&self.guilds).map_err(|source| GuildError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|source| GuildError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), "skills saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SkillStore {
        SkillStore::open(dir.path().join("skills.json")).unwrap()
    }

    fn seeded(dir: &TempDir) -> SkillStore {
        let mut store = store_in(dir);
        store.add(1, "Fireball", "magic", "3", "burns").unwrap();
        store.add(1, "Fire", "magic", "1", "warms").unwrap();
        store.add(1, "Firewall", "magic", "2", "blocks").unwrap();
        store.add(2, "Spot Hidden", "perception", "60", "notices").unwrap();
        store
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.list(1).is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn exact_match_wins() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir);
        assert_eq!(store.find(1, "FIRE").unwrap().name, "Fire");
    }

    #[test]
    fn closest_length_then_name() {
        let dir = TempDir::new().unwrap();
        let mut store = seeded(&dir);
        assert_eq!(store.find(1, "ire").unwrap().name, "Fire");
        assert_eq!(store.find(1, "firew").unwrap().name, "Firewall");

        store.delete(1, "fire").unwrap();
        // fireball and firewall tie on length
        assert_eq!(store.find(1, "ire").unwrap().name, "Fireball");
    }

    #[test]
    fn lookups_are_scoped_to_guild() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir);
        assert!(store.find(2, "fire").is_none());
        assert_eq!(store.find(2, "spot").unwrap().normalized_name, "spot hidden");
        assert!(matches!(store.get(3, "spot"), Err(GuildError::SkillNotFound(_))));
    }

    #[test]
    fn add_replaces_same_normalized_name() {
        let dir = TempDir::new().unwrap();
        let mut store = seeded(&dir);
        store.add(1, "FIREBALL", "magic", "5", "burns more").unwrap();
        let entry = store.find(1, "fireball").unwrap();
        assert_eq!(entry.name, "FIREBALL");
        assert_eq!(entry.level, "5");
        assert_eq!(store.list(1).len(), 3);
    }

    #[test]
    fn blank_fields_are_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(matches!(
            store.add(1, "Dodge", "  ", "1", "evades"),
            Err(GuildError::MissingField("skill_type"))
        ));
        assert!(matches!(
            store.add(1, "", "x", "1", "y"),
            Err(GuildError::MissingField("name"))
        ));
    }

    #[test]
    fn delete_by_normalized_name() {
        let dir = TempDir::new().unwrap();
        let mut store = seeded(&dir);
        assert!(store.delete(1, "fireball").unwrap());
        assert!(!store.delete(1, "fireball").unwrap());
        assert!(!store.delete(9, "fire").unwrap());
        let names: Vec<&str> = store.list(1).iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Fire", "Firewall"]);
    }

    #[test]
    fn list_is_sorted() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir);
        let keys: Vec<&str> = store
            .list(1)
            .iter()
            .map(|e| e.normalized_name.as_str())
            .collect();
        assert_eq!(keys, vec!["fire", "fireball", "firewall"]);
    }

    #[test]
    fn entries_persist() {
        let dir = TempDir::new().unwrap();
        seeded(&dir);
        let reopened = store_in(&dir);
        assert_eq!(reopened.find(2, "hidden").unwrap().level, "60");
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("skills.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(SkillStore::open(&path), Err(GuildError::Json { .. })));
    }
}
