//! Player profiles and their persistence.
//!
//! Profiles are keyed by name and never deleted. Scores, unlocked cards and
//! achievements only grow. Storage problems are logged and swallowed: the
//! in-memory state stays authoritative for the rest of the run.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::scoring::{level_for_score, level_title};
use crate::storage::{Storage, CURRENT_PLAYER_KEY, PLAYERS_KEY};
use crate::types::{Achievement, CardId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("player name must not be empty")]
    EmptyName,
    #[error("no player named `{0}`")]
    UnknownPlayer(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub name: String,
    pub total_score: u64,
    pub unlocked_cards: BTreeSet<CardId>,
    /// Raw ids so that ids written by a newer build survive a round trip.
    pub achievements: BTreeSet<String>,
}

impl PlayerProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_score: 0,
            unlocked_cards: BTreeSet::new(),
            achievements: BTreeSet::new(),
        }
    }

    pub fn level(&self) -> u32 {
        level_for_score(self.total_score)
    }

    pub fn level_title(&self) -> &'static str {
        level_title(self.level())
    }

    pub fn has_card(&self, card: &CardId) -> bool {
        self.unlocked_cards.contains(card)
    }

    pub fn has_achievement(&self, achievement: Achievement) -> bool {
        self.achievements.contains(achievement.id())
    }

    fn from_stored(name: &str, stored: StoredProfile) -> Self {
        Self {
            name: name.to_string(),
            total_score: stored.total_score,
            unlocked_cards: stored.unlocked_cards.into_iter().collect(),
            achievements: stored.achievements.into_iter().collect(),
        }
    }

    fn to_stored(&self) -> StoredProfile {
        StoredProfile {
            total_score: self.total_score,
            unlocked_cards: self.unlocked_cards.iter().cloned().collect(),
            achievements: self.achievements.iter().cloned().collect(),
        }
    }
}

/// On-disk shape of one entry of the `players` record.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProfile {
    #[serde(default)]
    total_score: u64,
    #[serde(default)]
    unlocked_cards: Vec<CardId>,
    #[serde(default)]
    achievements: Vec<String>,
}

/// Read-only view of every profile, for the leaderboard.
#[derive(Debug, Clone, Copy)]
pub struct Roster<'a> {
    players: &'a BTreeMap<String, PlayerProfile>,
    current: Option<&'a str>,
}

impl<'a> Roster<'a> {
    /// Profiles in name order.
    pub fn profiles(&self) -> impl Iterator<Item = &'a PlayerProfile> + 'a {
        self.players.values()
    }

    pub fn current(&self) -> Option<&'a str> {
        self.current
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

pub struct ProfileStore<S> {
    storage: S,
    players: BTreeMap<String, PlayerProfile>,
    current: Option<String>,
}

impl<S: Storage> ProfileStore<S> {
    /// Empty store over `storage`; call [`ProfileStore::load`] to restore state.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            players: BTreeMap::new(),
            current: None,
        }
    }

    /// Restore profiles and the current player from storage.
    ///
    /// A stored current name without a matching profile is dropped.
    pub fn load(&mut self) {
        self.players = self.read_players();
        self.current = match self.storage.read(CURRENT_PLAYER_KEY) {
            Ok(Some(name)) if self.players.contains_key(&name) => Some(name),
            Ok(Some(name)) => {
                tracing::warn!(%name, "stored current player has no profile");
                None
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(%err, "failed to read current player");
                None
            }
        };
        tracing::debug!(
            players = self.players.len(),
            current = self.current.as_deref().unwrap_or(""),
            "profiles loaded"
        );
    }

    fn read_players(&self) -> BTreeMap<String, PlayerProfile> {
        let raw = match self.storage.read(PLAYERS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return BTreeMap::new(),
            Err(err) => {
                tracing::warn!(%err, "failed to read profiles");
                return BTreeMap::new();
            }
        };
        let entries: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(serde_json::Value::Object(map)) => map,
            Ok(_) => {
                tracing::warn!("stored profiles are not an object; starting fresh");
                return BTreeMap::new();
            }
            Err(err) => {
                tracing::warn!(%err, "stored profiles are corrupt; starting fresh");
                return BTreeMap::new();
            }
        };

        let mut players = BTreeMap::new();
        for (name, value) in entries {
            match serde_json::from_value::<StoredProfile>(value) {
                Ok(stored) => {
                    players.insert(name.clone(), PlayerProfile::from_stored(&name, stored));
                }
                Err(err) => tracing::warn!(%name, %err, "skipping malformed profile"),
            }
        }
        players
    }

    /// Log in as `name`, creating a zeroed profile on first use.
    pub fn register(&mut self, name: &str) -> Result<&PlayerProfile, ProfileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if !self.players.contains_key(name) {
            tracing::info!(name, "new player");
            self.players.insert(name.to_string(), PlayerProfile::new(name));
        } else {
            tracing::info!(name, "returning player");
        }
        self.current = Some(name.to_string());
        self.save();
        self.players
            .get(name)
            .ok_or_else(|| ProfileError::UnknownPlayer(name.to_string()))
    }

    /// Switch to an existing profile.
    pub fn set_current(&mut self, name: &str) -> Result<&PlayerProfile, ProfileError> {
        if !self.players.contains_key(name) {
            return Err(ProfileError::UnknownPlayer(name.to_string()));
        }
        self.current = Some(name.to_string());
        self.write(CURRENT_PLAYER_KEY, name);
        self.players
            .get(name)
            .ok_or_else(|| ProfileError::UnknownPlayer(name.to_string()))
    }

    pub fn current(&self) -> Option<&PlayerProfile> {
        self.current.as_ref().and_then(|n| self.players.get(n))
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    fn current_mut(&mut self) -> Option<&mut PlayerProfile> {
        let name = self.current.as_ref()?;
        self.players.get_mut(name)
    }

    pub fn get(&self, name: &str) -> Option<&PlayerProfile> {
        self.players.get(name)
    }

    /// Persist every profile and the current pointer.
    ///
    /// Returns false when there is no current player or a write failed.
    pub fn save(&mut self) -> bool {
        let Some(name) = self.current.clone() else {
            return false;
        };
        let snapshot: BTreeMap<&str, StoredProfile> = self
            .players
            .iter()
            .map(|(n, p)| (n.as_str(), p.to_stored()))
            .collect();
        let json = match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(%err, "failed to encode profiles");
                return false;
            }
        };
        let players_ok = self.write(PLAYERS_KEY, &json);
        let current_ok = self.write(CURRENT_PLAYER_KEY, &name);
        players_ok && current_ok
    }

    fn write(&mut self, key: &str, value: &str) -> bool {
        match self.storage.write(key, value) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(key, %err, "storage write failed");
                false
            }
        }
    }

    /// Add to the current player's score. Returns the new total.
    pub fn add_score(&mut self, amount: u32) -> Option<u64> {
        let profile = self.current_mut()?;
        profile.total_score = profile.total_score.saturating_add(u64::from(amount));
        Some(profile.total_score)
    }

    /// Add cards to the current player's collection.
    ///
    /// Returns the ids that were new, in input order and without repeats.
    pub fn unlock<I>(&mut self, cards: I) -> Vec<CardId>
    where
        I: IntoIterator<Item = CardId>,
    {
        let Some(profile) = self.current_mut() else {
            return Vec::new();
        };
        let mut added = Vec::new();
        for card in cards {
            if profile.unlocked_cards.insert(card.clone()) {
                added.push(card);
            }
        }
        if !added.is_empty() {
            self.save();
        }
        added
    }

    /// Idempotent. Returns whether the achievement is new.
    pub fn grant_achievement(&mut self, achievement: Achievement) -> bool {
        match self.current_mut() {
            Some(profile) => profile.achievements.insert(achievement.id().to_string()),
            None => false,
        }
    }

    pub fn roster(&self) -> Roster<'_> {
        Roster {
            players: &self.players,
            current: self.current.as_deref(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> ProfileStore<MemoryStorage> {
        ProfileStore::new(MemoryStorage::new())
    }

    fn ids(raw: &[&str]) -> Vec<CardId> {
        raw.iter().map(|s| CardId::from(*s)).collect()
    }

    #[test]
    fn register_trims_and_persists() {
        let mut s = store();
        let p = s.register("  Ana ").unwrap();
        assert_eq!(p.name, "Ana");
        assert_eq!(p.total_score, 0);
        assert_eq!(s.current_name(), Some("Ana"));
        assert_eq!(s.storage().get(CURRENT_PLAYER_KEY), Some("Ana"));
        assert!(s.storage().get(PLAYERS_KEY).unwrap().contains("\"Ana\""));
    }

    #[test]
    fn register_empty_changes_nothing() {
        let mut s = store();
        s.register("Ana").unwrap();
        assert_eq!(s.register(""), Err(ProfileError::EmptyName));
        assert_eq!(s.register("   "), Err(ProfileError::EmptyName));
        assert_eq!(s.current_name(), Some("Ana"));
        assert_eq!(s.roster().len(), 1);
    }

    #[test]
    fn register_existing_keeps_progress() {
        let mut s = store();
        s.register("Ana").unwrap();
        s.add_score(700);
        s.register("Ben").unwrap();
        let p = s.register("Ana").unwrap();
        assert_eq!(p.total_score, 700);
        assert_eq!(p.level(), 2);
        assert_eq!(s.roster().len(), 2);
    }

    #[test]
    fn set_current_requires_profile() {
        let mut s = store();
        s.register("Ana").unwrap();
        assert_eq!(
            s.set_current("Zed").map(|p| p.name.clone()),
            Err(ProfileError::UnknownPlayer("Zed".into()))
        );
        s.register("Ben").unwrap();
        assert!(s.set_current("Ana").is_ok());
        assert_eq!(s.current_name(), Some("Ana"));
        assert_eq!(s.storage().get(CURRENT_PLAYER_KEY), Some("Ana"));
    }

    #[test]
    fn save_without_player_is_noop() {
        let mut s = store();
        assert!(!s.save());
        assert!(s.storage().is_empty());
        assert_eq!(s.add_score(10), None);
        assert!(s.unlock(ids(&["heart"])).is_empty());
        assert!(!s.grant_achievement(Achievement::FirstMatch));
    }

    #[test]
    fn unlock_returns_new_ids_in_order() {
        let mut s = store();
        s.register("Ana").unwrap();
        assert_eq!(s.unlock(ids(&["lungs", "heart", "lungs"])), ids(&["lungs", "heart"]));
        assert_eq!(s.unlock(ids(&["heart", "brain"])), ids(&["brain"]));
        assert!(s.unlock(ids(&["brain"])).is_empty());
        assert_eq!(s.current().unwrap().unlocked_cards.len(), 3);
    }

    #[test]
    fn achievements_are_idempotent() {
        let mut s = store();
        s.register("Ana").unwrap();
        assert!(s.grant_achievement(Achievement::PerfectMatch));
        assert!(!s.grant_achievement(Achievement::PerfectMatch));
        assert!(s.current().unwrap().has_achievement(Achievement::PerfectMatch));
    }

    #[test]
    fn load_round_trip() {
        let mut s = store();
        s.register("Ana").unwrap();
        s.add_score(1200);
        s.unlock(ids(&["heart"]));
        s.grant_achievement(Achievement::FirstMatch);
        s.save();

        let mut restored = ProfileStore::new(s.storage().clone());
        restored.load();
        let p = restored.current().unwrap();
        assert_eq!(p.name, "Ana");
        assert_eq!(p.total_score, 1200);
        assert!(p.has_card(&CardId::from("heart")));
        assert!(p.has_achievement(Achievement::FirstMatch));
    }

    #[test]
    fn load_uses_camel_case_keys() {
        let raw = r#"{"Ana":{"totalScore":42,"unlockedCards":["heart","heart"],"achievements":["first_match","future_badge"]}}"#;
        let storage = MemoryStorage::new()
            .with_entry(PLAYERS_KEY, raw)
            .with_entry(CURRENT_PLAYER_KEY, "Ana");
        let mut s = ProfileStore::new(storage);
        s.load();
        let p = s.current().unwrap();
        assert_eq!(p.total_score, 42);
        assert_eq!(p.unlocked_cards.len(), 1);
        assert!(p.achievements.contains("future_badge"));
    }

    #[test]
    fn load_tolerates_bad_data() {
        let storage = MemoryStorage::new()
            .with_entry(PLAYERS_KEY, "{not json")
            .with_entry(CURRENT_PLAYER_KEY, "Ana");
        let mut s = ProfileStore::new(storage);
        s.load();
        assert!(s.current().is_none());
        assert!(s.roster().is_empty());

        let raw = r#"{"Ana":{"totalScore":"lots"},"Ben":{"totalScore":5}}"#;
        let mut s = ProfileStore::new(MemoryStorage::new().with_entry(PLAYERS_KEY, raw));
        s.load();
        assert!(s.get("Ana").is_none());
        assert_eq!(s.get("Ben").unwrap().total_score, 5);

        let mut s = ProfileStore::new(MemoryStorage::new().with_entry(PLAYERS_KEY, "[1,2]"));
        s.load();
        assert!(s.roster().is_empty());
    }

    #[test]
    fn offline_storage_keeps_memory_state() {
        let mut s = ProfileStore::new(MemoryStorage::offline());
        s.load();
        s.register("Ana").unwrap();
        assert_eq!(s.add_score(30), Some(30));
        assert!(!s.save());
        assert_eq!(s.current().unwrap().total_score, 30);
    }
}
