//! Save slots on disk.
//!
//! Each slot is `<dir>/<slot>.json`. Loading never fails loudly: a missing,
//! unreadable, corrupt or newer-versioned file loads as `None`, and missing
//! fields fall back to defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use cabin_world::FlagValue;
use cabin_world::player::clamp_stat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::quest::QuestSnapshot;
use crate::state::GameState;

/// Format version written by this build.
pub const SAVE_VERSION: u32 = 1;

/// Saved player stats and carried item names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedPlayer {
    /// Health.
    pub health: i32,
    /// Fear.
    pub fear: i32,
    /// Item names in pickup order.
    pub inventory: Vec<String>,
}

impl Default for SavedPlayer {
    fn default() -> Self {
        let player = cabin_world::Player::new();
        Self {
            health: player.health,
            fear: player.fear,
            inventory: Vec::new(),
        }
    }
}

/// Saved position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedMap {
    /// Room the player stands in.
    pub current_room_id: String,
    /// Rooms seen so far.
    pub visited_rooms: Vec<String>,
}

/// Everything needed to resume a game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedGame {
    /// Player.
    pub player: SavedPlayer,
    /// Position.
    pub map: SavedMap,
    /// Every world flag.
    pub world_state: BTreeMap<String, FlagValue>,
    /// Quest progress.
    pub quests: QuestSnapshot,
    /// Ids of cutscenes already played.
    pub cutscenes: Vec<String>,
}

impl SavedGame {
    /// Snapshot a running game.
    pub fn capture(state: &GameState) -> Self {
        Self {
            player: SavedPlayer {
                health: state.player.health,
                fear: state.player.fear,
                inventory: state.player.inventory_names(),
            },
            map: SavedMap {
                current_room_id: state.map.current_room_id().to_string(),
                visited_rooms: state.map.visited_rooms().iter().cloned().collect(),
            },
            world_state: state.map.world_state.to_flags(),
            quests: state.quests.snapshot(),
            cutscenes: state.cutscenes.played().into_iter().collect(),
        }
    }

    /// Apply onto a running or fresh game. Unknown rooms and items are
    /// skipped; carried items the save does not know about are left in the
    /// current room rather than lost.
    pub fn restore(&self, state: &mut GameState) {
        state.player.health = clamp_stat(self.player.health);
        state.player.fear = clamp_stat(self.player.fear);
        let mut carried = std::mem::take(&mut state.player.inventory);
        for name in &self.player.inventory {
            let item = match carried.iter().position(|i| i.matches(name)) {
                Some(pos) => Some(carried.remove(pos)),
                None => state
                    .map
                    .take_from_anywhere(name)
                    .or_else(|| state.map.catalogue_item(name)),
            };
            match item {
                Some(item) => state.player.add_item(item),
                None => warn!(item = %name, "saved item no longer exists"),
            }
        }
        // Picked up after the save: back on the ground where the player stands.
        let room = state.map.current_room_mut();
        for item in carried {
            room.add_item(item);
        }

        if !self.map.current_room_id.is_empty() {
            if let Err(e) = state.map.set_current_room(&self.map.current_room_id) {
                warn!(error = %e, "saved room no longer exists");
            }
        }
        state
            .map
            .set_visited_rooms(self.map.visited_rooms.iter().cloned());
        state.map.world_state = cabin_world::WorldState::from_flags(self.world_state.clone());
        state.quests.restore(&self.quests);
        state.cutscenes.restore_played(&self.cutscenes);
        state.notices.clear();
        state.raised.clear();
    }
}

/// A save file. Missing envelope fields default: version 0, the epoch, an
/// empty slot name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveFile {
    /// Format version.
    pub version: u32,
    /// When it was written.
    pub timestamp: DateTime<Utc>,
    /// Slot name.
    pub slot_name: String,
    /// The game.
    pub game_state: SavedGame,
}

/// Keep only `[A-Za-z0-9_-]`; an empty result becomes the default slot.
pub fn sanitize_slot(slot: &str) -> String {
    let clean: String = slot
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        .collect();
    if clean.is_empty() {
        crate::parser::input::DEFAULT_SLOT.to_string()
    } else {
        clean
    }
}

/// Reads and writes save slots in one directory.
#[derive(Debug, Clone)]
pub struct SaveManager {
    dir: PathBuf,
}

impl SaveManager {
    /// Manage saves under `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Save directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_slot(slot)))
    }

    /// Write a slot, replacing any previous save.
    pub fn save(&self, slot: &str, state: &GameState) -> EngineResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|source| EngineError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let file = SaveFile {
            version: SAVE_VERSION,
            timestamp: Utc::now(),
            slot_name: sanitize_slot(slot),
            game_state: SavedGame::capture(state),
        };
        let path = self.path_for(slot);
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&path, json).map_err(|source| EngineError::Io {
            path: path.clone(),
            source,
        })?;
        info!(slot = %file.slot_name, path = %path.display(), "game saved");
        Ok(path)
    }

    /// Read a slot.
    pub fn load(&self, slot: &str) -> Option<SavedGame> {
        match self.read(slot) {
            Ok(file) => file.map(|f| f.game_state),
            Err(e) => {
                warn!(slot, error = %e, "unreadable save");
                None
            }
        }
    }

    fn read(&self, slot: &str) -> EngineResult<Option<SaveFile>> {
        let path = self.path_for(slot);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path).map_err(|source| EngineError::Io {
            path: path.clone(),
            source,
        })?;
        let file: SaveFile = serde_json::from_str(&text)?;
        if file.version > SAVE_VERSION {
            return Err(EngineError::IncompatibleSave {
                found: file.version,
                supported: SAVE_VERSION,
            });
        }
        Ok(Some(file))
    }

    /// Slot names, sorted.
    pub fn list_saves(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut slots: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        slots.sort();
        slots
    }

    /// Delete a slot. Returns whether a file was removed.
    pub fn delete_save(&self, slot: &str) -> EngineResult<bool> {
        let path = self.path_for(slot);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|source| EngineError::Io { path, source })?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{quiet_cabin, stock};
    use crate::quest::Trigger;

    fn test_state() -> GameState {
        GameState::new(quiet_cabin())
    }

    #[test]
    fn slot_names_are_sanitized() {
        assert_eq!(sanitize_slot("../evil slot!"), "evilslot");
        assert_eq!(sanitize_slot("my-save_2"), "my-save_2");
        assert_eq!(sanitize_slot("///"), "autosave");
    }

    #[test]
    fn save_then_load_restores_progress() {
        let dir = tempfile::tempdir().unwrap();
        let saves = SaveManager::new(dir.path());

        let mut state = test_state();
        state.player.fear = 30;
        let stick = state.map.current_room_mut().remove_item("stick").unwrap();
        state.player.add_item(stick);
        state.map.move_player("north", &state.player.clone());
        state.map.world_state.has_power = true;
        state.quests.trigger(&Trigger::location("konttori"));
        state.cutscenes.check("cabin_clearing", "cabin_main");
        saves.save("slot1", &state).unwrap();

        let mut fresh = test_state();
        saves.load("slot1").unwrap().restore(&mut fresh);
        assert_eq!(fresh.player.fear, 30);
        assert_eq!(fresh.player.inventory_names(), vec!["stick"]);
        assert!(fresh.map.room("wilderness_start").is_some_and(|r| !r.has_item("stick")));
        assert_eq!(fresh.map.current_room_id(), "cabin_clearing");
        assert!(fresh.map.world_state.has_power);
        assert!(fresh.quests.active().is_some());
        assert_eq!(fresh.cutscenes.check("cabin_clearing", "cabin_main"), None);
    }

    #[test]
    fn missing_and_corrupt_saves_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let saves = SaveManager::new(dir.path());
        assert!(saves.load("nothing").is_none());

        fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        assert!(saves.load("broken").is_none());
    }

    #[test]
    fn newer_versions_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let saves = SaveManager::new(dir.path());
        let future = serde_json::json!({
            "version": SAVE_VERSION + 1,
            "timestamp": "2030-01-01T00:00:00Z",
            "slot_name": "future",
            "game_state": {}
        });
        fs::write(dir.path().join("future.json"), future.to_string()).unwrap();
        assert!(saves.load("future").is_none());
    }

    #[test]
    fn missing_fields_default() {
        let dir = tempfile::tempdir().unwrap();
        let saves = SaveManager::new(dir.path());
        let sparse = serde_json::json!({
            "version": 1,
            "timestamp": "2030-01-01T00:00:00Z",
            "slot_name": "sparse",
            "game_state": {"player": {"fear": 12}}
        });
        fs::write(dir.path().join("sparse.json"), sparse.to_string()).unwrap();
        let game = saves.load("sparse").unwrap();
        assert_eq!(game.player.fear, 12);
        assert_eq!(game.player.health, 100);

        let mut state = test_state();
        game.restore(&mut state);
        assert_eq!(state.map.current_room_id(), "wilderness_start");
    }

    #[test]
    fn sparse_envelope_loads() {
        let dir = tempfile::tempdir().unwrap();
        let saves = SaveManager::new(dir.path());
        let bare = serde_json::json!({"version": 1, "game_state": {"player": {"fear": 12}}});
        fs::write(dir.path().join("bare.json"), bare.to_string()).unwrap();
        assert_eq!(saves.load("bare").unwrap().player.fear, 12);

        fs::write(dir.path().join("empty.json"), "{}").unwrap();
        assert_eq!(saves.load("empty").unwrap(), SavedGame::default());
    }

    #[test]
    fn items_taken_after_saving_stay_in_the_world() {
        let mut state = test_state();
        let game = SavedGame::capture(&state);

        let stick = state.map.current_room_mut().remove_item("stick").unwrap();
        state.player.add_item(stick);
        state.map.move_player("north", &state.player.clone());

        game.restore(&mut state);
        assert!(!state.player.has_item("stick"));
        assert_eq!(state.map.current_room_id(), "wilderness_start");
        assert!(state.map.room("cabin_clearing").is_some_and(|r| r.has_item("stick")));
    }

    #[test]
    fn carried_items_in_the_save_are_kept() {
        let mut state = test_state();
        let stick = state.map.current_room_mut().remove_item("stick").unwrap();
        state.player.add_item(stick);
        let game = SavedGame::capture(&state);

        game.restore(&mut state);
        assert_eq!(state.player.inventory_names(), vec!["stick"]);
        assert!(state.map.rooms().iter().all(|r| !r.has_item("stick")));
    }

    #[test]
    fn list_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let saves = SaveManager::new(dir.path().join("nested"));
        assert!(saves.list_saves().is_empty());

        let state = test_state();
        saves.save("beta", &state).unwrap();
        saves.save("alpha", &state).unwrap();
        assert_eq!(saves.list_saves(), vec!["alpha", "beta"]);

        assert!(saves.delete_save("alpha").unwrap());
        assert!(!saves.delete_save("alpha").unwrap());
        assert_eq!(saves.list_saves(), vec!["beta"]);
    }

    #[test]
    fn catalogue_supplies_items_not_on_the_map() {
        let mut state = test_state();
        let knife = stock(&state.map, "knife");
        let game = SavedGame {
            player: SavedPlayer {
                inventory: vec![knife.name.clone(), "unicorn".into()],
                ..SavedPlayer::default()
            },
            ..SavedGame::default()
        };
        game.restore(&mut state);
        assert_eq!(state.player.inventory_names(), vec![knife.name]);
    }
}
