//! What the interpreter knows about the world when resolving a command.

use std::collections::BTreeMap;

use cabin_world::{FlagValue, GameMap, Player, clean_item_name};
use serde::Serialize;

use crate::intent::ActionKind;

/// A snapshot of the player's surroundings, taken at the start of a turn.
///
/// Name lists are sorted so two snapshots of the same situation compare and
/// hash identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InterpretContext {
    /// Display name of the current room.
    pub room_name: String,
    /// Exit names.
    pub exits: Vec<String>,
    /// Items lying in the room.
    pub room_items: Vec<String>,
    /// Animals that can be seen.
    pub room_wildlife: Vec<String>,
    /// Carried items.
    pub inventory: Vec<String>,
    /// Every world flag.
    pub world_flags: BTreeMap<String, FlagValue>,
    /// Actions the registry can dispatch.
    pub allowed_actions: Vec<ActionKind>,
}

#[derive(Serialize)]
struct CacheKeyParts<'a> {
    room: &'a str,
    exits: &'a [String],
    items: &'a [String],
    inventory: &'a [String],
    flags: &'a BTreeMap<String, FlagValue>,
}

impl InterpretContext {
    /// Snapshot the map and player.
    pub fn capture(
        map: &GameMap,
        player: &Player,
        allowed: impl IntoIterator<Item = ActionKind>,
    ) -> Self {
        let room = map.current_room();
        let mut room_items = room.item_names();
        room_items.sort();
        let mut room_wildlife: Vec<String> =
            room.visible_wildlife().map(|w| w.name.clone()).collect();
        room_wildlife.sort();
        let mut inventory = player.inventory_names();
        inventory.sort();
        let mut allowed_actions: Vec<ActionKind> = allowed.into_iter().collect();
        allowed_actions.sort();
        allowed_actions.dedup();
        Self {
            room_name: room.name.clone(),
            exits: room.exit_directions(),
            room_items,
            room_wildlife,
            inventory,
            world_flags: map.world_state.to_flags(),
            allowed_actions,
        }
    }

    /// Whether an action may be dispatched.
    pub fn allows(&self, action: ActionKind) -> bool {
        self.allowed_actions.contains(&action)
    }

    /// Whether an exit exists here.
    pub fn has_exit(&self, direction: &str) -> bool {
        self.exits.iter().any(|e| e == direction)
    }

    /// Whether an item lies in the room.
    pub fn in_room(&self, item: &str) -> bool {
        contains_item(&self.room_items, item)
    }

    /// Whether an item is carried.
    pub fn owns(&self, item: &str) -> bool {
        contains_item(&self.inventory, item)
    }

    /// Whether an animal is visible here.
    pub fn sees(&self, animal: &str) -> bool {
        let animal = animal.trim();
        self.room_wildlife
            .iter()
            .any(|w| w.eq_ignore_ascii_case(animal))
    }

    /// Cache key: normalized input plus a canonical rendering of room, exits,
    /// items, inventory and flags.
    pub fn cache_key(&self, text: &str) -> String {
        let parts = CacheKeyParts {
            room: &self.room_name,
            exits: &self.exits,
            items: &self.room_items,
            inventory: &self.inventory,
            flags: &self.world_flags,
        };
        let canonical = serde_json::to_string(&parts).unwrap_or_default();
        format!("{}\u{1f}{canonical}", normalize_input(text))
    }
}

/// Lowercase, trim and collapse whitespace.
pub fn normalize_input(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn contains_item(names: &[String], item: &str) -> bool {
    let clean = clean_item_name(item);
    !clean.is_empty() && names.iter().any(|n| n.to_lowercase() == clean)
}
