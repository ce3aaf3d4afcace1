//! The room graph and player position.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{WorldError, WorldResult};
use crate::item::Item;
use crate::player::Player;
use crate::room::Room;
use crate::world_state::WorldState;

const NO_EXIT: &str = "You turn that way and stop. Just trees and dark.";

/// Result of [`GameMap::move_player`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player changed rooms.
    Moved {
        /// Room left.
        from: String,
        /// Room entered.
        to: String,
    },
    /// The player stayed put.
    Blocked(String),
}

impl MoveOutcome {
    /// Whether the player changed rooms.
    pub fn moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// The world the player walks around in.
#[derive(Debug, Clone)]
pub struct GameMap {
    rooms: Vec<Room>,
    current: usize,
    visited: BTreeSet<String>,
    /// Shared environment flags.
    pub world_state: WorldState,
    catalogue: BTreeMap<String, Item>,
    layout: Vec<String>,
    structures: BTreeSet<String>,
}

impl GameMap {
    /// Build a map starting in `start`. Every exit must lead to a known room.
    pub fn new(rooms: Vec<Room>, start: &str) -> WorldResult<Self> {
        let ids: BTreeSet<&str> = rooms.iter().map(|r| r.id.as_str()).collect();
        for room in &rooms {
            for (direction, target) in &room.exits {
                if !ids.contains(target.as_str()) {
                    return Err(WorldError::DanglingExit {
                        room: room.id.clone(),
                        direction: direction.clone(),
                        target: target.clone(),
                    });
                }
            }
        }
        let current = rooms
            .iter()
            .position(|r| r.id == start)
            .ok_or_else(|| WorldError::RoomNotFound(start.to_string()))?;
        let layout = rooms.iter().map(|r| r.id.clone()).collect();
        Ok(Self {
            rooms,
            current,
            visited: BTreeSet::from([start.to_string()]),
            world_state: WorldState::new(),
            catalogue: BTreeMap::new(),
            layout,
            structures: BTreeSet::new(),
        })
    }

    /// Register every item that exists in this world, keyed by name.
    pub fn with_catalogue(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.catalogue
            .extend(items.into_iter().map(|i| (i.name.clone(), i)));
        self
    }

    /// Set the order rooms appear on the map screen, and which of them are
    /// built structures (joined by a double line when adjacent).
    pub fn with_layout(
        mut self,
        layout: impl IntoIterator<Item = impl Into<String>>,
        structures: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.layout = layout.into_iter().map(Into::into).collect();
        self.structures = structures.into_iter().map(Into::into).collect();
        self
    }

    /// The room the player stands in.
    pub fn current_room(&self) -> &Room {
        &self.rooms[self.current]
    }

    /// The room the player stands in, mutably.
    pub fn current_room_mut(&mut self) -> &mut Room {
        &mut self.rooms[self.current]
    }

    /// ID of the room the player stands in.
    pub fn current_room_id(&self) -> &str {
        &self.rooms[self.current].id
    }

    /// Look up a room.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Look up a room mutably.
    pub fn room_mut(&mut self, id: &str) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    /// All rooms.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// All rooms, mutably.
    pub fn rooms_mut(&mut self) -> &mut [Room] {
        &mut self.rooms
    }

    /// Follow an exit. Checks the target room's entry gates in order and
    /// returns the first denial.
    pub fn move_player(&mut self, direction: &str, player: &Player) -> MoveOutcome {
        let Some(target) = self.current_room().exit(direction) else {
            return MoveOutcome::Blocked(NO_EXIT.to_string());
        };
        let Some(idx) = self.rooms.iter().position(|r| r.id == target) else {
            return MoveOutcome::Blocked(NO_EXIT.to_string());
        };
        let gate = self.rooms[idx]
            .entry_requirements
            .iter()
            .find(|req| !req.is_met(player, &self.world_state));
        if let Some(req) = gate {
            return MoveOutcome::Blocked(req.denial_text());
        }

        let from = self.current_room_id().to_string();
        self.current = idx;
        let to = self.current_room_id().to_string();
        self.visited.insert(to.clone());
        MoveOutcome::Moved { from, to }
    }

    /// Place the player in a room without following an exit.
    pub fn set_current_room(&mut self, id: &str) -> WorldResult<()> {
        let idx = self
            .rooms
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| WorldError::RoomNotFound(id.to_string()))?;
        self.current = idx;
        self.visited.insert(id.to_string());
        Ok(())
    }

    /// Rooms the player has stood in.
    pub fn visited_rooms(&self) -> &BTreeSet<String> {
        &self.visited
    }

    /// Replace the visited set. Unknown IDs are dropped; the current room is
    /// always visited.
    pub fn set_visited_rooms(&mut self, ids: impl IntoIterator<Item = String>) {
        let known: BTreeSet<String> = ids
            .into_iter()
            .filter(|id| self.room(id).is_some())
            .collect();
        self.visited = known;
        self.visited.insert(self.current_room_id().to_string());
    }

    /// Every item that exists in this world.
    pub fn known_items(&self) -> &BTreeMap<String, Item> {
        &self.catalogue
    }

    /// A fresh copy of a catalogued item.
    pub fn catalogue_item(&self, name: &str) -> Option<Item> {
        self.catalogue.values().find(|i| i.matches(name)).cloned()
    }

    /// Remove an item from whichever room holds it.
    pub fn take_from_anywhere(&mut self, name: &str) -> Option<Item> {
        self.rooms.iter_mut().find_map(|r| r.remove_item(name))
    }

    /// Text map of visited rooms in layout order.
    pub fn display_map(&self) -> String {
        let mut lines = Vec::new();
        for (i, id) in self.layout.iter().enumerate() {
            if !self.visited.contains(id) {
                continue;
            }
            let Some(room) = self.room(id) else {
                continue;
            };
            lines.push(room.name.clone());
            let next = self.layout.get(i + 1).filter(|n| self.visited.contains(*n));
            if let Some(next) = next {
                if self.structures.contains(id) && self.structures.contains(next) {
                    lines.push("||".to_string());
                } else {
                    lines.push(" |".to_string());
                }
            }
        }
        lines.join("\n")
    }
}
