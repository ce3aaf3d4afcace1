//! Rooms and their contents.

use std::collections::BTreeMap;

use crate::item::Item;
use crate::requirement::Requirement;
use crate::wildlife::Wildlife;

/// A place the player can stand in.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    /// Stable identifier (e.g. "cabin_main").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Base description shown on entry.
    pub description: String,
    /// Exit name to target room ID.
    pub exits: BTreeMap<String, String>,
    /// Gates checked when entering this room.
    pub entry_requirements: Vec<Requirement>,
    /// Items lying here.
    pub items: Vec<Item>,
    /// Animals present.
    pub wildlife: Vec<Wildlife>,
    /// How many animals can be placed here at world creation.
    pub max_wildlife: usize,
}

impl Room {
    /// Create an empty room.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            exits: BTreeMap::new(),
            entry_requirements: Vec::new(),
            items: Vec::new(),
            wildlife: Vec::new(),
            max_wildlife: 0,
        }
    }

    /// Add an exit.
    pub fn with_exit(mut self, direction: impl Into<String>, target: impl Into<String>) -> Self {
        self.exits.insert(direction.into(), target.into());
        self
    }

    /// Add an item.
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Add an animal.
    pub fn with_wildlife(mut self, animal: Wildlife) -> Self {
        self.wildlife.push(animal);
        self
    }

    /// Add an entry gate.
    pub fn with_requirement(mut self, req: Requirement) -> Self {
        self.entry_requirements.push(req);
        self
    }

    /// Allow random wildlife placement.
    pub fn with_max_wildlife(mut self, max: usize) -> Self {
        self.max_wildlife = max;
        self
    }

    /// Exit names in sorted order.
    pub fn exit_directions(&self) -> Vec<String> {
        self.exits.keys().cloned().collect()
    }

    /// Target room of an exit.
    pub fn exit(&self, direction: &str) -> Option<&str> {
        self.exits.get(direction).map(String::as_str)
    }

    /// Check for an item by name.
    pub fn has_item(&self, name: &str) -> bool {
        self.get_item(name).is_some()
    }

    /// Look up an item by name.
    pub fn get_item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.matches(name))
    }

    /// Take an item out of the room.
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        let pos = self.items.iter().position(|i| i.matches(name))?;
        Some(self.items.remove(pos))
    }

    /// Put an item in the room.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Names of items lying here.
    pub fn item_names(&self) -> Vec<String> {
        self.items.iter().map(|i| i.name.clone()).collect()
    }

    /// Check for an animal by name.
    pub fn has_wildlife(&self, name: &str) -> bool {
        self.get_wildlife(name).is_some()
    }

    /// Look up an animal by name.
    pub fn get_wildlife(&self, name: &str) -> Option<&Wildlife> {
        self.wildlife.iter().find(|w| w.matches(name))
    }

    /// Look up an animal by name for provocation.
    pub fn get_wildlife_mut(&mut self, name: &str) -> Option<&mut Wildlife> {
        self.wildlife.iter_mut().find(|w| w.matches(name))
    }

    /// Remove an animal.
    pub fn remove_wildlife(&mut self, name: &str) -> Option<Wildlife> {
        let pos = self.wildlife.iter().position(|w| w.matches(name))?;
        Some(self.wildlife.remove(pos))
    }

    /// Names of animals present.
    pub fn wildlife_names(&self) -> Vec<String> {
        self.wildlife.iter().map(|w| w.name.clone()).collect()
    }

    /// Animals that can be seen.
    pub fn visible_wildlife(&self) -> impl Iterator<Item = &Wildlife> {
        self.wildlife.iter().filter(|w| w.is_visible())
    }

    /// Animals that can be heard.
    pub fn audible_wildlife(&self) -> impl Iterator<Item = &Wildlife> {
        self.wildlife.iter().filter(|w| w.is_audible())
    }
}
