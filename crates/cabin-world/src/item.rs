//! Items and their capabilities.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

const ARTICLES: &[&str] = &["a", "an", "the"];

/// A capability tag on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemTrait {
    /// Can be picked up and carried.
    Carryable,
    /// Can be used on its own.
    Usable,
    /// Can be thrown.
    Throwable,
    /// Can hurt something.
    Weapon,
    /// Burns.
    Flammable,
    /// Can be eaten.
    Edible,
    /// Something is wrong with it.
    Cursed,
}

/// An object in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Display name, also the lookup key (e.g. "circuit breaker").
    pub name: String,
    /// Close-up description.
    pub description: String,
    /// Capability tags.
    pub traits: BTreeSet<ItemTrait>,
    /// Line used when the item is seen lying in a room.
    pub room_description: Option<String>,
}

impl Item {
    /// Create an item without traits.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            traits: BTreeSet::new(),
            room_description: None,
        }
    }

    /// Add capability tags.
    pub fn with_traits(mut self, traits: impl IntoIterator<Item = ItemTrait>) -> Self {
        self.traits.extend(traits);
        self
    }

    /// Set the in-room description.
    pub fn with_room_description(mut self, text: impl Into<String>) -> Self {
        self.room_description = Some(text.into());
        self
    }

    /// Check for a capability tag.
    pub fn has_trait(&self, t: ItemTrait) -> bool {
        self.traits.contains(&t)
    }

    /// Whether the item can be picked up.
    pub fn is_carryable(&self) -> bool {
        self.has_trait(ItemTrait::Carryable)
    }

    /// Whether the item can be used.
    pub fn is_usable(&self) -> bool {
        self.has_trait(ItemTrait::Usable)
    }

    /// Whether the item can be thrown.
    pub fn is_throwable(&self) -> bool {
        self.has_trait(ItemTrait::Throwable)
    }

    /// Case-insensitive match against a player-supplied name, ignoring articles.
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == clean_item_name(name)
    }
}

/// Lowercase an item phrase and drop articles: "The Circuit  Breaker" -> "circuit breaker".
pub fn clean_item_name(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .filter(|w| !ARTICLES.contains(w))
        .collect::<Vec<_>>()
        .join(" ")
}
