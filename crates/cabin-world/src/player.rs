//! The player entity.

use serde::{Deserialize, Serialize};

use crate::item::{Item, clean_item_name};

/// Upper bound for health and fear.
pub const MAX_STAT: i32 = 100;

/// Clamp a health or fear value into `[0, MAX_STAT]`.
///
/// The player never clamps itself; every mutator calls this.
pub fn clamp_stat(value: i32) -> i32 {
    value.clamp(0, MAX_STAT)
}

/// The player: two stats and a bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// 0 means dead.
    pub health: i32,
    /// 100 means overwhelmed.
    pub fear: i32,
    /// Carried items in pickup order.
    pub inventory: Vec<Item>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            health: MAX_STAT,
            fear: 0,
            inventory: Vec::new(),
        }
    }
}

impl Player {
    /// A healthy, calm player with an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an item in the bag.
    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    /// Take an item out of the bag by name.
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        let clean = clean_item_name(name);
        let pos = self
            .inventory
            .iter()
            .position(|i| i.name.to_lowercase() == clean)?;
        Some(self.inventory.remove(pos))
    }

    /// Look up a carried item by name.
    pub fn get_item(&self, name: &str) -> Option<&Item> {
        self.inventory.iter().find(|i| i.matches(name))
    }

    /// Check whether an item is carried.
    pub fn has_item(&self, name: &str) -> bool {
        self.get_item(name).is_some()
    }

    /// Names of carried items in pickup order.
    pub fn inventory_names(&self) -> Vec<String> {
        self.inventory.iter().map(|i| i.name.clone()).collect()
    }

    /// Health has run out.
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Fear has maxed out.
    pub fn is_overwhelmed(&self) -> bool {
        self.fear >= MAX_STAT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rope() -> Item {
        Item::new("rope", "Sturdy.")
    }

    #[test]
    fn new_player_defaults() {
        let p = Player::new();
        assert_eq!(p.health, 100);
        assert_eq!(p.fear, 0);
        assert!(p.inventory.is_empty());
    }

    #[test]
    fn inventory_by_name() {
        let mut p = Player::new();
        p.add_item(rope());
        assert!(p.has_item("the rope"));
        assert_eq!(p.inventory_names(), vec!["rope"]);
        assert_eq!(p.remove_item("Rope").map(|i| i.name), Some("rope".into()));
        assert!(p.remove_item("rope").is_none());
    }

    #[test]
    fn clamp_stat_bounds() {
        assert_eq!(clamp_stat(-5), 0);
        assert_eq!(clamp_stat(250), 100);
        assert_eq!(clamp_stat(42), 42);
    }

    #[test]
    fn terminal_conditions() {
        let mut p = Player::new();
        p.health = 0;
        assert!(p.is_dead());
        p.fear = 100;
        assert!(p.is_overwhelmed());
    }
}
