//! Applying intent side effects to the player and the current room.

use std::collections::BTreeMap;

use cabin_world::player::clamp_stat;
use cabin_world::{Item, Player, Room};

use crate::intent::Effects;

/// Largest stat change a single intent may apply.
pub const MAX_EFFECT_DELTA: i32 = 2;

/// Apply an intent's effects.
///
/// Deltas are clamped again here; the caller is not trusted. Items are only
/// added when they lie in `room` right now, appear in `known_items` and are
/// carryable. Removing an item the player does not have is a no-op.
pub fn apply_effects(
    player: &mut Player,
    room: &mut Room,
    effects: &Effects,
    known_items: &BTreeMap<String, Item>,
) {
    adjust_stats(
        player,
        effects.health.clamp(-MAX_EFFECT_DELTA, MAX_EFFECT_DELTA),
        effects.fear.clamp(-MAX_EFFECT_DELTA, MAX_EFFECT_DELTA),
    );

    for name in &effects.inventory_remove {
        player.remove_item(name);
    }

    for name in &effects.inventory_add {
        let known = known_items.values().any(|i| i.matches(name));
        let carryable = room.get_item(name).is_some_and(Item::is_carryable);
        if !(known && carryable) {
            continue;
        }
        if let Some(item) = room.remove_item(name) {
            player.add_item(item);
        }
    }
}

/// Add deltas to health and fear, keeping both within `[0, 100]`.
pub fn adjust_stats(player: &mut Player, health_delta: i32, fear_delta: i32) {
    player.health = clamp_stat(player.health.saturating_add(health_delta));
    player.fear = clamp_stat(player.fear.saturating_add(fear_delta));
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabin_world::ItemTrait;
    use proptest::prelude::*;

    fn firewood() -> Item {
        Item::new("firewood", "Dry birch.").with_traits([ItemTrait::Carryable])
    }

    fn test_room() -> Room {
        Room::new("cabin_grounds", "Cabin Grounds", "Snow.")
            .with_item(firewood())
            .with_item(Item::new("fireplace", "Stone.").with_traits([ItemTrait::Usable]))
    }

    fn known() -> BTreeMap<String, Item> {
        [firewood(), Item::new("fireplace", ""), Item::new("stone", "")]
            .into_iter()
            .map(|i| (i.name.clone(), i))
            .collect()
    }

    #[test]
    fn deltas_are_clamped_before_applying() {
        let mut player = Player::new();
        player.health = 50;
        player.fear = 50;
        let effects = Effects {
            health: -40,
            fear: 90,
            ..Default::default()
        };
        apply_effects(&mut player, &mut test_room(), &effects, &known());
        assert_eq!(player.health, 48);
        assert_eq!(player.fear, 52);
    }

    #[test]
    fn adds_only_items_in_the_room() {
        let mut player = Player::new();
        let mut room = test_room();
        let effects = Effects {
            inventory_add: vec!["firewood".into(), "stone".into(), "golden axe".into()],
            ..Default::default()
        };
        apply_effects(&mut player, &mut room, &effects, &known());
        assert_eq!(player.inventory_names(), vec!["firewood"]);
        assert!(!room.has_item("firewood"));
    }

    #[test]
    fn fixtures_stay_put() {
        let mut player = Player::new();
        let mut room = test_room();
        let effects = Effects {
            inventory_add: vec!["fireplace".into()],
            ..Default::default()
        };
        apply_effects(&mut player, &mut room, &effects, &known());
        assert!(player.inventory.is_empty());
        assert!(room.has_item("fireplace"));
    }

    #[test]
    fn removing_missing_item_is_noop() {
        let mut player = Player::new();
        player.add_item(Item::new("stone", ""));
        let effects = Effects {
            inventory_remove: vec!["rope".into(), "stone".into()],
            ..Default::default()
        };
        apply_effects(&mut player, &mut test_room(), &effects, &known());
        assert!(player.inventory.is_empty());
    }

    proptest! {
        #[test]
        fn stats_stay_in_range(
            health in 0..=100i32,
            fear in 0..=100i32,
            deltas in proptest::collection::vec((any::<i32>(), any::<i32>()), 1..20),
        ) {
            let mut player = Player::new();
            player.health = health;
            player.fear = fear;
            let mut room = test_room();
            for (h, f) in deltas {
                let effects = Effects { health: h, fear: f, ..Default::default() };
                apply_effects(&mut player, &mut room, &effects, &known());
                prop_assert!((0..=100).contains(&player.health));
                prop_assert!((0..=100).contains(&player.fear));
            }
        }

        #[test]
        fn extreme_deltas_move_at_most_two(h in any::<i32>(), f in any::<i32>()) {
            let mut player = Player::new();
            player.health = 50;
            player.fear = 50;
            let effects = Effects { health: h, fear: f, ..Default::default() };
            apply_effects(&mut player, &mut test_room(), &effects, &known());
            prop_assert!((player.health - 50).abs() <= MAX_EFFECT_DELTA);
            prop_assert!((player.fear - 50).abs() <= MAX_EFFECT_DELTA);
        }

        #[test]
        fn adjust_stats_never_escapes(h in any::<i32>(), f in any::<i32>()) {
            let mut player = Player::new();
            adjust_stats(&mut player, h, f);
            prop_assert!((0..=100).contains(&player.health));
            prop_assert!((0..=100).contains(&player.fear));
        }
    }
}
