//! Throwing things, usually at animals.

use cabin_world::{Reaction, clean_item_name};

use super::{Action, ActionContext, ActionResult, Signal, StateChanges};

/// Fear added when something is thrown at nothing in particular.
pub const DARKNESS_FEAR: i32 = 5;

/// Throw a carried item, optionally at a `target` animal.
///
/// The item always leaves the bag, hit or miss.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThrowAction;

impl Action for ThrowAction {
    fn name(&self) -> &str {
        "throw"
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let Some(name) = ctx.arg("item") else {
            return ActionResult::failure("Throw what?");
        };
        let Some(item) = ctx.player.get_item(name) else {
            return ActionResult::failure(format!(
                "You don't have a {} to throw.",
                clean_item_name(name)
            ));
        };
        if !item.is_throwable() {
            return ActionResult::failure(format!(
                "The {} isn't something you can throw.",
                item.name
            ));
        }
        let Some(item) = ctx.player.remove_item(name) else {
            return ActionResult::failure("Throw what?");
        };

        let mut changes = StateChanges::item(item.name.clone());
        let target = ctx.arg("target");
        let room = ctx.map.current_room_mut();
        let animal = target.and_then(|t| room.get_wildlife_mut(t));

        let Some(animal) = animal else {
            changes.fear_increase = DARKNESS_FEAR;
            return ActionResult::success(format!(
                "The {} flies into the dark. You hear a dull thunk in the distance... and something else.",
                item.name
            ))
            .with_signals([Signal::ItemThrown, Signal::ThrownIntoDarkness])
            .with_changes(changes);
        };

        let animal_name = animal.name.clone();
        let outcome = animal.provoke();
        changes.target = Some(animal_name.clone());
        changes.reaction = Some(outcome.reaction);
        let mut signals = vec![Signal::ItemThrown, Signal::WildlifeProvoked];
        match outcome.reaction {
            Reaction::Attack => {
                changes.health_damage = outcome.health_damage;
                changes.fear_increase = outcome.fear_increase;
                signals.push(Signal::WildlifeAttack);
            }
            Reaction::Flee | Reaction::Wander => {
                if outcome.remove_from_room {
                    room.remove_wildlife(&animal_name);
                }
                signals.push(Signal::WildlifeFled);
            }
            Reaction::Ignore => {}
        }
        ActionResult::success(outcome.message)
            .with_signals(signals)
            .with_changes(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{intent, quiet_cabin, release, run, stock};
    use crate::intent::ActionKind;
    use cabin_world::wildlife::{ATTACK_DAMAGE, ATTACK_FEAR};
    use cabin_world::{GameMap, Player, Wildlife, WildlifeTrait};

    fn wolf() -> Wildlife {
        Wildlife::new("wolf", "Grey and lean.").with_traits([WildlifeTrait::Vicious])
    }

    fn armed(map: &GameMap) -> Player {
        let mut player = Player::new();
        player.add_item(stock(map, "stone"));
        player.add_item(stock(map, "stick"));
        player
    }

    fn throw_at(item: &str, target: &str) -> crate::intent::Intent {
        intent(ActionKind::Throw, "item", item).with_arg("target", target)
    }

    #[test]
    fn vicious_animal_attacks_once() {
        let mut map = quiet_cabin();
        release(&mut map, wolf());
        let mut player = armed(&map);

        let first = run(&mut map, &mut player, throw_at("stone", "wolf"));
        assert!(first.has_signal(Signal::WildlifeAttack));
        assert_eq!(first.state_changes.health_damage, ATTACK_DAMAGE);
        assert_eq!(first.state_changes.fear_increase, ATTACK_FEAR);
        assert_eq!(first.state_changes.reaction, Some(Reaction::Attack));
        assert!(!player.has_item("stone"));

        let second = run(&mut map, &mut player, throw_at("stick", "wolf"));
        assert!(!second.has_signal(Signal::WildlifeAttack));
        assert_eq!(second.state_changes.health_damage, 0);
        assert!(!player.has_item("stick"));
    }

    #[test]
    fn skittish_animal_flees() {
        let mut map = quiet_cabin();
        release(
            &mut map,
            Wildlife::new("hare", "White.").with_traits([WildlifeTrait::Skittish]),
        );
        let mut player = armed(&map);
        let result = run(&mut map, &mut player, throw_at("stone", "Hare"));
        assert!(result.has_signal(Signal::WildlifeFled));
        assert!(!map.current_room().has_wildlife("hare"));
        assert!(!player.has_item("stone"));
    }

    #[test]
    fn indifferent_animal_stays() {
        let mut map = quiet_cabin();
        release(&mut map, Wildlife::new("moose", "Huge."));
        let mut player = armed(&map);
        let result = run(&mut map, &mut player, throw_at("stone", "moose"));
        assert_eq!(result.feedback, "The moose ignores your provocation.");
        assert_eq!(
            result.events,
            vec![Signal::ItemThrown, Signal::WildlifeProvoked]
        );
        assert!(map.current_room().has_wildlife("moose"));
        assert!(!player.has_item("stone"));
    }

    #[test]
    fn no_target_goes_into_darkness() {
        let mut map = quiet_cabin();
        let mut player = armed(&map);
        let result = run(&mut map, &mut player, throw_at("stone", "bear"));
        assert!(result.has_signal(Signal::ThrownIntoDarkness));
        assert_eq!(result.state_changes.fear_increase, DARKNESS_FEAR);
        assert!(!player.has_item("stone"));
    }

    #[test]
    fn must_own_a_throwable_item() {
        let mut map = quiet_cabin();
        let mut player = Player::new();
        let result = run(&mut map, &mut player, intent(ActionKind::Throw, "item", "stone"));
        assert_eq!(result.feedback, "You don't have a stone to throw.");

        player.add_item(stock(&map, "key"));
        let result = run(&mut map, &mut player, intent(ActionKind::Throw, "item", "key"));
        assert!(!result.success);
        assert_eq!(result.feedback, "The key isn't something you can throw.");
        assert!(player.has_item("key"));
    }
}
