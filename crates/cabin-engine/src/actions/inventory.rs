//! Taking, dropping and checking the bag.

use cabin_world::clean_item_name;

use super::{Action, ActionContext, ActionResult, Signal, StateChanges};

/// List carried items.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryAction;

impl Action for InventoryAction {
    fn name(&self) -> &str {
        "inventory"
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let names = ctx.player.inventory_names();
        if names.is_empty() {
            ActionResult::success("You check your bag. Just air and lint.")
        } else {
            ActionResult::success(format!("You check your bag: {}.", names.join(", ")))
        }
    }
}

/// Move an item from the room into the bag.
#[derive(Debug, Clone, Copy, Default)]
pub struct TakeAction;

impl Action for TakeAction {
    fn name(&self) -> &str {
        "take"
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let Some(name) = ctx.arg("item") else {
            return ActionResult::failure("Take what?");
        };
        let room = ctx.map.current_room_mut();
        let Some(item) = room.remove_item(name) else {
            return ActionResult::failure(format!(
                "There's no {} here to pick up.",
                clean_item_name(name)
            ));
        };
        if !item.is_carryable() {
            let feedback = format!("That {} can't be picked up.", item.name);
            room.add_item(item);
            return ActionResult::failure(feedback);
        }

        let mut signals = vec![Signal::ItemTaken];
        if item.name.eq_ignore_ascii_case("firewood") {
            signals.push(Signal::FuelGathered);
        }
        let feedback = format!(
            "You pick up the {}. {} added to inventory.",
            item.name,
            title_case(&item.name)
        );
        let changes = StateChanges::item(item.name.clone());
        ctx.player.add_item(item);
        ActionResult::success(feedback)
            .with_signals(signals)
            .with_changes(changes)
    }
}

/// Move an item from the bag onto the floor.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropAction;

impl Action for DropAction {
    fn name(&self) -> &str {
        "drop"
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let Some(name) = ctx.arg("item") else {
            return ActionResult::failure("Drop what?");
        };
        let Some(item) = ctx.player.remove_item(name) else {
            return ActionResult::failure(format!(
                "You don't have a {} to drop.",
                clean_item_name(name)
            ));
        };
        let feedback = format!("You set the {} down.", item.name);
        let changes = StateChanges::item(item.name.clone());
        ctx.map.current_room_mut().add_item(item);
        ActionResult::success(feedback)
            .with_signals([Signal::ItemDropped])
            .with_changes(changes)
    }
}

/// "circuit breaker" -> "Circuit Breaker".
fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{at, intent, quiet_cabin, run, stock};
    use crate::intent::{ActionKind, Intent};
    use cabin_world::Player;

    #[test]
    fn take_moves_item_into_bag() {
        let mut map = quiet_cabin();
        let mut player = Player::new();
        let result = run(&mut map, &mut player, intent(ActionKind::Take, "item", "the Stone"));
        assert!(result.success);
        assert_eq!(result.feedback, "You pick up the stone. Stone added to inventory.");
        assert_eq!(result.events, vec![Signal::ItemTaken]);
        assert!(player.has_item("stone"));
        assert!(!map.current_room().has_item("stone"));
    }

    #[test]
    fn firewood_counts_as_fuel() {
        let mut map = quiet_cabin();
        at(&mut map, "cabin_grounds_main");
        let mut player = Player::new();
        let result = run(&mut map, &mut player, intent(ActionKind::Take, "item", "firewood"));
        assert!(result.has_signal(Signal::ItemTaken));
        assert!(result.has_signal(Signal::FuelGathered));
    }

    #[test]
    fn fixtures_go_back_in_the_room() {
        let mut map = quiet_cabin();
        at(&mut map, "konttori");
        let mut player = Player::new();
        let result = run(
            &mut map,
            &mut player,
            intent(ActionKind::Take, "item", "circuit breaker"),
        );
        assert!(!result.success);
        assert_eq!(result.feedback, "That circuit breaker can't be picked up.");
        assert!(map.current_room().has_item("circuit breaker"));
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn missing_item_uses_clean_name() {
        let mut map = quiet_cabin();
        let mut player = Player::new();
        let result = run(&mut map, &mut player, intent(ActionKind::Take, "item", "The Lantern"));
        assert!(!result.success);
        assert_eq!(result.feedback, "There's no lantern here to pick up.");
        let result = run(&mut map, &mut player, Intent::new(ActionKind::Take, 1.0));
        assert_eq!(result.feedback, "Take what?");
    }

    #[test]
    fn take_then_drop_round_trips() {
        let mut map = quiet_cabin();
        let mut player = Player::new();
        let mut before = map.current_room().item_names();
        before.sort();
        run(&mut map, &mut player, intent(ActionKind::Take, "item", "stick"));
        let result = run(&mut map, &mut player, intent(ActionKind::Drop, "item", "stick"));
        assert!(result.success);
        assert_eq!(result.feedback, "You set the stick down.");
        assert_eq!(result.events, vec![Signal::ItemDropped]);
        let mut after = map.current_room().item_names();
        after.sort();
        assert_eq!(before, after);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn drop_requires_ownership() {
        let mut map = quiet_cabin();
        let mut player = Player::new();
        let result = run(&mut map, &mut player, intent(ActionKind::Drop, "item", "a rope"));
        assert!(!result.success);
        assert_eq!(result.feedback, "You don't have a rope to drop.");
    }

    #[test]
    fn inventory_lists_or_jokes() {
        let mut map = quiet_cabin();
        let mut player = Player::new();
        let empty = run(&mut map, &mut player, Intent::new(ActionKind::Inventory, 1.0));
        assert_eq!(empty.feedback, "You check your bag. Just air and lint.");
        player.add_item(stock(&map, "rope"));
        player.add_item(stock(&map, "matches"));
        let full = run(&mut map, &mut player, Intent::new(ActionKind::Inventory, 1.0));
        assert_eq!(full.feedback, "You check your bag: rope, matches.");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("circuit breaker"), "Circuit Breaker");
        assert_eq!(title_case("stone"), "Stone");
    }
}
