//! Using items and the cabin's fixtures.

use cabin_world::{Item, clean_item_name};

use super::{Action, ActionContext, ActionResult, Signal, StateChanges};

/// Use a carried item, or a usable fixture in the room.
///
/// A small decision table keyed on the item and world flags; anything not in
/// the table is a plain "you use it".
#[derive(Debug, Clone, Copy, Default)]
pub struct UseAction;

impl Action for UseAction {
    fn name(&self) -> &str {
        "use"
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let Some(name) = ctx.arg("item") else {
            return ActionResult::failure("Use what?");
        };
        let Some(item) = reachable(ctx, name) else {
            return ActionResult::failure(format!(
                "You don't have a {} to use.",
                clean_item_name(name)
            ));
        };
        let changes = StateChanges::item(item.name.clone());
        let has_fuel = ctx.player.has_item("firewood");

        match item.name.to_lowercase().as_str() {
            "circuit breaker" => {
                ctx.map.world_state.has_power = true;
                ActionResult::success(
                    "The circuit breaker clicks into place. Power hums through the cabin.",
                )
                .with_signals([Signal::PowerRestored, Signal::ItemUsed])
                .with_changes(StateChanges {
                    has_power: Some(true),
                    ..changes
                })
            }
            "matches" if has_fuel => {
                ctx.map.world_state.fire_lit = true;
                ActionResult::success(
                    "The matches catch and the firewood ignites. Warmth spreads through the cabin.",
                )
                .with_signals([Signal::FireLit, Signal::ItemUsed])
                .with_changes(StateChanges {
                    fire_lit: Some(true),
                    ..changes
                })
            }
            "matches" => ActionResult::success("You strike a match, but you have nothing to light.")
                .with_signals([Signal::FireNoFuel])
                .with_changes(changes),
            "light switch" if ctx.map.world_state.has_power => {
                ActionResult::success(
                    "The light switch clicks and the cabin fills with warm light.",
                )
                .with_signals([Signal::LightsOn])
                .with_changes(changes)
            }
            "light switch" => ActionResult::success(
                "You flip the switch, but nothing happens. The cabin remains dark.",
            )
            .with_signals([Signal::UseLightSwitchNoPower])
            .with_changes(changes),
            "fireplace" if has_fuel => {
                ActionResult::success("You could light a fire here if you had matches.")
                    .with_signals([Signal::UseFireplace])
                    .with_changes(changes)
            }
            "fireplace" => ActionResult::success(
                "The fireplace is cold and empty. You need fuel to start a fire.",
            )
            .with_signals([Signal::UseFireplaceNoFuel])
            .with_changes(changes),
            _ => ActionResult::success(format!("You use the {}.", item.name))
                .with_signals([Signal::ItemUsed])
                .with_changes(changes),
        }
    }
}

/// A carried item, else a usable fixture lying in the current room.
fn reachable(ctx: &ActionContext<'_>, name: &str) -> Option<Item> {
    ctx.player.get_item(name).cloned().or_else(|| {
        ctx.map
            .current_room()
            .get_item(name)
            .filter(|i| i.is_usable() && !i.is_carryable())
            .cloned()
    })
}

/// Reset the breaker panel in the current room.
#[derive(Debug, Clone, Copy, Default)]
pub struct UseCircuitBreakerAction;

impl Action for UseCircuitBreakerAction {
    fn name(&self) -> &str {
        "use_circuit_breaker"
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult {
        if !ctx.map.current_room().has_item("circuit breaker") {
            return ActionResult::failure("There's no circuit breaker here to use.");
        }
        ctx.map.world_state.has_power = true;
        ActionResult::success(
            "With a satisfying thunk, the circuit breaker clicks into place. Power hums through the cabin.",
        )
        .with_signals([Signal::PowerRestored])
        .with_changes(StateChanges {
            has_power: Some(true),
            ..StateChanges::default()
        })
    }
}

/// Flip the light switch in the current room.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnOnLightsAction;

impl Action for TurnOnLightsAction {
    fn name(&self) -> &str {
        "turn_on_lights"
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult {
        if !ctx.map.current_room().has_item("light switch") {
            return ActionResult::failure("There's no light switch here.");
        }
        if ctx.map.world_state.has_power {
            ActionResult::success(
                "The lights flicker on, filling the cabin with warm illumination.",
            )
            .with_signals([Signal::LightsOn])
        } else {
            ActionResult::success(
                "The light switch is unresponsive; the room remains shrouded in darkness.",
            )
            .with_signals([Signal::UseLightSwitchNoPower])
        }
    }
}
