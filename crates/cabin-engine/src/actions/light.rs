//! Lighting the fire.

use super::{Action, ActionContext, ActionResult, Signal, StateChanges};

/// Light a `target`; only fires can be lit.
#[derive(Debug, Clone, Copy, Default)]
pub struct LightAction;

impl Action for LightAction {
    fn name(&self) -> &str {
        "light"
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let target = ctx.arg("target").unwrap_or_default().to_lowercase();
        if !target.contains("fire") {
            let what = if target.is_empty() { "that" } else { target.as_str() };
            return ActionResult::failure(format!("You can't light {what}."));
        }
        if !ctx.player.has_item("firewood") {
            return ActionResult::success("You can't light a fire without kindling or fuel.")
                .with_signals([Signal::UseFireplaceNoFuel]);
        }
        if !ctx.player.has_item("matches") {
            return ActionResult::failure("You need matches to light the fire.");
        }
        ctx.map.world_state.fire_lit = true;
        ActionResult::success(
            "The matches catch and the firewood ignites. Warmth spreads through the cabin.",
        )
        .with_signals([Signal::FireLit, Signal::FireSuccess])
        .with_changes(StateChanges {
            fire_lit: Some(true),
            ..StateChanges::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{intent, quiet_cabin, run, stock};
    use crate::intent::ActionKind;
    use cabin_world::Player;

    #[test]
    fn fire_needs_fuel_then_matches() {
        let mut map = quiet_cabin();
        let mut player = Player::new();
        let light = intent(ActionKind::Light, "target", "fire");

        let no_fuel = run(&mut map, &mut player, light.clone());
        assert!(no_fuel.success);
        assert_eq!(no_fuel.events, vec![Signal::UseFireplaceNoFuel]);

        player.add_item(stock(&map, "firewood"));
        let no_matches = run(&mut map, &mut player, light.clone());
        assert!(!no_matches.success);
        assert_eq!(no_matches.feedback, "You need matches to light the fire.");

        player.add_item(stock(&map, "matches"));
        let lit = run(&mut map, &mut player, light);
        assert_eq!(lit.events, vec![Signal::FireLit, Signal::FireSuccess]);
        assert!(map.world_state.fire_lit);
    }

    #[test]
    fn fireplace_counts_as_fire() {
        let mut map = quiet_cabin();
        let mut player = Player::new();
        player.add_item(stock(&map, "firewood"));
        player.add_item(stock(&map, "matches"));
        let lit = run(&mut map, &mut player, intent(ActionKind::Light, "target", "Fireplace"));
        assert!(lit.has_signal(Signal::FireLit));
    }

    #[test]
    fn other_targets_refuse() {
        let mut map = quiet_cabin();
        let mut player = Player::new();
        let result = run(&mut map, &mut player, intent(ActionKind::Light, "target", "lantern"));
        assert!(!result.success);
        assert_eq!(result.feedback, "You can't light lantern.");
        assert!(result.events.is_empty());
    }
}
