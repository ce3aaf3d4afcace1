//! Turning an action's signals into bus events and stat consequences.

use cabin_world::{Player, Reaction};

use super::GameEvent;
use crate::actions::throw::DARKNESS_FEAR;
use crate::actions::{ActionResult, Signal};
use crate::effects::adjust_stats;

/// Build the events an action result announces, in signal order.
///
/// Signals with no listener-facing meaning (entered_room, item_used and the
/// like) produce nothing.
pub fn to_events(result: &ActionResult, room_id: &str) -> Vec<GameEvent> {
    let changes = &result.state_changes;
    let item_name = || changes.item_name.clone().unwrap_or_default();
    result
        .events
        .iter()
        .filter_map(|signal| match signal {
            Signal::PlayerMoved => Some(GameEvent::PlayerMoved {
                from_room_id: changes.from_room_id.clone().unwrap_or_default(),
                to_room_id: changes.to_room_id.clone().unwrap_or_default(),
                direction: changes.direction.clone().unwrap_or_default(),
            }),
            Signal::ItemTaken => Some(GameEvent::ItemTaken {
                item_name: item_name(),
                room_id: room_id.to_string(),
            }),
            Signal::FuelGathered => Some(GameEvent::FuelGathered {
                item_name: changes
                    .item_name
                    .clone()
                    .unwrap_or_else(|| "firewood".to_string()),
            }),
            Signal::ItemDropped => Some(GameEvent::ItemDropped {
                item_name: item_name(),
                room_id: room_id.to_string(),
            }),
            Signal::ItemThrown => Some(GameEvent::ItemThrown {
                item_name: item_name(),
                target: changes.target.clone(),
                into_darkness: result.has_signal(Signal::ThrownIntoDarkness),
            }),
            Signal::WildlifeProvoked => Some(GameEvent::WildlifeProvoked {
                wildlife_name: changes.target.clone().unwrap_or_default(),
                reaction: changes.reaction.unwrap_or(Reaction::Ignore),
                health_damage: changes.health_damage,
                fear_increase: changes.fear_increase,
            }),
            Signal::PowerRestored => Some(GameEvent::PowerRestored),
            Signal::FireLit => Some(GameEvent::FireLit),
            Signal::FireNoFuel => Some(GameEvent::FireAttempt {
                has_fuel: false,
                has_matches: true,
            }),
            Signal::UseLightSwitchNoPower => Some(GameEvent::LightSwitchUsed { has_power: false }),
            Signal::LightsOn => Some(GameEvent::LightSwitchUsed { has_power: true }),
            Signal::UseFireplaceNoFuel => Some(GameEvent::FireplaceUsed { has_fuel: false }),
            Signal::UseFireplace => Some(GameEvent::FireplaceUsed { has_fuel: true }),
            Signal::EnteredRoom
            | Signal::WildlifeAttack
            | Signal::WildlifeFled
            | Signal::ThrownIntoDarkness
            | Signal::ItemUsed
            | Signal::FireSuccess => None,
        })
        .collect()
}

/// Apply the stat consequences an action reports: an animal's attack, or
/// the fear of throwing something into the dark.
pub fn apply_consequences(result: &ActionResult, player: &mut Player) {
    let changes = &result.state_changes;
    if result.has_signal(Signal::WildlifeAttack) {
        adjust_stats(player, -changes.health_damage, changes.fear_increase);
    }
    if result.has_signal(Signal::ThrownIntoDarkness) {
        let fear = if changes.fear_increase > 0 {
            changes.fear_increase
        } else {
            DARKNESS_FEAR
        };
        adjust_stats(player, 0, fear);
    }
}
