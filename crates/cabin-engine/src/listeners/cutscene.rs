//! Plays cutscenes on room transitions.

use crate::events::{EventBus, EventKind, GameEvent, SubscriptionId};
use crate::state::{GameState, Notice};

/// Subscribe the cutscene listener to movement.
pub fn register(bus: &mut EventBus<GameState>) -> SubscriptionId {
    bus.subscribe(EventKind::PlayerMoved, |event, state| {
        let GameEvent::PlayerMoved {
            from_room_id,
            to_room_id,
            ..
        } = event
        else {
            return;
        };
        if let Some(paragraphs) = state.cutscenes.check(from_room_id, to_room_id) {
            state.notices.push(Notice::Cutscene(paragraphs));
        }
    })
}
