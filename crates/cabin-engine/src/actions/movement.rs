//! Moving between rooms.

use cabin_world::MoveOutcome;

use super::{Action, ActionContext, ActionResult, Signal, StateChanges};
use crate::parser::normalize_direction;

/// Follow an exit named by `direction`.
///
/// Success carries no feedback; the room render that follows does the talking.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveAction;

impl Action for MoveAction {
    fn name(&self) -> &str {
        "move"
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let Some(direction) = ctx.arg("direction").map(normalize_direction) else {
            return ActionResult::failure("You angle your body and stop. Where?");
        };
        match ctx.map.move_player(&direction, ctx.player) {
            MoveOutcome::Moved { from, to } => ActionResult::success("")
                .with_signals([Signal::PlayerMoved, Signal::EnteredRoom])
                .with_changes(StateChanges {
                    from_room_id: Some(from),
                    to_room_id: Some(to),
                    direction: Some(direction),
                    ..StateChanges::default()
                }),
            MoveOutcome::Blocked(message) => ActionResult::failure(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{at, intent, quiet_cabin, run};
    use crate::intent::{ActionKind, Intent};
    use cabin_world::Player;

    #[test]
    fn moves_north_from_start() {
        let mut map = quiet_cabin();
        let mut player = Player::new();
        let result = run(&mut map, &mut player, intent(ActionKind::Move, "direction", "n"));
        assert!(result.success);
        assert!(result.feedback.is_empty());
        assert_eq!(result.events, vec![Signal::PlayerMoved, Signal::EnteredRoom]);
        assert_eq!(result.state_changes.from_room_id.as_deref(), Some("wilderness_start"));
        assert_eq!(result.state_changes.to_room_id.as_deref(), Some("cabin_clearing"));
        assert_eq!(result.state_changes.direction.as_deref(), Some("north"));
        assert_eq!(map.current_room_id(), "cabin_clearing");
    }

    #[test]
    fn missing_direction_fails_in_world() {
        let mut map = quiet_cabin();
        let mut player = Player::new();
        let result = run(&mut map, &mut player, Intent::new(ActionKind::Move, 1.0));
        assert!(!result.success);
        assert_eq!(result.feedback, "You angle your body and stop. Where?");
    }

    #[test]
    fn no_exit_stays_put() {
        let mut map = quiet_cabin();
        let mut player = Player::new();
        let result = run(&mut map, &mut player, intent(ActionKind::Move, "direction", "west"));
        assert!(!result.success);
        assert!(result.events.is_empty());
        assert_eq!(map.current_room_id(), "wilderness_start");
    }

    #[test]
    fn gate_blocks_the_frightened() {
        let mut map = quiet_cabin();
        at(&mut map, "wood_track");
        let mut player = Player::new();
        player.fear = 85;
        let result = run(&mut map, &mut player, intent(ActionKind::Move, "direction", "north"));
        assert!(!result.success);
        assert_eq!(map.current_room_id(), "wood_track");

        player.fear = 10;
        let result = run(&mut map, &mut player, intent(ActionKind::Move, "direction", "north"));
        assert!(result.success);
        assert_eq!(map.current_room_id(), "old_woods");
    }
}
