//! Help and the do-nothing fallback.

use super::{Action, ActionContext, ActionResult};

/// Line used when nothing actionable was understood.
pub const HESITATE: &str =
    "You start, then think better of it. The cold in your chest makes you careful.";

/// Explain, in character, what the player can try.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelpAction;

impl Action for HelpAction {
    fn name(&self) -> &str {
        "help"
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let exits = ctx.map.current_room().exit_directions();
        let exits = if exits.is_empty() {
            "nowhere".to_string()
        } else {
            exits.join(", ")
        };
        ActionResult::success(format!(
            "Keep it simple. Try 'go <direction>'; exits: {exits}. You can also 'look', \
             'listen', check 'inventory', 'take' items, 'use' items, or 'throw' things."
        ))
    }
}

/// The fallback for unresolved commands. Always succeeds, always in-world.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneAction;

impl Action for NoneAction {
    fn name(&self) -> &str {
        "none"
    }

    fn execute(&self, _ctx: &mut ActionContext<'_>) -> ActionResult {
        ActionResult::success(HESITATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{at, quiet_cabin, run};
    use crate::intent::{ActionKind, Intent};
    use cabin_world::Player;

    #[test]
    fn help_names_exits() {
        let mut map = quiet_cabin();
        at(&mut map, "cabin_grounds_main");
        let mut player = Player::new();
        let result = run(&mut map, &mut player, Intent::new(ActionKind::Help, 1.0));
        assert!(result.feedback.contains("exits: clearing, north, south."));
    }

    #[test]
    fn none_hesitates() {
        let mut map = quiet_cabin();
        let mut player = Player::new();
        let result = run(&mut map, &mut player, Intent::none());
        assert!(result.success);
        assert_eq!(result.feedback, HESITATE);
    }
}
