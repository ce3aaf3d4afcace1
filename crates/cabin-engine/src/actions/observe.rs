//! Looking and listening.

use super::{Action, ActionContext, ActionResult};

const SILENCE: &str = "You listen carefully, but hear only the wind through the trees.";

/// Describe the room, its items and the animals in sight.
#[derive(Debug, Clone, Copy, Default)]
pub struct LookAction;

impl Action for LookAction {
    fn name(&self) -> &str {
        "look"
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let room = ctx.map.current_room();
        let mut parts = vec![room.description.clone()];
        parts.extend(room.items.iter().map(|item| {
            item.room_description
                .clone()
                .unwrap_or_else(|| format!("A {}.", item.name))
        }));
        parts.extend(
            room.visible_wildlife()
                .map(|w| w.visual_description.clone())
                .filter(|d| !d.is_empty()),
        );
        ActionResult::success(parts.join(" "))
    }
}

/// Describe what can be heard.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListenAction;

impl Action for ListenAction {
    fn name(&self) -> &str {
        "listen"
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let sounds: Vec<&str> = ctx
            .map
            .current_room()
            .audible_wildlife()
            .map(|w| w.sound_description.as_str())
            .filter(|s| !s.is_empty())
            .collect();
        if sounds.is_empty() {
            ActionResult::success(SILENCE)
        } else {
            ActionResult::success(sounds.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{quiet_cabin, release, run};
    use crate::intent::{ActionKind, Intent};
    use cabin_world::{Player, Wildlife, WildlifeTrait};

    fn owl() -> Wildlife {
        Wildlife::new("owl", "A grey owl.")
            .with_sound("An owl hoots somewhere above.")
            .with_visual("An owl watches from a branch.")
    }

    fn lynx() -> Wildlife {
        Wildlife::new("lynx", "Tufted ears.")
            .with_traits([WildlifeTrait::Elusive, WildlifeTrait::Silent])
            .with_sound("Nothing.")
            .with_visual("Tufted ears in the brush.")
    }

    #[test]
    fn look_joins_room_items_and_visible_wildlife() {
        let mut map = quiet_cabin();
        release(&mut map, owl());
        release(&mut map, lynx());
        let mut player = Player::new();
        let result = run(&mut map, &mut player, Intent::new(ActionKind::Look, 1.0));
        assert!(result.success);
        assert!(result.feedback.starts_with("You stand at the edge"));
        assert!(result.feedback.contains("A dry stick lies nearby."));
        assert!(result.feedback.contains("A smooth stone rests on the ground."));
        assert!(result.feedback.ends_with("An owl watches from a branch."));
        assert!(!result.feedback.contains("Tufted"));
    }

    #[test]
    fn listen_hears_audible_wildlife() {
        let mut map = quiet_cabin();
        release(&mut map, owl());
        release(&mut map, lynx());
        let mut player = Player::new();
        let result = run(&mut map, &mut player, Intent::new(ActionKind::Listen, 1.0));
        assert_eq!(result.feedback, "An owl hoots somewhere above.");
    }

    #[test]
    fn listen_falls_back_to_wind() {
        let mut map = quiet_cabin();
        let mut player = Player::new();
        let result = run(&mut map, &mut player, Intent::new(ActionKind::Listen, 1.0));
        assert_eq!(result.feedback, SILENCE);
    }
}
