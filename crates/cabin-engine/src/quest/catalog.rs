//! The Cabin's quests.

use super::{Quest, QuestCondition, Trigger, UpdateRule};

/// Id of the first quest.
pub const WARM_UP: &str = "warm_up";

/// Restore power and light the fire.
pub fn warm_up() -> Quest {
    let mut quest = Quest::new(WARM_UP, "Warm Up");
    quest.opening_text = "The lights don't respond. The hearth is cold.\n\
                          No power. No warmth. The cabin is freezing.\n\n\
                          **Find the fuse board and flip the circuit breaker. Then gather firewood \
                          and light the fire in the cabin.**"
        .to_string();
    quest.objective = "Restore power and warmth to the cabin by flipping the main circuit \
                       breaker and lighting a fire."
        .to_string();
    quest.triggers = vec![
        Trigger::location("konttori"),
        Trigger::location("lakeside"),
        Trigger::action("light_fire"),
        Trigger::action("turn_on_lights"),
    ];
    quest.updates = vec![
        UpdateRule {
            event: "fire_no_fuel".into(),
            condition: QuestCondition::And(vec![
                QuestCondition::event_action("light_fire"),
                QuestCondition::Not(Box::new(QuestCondition::has_item("firewood"))),
            ]),
            text: "You have no fuel.".into(),
        },
        UpdateRule {
            event: "fire_success".into(),
            condition: QuestCondition::And(vec![
                QuestCondition::event_action("light_fire"),
                QuestCondition::EventSucceeded,
            ]),
            text: "The fire crackles softly, shadows dancing against the log walls. It's warm now."
                .into(),
        },
        UpdateRule {
            event: "power_restored".into(),
            condition: QuestCondition::event_action("use_circuit_breaker"),
            text: "Somewhere in the walls, the cabin remembers electricity.".into(),
        },
    ];
    quest.completion = QuestCondition::And(vec![
        QuestCondition::flag("has_power"),
        QuestCondition::flag("fire_lit"),
    ]);
    quest.completion_text =
        "The cabin hums with life again. Warmth creeps back into your limbs.".to_string();
    quest.screen_text = "Restore power and warmth to the cabin.\n\
                         Flip the breaker in the konttori, gather firewood from the lakeside, \
                         and light the hearth."
        .to_string();
    quest
}

/// Every quest, in registration order.
pub fn all_quests() -> Vec<Quest> {
    vec![warm_up()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::{EventData, QuestStatus};
    use cabin_world::{Item, Player, WorldState};

    #[test]
    fn warm_up_triggers() {
        let quest = warm_up();
        for trigger in [
            Trigger::location("konttori"),
            Trigger::location("lakeside"),
            Trigger::action("light_fire"),
            Trigger::action("turn_on_lights"),
        ] {
            assert!(quest.matches_trigger(&trigger));
        }
        assert!(!quest.matches_trigger(&Trigger::location("cabin_main")));
    }

    #[test]
    fn no_fuel_update_needs_empty_hands() {
        let mut quest = warm_up();
        quest.status = QuestStatus::Active;
        let mut player = Player::new();
        let world = WorldState::new();
        let data = EventData::action("light_fire");
        assert_eq!(
            quest.update_for("fire_no_fuel", &data, &player, &world),
            Some("You have no fuel.")
        );
        player.add_item(Item::new("firewood", ""));
        assert_eq!(quest.update_for("fire_no_fuel", &data, &player, &world), None);
    }

    #[test]
    fn completes_with_power_and_fire() {
        let mut quest = warm_up();
        quest.status = QuestStatus::Active;
        let player = Player::new();
        let mut world = WorldState::new();
        world.has_power = true;
        assert!(!quest.is_complete(&player, &world));
        world.fire_lit = true;
        assert!(quest.is_complete(&player, &world));
    }
}
