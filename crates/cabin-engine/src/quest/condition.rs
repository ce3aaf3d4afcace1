//! Conditions for quest updates and completion.

use cabin_world::{Player, WorldState};

/// What the listener knows about the event being checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventData {
    /// The gameplay action behind the event (`light_fire`, ...).
    pub action: Option<String>,
    /// Whether the attempt worked.
    pub success: bool,
}

impl EventData {
    /// Data for an action.
    pub fn action(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            success: false,
        }
    }

    /// Mark the attempt successful.
    pub fn succeeded(mut self) -> Self {
        self.success = true;
        self
    }
}

/// A condition evaluated against the event, the player and world flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuestCondition {
    /// A world flag is truthy.
    FlagSet {
        /// Flag key.
        flag: String,
    },
    /// The player carries an item.
    HasItem {
        /// Item name.
        item: String,
    },
    /// The event came from this action.
    EventAction {
        /// Action name.
        action: String,
    },
    /// The event reports success.
    EventSucceeded,
    /// Logical NOT.
    Not(Box<QuestCondition>),
    /// Logical AND.
    And(Vec<QuestCondition>),
    /// Logical OR.
    Or(Vec<QuestCondition>),
    /// Always true.
    #[default]
    Always,
}

impl QuestCondition {
    /// Shorthand for [`QuestCondition::FlagSet`].
    pub fn flag(flag: &str) -> Self {
        Self::FlagSet {
            flag: flag.to_string(),
        }
    }

    /// Shorthand for [`QuestCondition::HasItem`].
    pub fn has_item(item: &str) -> Self {
        Self::HasItem {
            item: item.to_string(),
        }
    }

    /// Shorthand for [`QuestCondition::EventAction`].
    pub fn event_action(action: &str) -> Self {
        Self::EventAction {
            action: action.to_string(),
        }
    }

    /// Evaluate the condition.
    pub fn evaluate(&self, event: &EventData, player: &Player, world: &WorldState) -> bool {
        match self {
            Self::FlagSet { flag } => world.is_set(flag),
            Self::HasItem { item } => player.has_item(item),
            Self::EventAction { action } => event.action.as_deref() == Some(action.as_str()),
            Self::EventSucceeded => event.success,
            Self::Not(inner) => !inner.evaluate(event, player, world),
            Self::And(conditions) => conditions.iter().all(|c| c.evaluate(event, player, world)),
            Self::Or(conditions) => conditions.iter().any(|c| c.evaluate(event, player, world)),
            Self::Always => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabin_world::Item;

    #[test]
    fn flags_and_items() {
        let mut world = WorldState::new();
        let mut player = Player::new();
        let none = EventData::default();
        assert!(!QuestCondition::flag("has_power").evaluate(&none, &player, &world));
        world.has_power = true;
        assert!(QuestCondition::flag("has_power").evaluate(&none, &player, &world));

        assert!(!QuestCondition::has_item("firewood").evaluate(&none, &player, &world));
        player.add_item(Item::new("firewood", ""));
        assert!(QuestCondition::has_item("Firewood").evaluate(&none, &player, &world));
    }

    #[test]
    fn event_fields() {
        let world = WorldState::new();
        let player = Player::new();
        let attempt = EventData::action("light_fire");
        let lit = EventData::action("light_fire").succeeded();
        let cond = QuestCondition::And(vec![
            QuestCondition::event_action("light_fire"),
            QuestCondition::EventSucceeded,
        ]);
        assert!(!cond.evaluate(&attempt, &player, &world));
        assert!(cond.evaluate(&lit, &player, &world));
        assert!(!QuestCondition::event_action("swim").evaluate(&lit, &player, &world));
    }

    #[test]
    fn logic() {
        let world = WorldState::new();
        let player = Player::new();
        let ev = EventData::default();
        assert!(QuestCondition::Always.evaluate(&ev, &player, &world));
        let unlit = QuestCondition::Not(Box::new(QuestCondition::flag("fire_lit")));
        assert!(unlit.evaluate(&ev, &player, &world));
        assert!(QuestCondition::Or(vec![QuestCondition::flag("x"), QuestCondition::Always])
            .evaluate(&ev, &player, &world));
        assert!(QuestCondition::And(vec![]).evaluate(&ev, &player, &world));
    }
}
