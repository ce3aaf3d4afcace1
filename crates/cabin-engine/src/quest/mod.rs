//! Quests: a trigger, a run of updates, and a completion condition.

pub mod catalog;
pub mod condition;
pub mod manager;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use condition::{EventData, QuestCondition};
pub use manager::{QuestManager, QuestSnapshot};

/// Lifecycle of a quest. Moves strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    /// Waiting for a trigger.
    Inactive,
    /// In progress.
    Active,
    /// Done.
    Completed,
}

/// Something that can start a quest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// The player entered a room.
    Location {
        /// Room id.
        room_id: String,
    },
    /// The player attempted an action.
    Action {
        /// Action name.
        action: String,
    },
}

impl Trigger {
    /// A location trigger.
    pub fn location(room_id: impl Into<String>) -> Self {
        Self::Location {
            room_id: room_id.into(),
        }
    }

    /// An action trigger.
    pub fn action(action: impl Into<String>) -> Self {
        Self::Action {
            action: action.into(),
        }
    }
}

/// Text added to an active quest when a named event satisfies a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRule {
    /// Event name the rule listens for.
    pub event: String,
    /// Must hold for the update to apply.
    pub condition: QuestCondition,
    /// Update text.
    pub text: String,
}

/// An update that happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestNote {
    /// Event that caused it.
    pub event: String,
    /// Text shown.
    pub text: String,
    /// When.
    pub at: DateTime<Utc>,
}

/// A quest definition plus its progress.
#[derive(Debug, Clone)]
pub struct Quest {
    /// Stable id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Shown when the quest starts.
    pub opening_text: String,
    /// One-line goal.
    pub objective: String,
    /// Any one of these starts the quest.
    pub triggers: Vec<Trigger>,
    /// Update rules, checked in order; the first match applies.
    pub updates: Vec<UpdateRule>,
    /// Completion condition.
    pub completion: QuestCondition,
    /// Shown when the quest completes.
    pub completion_text: String,
    /// Body of the quest screen.
    pub screen_text: String,
    /// Quest screen text while inactive.
    pub inactive_text: String,
    /// Current status.
    pub status: QuestStatus,
    /// Updates so far.
    pub notes: Vec<QuestNote>,
    /// When it was completed.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Quest {
    /// A new inactive quest with no triggers or updates.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            opening_text: String::new(),
            objective: String::new(),
            triggers: Vec::new(),
            updates: Vec::new(),
            completion: QuestCondition::Always,
            completion_text: String::new(),
            screen_text: String::new(),
            inactive_text: "Quests will appear here when active.".to_string(),
            status: QuestStatus::Inactive,
            notes: Vec::new(),
            completed_at: None,
        }
    }

    /// Whether `trigger` starts this quest. Only inactive quests trigger.
    pub fn matches_trigger(&self, trigger: &Trigger) -> bool {
        self.status == QuestStatus::Inactive && self.triggers.contains(trigger)
    }

    /// The update text for an event, if a rule applies. Only active quests
    /// update.
    pub fn update_for(
        &self,
        event: &str,
        data: &EventData,
        player: &cabin_world::Player,
        world: &cabin_world::WorldState,
    ) -> Option<&str> {
        if self.status != QuestStatus::Active {
            return None;
        }
        self.updates
            .iter()
            .find(|rule| rule.event == event && rule.condition.evaluate(data, player, world))
            .map(|rule| rule.text.as_str())
            .filter(|text| !text.is_empty())
    }

    /// Whether the completion condition holds. Only active quests complete.
    pub fn is_complete(
        &self,
        player: &cabin_world::Player,
        world: &cabin_world::WorldState,
    ) -> bool {
        self.status == QuestStatus::Active
            && self.completion.evaluate(&EventData::default(), player, world)
    }

    /// Record an update.
    pub fn add_note(&mut self, event: impl Into<String>, text: impl Into<String>) {
        self.notes.push(QuestNote {
            event: event.into(),
            text: text.into(),
            at: Utc::now(),
        });
    }

    /// Quest screen text.
    pub fn display_text(&self) -> String {
        if self.status == QuestStatus::Inactive {
            return self.inactive_text.clone();
        }
        let mut text = format!("**{}**\n{}", self.title, self.screen_text);
        if !self.notes.is_empty() {
            text.push_str("\n\n**Updates:**");
            for note in &self.notes {
                text.push('\n');
                text.push_str(&note.text);
            }
        }
        text
    }
}
