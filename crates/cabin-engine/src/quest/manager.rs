//! Tracks every quest and the single active one.

use cabin_world::{Player, WorldState};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{EventData, Quest, QuestStatus, Trigger};

/// The persistent part of quest progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestSnapshot {
    /// Id of the active quest.
    #[serde(rename = "active_quest_id")]
    pub active: Option<String>,
    /// Ids of completed quests, in completion order.
    #[serde(rename = "completed_quests")]
    pub completed: Vec<String>,
}

/// Owns the quest catalogue. At most one quest is active at a time.
#[derive(Debug, Clone, Default)]
pub struct QuestManager {
    quests: Vec<Quest>,
    active: Option<usize>,
    completed: Vec<String>,
}

impl QuestManager {
    /// A manager over the given quests, all inactive.
    pub fn new(quests: Vec<Quest>) -> Self {
        Self {
            quests,
            active: None,
            completed: Vec::new(),
        }
    }

    /// The Cabin's quests.
    pub fn with_catalog() -> Self {
        Self::new(super::catalog::all_quests())
    }

    /// The active quest, if any.
    pub fn active(&self) -> Option<&Quest> {
        self.active.and_then(|idx| self.quests.get(idx))
    }

    /// Look a quest up by id.
    pub fn get(&self, id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    /// Ids of completed quests.
    pub fn completed(&self) -> &[String] {
        &self.completed
    }

    /// Offer a trigger. Activates the first inactive quest it matches and
    /// returns that quest's opening text. Does nothing while a quest is
    /// active.
    pub fn trigger(&mut self, trigger: &Trigger) -> Option<String> {
        if self.active.is_some() {
            return None;
        }
        let idx = self.quests.iter().position(|q| q.matches_trigger(trigger))?;
        let quest = &mut self.quests[idx];
        quest.status = QuestStatus::Active;
        self.active = Some(idx);
        info!(quest = %quest.id, ?trigger, "quest started");
        Some(quest.opening_text.clone())
    }

    /// Offer a named event to the active quest. Returns the update text when
    /// a rule applies.
    pub fn check_updates(
        &mut self,
        event: &str,
        data: &EventData,
        player: &Player,
        world: &WorldState,
    ) -> Option<String> {
        let quest = self.active.and_then(|idx| self.quests.get_mut(idx))?;
        let text = quest.update_for(event, data, player, world)?.to_string();
        quest.add_note(event, text.clone());
        info!(quest = %quest.id, event, "quest updated");
        Some(text)
    }

    /// Complete the active quest if its condition holds. Returns the
    /// completion text exactly once.
    pub fn check_completion(&mut self, player: &Player, world: &WorldState) -> Option<String> {
        let idx = self.active?;
        let quest = self.quests.get_mut(idx)?;
        if !quest.is_complete(player, world) {
            return None;
        }
        quest.status = QuestStatus::Completed;
        quest.completed_at = Some(Utc::now());
        self.active = None;
        self.completed.push(quest.id.clone());
        info!(quest = %quest.id, "quest completed");
        Some(quest.completion_text.clone())
    }

    /// Quest screen text.
    pub fn display_active(&self) -> String {
        match self.active() {
            Some(quest) => quest.display_text(),
            None => "You have no active quest. When a quest appears, it'll be shown here."
                .to_string(),
        }
    }

    /// Progress for saving.
    pub fn snapshot(&self) -> QuestSnapshot {
        QuestSnapshot {
            active: self.active().map(|q| q.id.clone()),
            completed: self.completed.clone(),
        }
    }

    /// Reapply saved progress. Unknown ids are ignored.
    pub fn restore(&mut self, snapshot: &QuestSnapshot) {
        self.active = None;
        self.completed.clear();
        for quest in &mut self.quests {
            quest.status = QuestStatus::Inactive;
            quest.notes.clear();
            quest.completed_at = None;
        }
        for id in &snapshot.completed {
            if let Some(quest) = self.quests.iter_mut().find(|q| &q.id == id) {
                quest.status = QuestStatus::Completed;
                self.completed.push(id.clone());
            }
        }
        if let Some(id) = &snapshot.active {
            let idx = self
                .quests
                .iter()
                .position(|q| &q.id == id && q.status == QuestStatus::Inactive);
            if let Some(idx) = idx {
                self.quests[idx].status = QuestStatus::Active;
                self.active = Some(idx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::catalog::WARM_UP;

    #[test]
    fn one_active_quest_at_a_time() {
        let mut quests = QuestManager::with_catalog();
        let mut second = Quest::new("second", "Second");
        second.triggers = vec![Trigger::location("konttori")];
        quests.quests.push(second);

        let opening = quests.trigger(&Trigger::location("konttori"));
        assert!(opening.is_some_and(|t| t.contains("circuit breaker")));
        assert_eq!(quests.active().map(|q| q.id.as_str()), Some(WARM_UP));

        assert_eq!(quests.trigger(&Trigger::location("konttori")), None);
        assert_eq!(quests.get("second").map(|q| q.status), Some(QuestStatus::Inactive));
    }

    #[test]
    fn unmatched_trigger_does_nothing() {
        let mut quests = QuestManager::with_catalog();
        assert_eq!(quests.trigger(&Trigger::location("cabin_main")), None);
        assert!(quests.active().is_none());
    }

    #[test]
    fn updates_are_recorded() {
        let mut quests = QuestManager::with_catalog();
        let (player, world) = (Player::new(), WorldState::new());
        let data = EventData::action("use_circuit_breaker");
        assert_eq!(quests.check_updates("power_restored", &data, &player, &world), None);

        quests.trigger(&Trigger::action("turn_on_lights"));
        assert!(quests.check_updates("power_restored", &data, &player, &world).is_some());
        assert!(quests.display_active().contains("**Updates:**"));
    }

    #[test]
    fn completes_exactly_once() {
        let mut quests = QuestManager::with_catalog();
        let player = Player::new();
        let mut world = WorldState::new();
        quests.trigger(&Trigger::location("lakeside"));
        assert_eq!(quests.check_completion(&player, &world), None);

        world.has_power = true;
        world.fire_lit = true;
        assert!(quests.check_completion(&player, &world).is_some());
        assert_eq!(quests.check_completion(&player, &world), None);
        assert_eq!(quests.completed(), [WARM_UP.to_string()]);
        assert_eq!(quests.trigger(&Trigger::location("lakeside")), None);
        assert!(quests.display_active().starts_with("You have no active quest"));
    }

    #[test]
    fn snapshot_restores() {
        let mut quests = QuestManager::with_catalog();
        quests.trigger(&Trigger::location("konttori"));
        let snapshot = quests.snapshot();
        assert_eq!(snapshot.active.as_deref(), Some(WARM_UP));

        let mut fresh = QuestManager::with_catalog();
        fresh.restore(&snapshot);
        assert_eq!(fresh.active().map(|q| q.id.as_str()), Some(WARM_UP));

        fresh.restore(&QuestSnapshot {
            active: Some("missing".into()),
            completed: vec![WARM_UP.into(), "missing".into()],
        });
        assert!(fresh.active().is_none());
        assert_eq!(fresh.completed(), [WARM_UP.to_string()]);
    }
}
