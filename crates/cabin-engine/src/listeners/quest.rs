//! Feeds events to the quest manager.

use crate::events::{EventBus, EventKind, GameEvent};
use crate::quest::{EventData, Trigger};
use crate::state::{GameState, Notice};

/// Kinds the quest listener subscribes to.
pub const QUEST_EVENTS: [EventKind; 7] = [
    EventKind::PlayerMoved,
    EventKind::FuelGathered,
    EventKind::PowerRestored,
    EventKind::FireLit,
    EventKind::FireAttempt,
    EventKind::LightSwitchUsed,
    EventKind::FireplaceUsed,
];

/// Subscribe the quest listener.
pub fn register(bus: &mut EventBus<GameState>) {
    for kind in QUEST_EVENTS {
        bus.subscribe(kind, on_event);
    }
}

fn on_event(event: &GameEvent, state: &mut GameState) {
    match event {
        GameEvent::PlayerMoved { to_room_id, .. } => {
            trigger(state, Trigger::location(to_room_id.as_str()));
        }
        GameEvent::FuelGathered { .. } => {
            update(state, "fuel_gathered", EventData::action("take_firewood"));
        }
        GameEvent::PowerRestored => {
            trigger(state, Trigger::action("turn_on_lights"));
            update(state, "power_restored", EventData::action("use_circuit_breaker"));
            complete(state);
        }
        GameEvent::FireLit => {
            trigger(state, Trigger::action("light_fire"));
            update(
                state,
                "fire_success",
                EventData::action("light_fire").succeeded(),
            );
            complete(state);
        }
        GameEvent::FireAttempt { .. } => {
            trigger(state, Trigger::action("light_fire"));
            update(state, "fire_no_fuel", EventData::action("light_fire"));
        }
        GameEvent::LightSwitchUsed { has_power: false } => {
            trigger(state, Trigger::action("turn_on_lights"));
        }
        GameEvent::FireplaceUsed { has_fuel: false } => {
            trigger(state, Trigger::action("use_fireplace"));
        }
        _ => {}
    }
}

fn active_id(state: &GameState) -> String {
    state
        .quests
        .active()
        .map(|q| q.id.clone())
        .unwrap_or_default()
}

fn trigger(state: &mut GameState, trigger: Trigger) {
    let Some(opening) = state.quests.trigger(&trigger) else {
        return;
    };
    state.raised.push(GameEvent::QuestTriggered {
        quest_id: active_id(state),
        text: opening.clone(),
    });
    state.notices.push(Notice::QuestOpened(opening));
}

fn update(state: &mut GameState, event: &str, data: EventData) {
    let quest_id = active_id(state);
    let GameState {
        quests,
        player,
        map,
        notices,
        raised,
        ..
    } = state;
    if let Some(text) = quests.check_updates(event, &data, player, &map.world_state) {
        raised.push(GameEvent::QuestUpdated {
            quest_id,
            event: event.to_string(),
            text: text.clone(),
        });
        notices.push(Notice::QuestUpdated(text));
    }
}

fn complete(state: &mut GameState) {
    let quest_id = active_id(state);
    let GameState {
        quests,
        player,
        map,
        notices,
        raised,
        ..
    } = state;
    if let Some(text) = quests.check_completion(player, &map.world_state) {
        raised.push(GameEvent::QuestCompleted {
            quest_id,
            text: text.clone(),
        });
        notices.push(Notice::QuestCompleted(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::quiet_cabin;
    use crate::quest::QuestStatus;
    use crate::quest::catalog::WARM_UP;

    fn test_setup() -> (EventBus<GameState>, GameState) {
        let mut bus = EventBus::new();
        register(&mut bus);
        (bus, GameState::new(quiet_cabin()))
    }

    fn entered(room: &str) -> GameEvent {
        GameEvent::PlayerMoved {
            from_room_id: "cabin_main".into(),
            to_room_id: room.into(),
            direction: "north".into(),
        }
    }

    #[test]
    fn entering_konttori_opens_the_quest_once() {
        let (mut bus, mut state) = test_setup();
        bus.emit(&entered("konttori"), &mut state);
        assert!(matches!(state.drain_notices().as_slice(), [Notice::QuestOpened(_)]));

        bus.emit(&entered("konttori"), &mut state);
        bus.emit(&entered("lakeside"), &mut state);
        assert!(state.notices.is_empty());
        assert_eq!(state.quests.active().map(|q| q.id.as_str()), Some(WARM_UP));
    }

    #[test]
    fn power_opens_updates_then_fire_completes() {
        let (mut bus, mut state) = test_setup();
        state.map.world_state.has_power = true;
        bus.emit(&GameEvent::PowerRestored, &mut state);
        let notices = state.drain_notices();
        assert!(matches!(
            notices.as_slice(),
            [Notice::QuestOpened(_), Notice::QuestUpdated(_)]
        ));

        state.map.world_state.fire_lit = true;
        bus.emit(&GameEvent::FireLit, &mut state);
        let notices = state.drain_notices();
        assert!(matches!(
            notices.as_slice(),
            [Notice::QuestUpdated(_), Notice::QuestCompleted(_)]
        ));
        assert_eq!(
            state.quests.get(WARM_UP).map(|q| q.status),
            Some(QuestStatus::Completed)
        );
    }

    #[test]
    fn quest_progress_is_raised_as_events() {
        let (mut bus, mut state) = test_setup();
        state.map.world_state.has_power = true;
        state.map.world_state.fire_lit = true;
        bus.emit(&GameEvent::PowerRestored, &mut state);

        let raised = state.drain_raised();
        let kinds: Vec<EventKind> = raised.iter().map(GameEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::QuestTriggered,
                EventKind::QuestUpdated,
                EventKind::QuestCompleted,
            ]
        );
        assert!(matches!(
            &raised[1],
            GameEvent::QuestUpdated { quest_id, event, .. }
                if quest_id == WARM_UP && event == "power_restored"
        ));
        assert!(matches!(
            &raised[2],
            GameEvent::QuestCompleted { quest_id, .. } if quest_id == WARM_UP
        ));
    }

    #[test]
    fn nothing_raised_without_progress() {
        let (mut bus, mut state) = test_setup();
        bus.emit(&GameEvent::LightSwitchUsed { has_power: true }, &mut state);
        assert!(state.drain_raised().is_empty());
    }

    #[test]
    fn completion_does_not_depend_on_order() {
        let (mut bus, mut state) = test_setup();
        state.map.world_state.fire_lit = true;
        bus.emit(&GameEvent::FireLit, &mut state);
        state.map.world_state.has_power = true;
        bus.emit(&GameEvent::PowerRestored, &mut state);
        assert!(
            state
                .drain_notices()
                .iter()
                .any(|n| matches!(n, Notice::QuestCompleted(_)))
        );
    }

    #[test]
    fn fire_without_fuel_updates() {
        let (mut bus, mut state) = test_setup();
        let attempt = GameEvent::FireAttempt {
            has_fuel: false,
            has_matches: true,
        };
        bus.emit(&attempt, &mut state);
        assert_eq!(
            state.drain_notices(),
            vec![
                Notice::QuestOpened(crate::quest::catalog::warm_up().opening_text),
                Notice::QuestUpdated("You have no fuel.".into()),
            ]
        );
    }

    #[test]
    fn lights_on_does_not_trigger() {
        let (mut bus, mut state) = test_setup();
        bus.emit(&GameEvent::LightSwitchUsed { has_power: true }, &mut state);
        assert!(state.quests.active().is_none());
        bus.emit(&GameEvent::LightSwitchUsed { has_power: false }, &mut state);
        assert!(state.quests.active().is_some());
    }
}
