//! Bus listeners wiring events to quests and cutscenes.

pub mod cutscene;
pub mod quest;

use crate::events::EventBus;
use crate::state::GameState;

/// A bus with every standard listener subscribed, quests first.
pub fn standard_bus() -> EventBus<GameState> {
    let mut bus = EventBus::new();
    quest::register(&mut bus);
    cutscene::register(&mut bus);
    bus
}
