//! Everything a session mutates during a turn.

use cabin_world::{GameMap, Player};

use crate::cutscene::CutsceneManager;
use crate::events::GameEvent;
use crate::quest::QuestManager;

/// Something a listener wants shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A quest started; its opening text.
    QuestOpened(String),
    /// The active quest moved on.
    QuestUpdated(String),
    /// The active quest finished.
    QuestCompleted(String),
    /// A cutscene played; its paragraphs.
    Cutscene(Vec<String>),
}

/// Game state handed to bus listeners.
#[derive(Debug, Clone)]
pub struct GameState {
    /// The player.
    pub player: Player,
    /// Rooms, position and world flags.
    pub map: GameMap,
    /// Quest progress.
    pub quests: QuestManager,
    /// Cutscene latches.
    pub cutscenes: CutsceneManager,
    /// Listener output not yet shown.
    pub notices: Vec<Notice>,
    /// Events raised by listeners, emitted once the current event is done.
    pub raised: Vec<GameEvent>,
}

impl GameState {
    /// A fresh game on `map` with the Cabin's quests and cutscenes.
    pub fn new(map: GameMap) -> Self {
        Self {
            player: Player::new(),
            map,
            quests: QuestManager::with_catalog(),
            cutscenes: CutsceneManager::with_catalog(),
            notices: Vec::new(),
            raised: Vec::new(),
        }
    }

    /// Take every pending notice.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Take every event raised by listeners.
    pub fn drain_raised(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.raised)
    }
}
