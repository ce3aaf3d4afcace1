//! Meta commands that bypass interpretation.

use crate::context::normalize_input;

/// Words that end the session.
pub const QUIT_WORDS: &[&str] = &["quit", "exit", "q!"];
/// Words that open the quest screen when typed alone.
pub const QUEST_WORDS: &[&str] = &["q", "quest", "quests"];
/// Words that open the map screen when typed alone.
pub const MAP_WORDS: &[&str] = &["m", "map"];
/// Words that load a slot.
pub const LOAD_WORDS: &[&str] = &["load", "restore"];
/// Slot used when save or load is typed without a name.
pub const DEFAULT_SLOT: &str = "autosave";

/// What a line of raw input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Leave the game.
    Quit,
    /// Show the quest screen.
    QuestScreen,
    /// Show the map screen.
    MapScreen,
    /// Save to a slot.
    Save(String),
    /// Load from a slot.
    Load(String),
    /// Play the text as a game action.
    Action(String),
}

/// Classify raw input before it reaches the interpreter.
pub fn classify_input(raw: &str) -> InputCommand {
    let text = normalize_input(raw);
    let words: Vec<&str> = text.split(' ').filter(|w| !w.is_empty()).collect();
    match words.as_slice() {
        [w] if QUIT_WORDS.contains(w) => InputCommand::Quit,
        [w] if QUEST_WORDS.contains(w) => InputCommand::QuestScreen,
        [w] if MAP_WORDS.contains(w) => InputCommand::MapScreen,
        ["save"] => InputCommand::Save(DEFAULT_SLOT.to_string()),
        [w] if LOAD_WORDS.contains(w) => InputCommand::Load(DEFAULT_SLOT.to_string()),
        ["save", slot] => InputCommand::Save((*slot).to_string()),
        [w, slot] if LOAD_WORDS.contains(w) => InputCommand::Load((*slot).to_string()),
        _ => InputCommand::Action(raw.trim().to_string()),
    }
}
