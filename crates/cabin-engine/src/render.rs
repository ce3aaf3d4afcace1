//! Frames: what the player sees after each input.

use cabin_world::{Player, Room};
use serde::{Deserialize, Serialize};

/// Prompt shown while waiting for a command.
pub const PROMPT: &str = "> ";
/// Line closing every overlay.
pub const PRESS_ANY_KEY: &str = "Press any key to continue...";

fn is_false(value: &bool) -> bool {
    !*value
}

/// One screenful of output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Lines to print, in order.
    pub lines: Vec<String>,
    /// Clear the screen first.
    #[serde(default, skip_serializing_if = "is_false")]
    pub clear: bool,
    /// Prompt for the next command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Wait for any key before the next frame.
    #[serde(default, skip_serializing_if = "is_false")]
    pub wait_for_key: bool,
    /// The session is over.
    #[serde(default, skip_serializing_if = "is_false")]
    pub game_over: bool,
}

impl Frame {
    /// A frame of plain lines.
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Clear the screen before drawing.
    pub fn cleared(mut self) -> Self {
        self.clear = true;
        self
    }

    /// Ask for a command.
    pub fn prompting(mut self) -> Self {
        self.prompt = Some(PROMPT.to_string());
        self
    }

    /// Wait for a key.
    pub fn waiting(mut self) -> Self {
        self.wait_for_key = true;
        self
    }

    /// End the session.
    pub fn final_frame(mut self) -> Self {
        self.game_over = true;
        self
    }

    /// All lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// The opening screen.
pub fn intro() -> Frame {
    Frame::new([
        "You shouldn't have come back.",
        "",
        "It's awake.",
        "",
        "It always has been.",
        "",
        PRESS_ANY_KEY,
    ])
    .cleared()
    .waiting()
}

/// The room view: header when the room changed, then feedback and stats.
pub fn room(room: &Room, player: &Player, feedback: &str, room_changed: bool) -> Frame {
    let mut lines = Vec::new();
    if room_changed {
        lines.push(room.name.clone());
        lines.push("-".repeat(room.name.chars().count()));
        lines.push(room.description.clone());
        lines.push(String::new());
    }
    if !feedback.is_empty() {
        if !room_changed {
            lines.push(String::new());
        }
        lines.extend(feedback.lines().map(str::to_string));
        lines.push(String::new());
    }
    lines.push(format!("Health: {}    Fear: {}", player.health, player.fear));
    lines.push(String::new());
    lines.push("What would you like to do?".to_string());
    let mut frame = Frame::new(lines).prompting();
    frame.clear = room_changed;
    frame
}

/// A full-screen interlude dismissed by any key.
pub fn overlay(header: &str, body: impl IntoIterator<Item = String>) -> Frame {
    let mut lines = vec![header.to_string(), String::new()];
    lines.extend(body);
    lines.push(String::new());
    lines.push(PRESS_ANY_KEY.to_string());
    Frame::new(lines).cleared().waiting()
}

/// A quest's opening text.
pub fn quest_opened(text: &str) -> Frame {
    overlay(
        "*You take a breath and focus...*",
        text.lines().map(str::to_string),
    )
}

/// The quest screen.
pub fn quest_screen(text: &str) -> Frame {
    quest_opened(text)
}

/// The map screen.
pub fn map_screen(map_text: &str) -> Frame {
    overlay(
        "*You close your eyes and retrace your steps...*",
        map_text.lines().map(str::to_string),
    )
}

/// A cutscene.
pub fn cutscene(paragraphs: Vec<String>) -> Frame {
    let mut lines = paragraphs;
    lines.push(String::new());
    lines.push(PRESS_ANY_KEY.to_string());
    Frame::new(lines).cleared().waiting()
}

/// The last frame of a session.
pub fn ended<S: Into<String>>(lines: impl IntoIterator<Item = S>, clear: bool) -> Frame {
    let mut frame = Frame::new(lines).final_frame();
    frame.clear = clear;
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_room() -> Room {
        Room::new("shed", "Shed", "A shed.")
    }

    #[test]
    fn intro_text() {
        let frame = intro();
        assert!(frame.clear && frame.wait_for_key && !frame.game_over);
        insta::assert_snapshot!(frame.text(), @r"
        You shouldn't have come back.

        It's awake.

        It always has been.

        Press any key to continue...
        ");
    }

    #[test]
    fn new_room_gets_a_header() {
        let frame = room(&test_room(), &Player::new(), "", true);
        assert_eq!(
            frame.lines,
            vec![
                "Shed",
                "----",
                "A shed.",
                "",
                "Health: 100    Fear: 0",
                "",
                "What would you like to do?",
            ]
        );
        assert!(frame.clear);
        assert_eq!(frame.prompt.as_deref(), Some(PROMPT));
    }

    #[test]
    fn same_room_shows_feedback_only() {
        let frame = room(&test_room(), &Player::new(), "You listen.", false);
        assert_eq!(frame.lines[..3], ["", "You listen.", ""]);
        assert!(!frame.clear);
    }

    #[test]
    fn false_flags_are_omitted() {
        let json = serde_json::to_value(Frame::new(["hi"]).prompting()).unwrap_or_default();
        assert_eq!(json, serde_json::json!({"lines": ["hi"], "prompt": "> "}));
    }
}
