//! Websocket messages.

use serde::{Deserialize, Serialize};

use crate::render::Frame;

/// What a client sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A typed command.
    Input {
        /// Raw text.
        text: String,
    },
    /// Acknowledge the current screen.
    Keypress,
}

/// What the server sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A frame to draw.
    Render(Frame),
    /// The last message could not be understood.
    Error {
        /// What went wrong.
        message: String,
    },
}

impl ServerMessage {
    /// An error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Serialize to JSON text.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"type":"error","message":"unserializable frame: {e}"}}"#)
        })
    }
}

impl From<Frame> for ServerMessage {
    fn from(frame: Frame) -> Self {
        Self::Render(frame)
    }
}

/// Parse a client message.
pub fn parse_client_message(text: &str) -> Result<ClientMessage, serde_json::Error> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_both_kinds() {
        assert_eq!(
            parse_client_message(r#"{"type":"input","text":"look"}"#).ok(),
            Some(ClientMessage::Input {
                text: "look".into()
            })
        );
        assert_eq!(
            parse_client_message(r#"{"type":"keypress"}"#).ok(),
            Some(ClientMessage::Keypress)
        );
        assert!(parse_client_message(r#"{"type":"dance"}"#).is_err());
        assert!(parse_client_message("look").is_err());
    }

    #[test]
    fn render_is_flattened() {
        let frame = Frame::new(["The end."]).final_frame();
        let value: serde_json::Value =
            serde_json::from_str(&ServerMessage::from(frame).to_json()).unwrap();
        assert_eq!(
            value,
            json!({"type": "render", "lines": ["The end."], "game_over": true})
        );
    }

    #[test]
    fn errors_carry_a_message() {
        let value: serde_json::Value =
            serde_json::from_str(&ServerMessage::error("bad message").to_json()).unwrap();
        assert_eq!(value, json!({"type": "error", "message": "bad message"}));
    }
}
