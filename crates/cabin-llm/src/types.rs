//! Chat-completions wire types.

use serde::{Deserialize, Serialize};

/// A chat-completions request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model name.
    pub model: String,
    /// Conversation so far.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Ask for a JSON object reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`.
    pub role: String,
    /// Text content. Absent on some tool-call replies.
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatMessage {
    /// A system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: Some(content.into()),
        }
    }

    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.into()),
        }
    }
}

/// Requested reply format.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    /// Format name, `json_object` here.
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    /// A bare JSON object.
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".to_string(),
        }
    }
}

/// A chat-completions response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Candidate replies.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One candidate reply.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The message.
    pub message: ChatMessage,
}

impl ChatResponse {
    /// Content of the first choice, if non-empty.
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_shape() {
        let request = ChatRequest {
            model: "gpt-4.1-mini".into(),
            messages: vec![ChatMessage::system("rules"), ChatMessage::user("{}")],
            temperature: 0.0,
            response_format: Some(ResponseFormat::json_object()),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0], json!({"role": "system", "content": "rules"}));
        assert_eq!(value["response_format"], json!({"type": "json_object"}));
    }

    #[test]
    fn first_content_skips_empty() {
        let reply: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"action\":\"look\"}"}}]
        }))
        .unwrap();
        assert_eq!(reply.first_content().as_deref(), Some("{\"action\":\"look\"}"));

        let empty: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "  "}}]
        }))
        .unwrap();
        assert_eq!(empty.first_content(), None);

        let none: ChatResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(none.first_content(), None);
    }
}
