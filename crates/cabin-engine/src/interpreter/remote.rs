//! The remote interpretation seam: request shape, backend trait and reply
//! extraction.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::context::InterpretContext;
use crate::error::BackendError;

/// A prompt ready to send: system instructions plus a JSON user payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRequest {
    /// Instructions for the model.
    pub system: String,
    /// Serialized [`UserPayload`].
    pub user: String,
}

/// What the model is told about the player's surroundings.
#[derive(Debug, Serialize)]
pub struct UserPayload<'a> {
    /// Current room.
    pub room_name: &'a str,
    /// Valid exits.
    pub exits: &'a [String],
    /// Items lying here.
    pub room_items: &'a [String],
    /// Visible animals.
    pub room_wildlife: &'a [String],
    /// Carried items.
    pub inventory: &'a [String],
    /// World flags.
    pub world_flags: &'a std::collections::BTreeMap<String, cabin_world::FlagValue>,
    /// What the player typed.
    pub input: &'a str,
}

/// Something that can turn a [`RemoteRequest`] into raw reply text.
#[async_trait]
pub trait SemanticBackend: Send + Sync {
    /// Send the request and return the model's message content.
    async fn complete(&self, request: &RemoteRequest) -> Result<String, BackendError>;

    /// Short name for logs.
    fn name(&self) -> &str {
        "remote"
    }
}

/// Build the prompt for one input.
pub fn build_request(ctx: &InterpretContext, input: &str) -> RemoteRequest {
    let payload = UserPayload {
        room_name: &ctx.room_name,
        exits: &ctx.exits,
        room_items: &ctx.room_items,
        room_wildlife: &ctx.room_wildlife,
        inventory: &ctx.inventory,
        world_flags: &ctx.world_flags,
        input,
    };
    RemoteRequest {
        system: system_prompt(ctx),
        user: serde_json::to_string(&payload).unwrap_or_default(),
    }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn system_prompt(ctx: &InterpretContext) -> String {
    let actions: Vec<&str> = ctx.allowed_actions.iter().map(|a| a.as_str()).collect();
    format!(
        "You interpret a player's command in a quiet, cold horror text adventure set \
         in the Finnish wilderness. Reply with exactly one JSON object and nothing else:\n\
         {{\"action\": string, \"args\": object, \"confidence\": number 0-1, \
         \"reply\": string (max 140 characters, second person, in-world), \
         \"effects\": {{\"fear\": int -2..2, \"health\": int -2..2, \
         \"inventory_add\": [string], \"inventory_remove\": [string]}}, \
         \"rationale\": string}}\n\
         Allowed actions: {actions}.\n\
         Use args.direction for move, args.item for take/drop/use/throw, \
         args.target for throw and light.\n\
         Exits here: {exits}. Items here: {items}. Animals here: {wildlife}. \
         Carried: {inventory}.\n\
         Never mention anything not listed. If nothing fits, use \"none\" with a short \
         in-world reply. Never break the fiction.",
        actions = actions.join(", "),
        exits = list_or_none(&ctx.exits),
        items = list_or_none(&ctx.room_items),
        wildlife = list_or_none(&ctx.room_wildlife),
        inventory = list_or_none(&ctx.inventory),
    )
}

/// Strip markdown code fences from a reply.
pub fn strip_code_blocks(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Pull the JSON object out of a reply, tolerating code fences and prose
/// around it.
pub fn parse_reply(raw: &str) -> Result<Map<String, Value>, BackendError> {
    let text = strip_code_blocks(raw);
    if text.is_empty() {
        return Err(BackendError::EmptyReply);
    }
    if let Ok(Value::Object(map)) = serde_json::from_str(text) {
        return Ok(map);
    }
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return Err(BackendError::Malformed("no JSON object in reply".into()));
    };
    if end < start {
        return Err(BackendError::Malformed("no JSON object in reply".into()));
    }
    match serde_json::from_str(&text[start..=end]) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(BackendError::Malformed("reply is not an object".into())),
        Err(e) => Err(BackendError::Malformed(e.to_string())),
    }
}
