//! The normalized command representation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Every action the engine can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Follow an exit (`direction`).
    Move,
    /// Describe the room.
    Look,
    /// Describe what can be heard.
    Listen,
    /// Pick up an item (`item`).
    Take,
    /// Put down an item (`item`).
    Drop,
    /// List carried items.
    Inventory,
    /// Throw an item (`item`, optional `target`).
    Throw,
    /// Use an item (`item`).
    Use,
    /// Flip the breaker in the current room.
    UseCircuitBreaker,
    /// Flip the light switch in the current room.
    TurnOnLights,
    /// Light something (`target`).
    Light,
    /// Explain what the player can do.
    Help,
    /// Nothing actionable.
    None,
}

impl ActionKind {
    /// All kinds in dispatch-table order.
    pub const ALL: [ActionKind; 13] = [
        Self::Move,
        Self::Look,
        Self::Listen,
        Self::Take,
        Self::Drop,
        Self::Inventory,
        Self::Throw,
        Self::Use,
        Self::UseCircuitBreaker,
        Self::TurnOnLights,
        Self::Light,
        Self::Help,
        Self::None,
    ];

    /// Registry name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Look => "look",
            Self::Listen => "listen",
            Self::Take => "take",
            Self::Drop => "drop",
            Self::Inventory => "inventory",
            Self::Throw => "throw",
            Self::Use => "use",
            Self::UseCircuitBreaker => "use_circuit_breaker",
            Self::TurnOnLights => "turn_on_lights",
            Self::Light => "light",
            Self::Help => "help",
            Self::None => "none",
        }
    }

    /// Parse a registry name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggested stat and inventory changes riding along with an intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Effects {
    /// Fear delta, within `[-2, 2]` once sanitized.
    pub fear: i32,
    /// Health delta, within `[-2, 2]` once sanitized.
    pub health: i32,
    /// Items to move from the room into the bag.
    pub inventory_add: Vec<String>,
    /// Items to take out of the bag.
    pub inventory_remove: Vec<String>,
}

impl Effects {
    /// No change at all.
    pub fn is_empty(&self) -> bool {
        self.fear == 0
            && self.health == 0
            && self.inventory_add.is_empty()
            && self.inventory_remove.is_empty()
    }
}

/// What the player meant, resolved fresh every turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Action to dispatch.
    pub action: ActionKind,
    /// Action arguments (`direction`, `item`, `target`).
    pub args: BTreeMap<String, String>,
    /// Resolution confidence in `[0, 1]`.
    pub confidence: f32,
    /// Ready-made in-world line; replaces the action's own feedback.
    pub reply: Option<String>,
    /// Suggested side effects.
    pub effects: Option<Effects>,
    /// Debug explanation.
    pub rationale: Option<String>,
}

impl Intent {
    /// An intent with no arguments.
    pub fn new(action: ActionKind, confidence: f32) -> Self {
        Self {
            action,
            args: BTreeMap::new(),
            confidence,
            reply: None,
            effects: None,
            rationale: None,
        }
    }

    /// The neutral fallback: `none` with zero confidence.
    pub fn none() -> Self {
        Self::new(ActionKind::None, 0.0)
    }

    /// Add an argument.
    pub fn with_arg(mut self, key: &str, value: impl Into<String>) -> Self {
        self.args.insert(key.to_string(), value.into());
        self
    }

    /// Attach a reply line.
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Some(reply.into());
        self
    }

    /// Attach effects.
    pub fn with_effects(mut self, effects: Effects) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Attach a rationale.
    pub fn with_rationale(mut self, why: impl Into<String>) -> Self {
        self.rationale = Some(why.into());
        self
    }

    /// A non-empty argument.
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// The reply, if it has any text.
    pub fn reply_text(&self) -> Option<&str> {
        self.reply
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}
