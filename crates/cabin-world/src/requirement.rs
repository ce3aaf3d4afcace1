//! Entry gates on rooms.

use serde::{Deserialize, Serialize};

use crate::player::Player;
use crate::world_state::WorldState;

/// A condition the player must satisfy to enter a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Requirement {
    /// A world flag must be truthy.
    WorldFlag {
        /// Flag key.
        flag: String,
        /// Denial override.
        message: Option<String>,
    },
    /// The player must carry an item.
    HasItem {
        /// Item name.
        item: String,
        /// Denial override.
        message: Option<String>,
    },
    /// Fear must be strictly below a threshold.
    FearBelow {
        /// Exclusive upper bound.
        threshold: i32,
        /// Denial override.
        message: Option<String>,
    },
}

impl Requirement {
    /// Gate on a world flag.
    pub fn world_flag(flag: impl Into<String>) -> Self {
        Self::WorldFlag {
            flag: flag.into(),
            message: None,
        }
    }

    /// Gate on a carried item.
    pub fn has_item(item: impl Into<String>) -> Self {
        Self::HasItem {
            item: item.into(),
            message: None,
        }
    }

    /// Gate on fear.
    pub fn fear_below(threshold: i32) -> Self {
        Self::FearBelow {
            threshold,
            message: None,
        }
    }

    /// Replace the default denial line.
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            Self::WorldFlag { message, .. }
            | Self::HasItem { message, .. }
            | Self::FearBelow { message, .. } => *message = Some(text.into()),
        }
        self
    }

    /// Evaluate the gate.
    pub fn is_met(&self, player: &Player, world_state: &WorldState) -> bool {
        match self {
            Self::WorldFlag { flag, .. } => world_state.is_set(flag),
            Self::HasItem { item, .. } => player.has_item(item),
            Self::FearBelow { threshold, .. } => player.fear < *threshold,
        }
    }

    /// In-world line shown when the gate holds the player back.
    pub fn denial_text(&self) -> String {
        let (message, default) = match self {
            Self::WorldFlag { message, .. } => (
                message,
                "You try, but it doesn't give. Something essential isn't in place yet.",
            ),
            Self::HasItem { message, .. } => {
                (message, "You pat your pockets. Empty. Not like this.")
            }
            Self::FearBelow { message, .. } => (
                message,
                "Your nerves spike. Your feet won't move. You breathe, but it doesn't help.",
            ),
        };
        message.clone().unwrap_or_else(|| default.to_string())
    }
}
