//! Shared environment flags.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

const HAS_POWER: &str = "has_power";
const FIRE_LIT: &str = "fire_lit";

/// A flag value in the open-ended side table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// A switch.
    Bool(bool),
    /// A counter.
    Int(i64),
    /// A label.
    Text(String),
}

impl FlagValue {
    /// Truthiness: `true`, non-zero, non-empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FlagValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for FlagValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for FlagValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// World flags: typed fields for the ones the game knows about, plus a side
/// table for quest-local state.
///
/// Serializes as one flat map, so `{"has_power": true, "door_open": 1}` round-trips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, FlagValue>",
    into = "BTreeMap<String, FlagValue>"
)]
pub struct WorldState {
    /// Mains power restored.
    pub has_power: bool,
    /// Fire burning in the hearth.
    pub fire_lit: bool,
    custom: BTreeMap<String, FlagValue>,
}

impl WorldState {
    /// All flags off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a flag. Known flags always have a value.
    pub fn get(&self, key: &str) -> Option<FlagValue> {
        match key {
            HAS_POWER => Some(FlagValue::Bool(self.has_power)),
            FIRE_LIT => Some(FlagValue::Bool(self.fire_lit)),
            _ => self.custom.get(key).cloned(),
        }
    }

    /// Whether a flag is present and truthy.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| v.is_truthy())
    }

    /// Write a flag. Known flags take the value's truthiness.
    pub fn set(&mut self, key: &str, value: impl Into<FlagValue>) {
        let value = value.into();
        match key {
            HAS_POWER => self.has_power = value.is_truthy(),
            FIRE_LIT => self.fire_lit = value.is_truthy(),
            _ => {
                self.custom.insert(key.to_string(), value);
            }
        }
    }

    /// Whether a flag exists. Known flags always exist.
    pub fn contains(&self, key: &str) -> bool {
        matches!(key, HAS_POWER | FIRE_LIT) || self.custom.contains_key(key)
    }

    /// Export every flag as one flat map.
    pub fn to_flags(&self) -> BTreeMap<String, FlagValue> {
        let mut flags = self.custom.clone();
        flags.insert(HAS_POWER.to_string(), FlagValue::Bool(self.has_power));
        flags.insert(FIRE_LIT.to_string(), FlagValue::Bool(self.fire_lit));
        flags
    }

    /// Rebuild from a flat map; unknown keys land in the side table.
    pub fn from_flags(flags: BTreeMap<String, FlagValue>) -> Self {
        let mut state = Self::default();
        for (key, value) in flags {
            state.set(&key, value);
        }
        state
    }
}

impl From<BTreeMap<String, FlagValue>> for WorldState {
    fn from(flags: BTreeMap<String, FlagValue>) -> Self {
        Self::from_flags(flags)
    }
}

impl From<WorldState> for BTreeMap<String, FlagValue> {
    fn from(state: WorldState) -> Self {
        state.to_flags()
    }
}
