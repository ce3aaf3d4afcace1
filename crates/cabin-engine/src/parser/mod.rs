//! Command parsing: raw-input classification, the fast deterministic parser
//! and the broader rule-based resolver.

/// Deterministic fast-path parser.
pub mod command;
/// Meta commands that bypass interpretation.
pub mod input;
/// Synonym and phrase-pattern resolver.
pub mod rules;

pub use command::{Direction, normalize_direction, parse_command};
pub use input::{InputCommand, classify_input};
pub use rules::RuleResolver;
