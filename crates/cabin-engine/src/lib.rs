//! Game engine for The Cabin.
//!
//! Turns free text into a sanitized intent (fast parser, rule resolver, then
//! an optional remote interpreter behind a cache), applies it through a
//! registry of actions, announces what happened on a synchronous event bus
//! that drives quests and cutscenes, and wraps all of it in a session state
//! machine that any transport can drive one message at a time.

/// Actions, their results and the registry.
pub mod actions;
/// Engine configuration.
pub mod config;
/// Interpretation context snapshots.
pub mod context;
/// One-shot cutscenes.
pub mod cutscene;
/// Applying intent side effects.
pub mod effects;
/// Error types for the engine.
pub mod error;
/// Typed events and the bus.
pub mod events;
/// The intent model.
pub mod intent;
/// Layered command interpretation.
pub mod interpreter;
/// Bus listeners for quests and cutscenes.
pub mod listeners;
/// Input classification, parsing and rules.
pub mod parser;
/// Save slots.
pub mod persistence;
/// Websocket message types.
pub mod protocol;
/// Quests and the quest manager.
pub mod quest;
/// Frames and screen layouts.
pub mod render;
/// The turn state machine.
pub mod session;
/// Mutable game state shared with listeners.
pub mod state;

pub use actions::{Action, ActionContext, ActionRegistry, ActionResult, Signal};
pub use config::EngineConfig;
pub use context::InterpretContext;
pub use error::{BackendError, EngineError, EngineResult};
pub use events::{EventBus, EventKind, GameEvent};
pub use intent::{ActionKind, Effects, Intent};
pub use interpreter::{IntentCache, Interpreter, RemoteRequest, SemanticBackend};
pub use persistence::SaveManager;
pub use protocol::{ClientMessage, ServerMessage};
pub use render::Frame;
pub use session::{Phase, Session, TurnReport};
pub use state::GameState;
