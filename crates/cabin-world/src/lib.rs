//! World model for The Cabin.
//!
//! Rooms connected by named exits, the items and wildlife that populate them,
//! the player, and the shared world flags that actions and quests read and
//! write. The content of the Cabin itself lives in [`content`].

/// The Cabin's rooms, items and wildlife pool.
pub mod content;
/// Error types for the world model.
pub mod error;
/// Items and their capabilities.
pub mod item;
/// The room graph and player position.
pub mod map;
/// The player entity.
pub mod player;
/// Entry gates on rooms.
pub mod requirement;
/// Rooms and their contents.
pub mod room;
/// Wildlife and provocation.
pub mod wildlife;
/// Shared environment flags.
pub mod world_state;

pub use error::{WorldError, WorldResult};
pub use item::{Item, ItemTrait, clean_item_name};
pub use map::{GameMap, MoveOutcome};
pub use player::Player;
pub use requirement::Requirement;
pub use room::Room;
pub use wildlife::{Provocation, Reaction, Wildlife, WildlifeTrait};
pub use world_state::{FlagValue, WorldState};
