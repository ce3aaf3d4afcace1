//! Actions: named handlers that execute an intent against the world.
//!
//! An action never fails loudly. A recognized but unsatisfiable command is an
//! [`ActionResult`] with `success == false` and in-world feedback.

pub mod help;
pub mod inventory;
pub mod light;
pub mod movement;
pub mod observe;
pub mod registry;
pub mod throw;
pub mod use_item;

use cabin_world::{GameMap, Player, Reaction, Room, WorldState};

use crate::intent::Intent;

pub use registry::ActionRegistry;

/// Side-effect tags an action reports; the session turns them into events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The player changed rooms.
    PlayerMoved,
    /// The player arrived somewhere.
    EnteredRoom,
    /// An item went into the bag.
    ItemTaken,
    /// Firewood went into the bag.
    FuelGathered,
    /// An item left the bag onto the floor.
    ItemDropped,
    /// An item was thrown.
    ItemThrown,
    /// A thrown item hit an animal.
    WildlifeProvoked,
    /// The animal attacked back.
    WildlifeAttack,
    /// The animal left.
    WildlifeFled,
    /// Thrown with nothing to aim at.
    ThrownIntoDarkness,
    /// The breaker was reset.
    PowerRestored,
    /// An item was used.
    ItemUsed,
    /// The fire caught.
    FireLit,
    /// Lighting attempt succeeded.
    FireSuccess,
    /// Matches struck with nothing to burn.
    FireNoFuel,
    /// The lights came on.
    LightsOn,
    /// The switch was flipped without power.
    UseLightSwitchNoPower,
    /// The fireplace was examined with fuel at hand.
    UseFireplace,
    /// The fireplace was examined without fuel.
    UseFireplaceNoFuel,
}

impl Signal {
    /// Event name for this signal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlayerMoved => "player_moved",
            Self::EnteredRoom => "entered_room",
            Self::ItemTaken => "item_taken",
            Self::FuelGathered => "fuel_gathered",
            Self::ItemDropped => "item_dropped",
            Self::ItemThrown => "item_thrown",
            Self::WildlifeProvoked => "wildlife_provoked",
            Self::WildlifeAttack => "wildlife_attack",
            Self::WildlifeFled => "wildlife_fled",
            Self::ThrownIntoDarkness => "thrown_into_darkness",
            Self::PowerRestored => "power_restored",
            Self::ItemUsed => "item_used",
            Self::FireLit => "fire_lit",
            Self::FireSuccess => "fire_success",
            Self::FireNoFuel => "fire_no_fuel",
            Self::LightsOn => "lights_on",
            Self::UseLightSwitchNoPower => "use_light_switch_no_power",
            Self::UseFireplace => "use_fireplace",
            Self::UseFireplaceNoFuel => "use_fireplace_no_fuel",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts an action records for listeners and the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateChanges {
    /// Room left.
    pub from_room_id: Option<String>,
    /// Room entered.
    pub to_room_id: Option<String>,
    /// Exit taken.
    pub direction: Option<String>,
    /// Item involved.
    pub item_name: Option<String>,
    /// Animal involved.
    pub target: Option<String>,
    /// How the animal reacted.
    pub reaction: Option<Reaction>,
    /// Health lost.
    pub health_damage: i32,
    /// Fear gained.
    pub fear_increase: i32,
    /// New power state.
    pub has_power: Option<bool>,
    /// New fire state.
    pub fire_lit: Option<bool>,
}

impl StateChanges {
    /// Changes naming a single item.
    pub fn item(name: impl Into<String>) -> Self {
        Self {
            item_name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Outcome of one action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    /// Whether the action did what was asked.
    pub success: bool,
    /// In-world text; may be empty (movement lets the room speak).
    pub feedback: String,
    /// Signals in emission order.
    pub events: Vec<Signal>,
    /// Recorded facts.
    pub state_changes: StateChanges,
}

impl ActionResult {
    /// A successful result.
    pub fn success(feedback: impl Into<String>) -> Self {
        Self {
            success: true,
            feedback: feedback.into(),
            events: Vec::new(),
            state_changes: StateChanges::default(),
        }
    }

    /// A failed result. Failures carry no signals.
    pub fn failure(feedback: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::success(feedback)
        }
    }

    /// Attach signals.
    pub fn with_signals(mut self, signals: impl IntoIterator<Item = Signal>) -> Self {
        self.events.extend(signals);
        self
    }

    /// Attach state changes.
    pub fn with_changes(mut self, changes: StateChanges) -> Self {
        self.state_changes = changes;
        self
    }

    /// Whether a signal was raised.
    pub fn has_signal(&self, signal: Signal) -> bool {
        self.events.contains(&signal)
    }
}

/// What an action may touch.
pub struct ActionContext<'a> {
    /// The player.
    pub player: &'a mut Player,
    /// The world.
    pub map: &'a mut GameMap,
    /// The resolved command.
    pub intent: &'a Intent,
}

impl<'a> ActionContext<'a> {
    /// Bundle the pieces.
    pub fn new(player: &'a mut Player, map: &'a mut GameMap, intent: &'a Intent) -> Self {
        Self {
            player,
            map,
            intent,
        }
    }

    /// A non-empty intent argument.
    pub fn arg(&self, key: &str) -> Option<&'a str> {
        let intent: &'a Intent = self.intent;
        intent.arg(key)
    }

    /// The current room.
    pub fn room(&mut self) -> &mut Room {
        self.map.current_room_mut()
    }

    /// World flags.
    pub fn world_state(&mut self) -> &mut WorldState {
        &mut self.map.world_state
    }
}

/// A named handler for one [`crate::intent::ActionKind`].
pub trait Action: Send + Sync {
    /// Registry name; matches [`crate::intent::ActionKind::as_str`].
    fn name(&self) -> &str;

    /// Run against the context.
    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult;
}
