//! Typed game events, the bus that dispatches them, and the translation from
//! action signals.

pub mod bus;
pub mod translate;

use cabin_world::Reaction;

pub use bus::{EventBus, SubscriptionId};
pub use translate::{apply_consequences, to_events};

/// What kind of event occurred; the bus dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// See [`GameEvent::PlayerMoved`].
    PlayerMoved,
    /// See [`GameEvent::ItemTaken`].
    ItemTaken,
    /// See [`GameEvent::ItemDropped`].
    ItemDropped,
    /// See [`GameEvent::ItemThrown`].
    ItemThrown,
    /// See [`GameEvent::FuelGathered`].
    FuelGathered,
    /// See [`GameEvent::PowerRestored`].
    PowerRestored,
    /// See [`GameEvent::FireLit`].
    FireLit,
    /// See [`GameEvent::FireAttempt`].
    FireAttempt,
    /// See [`GameEvent::LightSwitchUsed`].
    LightSwitchUsed,
    /// See [`GameEvent::FireplaceUsed`].
    FireplaceUsed,
    /// See [`GameEvent::WildlifeProvoked`].
    WildlifeProvoked,
    /// See [`GameEvent::QuestTriggered`].
    QuestTriggered,
    /// See [`GameEvent::QuestUpdated`].
    QuestUpdated,
    /// See [`GameEvent::QuestCompleted`].
    QuestCompleted,
}

/// Something that happened during a turn, with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The player walked through an exit.
    PlayerMoved {
        /// Room left.
        from_room_id: String,
        /// Room entered.
        to_room_id: String,
        /// Exit taken.
        direction: String,
    },
    /// An item went into the bag.
    ItemTaken {
        /// The item.
        item_name: String,
        /// Where it was.
        room_id: String,
    },
    /// An item was put down.
    ItemDropped {
        /// The item.
        item_name: String,
        /// Where it now lies.
        room_id: String,
    },
    /// An item was thrown.
    ItemThrown {
        /// The item.
        item_name: String,
        /// The animal aimed at, if it was there.
        target: Option<String>,
        /// Thrown at nothing.
        into_darkness: bool,
    },
    /// Firewood was picked up.
    FuelGathered {
        /// The item.
        item_name: String,
    },
    /// The breaker was reset.
    PowerRestored,
    /// The fire caught.
    FireLit,
    /// Matches were struck with nothing to burn.
    FireAttempt {
        /// Firewood was at hand.
        has_fuel: bool,
        /// Matches were at hand.
        has_matches: bool,
    },
    /// The light switch was flipped.
    LightSwitchUsed {
        /// Whether the lights came on.
        has_power: bool,
    },
    /// The fireplace was examined or tried without fuel.
    FireplaceUsed {
        /// Firewood was at hand.
        has_fuel: bool,
    },
    /// A thrown item hit an animal.
    WildlifeProvoked {
        /// The animal.
        wildlife_name: String,
        /// How it reacted.
        reaction: Reaction,
        /// Health lost.
        health_damage: i32,
        /// Fear gained.
        fear_increase: i32,
    },
    /// A quest became active.
    QuestTriggered {
        /// The quest.
        quest_id: String,
        /// Its opening text.
        text: String,
    },
    /// The active quest recorded progress.
    QuestUpdated {
        /// The quest.
        quest_id: String,
        /// The named quest event that matched.
        event: String,
        /// The update text.
        text: String,
    },
    /// The active quest finished.
    QuestCompleted {
        /// The quest.
        quest_id: String,
        /// Its completion text.
        text: String,
    },
}

impl GameEvent {
    /// Dispatch key.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PlayerMoved { .. } => EventKind::PlayerMoved,
            Self::ItemTaken { .. } => EventKind::ItemTaken,
            Self::ItemDropped { .. } => EventKind::ItemDropped,
            Self::ItemThrown { .. } => EventKind::ItemThrown,
            Self::FuelGathered { .. } => EventKind::FuelGathered,
            Self::PowerRestored => EventKind::PowerRestored,
            Self::FireLit => EventKind::FireLit,
            Self::FireAttempt { .. } => EventKind::FireAttempt,
            Self::LightSwitchUsed { .. } => EventKind::LightSwitchUsed,
            Self::FireplaceUsed { .. } => EventKind::FireplaceUsed,
            Self::WildlifeProvoked { .. } => EventKind::WildlifeProvoked,
            Self::QuestTriggered { .. } => EventKind::QuestTriggered,
            Self::QuestUpdated { .. } => EventKind::QuestUpdated,
            Self::QuestCompleted { .. } => EventKind::QuestCompleted,
        }
    }
}
