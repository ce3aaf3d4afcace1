//! Wildlife and provocation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Health lost when an animal attacks.
pub const ATTACK_DAMAGE: i32 = 15;
/// Fear gained when an animal attacks.
pub const ATTACK_FEAR: i32 = 10;

/// A behaviour or flavour tag on an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WildlifeTrait {
    /// Wanders off when provoked.
    Docile,
    /// Attacks once when provoked.
    Vicious,
    /// Flees when provoked.
    Skittish,
    /// Background presence.
    Ambient,
    /// Large.
    Massive,
    /// Cannot be seen.
    Elusive,
    /// Cannot be heard.
    Silent,
    /// Curious.
    Curious,
    /// Fast.
    Fast,
    /// Hunts in packs.
    Pack,
    /// Keeps to itself.
    Solitary,
    /// Hard to hurt.
    Tough,
    /// Hunts.
    Predatory,
    /// Lives in the trees.
    Arboreal,
    /// Steals.
    Thief,
    /// Watches.
    Watchful,
    /// Active at night.
    Nocturnal,
    /// An omen.
    Symbolic,
    /// Startles when approached.
    Startling,
}

/// How an animal responds to provocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    /// Lunges at the player.
    Attack,
    /// Runs away.
    Flee,
    /// Drifts away.
    Wander,
    /// Does nothing.
    Ignore,
}

impl Reaction {
    /// Tag name for this reaction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Flee => "flee",
            Self::Wander => "wander",
            Self::Ignore => "ignore",
        }
    }
}

/// Outcome of [`Wildlife::provoke`].
#[derive(Debug, Clone, PartialEq)]
pub struct Provocation {
    /// The reaction.
    pub reaction: Reaction,
    /// Narration of the reaction.
    pub message: String,
    /// Health the player loses.
    pub health_damage: i32,
    /// Fear the player gains.
    pub fear_increase: i32,
    /// Whether the animal leaves the room.
    pub remove_from_room: bool,
}

/// An animal that can appear in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wildlife {
    /// Name, also the lookup key (e.g. "brown bear").
    pub name: String,
    /// Close-up description.
    pub description: String,
    /// Behaviour tags.
    pub traits: BTreeSet<WildlifeTrait>,
    /// Heard when listening.
    pub sound_description: String,
    /// Seen when looking.
    pub visual_description: String,
    /// Latched after the first attack.
    pub has_attacked: bool,
}

impl Wildlife {
    /// Create an animal with default sound and sight lines.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            sound_description: format!("You hear a {name} nearby."),
            visual_description: format!("A {name} is visible in the area."),
            name,
            description: description.into(),
            traits: BTreeSet::new(),
            has_attacked: false,
        }
    }

    /// Add behaviour tags.
    pub fn with_traits(mut self, traits: impl IntoIterator<Item = WildlifeTrait>) -> Self {
        self.traits.extend(traits);
        self
    }

    /// Set what the animal sounds like.
    pub fn with_sound(mut self, text: impl Into<String>) -> Self {
        self.sound_description = text.into();
        self
    }

    /// Set what the animal looks like.
    pub fn with_visual(mut self, text: impl Into<String>) -> Self {
        self.visual_description = text.into();
        self
    }

    /// Check for a behaviour tag.
    pub fn has_trait(&self, t: WildlifeTrait) -> bool {
        self.traits.contains(&t)
    }

    /// Visible unless elusive.
    pub fn is_visible(&self) -> bool {
        !self.has_trait(WildlifeTrait::Elusive)
    }

    /// Audible unless silent.
    pub fn is_audible(&self) -> bool {
        !self.has_trait(WildlifeTrait::Silent)
    }

    /// Vicious and has not attacked yet.
    pub fn can_attack(&self) -> bool {
        self.has_trait(WildlifeTrait::Vicious) && !self.has_attacked
    }

    /// Provoke the animal. A vicious animal attacks at most once per instance,
    /// even when it is also skittish.
    pub fn provoke(&mut self) -> Provocation {
        let name = self.name.clone();
        if self.can_attack() {
            self.has_attacked = true;
            return Provocation {
                reaction: Reaction::Attack,
                message: format!("The {name} snarls and lunges at you!"),
                health_damage: ATTACK_DAMAGE,
                fear_increase: ATTACK_FEAR,
                remove_from_room: false,
            };
        }
        let (reaction, message, remove_from_room) = if self.has_trait(WildlifeTrait::Skittish) {
            (
                Reaction::Flee,
                format!("The {name} startles and runs away into the darkness."),
                true,
            )
        } else if self.has_trait(WildlifeTrait::Docile) {
            (
                Reaction::Wander,
                format!("The {name} looks at you curiously, then slowly wanders away."),
                true,
            )
        } else {
            (
                Reaction::Ignore,
                format!("The {name} ignores your provocation."),
                false,
            )
        };
        Provocation {
            reaction,
            message,
            health_damage: 0,
            fear_increase: 0,
            remove_from_room,
        }
    }

    /// Case-insensitive name match.
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}
