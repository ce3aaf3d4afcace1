//! Deterministic parsing of unambiguous commands.
//!
//! Anything this parser is not sure about comes back with a confidence below
//! [`crate::interpreter::CONFIDENT`] or not at all, so a later stage can try.

use cabin_world::clean_item_name;

use crate::context::{InterpretContext, normalize_input};
use crate::intent::{ActionKind, Intent};

/// Compass and vertical directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// North.
    North,
    /// South.
    South,
    /// East.
    East,
    /// West.
    West,
    /// Up.
    Up,
    /// Down.
    Down,
    /// Northeast.
    Northeast,
    /// Northwest.
    Northwest,
    /// Southeast.
    Southeast,
    /// Southwest.
    Southwest,
}

impl Direction {
    /// Parse a direction or its abbreviation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "n" | "north" => Some(Self::North),
            "s" | "south" => Some(Self::South),
            "e" | "east" => Some(Self::East),
            "w" | "west" => Some(Self::West),
            "u" | "up" => Some(Self::Up),
            "d" | "down" => Some(Self::Down),
            "ne" | "northeast" => Some(Self::Northeast),
            "nw" | "northwest" => Some(Self::Northwest),
            "se" | "southeast" => Some(Self::Southeast),
            "sw" | "southwest" => Some(Self::Southwest),
            _ => None,
        }
    }

    /// Canonical exit name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Up => "up",
            Self::Down => "down",
            Self::Northeast => "northeast",
            Self::Northwest => "northwest",
            Self::Southeast => "southeast",
            Self::Southwest => "southwest",
        }
    }
}

/// Expand compass abbreviations; other exit names pass through lowercased.
pub fn normalize_direction(s: &str) -> String {
    let s = s.trim().to_lowercase();
    Direction::parse(&s).map_or(s, |d| d.name().to_string())
}

/// Verbs that move the player.
pub const MOVE_VERBS: &[&str] = &["go", "move", "walk", "head", "travel"];
/// Words that look around.
pub const LOOK_WORDS: &[&str] = &["look", "l", "examine", "x"];
/// Words that listen.
pub const LISTEN_WORDS: &[&str] = &["listen"];
/// Words that open the bag.
pub const INVENTORY_WORDS: &[&str] = &["inventory", "i", "inv"];
/// Verbs that pick things up.
pub const TAKE_VERBS: &[&str] = &["take", "get", "grab", "pick"];
/// Verbs that put things down.
pub const DROP_VERBS: &[&str] = &["drop", "put", "discard", "leave"];
/// Verbs that throw.
pub const THROW_VERBS: &[&str] = &["throw", "toss", "hurl"];
/// Words that ask for help.
pub const HELP_WORDS: &[&str] = &["help", "h", "?", "commands"];

const CERTAIN: f32 = 1.0;
const UNSURE_ITEM: f32 = 0.8;

/// Parse a command deterministically.
///
/// Returns `None` when the input does not fit any known shape. Item phrases
/// that do not name something in the room or bag come back at reduced
/// confidence.
pub fn parse_command(input: &str, ctx: &InterpretContext) -> Option<Intent> {
    let input = normalize_input(input);
    let words: Vec<&str> = input.split(' ').filter(|w| !w.is_empty()).collect();
    let (&verb, rest) = words.split_first()?;

    if rest.is_empty() {
        return parse_single(verb);
    }

    if MOVE_VERBS.contains(&verb) {
        return match rest {
            [dir] => Direction::parse(dir)
                .map(|d| Intent::new(ActionKind::Move, CERTAIN).with_arg("direction", d.name())),
            _ => None,
        };
    }

    if verb == "look" {
        return match rest {
            ["around"] => Some(Intent::new(ActionKind::Look, CERTAIN)),
            _ => None,
        };
    }

    if TAKE_VERBS.contains(&verb) {
        let object = strip_particle(rest, "up");
        return object_intent(ActionKind::Take, &object, ctx);
    }

    if DROP_VERBS.contains(&verb) {
        let object = strip_particle(rest, "down");
        return object_intent(ActionKind::Drop, &object, ctx);
    }

    if THROW_VERBS.contains(&verb) {
        return parse_throw(rest, ctx);
    }

    None
}

fn parse_single(word: &str) -> Option<Intent> {
    if let Some(dir) = Direction::parse(word) {
        return Some(Intent::new(ActionKind::Move, CERTAIN).with_arg("direction", dir.name()));
    }
    let action = if LOOK_WORDS.contains(&word) {
        ActionKind::Look
    } else if LISTEN_WORDS.contains(&word) {
        ActionKind::Listen
    } else if INVENTORY_WORDS.contains(&word) {
        ActionKind::Inventory
    } else if HELP_WORDS.contains(&word) {
        ActionKind::Help
    } else {
        return None;
    };
    Some(Intent::new(action, CERTAIN))
}

/// Drop a leading particle ("pick up the rope" -> "the rope").
fn strip_particle(words: &[&str], particle: &str) -> String {
    match words {
        [first, tail @ ..] if *first == particle => tail.join(" "),
        _ => words.join(" "),
    }
}

fn is_known_item(name: &str, ctx: &InterpretContext) -> bool {
    ctx.in_room(name) || ctx.owns(name)
}

fn object_intent(action: ActionKind, object: &str, ctx: &InterpretContext) -> Option<Intent> {
    if object.is_empty() {
        return None;
    }
    let confidence = if is_known_item(object, ctx) {
        CERTAIN
    } else {
        UNSURE_ITEM
    };
    Some(Intent::new(action, confidence).with_arg("item", clean_item_name(object)))
}

fn parse_throw(rest: &[&str], ctx: &InterpretContext) -> Option<Intent> {
    let (item_words, target_words) = match rest.iter().position(|w| *w == "at") {
        Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
        None => (rest, None),
    };
    let item = clean_item_name(&item_words.join(" "));
    if item.is_empty() {
        return None;
    }
    let mut intent = Intent::new(ActionKind::Throw, CERTAIN).with_arg("item", item.as_str());
    if !is_known_item(&item, ctx) {
        intent.confidence = UNSURE_ITEM;
    }
    if let Some(words) = target_words {
        let target = clean_item_name(&words.join(" "));
        if target.is_empty() || !ctx.sees(&target) {
            intent.confidence = UNSURE_ITEM;
        }
        if !target.is_empty() {
            intent = intent.with_arg("target", target);
        }
    }
    Some(intent)
}
