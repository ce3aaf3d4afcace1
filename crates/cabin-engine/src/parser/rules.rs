//! Synonym and phrase-pattern resolver.
//!
//! Wider than the deterministic parser: multi-word phrases, filler words,
//! throw-at target extraction and fuzzy matching of item, animal and exit
//! names against what is actually in the room. Used on its own when no
//! remote interpreter is configured, and as the fallback when the remote
//! call fails.

use cabin_world::clean_item_name;
use strsim::jaro_winkler;

use crate::context::{InterpretContext, normalize_input};
use crate::intent::{ActionKind, Intent};
use crate::parser::command::Direction;

/// Minimum similarity score for fuzzy matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.85;

const INVENTORY_PHRASES: &[&str] = &[
    "i",
    "inv",
    "inventory",
    "bag",
    "check bag",
    "check my bag",
    "check inventory",
    "open bag",
    "what do i have",
    "what am i carrying",
];
const LOOK_PHRASES: &[&str] = &[
    "look",
    "l",
    "x",
    "examine",
    "look around",
    "look about",
    "where am i",
    "survey",
    "observe",
    "search",
];
const LISTEN_PHRASES: &[&str] = &[
    "listen",
    "hear",
    "listen carefully",
    "listen closely",
    "what do i hear",
];
const HELP_PHRASES: &[&str] = &["help", "?", "h", "commands", "hint", "what can i do"];

const MOVE_VERBS: &[&str] = &[
    "go", "head", "walk", "enter", "move", "run", "travel", "return", "step", "wander",
];
const TAKE_VERBS: &[&str] = &[
    "take", "get", "grab", "pick", "collect", "gather", "lift", "fetch",
];
const DROP_VERBS: &[&str] = &["drop", "discard", "put", "set", "leave", "place"];
const THROW_VERBS: &[&str] = &["throw", "toss", "hurl", "chuck", "fling", "lob"];
const USE_VERBS: &[&str] = &[
    "use", "activate", "operate", "flip", "press", "switch", "turn", "try",
];
const FIRE_VERBS: &[&str] = &["light", "start", "make", "build", "kindle"];

const FILLERS: &[&str] = &[
    "to", "the", "a", "an", "into", "towards", "toward", "back", "inside", "in", "through",
    "over", "onto", "along",
];
const THROW_SEPARATORS: &[&str] = &["at", "toward", "towards", "to"];

const PHRASE: f32 = 0.95;
const PATTERN: f32 = 0.9;
const OBJECT: f32 = 0.85;
const BARE_EXIT: f32 = 0.8;
const GUESS: f32 = 0.6;

/// Resolves commands from synonym tables and phrase patterns.
#[derive(Debug, Clone)]
pub struct RuleResolver {
    threshold: f64,
}

impl Default for RuleResolver {
    fn default() -> Self {
        Self {
            threshold: FUZZY_THRESHOLD,
        }
    }
}

impl RuleResolver {
    /// A resolver with the default fuzzy threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fuzzy-match threshold (clamped to 0.5-1.0).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.5, 1.0);
        self
    }

    /// Resolve input against the current surroundings.
    pub fn resolve(&self, input: &str, ctx: &InterpretContext) -> Option<Intent> {
        let text = strip_punctuation(&normalize_input(input));
        if text.is_empty() {
            return None;
        }
        let text = text.as_str();

        if INVENTORY_PHRASES.contains(&text) {
            return Some(Intent::new(ActionKind::Inventory, PHRASE));
        }
        if LOOK_PHRASES.contains(&text) {
            return Some(Intent::new(ActionKind::Look, PATTERN));
        }
        if LISTEN_PHRASES.contains(&text) {
            return Some(Intent::new(ActionKind::Listen, PATTERN));
        }
        if HELP_PHRASES.contains(&text) {
            return Some(Intent::new(ActionKind::Help, PATTERN));
        }

        let words: Vec<&str> = text.split(' ').collect();
        if let Some(intent) = self.fixture_phrase(&words) {
            return Some(intent);
        }

        let (&verb, rest) = words.split_first()?;
        if MOVE_VERBS.contains(&verb) {
            return Some(self.movement(rest, ctx));
        }
        if TAKE_VERBS.contains(&verb) {
            let object = without(rest, &["up"]);
            return self.object(ActionKind::Take, &object, &ctx.room_items);
        }
        if DROP_VERBS.contains(&verb) {
            let object = without(rest, &["down", "away"]);
            if object.is_empty() && verb == "leave" {
                return Some(self.movement(&["out"], ctx));
            }
            return self.object(ActionKind::Drop, &object, &ctx.inventory);
        }
        if THROW_VERBS.contains(&verb) {
            return self.throw(rest, ctx);
        }
        if USE_VERBS.contains(&verb) {
            return self.use_item(rest, ctx);
        }
        if verb == "look" && rest.first() == Some(&"at") {
            return Some(Intent::new(ActionKind::Look, BARE_EXIT));
        }

        self.bare_exit(&text, ctx)
            .map(|dir| Intent::new(ActionKind::Move, BARE_EXIT).with_arg("direction", dir))
    }

    /// Breaker, light and fire phrases, matched anywhere in the sentence.
    fn fixture_phrase(&self, words: &[&str]) -> Option<Intent> {
        let has = |w: &str| words.contains(&w);
        let starts_with_any = |verbs: &[&str]| words.first().is_some_and(|v| verbs.contains(v));

        if (has("breaker") || has("fuse") || has("fuses"))
            && (starts_with_any(USE_VERBS) || starts_with_any(&["reset", "pull", "push"][..]))
        {
            return Some(Intent::new(ActionKind::UseCircuitBreaker, PATTERN));
        }
        let wants_fire = has("fire") || has("fireplace") || has("hearth") || has("firewood");
        if wants_fire && starts_with_any(FIRE_VERBS) {
            return Some(Intent::new(ActionKind::Light, PATTERN).with_arg("target", "fire"));
        }
        let lights = has("lights") || has("light") || has("lamp");
        if lights && !wants_fire && (has("on") || has("flip") || has("switch")) {
            return Some(Intent::new(ActionKind::TurnOnLights, PATTERN));
        }
        None
    }

    fn movement(&self, rest: &[&str], ctx: &InterpretContext) -> Intent {
        let phrase = without(rest, FILLERS);
        if phrase.is_empty() {
            return Intent::new(ActionKind::Move, GUESS);
        }
        match self.bare_exit(&phrase, ctx) {
            Some(dir) => Intent::new(ActionKind::Move, PATTERN).with_arg("direction", dir),
            None => Intent::new(ActionKind::Move, GUESS).with_arg("direction", phrase),
        }
    }

    /// Resolve a phrase to one of the room's exits.
    fn bare_exit(&self, phrase: &str, ctx: &InterpretContext) -> Option<String> {
        let phrase = without(&phrase.split(' ').collect::<Vec<_>>(), FILLERS);
        if let Some(dir) = Direction::parse(&phrase) {
            return Some(dir.name().to_string());
        }
        if matches!(phrase.as_str(), "outside" | "out" | "outdoors") && ctx.has_exit("out") {
            return Some("out".to_string());
        }
        best_match(&phrase, &ctx.exits, self.threshold)
    }

    fn object(&self, action: ActionKind, object: &str, pool: &[String]) -> Option<Intent> {
        let object = clean_item_name(object);
        if object.is_empty() {
            return None;
        }
        Some(match best_match(&object, pool, self.threshold) {
            Some(name) => Intent::new(action, OBJECT).with_arg("item", name),
            None => Intent::new(action, GUESS).with_arg("item", object),
        })
    }

    fn throw(&self, rest: &[&str], ctx: &InterpretContext) -> Option<Intent> {
        let split = rest.iter().position(|w| THROW_SEPARATORS.contains(w));
        let (item_words, target_words) = match split {
            Some(pos) => (&rest[..pos], &rest[pos + 1..]),
            None => (rest, &rest[rest.len()..]),
        };
        let mut intent = self.object(ActionKind::Throw, &item_words.join(" "), &ctx.inventory)?;
        let target = clean_item_name(&target_words.join(" "));
        if !target.is_empty() {
            let resolved = best_match(&target, &ctx.room_wildlife, self.threshold);
            if resolved.is_none() {
                intent.confidence = intent.confidence.min(GUESS);
            }
            intent = intent.with_arg("target", resolved.unwrap_or(target));
        }
        Some(intent)
    }

    fn use_item(&self, rest: &[&str], ctx: &InterpretContext) -> Option<Intent> {
        let on = rest.iter().position(|w| *w == "on");
        let (item_words, target_words) = match on {
            Some(pos) if pos > 0 => (&rest[..pos], &rest[pos + 1..]),
            _ => (rest, &rest[rest.len()..]),
        };
        let object = without(item_words, &["on", "up"]);
        let pool: Vec<String> = ctx
            .inventory
            .iter()
            .chain(&ctx.room_items)
            .cloned()
            .collect();
        let mut intent = self.object(ActionKind::Use, &object, &pool)?;
        let target = clean_item_name(&target_words.join(" "));
        if !target.is_empty() {
            intent = intent.with_arg("target", target);
        }
        Some(intent)
    }
}

fn strip_punctuation(text: &str) -> String {
    if text == "?" {
        return text.to_string();
    }
    text.chars()
        .filter(|c| !matches!(c, '.' | '!' | ',' | ';' | ':' | '?' | '"'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Join words, dropping the given fillers.
fn without(words: &[&str], drop: &[&str]) -> String {
    words
        .iter()
        .filter(|w| !drop.contains(*w))
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Exact, containment, then fuzzy match of a phrase against candidate names.
fn best_match(phrase: &str, candidates: &[String], threshold: f64) -> Option<String> {
    if phrase.is_empty() {
        return None;
    }
    if let Some(exact) = candidates.iter().find(|c| c.to_lowercase() == phrase) {
        return Some(exact.clone());
    }
    if let Some(contained) = candidates.iter().find(|c| {
        let c = c.to_lowercase();
        c.split(' ').any(|w| w == phrase) || phrase.split(' ').any(|w| w == c)
    }) {
        return Some(contained.clone());
    }
    candidates
        .iter()
        .map(|c| (c, jaro_winkler(phrase, &c.to_lowercase())))
        .filter(|(_, score)| *score >= threshold)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(c, _)| c.clone())
}
