//! One-shot narrative interludes played on a room transition.

use std::collections::BTreeSet;

use tracing::info;

/// Id of the cutscene played on first entering the cabin.
pub const CABIN_ENTRANCE: &str = "cabin_entrance";

const CABIN_ENTRANCE_TEXT: &str = "\
The door gives with a groan, swollen wood dragging over the sill.
Inside, the air is colder than the night behind you.

Dust sheets hang over the furniture like sleepers who never woke. The
fireplace gapes, black and empty. Someone left a mug on the table, a ring
of something long dried at its bottom.

You know this room. You have stood exactly here before.

────────────────────────────────

The door swings shut behind you. You do not remember touching it.";

/// A cutscene and its played latch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cutscene {
    /// Stable id.
    pub id: String,
    /// Room the player must be leaving.
    pub from_room: String,
    /// Room the player must be entering.
    pub to_room: String,
    /// Raw text, hard-wrapped, blank lines between paragraphs.
    pub text: String,
    /// Set once shown; a played cutscene never fires again.
    pub has_played: bool,
}

impl Cutscene {
    /// An unplayed cutscene.
    pub fn new(
        id: impl Into<String>,
        from_room: impl Into<String>,
        to_room: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from_room: from_room.into(),
            to_room: to_room.into(),
            text: text.into(),
            has_played: false,
        }
    }

    /// Whether this cutscene fires for the move.
    pub fn should_play(&self, from_room: &str, to_room: &str) -> bool {
        !self.has_played && self.from_room == from_room && self.to_room == to_room
    }

    /// Text as overlay paragraphs.
    pub fn paragraphs(&self) -> Vec<String> {
        to_paragraphs(&self.text)
    }
}

/// Join hard-wrapped lines into paragraphs.
///
/// Blank lines become empty strings so the overlay keeps the spacing.
/// Rule lines (`───`) stand alone.
pub fn to_paragraphs(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let flush = |current: &mut Vec<&str>, out: &mut Vec<String>| {
        if !current.is_empty() {
            out.push(current.join(" "));
            current.clear();
        }
    };
    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            flush(&mut current, &mut out);
            out.push(String::new());
        } else if line.starts_with('─') {
            flush(&mut current, &mut out);
            out.push(line.to_string());
        } else {
            current.push(line);
        }
    }
    flush(&mut current, &mut out);
    out
}

/// The walk from the clearing into the cabin.
pub fn cabin_entrance() -> Cutscene {
    Cutscene::new(
        CABIN_ENTRANCE,
        "cabin_clearing",
        "cabin_main",
        CABIN_ENTRANCE_TEXT,
    )
}

/// Every registered cutscene.
#[derive(Debug, Clone, Default)]
pub struct CutsceneManager {
    cutscenes: Vec<Cutscene>,
}

impl CutsceneManager {
    /// A manager over the given cutscenes.
    pub fn new(cutscenes: Vec<Cutscene>) -> Self {
        Self { cutscenes }
    }

    /// The Cabin's cutscenes.
    pub fn with_catalog() -> Self {
        Self::new(vec![cabin_entrance()])
    }

    /// Add a cutscene after the existing ones.
    pub fn register(&mut self, cutscene: Cutscene) {
        self.cutscenes.push(cutscene);
    }

    /// Play the first unplayed cutscene matching the move, marking it
    /// played. Returns its paragraphs.
    pub fn check(&mut self, from_room: &str, to_room: &str) -> Option<Vec<String>> {
        let cutscene = self
            .cutscenes
            .iter_mut()
            .find(|c| c.should_play(from_room, to_room))?;
        cutscene.has_played = true;
        info!(cutscene = %cutscene.id, "cutscene played");
        Some(cutscene.paragraphs())
    }

    /// Ids of cutscenes already shown.
    pub fn played(&self) -> BTreeSet<String> {
        self.cutscenes
            .iter()
            .filter(|c| c.has_played)
            .map(|c| c.id.clone())
            .collect()
    }

    /// Mark saved cutscenes as played. Unknown ids are ignored.
    pub fn restore_played<'a>(&mut self, ids: impl IntoIterator<Item = &'a String>) {
        let ids: BTreeSet<&String> = ids.into_iter().collect();
        for cutscene in &mut self.cutscenes {
            cutscene.has_played = ids.contains(&cutscene.id);
        }
    }
}
