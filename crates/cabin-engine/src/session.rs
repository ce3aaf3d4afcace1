//! The turn state machine shared by the terminal and the websocket server.
//!
//! One input in, one [`Frame`] out. A session moves through
//! [`Phase::Intro`], then [`Phase::AwaitingInput`] and [`Phase::Overlay`] as
//! screens come and go, and finally [`Phase::Ended`].

use std::collections::VecDeque;

use cabin_world::GameMap;
use cabin_world::content::the_cabin;
use cabin_world::player::{MAX_STAT, clamp_stat};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::actions::help::HESITATE;
use crate::actions::{ActionRegistry, ActionResult};
use crate::config::EngineConfig;
use crate::context::InterpretContext;
use crate::effects::apply_effects;
use crate::error::EngineResult;
use crate::events::{EventBus, GameEvent, apply_consequences, to_events};
use crate::intent::Intent;
use crate::interpreter::Interpreter;
use crate::listeners;
use crate::parser::{InputCommand, classify_input};
use crate::persistence::SaveManager;
use crate::protocol::ClientMessage;
use crate::render::{self, Frame};
use crate::state::{GameState, Notice};

/// Answer to save or load when the session keeps no saves.
pub const NO_RECORDS: &str = "The wilderness doesn't keep records. There is only forward.";

const SESSION_ENDED: &str = "The session has ended.";
const FAREWELL: &str = "The cold watches you go.";
const DEATH: &str = "The darkness claims you. You are gone.";
const OVERWHELMED: &str = "The fear swallows you whole. You cannot move. You cannot think.";

/// Where the session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Intro shown, waiting for a key.
    Intro,
    /// Normal play.
    AwaitingInput,
    /// A full-screen overlay is up.
    Overlay,
    /// Over; no more input is accepted.
    Ended,
}

/// What one played turn did.
#[derive(Debug, Clone)]
pub struct TurnReport {
    /// The resolved intent.
    pub intent: Intent,
    /// What the action returned.
    pub result: ActionResult,
    /// Events emitted on the bus, in order.
    pub events: Vec<GameEvent>,
}

/// A single player's game.
pub struct Session {
    state: GameState,
    bus: EventBus<GameState>,
    registry: ActionRegistry,
    interpreter: Interpreter,
    saves: Option<SaveManager>,
    phase: Phase,
    overlays: VecDeque<Frame>,
    last_room_id: Option<String>,
    held_feedback: Vec<String>,
    last_turn: Option<TurnReport>,
    max_fear: i32,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.phase)
            .field("room", &self.state.map.current_room_id())
            .field("overlays", &self.overlays.len())
            .finish()
    }
}

impl Session {
    /// A session on `map` with the standard actions and listeners.
    pub fn new(map: GameMap, interpreter: Interpreter) -> Self {
        Self {
            state: GameState::new(map),
            bus: listeners::standard_bus(),
            registry: ActionRegistry::with_defaults(),
            interpreter,
            saves: None,
            phase: Phase::Intro,
            overlays: VecDeque::new(),
            last_room_id: None,
            held_feedback: Vec::new(),
            last_turn: None,
            max_fear: MAX_STAT,
        }
    }

    /// A fresh Cabin built from configuration. Saving is off until
    /// [`Session::with_saves`] turns it on.
    pub fn from_config(config: &EngineConfig, interpreter: Interpreter) -> EngineResult<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut session = Self::new(the_cabin(&mut rng)?, interpreter);
        session.state.player.health = clamp_stat(config.max_health).max(1);
        session.max_fear = clamp_stat(config.max_fear).max(1);
        Ok(session)
    }

    /// Enable save and load.
    pub fn with_saves(mut self, saves: SaveManager) -> Self {
        self.saves = Some(saves);
        self
    }

    /// Replace the action registry.
    pub fn with_registry(mut self, registry: ActionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable game state.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// The most recent played turn.
    pub fn last_turn(&self) -> Option<&TurnReport> {
        self.last_turn.as_ref()
    }

    /// Whether the session has ended.
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// The first frame of a session.
    pub fn intro(&self) -> Frame {
        render::intro()
    }

    /// Handle one client message.
    pub async fn handle(&mut self, message: ClientMessage) -> Frame {
        match message {
            ClientMessage::Input { text } => self.handle_input(&text).await,
            ClientMessage::Keypress => self.acknowledge(),
        }
    }

    /// Dismiss the current screen.
    pub fn acknowledge(&mut self) -> Frame {
        match self.phase {
            Phase::Intro => {
                self.phase = Phase::AwaitingInput;
                self.render_room(Vec::new())
            }
            Phase::Overlay => self.next_overlay(),
            Phase::AwaitingInput => self.render_room(Vec::new()),
            Phase::Ended => render::ended([SESSION_ENDED], false),
        }
    }

    /// Handle a line of typed input.
    pub async fn handle_input(&mut self, text: &str) -> Frame {
        match self.phase {
            Phase::Intro | Phase::Overlay => return self.acknowledge(),
            Phase::Ended => return render::ended([SESSION_ENDED], false),
            Phase::AwaitingInput => {}
        }

        match classify_input(text) {
            InputCommand::Quit => {
                self.phase = Phase::Ended;
                render::ended([FAREWELL], true)
            }
            InputCommand::QuestScreen => {
                let frame = render::quest_screen(&self.state.quests.display_active());
                self.show_overlays(vec![frame])
            }
            InputCommand::MapScreen => {
                let frame = render::map_screen(&self.state.map.display_map());
                self.show_overlays(vec![frame])
            }
            InputCommand::Save(slot) => {
                let line = self.save(&slot);
                self.render_room(vec![line])
            }
            InputCommand::Load(slot) => {
                let line = self.load(&slot);
                self.render_room(vec![line])
            }
            InputCommand::Action(text) => self.play_turn(&text).await,
        }
    }

    async fn play_turn(&mut self, text: &str) -> Frame {
        let report = self.run_turn(text).await;
        let mut feedback = match report.intent.reply_text() {
            Some(reply) => reply.to_string(),
            None => report.result.feedback.clone(),
        };
        self.last_turn = Some(report);

        let notices = self.state.drain_notices();
        let player = &self.state.player;
        if player.is_dead() || player.fear >= self.max_fear {
            let closing = if player.is_dead() { DEATH } else { OVERWHELMED };
            debug!(health = player.health, fear = player.fear, "session over");
            self.phase = Phase::Ended;
            self.overlays.clear();
            return render::ended([feedback.as_str(), "", closing], true);
        }

        let mut overlays = Vec::new();
        for notice in notices {
            match notice {
                Notice::QuestOpened(text) => overlays.push(render::quest_opened(&text)),
                Notice::Cutscene(paragraphs) => overlays.push(render::cutscene(paragraphs)),
                Notice::QuestUpdated(text) => {
                    append_line(&mut feedback, &format!("Quest Update: {text}"));
                }
                Notice::QuestCompleted(text) => {
                    append_line(&mut feedback, &format!("Quest Complete: {text}"));
                }
            }
        }

        let lines = if feedback.is_empty() { Vec::new() } else { vec![feedback] };
        if overlays.is_empty() {
            return self.render_room(lines);
        }
        self.held_feedback = lines;
        self.show_overlays(overlays)
    }

    /// Interpret, apply effects, dispatch, apply consequences and emit events.
    async fn run_turn(&mut self, text: &str) -> TurnReport {
        let ctx = InterpretContext::capture(
            &self.state.map,
            &self.state.player,
            self.registry.allowed_kinds(),
        );
        let intent = self.interpreter.interpret(text, &ctx).await;
        debug!(action = %intent.action, confidence = intent.confidence, "turn intent");

        let GameState { player, map, .. } = &mut self.state;
        if let Some(effects) = &intent.effects {
            let known = map.known_items().clone();
            apply_effects(player, map.current_room_mut(), effects, &known);
        }

        let result = self
            .registry
            .execute(intent.action.as_str(), player, map, &intent)
            .unwrap_or_else(|| {
                warn!(action = %intent.action, "no action registered");
                ActionResult::failure(intent.reply_text().unwrap_or(HESITATE))
            });
        apply_consequences(&result, player);

        // Listeners may raise further events; they run after the one that
        // raised them, in order.
        let mut events = to_events(&result, map.current_room_id());
        let mut next = 0;
        while next < events.len() {
            self.bus.emit(&events[next], &mut self.state);
            events.extend(self.state.drain_raised());
            next += 1;
        }
        TurnReport {
            intent,
            result,
            events,
        }
    }

    fn save(&self, slot: &str) -> String {
        let Some(saves) = &self.saves else {
            return NO_RECORDS.to_string();
        };
        match saves.save(slot, &self.state) {
            Ok(_) => "You scratch a mark into the doorframe. This moment will keep.".to_string(),
            Err(e) => {
                warn!(slot, error = %e, "save failed");
                "Your fingers are too numb to make a mark. Nothing is kept.".to_string()
            }
        }
    }

    fn load(&mut self, slot: &str) -> String {
        let Some(saves) = &self.saves else {
            return NO_RECORDS.to_string();
        };
        match saves.load(slot) {
            Some(game) => {
                game.restore(&mut self.state);
                self.last_room_id = None;
                "You blink, and the forest settles back around you.".to_string()
            }
            None => "You reach for a memory that isn't there.".to_string(),
        }
    }

    fn show_overlays(&mut self, frames: Vec<Frame>) -> Frame {
        self.overlays.extend(frames);
        self.phase = Phase::Overlay;
        self.next_overlay()
    }

    fn next_overlay(&mut self) -> Frame {
        if let Some(frame) = self.overlays.pop_front() {
            self.phase = Phase::Overlay;
            return frame;
        }
        self.phase = Phase::AwaitingInput;
        self.last_room_id = None;
        let held = std::mem::take(&mut self.held_feedback);
        self.render_room(held)
    }

    fn render_room(&mut self, feedback: Vec<String>) -> Frame {
        let room = self.state.map.current_room();
        let room_changed = self.last_room_id.as_deref() != Some(room.id.as_str());
        let frame = render::room(room, &self.state.player, &feedback.join("\n"), room_changed);
        self.last_room_id = Some(room.id.clone());
        frame
    }
}

fn append_line(feedback: &mut String, line: &str) {
    if !feedback.is_empty() {
        feedback.push('\n');
    }
    feedback.push_str(line);
}
