//! Name-keyed action dispatch.

use std::collections::BTreeMap;

use cabin_world::{GameMap, Player};

use super::help::{HelpAction, NoneAction};
use super::inventory::{DropAction, InventoryAction, TakeAction};
use super::light::LightAction;
use super::movement::MoveAction;
use super::observe::{ListenAction, LookAction};
use super::throw::ThrowAction;
use super::use_item::{TurnOnLightsAction, UseAction, UseCircuitBreakerAction};
use super::{Action, ActionContext, ActionResult};
use crate::intent::{ActionKind, Intent};

/// Maps action names to handlers.
#[derive(Default)]
pub struct ActionRegistry {
    actions: BTreeMap<String, Box<dyn Action>>,
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.names())
            .finish()
    }
}

impl ActionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in action.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(MoveAction);
        registry.register(LookAction);
        registry.register(ListenAction);
        registry.register(TakeAction);
        registry.register(DropAction);
        registry.register(InventoryAction);
        registry.register(ThrowAction);
        registry.register(UseAction);
        registry.register(UseCircuitBreakerAction);
        registry.register(TurnOnLightsAction);
        registry.register(LightAction);
        registry.register(HelpAction);
        registry.register(NoneAction);
        registry
    }

    /// Register an action under its own name, replacing any previous one.
    pub fn register(&mut self, action: impl Action + 'static) {
        self.actions
            .insert(action.name().to_string(), Box::new(action));
    }

    /// Look up an action.
    pub fn get(&self, name: &str) -> Option<&dyn Action> {
        self.actions.get(name).map(|a| a.as_ref())
    }

    /// Whether an action is registered.
    pub fn has(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.actions.keys().map(String::as_str).collect()
    }

    /// Kinds the interpreter may produce given what is registered.
    pub fn allowed_kinds(&self) -> Vec<ActionKind> {
        ActionKind::ALL
            .into_iter()
            .filter(|k| self.has(k.as_str()))
            .collect()
    }

    /// Execute an action. `None` means no action has that name.
    pub fn execute(
        &self,
        name: &str,
        player: &mut Player,
        map: &mut GameMap,
        intent: &Intent,
    ) -> Option<ActionResult> {
        let action = self.get(name)?;
        let mut ctx = ActionContext::new(player, map, intent);
        Some(action.execute(&mut ctx))
    }
}
