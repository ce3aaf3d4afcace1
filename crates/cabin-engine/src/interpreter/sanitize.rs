//! Post-processing applied to every intent, whatever produced it.

use std::collections::BTreeMap;

use cabin_world::clean_item_name;
use serde_json::{Map, Value};

use crate::context::InterpretContext;
use crate::effects::MAX_EFFECT_DELTA;
use crate::intent::{ActionKind, Effects, Intent};
use crate::parser::normalize_direction;

/// Longest reply the player will see.
pub const MAX_REPLY_CHARS: usize = 140;
/// Confidence ceiling for a move demoted for lack of an exit.
pub const DEMOTED_CONFIDENCE: f32 = 0.5;

const NO_DIRECTION: &str = "You angle your body and stop. Where?";
const NO_SUCH_EXIT: &str = "You turn that way and stop. Just trees and dark.";
const DEFAULT_REMOTE_CONFIDENCE: f32 = 0.5;

/// Build an intent from a remote reply object, then [`finalize`] it.
pub fn from_remote(reply: &Map<String, Value>, ctx: &InterpretContext) -> Intent {
    let action = reply
        .get("action")
        .and_then(Value::as_str)
        .and_then(ActionKind::parse)
        .unwrap_or(ActionKind::None);

    let args: BTreeMap<String, String> = reply
        .get("args")
        .and_then(Value::as_object)
        .map(|obj| {
            obj.iter()
                .filter_map(|(k, v)| value_to_string(v).map(|s| (k.clone(), s)))
                .collect()
        })
        .unwrap_or_default();

    let confidence = reply
        .get("confidence")
        .and_then(value_to_f64)
        .map_or(DEFAULT_REMOTE_CONFIDENCE, |c| c as f32);

    let effects = reply
        .get("effects")
        .and_then(Value::as_object)
        .map(effects_from_object);

    let intent = Intent {
        action,
        args,
        confidence,
        reply: reply.get("reply").and_then(value_to_string),
        effects,
        rationale: reply.get("rationale").and_then(value_to_string),
    };
    finalize(intent, ctx)
}

fn value_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_to_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn delta(obj: &Map<String, Value>, key: &str) -> i32 {
    obj.get(key)
        .and_then(value_to_f64)
        .filter(|d| d.is_finite())
        .map_or(0, |d| d.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32)
}

fn names(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(value_to_string).collect())
        .unwrap_or_default()
}

fn effects_from_object(obj: &Map<String, Value>) -> Effects {
    Effects {
        fear: delta(obj, "fear"),
        health: delta(obj, "health"),
        inventory_add: names(obj, "inventory_add"),
        inventory_remove: names(obj, "inventory_remove"),
    }
}

/// Truncate to [`MAX_REPLY_CHARS`] characters.
pub fn truncate_reply(reply: &str) -> String {
    reply.trim().chars().take(MAX_REPLY_CHARS).collect()
}

/// Clamp deltas and drop inventory changes that name things the player
/// cannot reach.
pub fn sanitize_effects(effects: Effects, ctx: &InterpretContext) -> Option<Effects> {
    let clean = Effects {
        fear: effects.fear.clamp(-MAX_EFFECT_DELTA, MAX_EFFECT_DELTA),
        health: effects.health.clamp(-MAX_EFFECT_DELTA, MAX_EFFECT_DELTA),
        inventory_add: effects
            .inventory_add
            .into_iter()
            .map(|n| clean_item_name(&n))
            .filter(|n| ctx.in_room(n) || ctx.owns(n))
            .collect(),
        inventory_remove: effects
            .inventory_remove
            .into_iter()
            .map(|n| clean_item_name(&n))
            .filter(|n| ctx.owns(n))
            .collect(),
    };
    (!clean.is_empty()).then_some(clean)
}

/// Enforce the intent invariants against the current surroundings.
///
/// - disallowed actions become `none`
/// - a move must name a current exit, or it becomes `none` with an in-world
///   denial and confidence at most [`DEMOTED_CONFIDENCE`]
/// - confidence lands in `[0, 1]`, replies within [`MAX_REPLY_CHARS`]
/// - effects are clamped and filtered
pub fn finalize(mut intent: Intent, ctx: &InterpretContext) -> Intent {
    if !ctx.allows(intent.action) {
        intent.action = ActionKind::None;
        intent.args.clear();
    }

    if intent.action == ActionKind::Move {
        let direction = intent.arg("direction").map(normalize_direction);
        match direction {
            Some(dir) if ctx.has_exit(&dir) => {
                intent.args.insert("direction".to_string(), dir);
            }
            other => {
                let denial = if other.is_some() {
                    NO_SUCH_EXIT
                } else {
                    NO_DIRECTION
                };
                intent.action = ActionKind::None;
                intent.args.clear();
                intent.confidence = intent.confidence.min(DEMOTED_CONFIDENCE);
                intent.reply = Some(denial.to_string());
            }
        }
    }

    intent.confidence = if intent.confidence.is_nan() {
        0.0
    } else {
        intent.confidence.clamp(0.0, 1.0)
    };
    intent.reply = intent
        .reply
        .as_deref()
        .map(truncate_reply)
        .filter(|r| !r.is_empty());
    intent.effects = intent.effects.take().and_then(|e| sanitize_effects(e, ctx));
    intent
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_ctx() -> InterpretContext {
        InterpretContext {
            room_name: "Cabin Grounds".into(),
            exits: vec!["clearing".into(), "north".into(), "south".into()],
            room_items: vec!["firewood".into()],
            inventory: vec!["stone".into()],
            allowed_actions: ActionKind::ALL.to_vec(),
            ..Default::default()
        }
    }

    fn object(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn unknown_action_becomes_none() {
        let raw = object(json!({"action": "dance", "confidence": 0.9}));
        let intent = from_remote(&raw, &test_ctx());
        assert_eq!(intent.action, ActionKind::None);
    }

    #[test]
    fn disallowed_action_becomes_none() {
        let mut ctx = test_ctx();
        ctx.allowed_actions = vec![ActionKind::Look, ActionKind::None];
        let take = Intent::new(ActionKind::Take, 1.0).with_arg("item", "firewood");
        let intent = finalize(take, &ctx);
        assert_eq!(intent.action, ActionKind::None);
        assert!(intent.args.is_empty());
    }

    #[test]
    fn move_direction_is_normalized() {
        let step = Intent::new(ActionKind::Move, 0.9).with_arg("direction", "N");
        let intent = finalize(step, &test_ctx());
        assert_eq!(intent.action, ActionKind::Move);
        assert_eq!(intent.arg("direction"), Some("north"));
    }

    #[test]
    fn move_through_missing_exit_is_demoted() {
        let intent = finalize(
            Intent::new(ActionKind::Move, 1.0)
                .with_arg("direction", "west")
                .with_reply("You stride west."),
            &test_ctx(),
        );
        assert_eq!(intent.action, ActionKind::None);
        assert!(intent.confidence <= DEMOTED_CONFIDENCE);
        assert_eq!(intent.reply.as_deref(), Some(NO_SUCH_EXIT));
        assert!(intent.args.is_empty());
    }

    #[test]
    fn move_without_direction_is_demoted() {
        let intent = finalize(Intent::new(ActionKind::Move, 0.7), &test_ctx());
        assert_eq!(intent.action, ActionKind::None);
        assert_eq!(intent.reply.as_deref(), Some(NO_DIRECTION));
    }

    #[test]
    fn confidence_and_reply_are_bounded() {
        let long = "x".repeat(400);
        let intent = from_remote(
            &object(json!({"action": "look", "confidence": 7.5, "reply": long})),
            &test_ctx(),
        );
        assert_eq!(intent.confidence, 1.0);
        assert_eq!(intent.reply.unwrap().chars().count(), MAX_REPLY_CHARS);

        let intent = from_remote(&object(json!({"action": "look", "confidence": -3})), &test_ctx());
        assert_eq!(intent.confidence, 0.0);
    }

    #[test]
    fn effects_are_clamped_and_filtered() {
        let intent = from_remote(
            &object(json!({
                "action": "take",
                "args": {"item": "firewood"},
                "effects": {
                    "fear": 40,
                    "health": -9.6,
                    "inventory_add": ["Firewood", "golden axe"],
                    "inventory_remove": ["stone", "lantern"]
                }
            })),
            &test_ctx(),
        );
        let effects = intent.effects.unwrap();
        assert_eq!(effects.fear, 2);
        assert_eq!(effects.health, -2);
        assert_eq!(effects.inventory_add, vec!["firewood"]);
        assert_eq!(effects.inventory_remove, vec!["stone"]);
    }

    #[test]
    fn empty_effects_are_dropped() {
        let intent = from_remote(
            &object(json!({"action": "look", "effects": {"inventory_add": ["ghost"]}})),
            &test_ctx(),
        );
        assert!(intent.effects.is_none());
    }

    #[test]
    fn lenient_field_types() {
        let intent = from_remote(
            &object(json!({
                "action": "MOVE",
                "args": {"direction": "north", "steps": 2},
                "confidence": "0.75"
            })),
            &test_ctx(),
        );
        assert_eq!(intent.action, ActionKind::Move);
        assert_eq!(intent.arg("steps"), Some("2"));
        assert_eq!(intent.confidence, 0.75);
    }
}
