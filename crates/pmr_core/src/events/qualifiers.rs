//! # Qualifier Decoder
//!
//! Flattens an event's qualifier list (`[{ "type": {"displayName": K}, "value": V }, ...]`)
//! into a typed bag. Keys the engine branches on are named fields; everything
//! else is kept in `other` for pass-through.
//!
//! Rules:
//! - a qualifier without `value` (or with `null`) is a presence flag (`true`)
//! - later qualifiers with the same type overwrite earlier ones
//! - non-list input, or entries without a usable `type.displayName`, are skipped

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::ingest::lenient;

/// Scalar value of a pass-through qualifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QualifierValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl QualifierValue {
    fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => QualifierValue::Bool(true),
            Some(Value::Bool(b)) => QualifierValue::Bool(*b),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(QualifierValue::Number)
                .unwrap_or_else(|| QualifierValue::Text(n.to_string())),
            Some(Value::String(s)) => QualifierValue::Text(s.clone()),
            Some(other) => QualifierValue::Text(other.to_string()),
        }
    }
}

/// Decoded qualifier bag for one event.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Qualifiers {
    pub key_pass: bool,
    pub assist: bool,
    pub goal: bool,
    pub own_goal: bool,
    pub yellow_card: bool,
    pub red_card: bool,
    pub lead_to_goal: bool,
    pub bad_touch: bool,
    pub penalty: bool,
    pub free_kick: bool,
    pub corner: bool,
    pub throw_in: bool,
    pub head: bool,
    pub right_foot: bool,
    pub left_foot: bool,
    pub counter_attack: bool,
    /// Numeric xG carried by the feed, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xg: Option<f64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub other: BTreeMap<String, QualifierValue>,
}

impl Qualifiers {
    /// Presence test by source key name (e.g. `"YellowCard"`).
    pub fn contains(&self, key: &str) -> bool {
        match key {
            "KeyPass" => self.key_pass,
            "Assist" => self.assist,
            "Goal" => self.goal,
            "OwnGoal" => self.own_goal,
            "YellowCard" => self.yellow_card,
            "RedCard" => self.red_card,
            "LeadToGoal" => self.lead_to_goal,
            "BadTouch" => self.bad_touch,
            "Penalty" => self.penalty,
            "FreeKick" => self.free_kick,
            "Corner" => self.corner,
            "ThrowIn" => self.throw_in,
            "Head" => self.head,
            "RightFoot" => self.right_foot,
            "LeftFoot" => self.left_foot,
            "CounterAttack" => self.counter_attack,
            "xG" => self.xg.is_some() || self.other.contains_key("xG"),
            other => self.other.contains_key(other),
        }
    }

    /// FreeKick, Corner, ThrowIn or Penalty present.
    pub fn is_set_piece(&self) -> bool {
        self.free_kick || self.corner || self.throw_in || self.penalty
    }

    pub fn is_empty(&self) -> bool {
        *self == Qualifiers::default()
    }

    fn set(&mut self, key: &str, value: Option<&Value>) {
        let flag = match key {
            "KeyPass" => &mut self.key_pass,
            "Assist" => &mut self.assist,
            "Goal" => &mut self.goal,
            "OwnGoal" => &mut self.own_goal,
            "YellowCard" => &mut self.yellow_card,
            "RedCard" => &mut self.red_card,
            "LeadToGoal" => &mut self.lead_to_goal,
            "BadTouch" => &mut self.bad_touch,
            "Penalty" => &mut self.penalty,
            "FreeKick" => &mut self.free_kick,
            "Corner" => &mut self.corner,
            "ThrowIn" => &mut self.throw_in,
            "Head" => &mut self.head,
            "RightFoot" => &mut self.right_foot,
            "LeftFoot" => &mut self.left_foot,
            "CounterAttack" => &mut self.counter_attack,
            "xG" => {
                match value.and_then(lenient::value_to_f64) {
                    Some(xg) => {
                        self.xg = Some(xg);
                        self.other.remove("xG");
                    }
                    None => {
                        self.xg = None;
                        self.other
                            .insert(key.to_string(), QualifierValue::from_json(value));
                    }
                }
                return;
            }
            _ => {
                self.other
                    .insert(key.to_string(), QualifierValue::from_json(value));
                return;
            }
        };
        *flag = true;
    }
}

/// Decode a qualifier list. Never fails.
pub fn decode(raw: &Value) -> Qualifiers {
    decode_counting(raw).0
}

/// Decode a qualifier list, also returning how many entries were unusable.
///
/// A non-list input counts as one unusable entry unless it is `null`/absent.
pub fn decode_counting(raw: &Value) -> (Qualifiers, usize) {
    let mut result = Qualifiers::default();
    let entries = match raw {
        Value::Array(entries) => entries,
        Value::Null => return (result, 0),
        _ => return (result, 1),
    };

    let mut skipped = 0;
    for entry in entries {
        let key = entry
            .get("type")
            .and_then(|t| t.get("displayName"))
            .and_then(Value::as_str)
            .filter(|k| !k.is_empty());
        match key {
            Some(key) => result.set(key, entry.get("value")),
            None => skipped += 1,
        }
    }
    (result, skipped)
}
