//! # Event Normalizer
//!
//! Raw feed records → [`EventTable`].
//!
//! ## Steps (per record, in input order)
//! 1. Scale coordinates from the 0-100 feed scale to meters (×1.05 / ×0.68), once
//! 2. Decode type / outcome / period display pairs
//! 3. Decode qualifiers and lift the flags the aggregators read
//! 4. Derive cumulative minute and spatial metrics
//!
//! Output order equals input order. That order, not the clock, is what
//! receiver inference treats as "next".

use serde_json::Value;
use tracing::{debug, warn};

use super::qualifiers;
use super::table::EventTable;
use crate::ingest::RawEvent;
use crate::models::{Event, EventType, Outcome, Period};
use crate::pitch::{self, scale};

/// Normalize already-parsed raw events.
pub fn normalize(raw_events: &[RawEvent]) -> EventTable {
    let mut malformed_qualifiers = 0usize;
    let events: Vec<Event> = raw_events
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let (event, skipped) = normalize_event(index, raw);
            if skipped > 0 {
                malformed_qualifiers += 1;
            }
            event
        })
        .collect();

    if malformed_qualifiers > 0 {
        warn!(
            events = malformed_qualifiers,
            "Events with malformed qualifier entries (unusable entries skipped)"
        );
    }
    debug!(count = events.len(), "Normalized event table");

    EventTable::new(events)
}

/// Normalize untyped event records straight from the feed.
///
/// Records that are not event objects become all-default rows.
pub fn normalize_records(records: &[Value]) -> EventTable {
    let mut defaulted = 0usize;
    let raw: Vec<RawEvent> = records
        .iter()
        .map(|value| {
            let (event, ok) = RawEvent::from_value(value);
            if !ok {
                defaulted += 1;
            }
            event
        })
        .collect();

    if defaulted > 0 {
        warn!(records = defaulted, "Malformed event records replaced with defaults");
    }
    normalize(&raw)
}

fn normalize_event(index: usize, raw: &RawEvent) -> (Event, usize) {
    let x = raw.x.map(|v| v * scale::X);
    let y = raw.y.map(|v| v * scale::Y);
    let end_x = raw.end_x.map(|v| v * scale::X);
    let end_y = raw.end_y.map(|v| v * scale::Y);

    let (type_name, type_value) = raw
        .event_type
        .as_ref()
        .map(|t| (t.display_name.clone().unwrap_or_default(), t.value.unwrap_or(0)))
        .unwrap_or_default();
    let event_type = EventType::from_display(&type_name);

    let outcome = raw
        .outcome_type
        .as_ref()
        .and_then(|o| o.display_name.as_deref())
        .and_then(Outcome::from_display);

    let (period, period_display) = match raw.period.as_ref() {
        Some(p) => (
            Period::from_value(p.value.unwrap_or(1)),
            p.display_name.clone().unwrap_or_default(),
        ),
        None => (Period::FirstHalf, String::new()),
    };

    let minute = raw.minute.unwrap_or(0.0);
    let second = raw.second.unwrap_or(0.0);
    let cumulative_minute = cumulative_minute(period, minute, second);

    let (quals, skipped) = qualifiers::decode_counting(&raw.qualifiers);

    let metrics = SpatialMetrics::compute(x, y, end_x, end_y);

    let event = Event {
        index,
        event_id: raw.event_id,
        team_id: raw.team_id,
        player_id: raw.player_id,
        period,
        period_display,
        minute,
        second,
        x,
        y,
        end_x,
        end_y,
        event_type,
        type_value,
        outcome,
        cumulative_minute,
        distance: metrics.distance,
        angle: metrics.angle,
        is_progressive: metrics.is_progressive,
        dist_to_goal: metrics.dist_to_goal,
        end_dist_to_goal: metrics.end_dist_to_goal,
        is_key_pass: quals.key_pass,
        is_assist: quals.assist,
        is_goal: quals.goal,
        is_own_goal: quals.own_goal,
        xg: quals.xg.unwrap_or(0.0),
        qualifiers: quals,
    };
    (event, skipped)
}

/// Continuous match clock: period base + minute + second / 60.
pub fn cumulative_minute(period: Period, minute: f64, second: f64) -> f64 {
    period.base_minute() + minute + second / 60.0
}

/// Distance / angle / progressiveness for one event, NaN-safe.
#[derive(Debug, Clone, Copy)]
pub struct SpatialMetrics {
    pub distance: f64,
    pub angle: f64,
    pub is_progressive: bool,
    pub dist_to_goal: f64,
    pub end_dist_to_goal: f64,
}

impl SpatialMetrics {
    pub fn compute(x: Option<f64>, y: Option<f64>, end_x: Option<f64>, end_y: Option<f64>) -> Self {
        let x = x.unwrap_or(f64::NAN);
        let y = y.unwrap_or(f64::NAN);
        let end_x = end_x.unwrap_or(f64::NAN);
        let end_y = end_y.unwrap_or(f64::NAN);

        let dx = end_x - x;
        let dy = end_y - y;
        Self {
            distance: (dx * dx + dy * dy).sqrt(),
            angle: dy.atan2(dx),
            // NaN > 10.0 is false
            is_progressive: dx > pitch::PROGRESSIVE_MIN_DX_M,
            dist_to_goal: pitch::dist_to_goal(x, y),
            end_dist_to_goal: pitch::dist_to_goal(end_x, end_y),
        }
    }
}
