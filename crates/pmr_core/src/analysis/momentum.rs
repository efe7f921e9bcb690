//! Match momentum: home/away share of weighted activity per time window.
//!
//! Windows start at minute 0 and are `window_minutes` wide; an event belongs
//! to the window with `start <= cumulative_minute < end`. Events after
//! `max_minute` are dropped. Each event weighs 1; `Shot`, `SavedShot` and
//! `MissedShots` weigh `1 + shot_bonus` (goals and woodwork do not). Windows
//! without weight produce no point.

use serde::Serialize;

use crate::config::MomentumConfig;
use crate::events::EventTable;
use crate::models::{EventType, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MomentumPoint {
    /// Window midpoint (cumulative minutes).
    pub minute: f64,
    pub home: f64,
    pub away: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MomentumTimeline {
    pub points: Vec<MomentumPoint>,
    pub smoothed: bool,
}

impl MomentumTimeline {
    pub fn compute(
        table: &EventTable,
        home_id: TeamId,
        away_id: TeamId,
        cfg: &MomentumConfig,
    ) -> Self {
        if !(cfg.window_minutes > 0.0) || !(cfg.max_minute > 0.0) {
            return Self::default();
        }
        let n_windows = (cfg.max_minute / cfg.window_minutes).floor() as usize;
        let mut weights = vec![(0.0f64, 0.0f64); n_windows];

        for event in table.iter() {
            let minute = event.cumulative_minute;
            if !(0.0..=cfg.max_minute).contains(&minute) {
                continue;
            }
            let idx = (minute / cfg.window_minutes).floor() as usize;
            let Some(slot) = weights.get_mut(idx) else {
                continue;
            };
            let weight = if carries_shot_bonus(&event.event_type) {
                1.0 + cfg.shot_bonus
            } else {
                1.0
            };
            match event.team_id {
                Some(t) if t == home_id => slot.0 += weight,
                Some(t) if t == away_id => slot.1 += weight,
                _ => {}
            }
        }

        let points = weights
            .into_iter()
            .enumerate()
            .filter(|(_, (h, a))| h + a > 0.0)
            .map(|(i, (h, a))| {
                let home = h / (h + a) * 100.0;
                MomentumPoint {
                    minute: (i as f64 + 0.5) * cfg.window_minutes,
                    home,
                    away: 100.0 - home,
                }
            })
            .collect();

        Self {
            points,
            smoothed: false,
        }
    }

    /// Gaussian-smoothed copy (reflect boundary, truncated at 4σ).
    ///
    /// Series no longer than `min_points_for_smoothing` are returned as is.
    pub fn smoothed(&self, cfg: &MomentumConfig) -> Self {
        if self.points.len() <= cfg.min_points_for_smoothing || !(cfg.smoothing_sigma > 0.0) {
            return self.clone();
        }
        let home: Vec<f64> = self.points.iter().map(|p| p.home).collect();
        let away: Vec<f64> = self.points.iter().map(|p| p.away).collect();
        let home = gaussian_filter(&home, cfg.smoothing_sigma);
        let away = gaussian_filter(&away, cfg.smoothing_sigma);

        Self {
            points: self
                .points
                .iter()
                .zip(home.into_iter().zip(away))
                .map(|(p, (home, away))| MomentumPoint {
                    minute: p.minute,
                    home,
                    away,
                })
                .collect(),
            smoothed: true,
        }
    }
}

/// 1-D Gaussian filter, `reflect` boundary (d c b a | a b c d | d c b a).
pub fn gaussian_filter(values: &[f64], sigma: f64) -> Vec<f64> {
    let n = values.len();
    if n == 0 || !(sigma > 0.0) {
        return values.to_vec();
    }
    let radius = (4.0 * sigma + 0.5) as usize;
    let kernel: Vec<f64> = (0..=2 * radius)
        .map(|k| {
            let x = k as f64 - radius as f64;
            (-0.5 * x * x / (sigma * sigma)).exp()
        })
        .collect();
    let norm: f64 = kernel.iter().sum();

    (0..n)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, w)| {
                    let offset = i as isize + k as isize - radius as isize;
                    w * values[reflect(offset, n)]
                })
                .sum::<f64>()
                / norm
        })
        .collect()
}

fn carries_shot_bonus(event_type: &EventType) -> bool {
    matches!(
        event_type,
        EventType::Shot | EventType::SavedShot | EventType::MissedShots
    )
}

fn reflect(index: isize, n: usize) -> usize {
    let period = 2 * n as isize;
    let i = index.rem_euclid(period);
    if i < n as isize {
        i as usize
    } else {
        (period - 1 - i) as usize
    }
}
