//! Aggregations over a normalized [`EventTable`](crate::events::EventTable).
//!
//! Every function here borrows the table read-only and is a pure function of
//! its inputs. Ratios are kept at full precision; rounding happens in the
//! export helpers (`TeamStats::to_map`, comparison rows) only.

pub mod momentum;
pub mod pass_network;
pub mod player_stats;
pub mod stats;
pub mod team_stats;
pub mod xg;
pub mod zonal;


#[cfg(all(test, feature = "proptest"))]
mod proptests;

use serde::{Deserialize, Serialize};

pub use momentum::{MomentumPoint, MomentumTimeline};
pub use pass_network::{PassConnection, PassNetwork, PlayerNode};
pub use player_stats::{PlayerPosition, PlayerStats, RankMetric, RankedPlayer};
pub use stats::{ComparisonRow, MatchStats, StatCategory, StatValue, TeamStats};
pub use team_stats::{
    ComprehensiveTeamStats, DefensiveStats, PassingStats, Possession, ShootingStats,
    TeamBasicInfo, TeamReport, TerritorialStats,
};
pub use xg::{ShotXg, XgPoint, XgSource};
pub use zonal::{ZoneCell, ZoneLabel, ZoneMatrix};

/// Generic wrapper for home/away team metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMetrics<T> {
    pub home: T,
    pub away: T,
}

impl<T> TeamMetrics<T> {
    pub fn new(home: T, away: T) -> Self {
        Self { home, away }
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `100 * part / total`, or 0.0 when `total` is zero.
pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Mean of the finite values, `None` when there are none.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Median of the finite values, `None` when there are none.
pub(crate) fn median(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(66.666, 1), 66.7);
        assert_eq!(round_to(1.005_1, 2), 1.01);
        assert_eq!(round_to(0.0, 2), 0.0);
    }

    #[test]
    fn test_percentage_guards_zero() {
        assert_eq!(percentage(3, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }

    #[test]
    fn test_mean_and_median_skip_nan() {
        assert_eq!(mean([1.0, f64::NAN, 3.0]), Some(2.0));
        assert_eq!(median([5.0, 1.0, f64::NAN, 3.0]), Some(3.0));
        assert_eq!(median([4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(Vec::<f64>::new()), None);
        assert_eq!(mean([f64::NAN]), None);
    }
}
