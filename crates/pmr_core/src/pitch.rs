//! Pitch geometry in match-space (105m × 68m).
//!
//! Every coordinate past the normalizer is in meters on this pitch, with the
//! analysed side attacking toward x = 105.

/// Field dimensions (meters)
pub mod field {
    /// Field length in meters
    pub const LENGTH_M: f64 = 105.0;
    /// Field width in meters
    pub const WIDTH_M: f64 = 68.0;
    /// Center Y coordinate (meters)
    pub const CENTER_Y: f64 = WIDTH_M * 0.5;
}

/// Raw feed coordinates are on a 0-100 scale per axis.
pub mod scale {
    use super::field;

    /// Multiplier from raw x (0-100) to meters.
    pub const X: f64 = field::LENGTH_M / 100.0;
    /// Multiplier from raw y (0-100) to meters.
    pub const Y: f64 = field::WIDTH_M / 100.0;
}

/// Goal mouth (the goal at x = LENGTH_M).
pub mod goal {
    use super::field;

    pub const WIDTH_M: f64 = 7.32;
    pub const CENTER: (f64, f64) = (field::LENGTH_M, field::CENTER_Y);
}

/// Shot-location rectangles.
pub mod boxes {
    pub const PENALTY_AREA_X_MIN: f64 = 88.5;
    pub const PENALTY_AREA_Y_MIN: f64 = 13.8;
    pub const PENALTY_AREA_Y_MAX: f64 = 54.2;

    pub const SIX_YARD_X_MIN: f64 = 99.5;
    pub const SIX_YARD_Y_MIN: f64 = 24.8;
    pub const SIX_YARD_Y_MAX: f64 = 43.2;
}

/// Territorial thirds (x splits).
pub mod thirds {
    pub const DEFENSIVE_MAX_X: f64 = 35.0;
    pub const MIDDLE_MAX_X: f64 = 70.0;
}

/// Progressive pass/carry threshold: more than this many meters forward.
pub const PROGRESSIVE_MIN_DX_M: f64 = 10.0;

/// Pass length bands (meters).
pub const SHORT_PASS_MAX_M: f64 = 15.0;
pub const LONG_PASS_MIN_M: f64 = 25.0;

pub fn in_penalty_area(x: f64, y: f64) -> bool {
    x >= boxes::PENALTY_AREA_X_MIN
        && y >= boxes::PENALTY_AREA_Y_MIN
        && y <= boxes::PENALTY_AREA_Y_MAX
}

pub fn in_six_yard_box(x: f64, y: f64) -> bool {
    x >= boxes::SIX_YARD_X_MIN && y >= boxes::SIX_YARD_Y_MIN && y <= boxes::SIX_YARD_Y_MAX
}

/// Straight-line distance from (x, y) to the centre of the goal at x = 105.
///
/// NaN in, NaN out.
pub fn dist_to_goal(x: f64, y: f64) -> f64 {
    let (gx, gy) = goal::CENTER;
    ((gx - x).powi(2) + (gy - y).powi(2)).sqrt()
}

/// Angle (radians) subtended by the goal mouth as seen from (x, y).
pub fn goal_mouth_angle(x: f64, y: f64) -> f64 {
    let dx = goal::CENTER.0 - x;
    let dy = (goal::CENTER.1 - y).abs();
    let half = goal::WIDTH_M / 2.0;
    let denom = dx * dx + dy * dy - half * half;
    let angle = (goal::WIDTH_M * dx).atan2(denom);
    if angle < 0.0 {
        angle + std::f64::consts::PI
    } else {
        angle
    }
}

/// Named tactical regions used by event queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchZone {
    DefensiveThird,
    MiddleThird,
    AttackingThird,
    Zone14,
    LeftHalfSpace,
    RightHalfSpace,
    PenaltyBox,
}

impl PitchZone {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            PitchZone::DefensiveThird => x <= thirds::DEFENSIVE_MAX_X,
            PitchZone::MiddleThird => x > thirds::DEFENSIVE_MAX_X && x <= thirds::MIDDLE_MAX_X,
            PitchZone::AttackingThird => x > thirds::MIDDLE_MAX_X,
            PitchZone::Zone14 => (70.0..=87.5).contains(&x) && (20.4..=47.6).contains(&y),
            PitchZone::LeftHalfSpace => (70.0..=87.5).contains(&x) && (10.2..=27.2).contains(&y),
            PitchZone::RightHalfSpace => (70.0..=87.5).contains(&x) && (40.8..=57.8).contains(&y),
            PitchZone::PenaltyBox => in_penalty_area(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_factors() {
        assert!((scale::X - 1.05).abs() < 1e-12);
        assert!((scale::Y - 0.68).abs() < 1e-12);
    }

    #[test]
    fn test_box_edges_inclusive() {
        assert!(in_penalty_area(88.5, 13.8));
        assert!(in_penalty_area(105.0, 54.2));
        assert!(!in_penalty_area(88.4, 34.0));
        assert!(in_six_yard_box(99.5, 34.0));
        assert!(!in_six_yard_box(99.5, 44.0));
    }

    #[test]
    fn test_nan_never_in_zone() {
        for zone in [
            PitchZone::DefensiveThird,
            PitchZone::MiddleThird,
            PitchZone::AttackingThird,
            PitchZone::Zone14,
            PitchZone::PenaltyBox,
        ] {
            assert!(!zone.contains(f64::NAN, 34.0), "{:?}", zone);
        }
    }

    #[test]
    fn test_goal_mouth_angle_wider_when_closer() {
        let near = goal_mouth_angle(99.0, 34.0);
        let far = goal_mouth_angle(75.0, 34.0);
        let wide = goal_mouth_angle(99.0, 5.0);
        assert!(near > far);
        assert!(near > wide);
        assert!(near < std::f64::consts::PI);
    }

    #[test]
    fn test_dist_to_goal() {
        assert!((dist_to_goal(105.0, 34.0)).abs() < 1e-12);
        assert!((dist_to_goal(94.0, 34.0) - 11.0).abs() < 1e-12);
        assert!(dist_to_goal(f64::NAN, 34.0).is_nan());
    }
}
