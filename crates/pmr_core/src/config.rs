//! # Analysis Configuration
//!
//! Tunable parameters of the report aggregations.
//!
//! ## Usage
//!
//! ```rust
//! use pmr_core::config::AnalysisConfig;
//!
//! // Default: starting-XI pass network, 3-pass edge threshold, 6x5 zones
//! let config = AnalysisConfig::default();
//!
//! // Every player, every edge
//! let full = AnalysisConfig::full_squad();
//! assert_eq!(full.pass_network.min_pass_count, 0);
//!
//! // From environment variables
//! let from_env = AnalysisConfig::from_env_or_default();
//! ```
//!
//! ## Environment Variables
//!
//! - `PMR_PROFILE`: Select preset (`default`, `full_squad`)
//! - `PMR_MIN_PASSES`: Override the pass network edge threshold
//! - `PMR_ZONE_GRID`: Override the zone grid as `<cols>x<rows>` (e.g. `6x5`)
//!
//! The zonal dominance bands (0.6 / 0.4) are fixed and not configurable.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub pass_network: PassNetworkConfig,
    pub zonal: ZonalConfig,
    pub momentum: MomentumConfig,
    pub top_performers: TopPerformersConfig,
}

impl AnalysisConfig {
    /// Pass network over the whole squad with every edge kept.
    pub fn full_squad() -> Self {
        Self {
            pass_network: PassNetworkConfig {
                min_pass_count: 0,
                starting_xi_only: false,
            },
            ..Self::default()
        }
    }

    /// Load from `PMR_PROFILE` (plus overrides) or use default.
    pub fn from_env_or_default() -> Self {
        Self::from_profile(
            env::var("PMR_PROFILE").ok().as_deref(),
            env::var("PMR_MIN_PASSES").ok().as_deref(),
            env::var("PMR_ZONE_GRID").ok().as_deref(),
        )
    }

    /// Preset by name plus textual overrides. Overrides that leave the config
    /// invalid are discarded and the preset is returned as-is.
    pub fn from_profile(
        profile: Option<&str>,
        min_passes: Option<&str>,
        zone_grid: Option<&str>,
    ) -> Self {
        let preset = match profile.unwrap_or_default().trim().to_lowercase().as_str() {
            "full_squad" | "full" => Self::full_squad(),
            _ => Self::default(),
        };
        let mut config = preset.clone();
        config.apply_overrides(min_passes, zone_grid);
        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!(error = %e, "Ignoring config overrides");
                preset
            }
        }
    }

    /// Apply textual overrides; unparsable values are ignored with a warning.
    pub fn apply_overrides(&mut self, min_passes: Option<&str>, zone_grid: Option<&str>) {
        if let Some(raw) = min_passes {
            match raw.trim().parse::<usize>() {
                Ok(n) => self.pass_network.min_pass_count = n,
                Err(_) => warn!(value = raw, "Ignoring unparsable PMR_MIN_PASSES"),
            }
        }
        if let Some(raw) = zone_grid {
            match parse_grid(raw) {
                Some((cols, rows)) => {
                    self.zonal.grid_cols = cols;
                    self.zonal.grid_rows = rows;
                }
                None => warn!(value = raw, "Ignoring unparsable PMR_ZONE_GRID"),
            }
        }
    }

    /// Load a JSON config file; missing keys take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.zonal.grid_cols == 0 || self.zonal.grid_rows == 0 {
            return Err(CoreError::InvalidConfig(format!(
                "zonal grid must be at least 1x1, got {}x{}",
                self.zonal.grid_cols, self.zonal.grid_rows
            )));
        }
        if !(self.momentum.window_minutes > 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "momentum window must be positive, got {}",
                self.momentum.window_minutes
            )));
        }
        if !(self.momentum.smoothing_sigma >= 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "momentum sigma must be non-negative, got {}",
                self.momentum.smoothing_sigma
            )));
        }
        Ok(())
    }
}

/// `"6x5"` → `(6, 5)`.
fn parse_grid(text: &str) -> Option<(usize, usize)> {
    let (cols, rows) = text.trim().to_lowercase().split_once('x').map(|(c, r)| {
        (c.trim().parse::<usize>(), r.trim().parse::<usize>())
    })?;
    Some((cols.ok()?, rows.ok()?))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassNetworkConfig {
    /// Edges with fewer passes are hidden (display threshold)
    pub min_pass_count: usize,
    /// Restrict passers and receivers to the starting XI
    pub starting_xi_only: bool,
}

impl Default for PassNetworkConfig {
    fn default() -> Self {
        Self {
            min_pass_count: 3,
            starting_xi_only: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZonalConfig {
    pub grid_cols: usize,
    pub grid_rows: usize,
}

impl Default for ZonalConfig {
    fn default() -> Self {
        Self {
            grid_cols: 6,
            grid_rows: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    /// Bin width in match minutes
    pub window_minutes: f64,
    /// Events after this cumulative minute are ignored (stoppage/extra time)
    pub max_minute: f64,
    /// Extra weight per shot-family event
    pub shot_bonus: f64,
    /// Gaussian sigma, in bins
    pub smoothing_sigma: f64,
    /// Smooth only when the series is longer than this
    pub min_points_for_smoothing: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            window_minutes: 1.5,
            max_minute: 90.0,
            shot_bonus: 2.0,
            smoothing_sigma: 1.5,
            min_points_for_smoothing: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopPerformersConfig {
    pub top_n: usize,
}

impl Default for TopPerformersConfig {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}
