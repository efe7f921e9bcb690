//! Post-Match Report CLI library
//!
//! Extraction JSON file → match summary → selected report table as JSON.
//! No aggregation happens here; every table comes from `pmr_core`.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use pmr_core::analysis::RankMetric;
use pmr_core::{AnalysisConfig, MatchSummary, Side};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// Report table to export.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// The whole summary
    Summary,
    /// Match statistics: flat maps, comparison rows and categories
    Stats,
    PassNetwork { side: Side },
    Zones,
    Momentum,
    Positions { side: Side, starting_xi_only: bool },
    TopPerformers { metric: String, side: Option<Side>, top_n: Option<usize> },
    XgTimeline { side: Side },
    KeyMoments,
}

/// Config from a JSON file, or from `PMR_PROFILE` and friends.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(AnalysisConfig::from_env_or_default()),
    }
}

/// Read and summarise one extraction file.
pub fn load_summary(input: &Path, config: &AnalysisConfig) -> Result<MatchSummary> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read extraction file: {}", input.display()))?;
    let summary = MatchSummary::from_json(&text, config)
        .with_context(|| format!("Failed to parse extraction file: {}", input.display()))?;
    debug!(
        match_id = summary.match_id,
        events = summary.events.len(),
        success = summary.success,
        "Loaded match summary"
    );
    Ok(summary)
}

/// Build the requested report as JSON.
///
/// Every report except `Summary` needs the statistics; a summary without an
/// event feed is an error for them.
pub fn render(summary: &MatchSummary, report: &Report, config: &AnalysisConfig) -> Result<Value> {
    if *report == Report::Summary {
        return Ok(serde_json::to_value(summary)?);
    }
    let Some(stats) = summary.statistics.as_ref() else {
        bail!(
            "Match {} has no statistics: {}",
            summary.match_id.map_or_else(|| "?".to_string(), |id| id.to_string()),
            summary.error.as_deref().unwrap_or("unknown error")
        );
    };

    let value = match report {
        Report::Summary => serde_json::to_value(summary)?,
        Report::Stats => serde_json::json!({
            "home": stats.match_stats.home.to_map(),
            "away": stats.match_stats.away.to_map(),
            "comparison": stats.match_stats.comparison(),
            "categories": stats.match_stats.categories(),
            "possession": stats.possession,
            "xg": stats.xg,
        }),
        Report::PassNetwork { side } => {
            serde_json::to_value(summary.pass_network(*side, &config.pass_network))?
        }
        Report::Zones => serde_json::to_value(
            summary
                .zones(&config.zonal)
                .context("Failed to build zone grid")?,
        )?,
        Report::Momentum => serde_json::to_value(summary.momentum(&config.momentum))?,
        Report::Positions {
            side,
            starting_xi_only,
        } => serde_json::to_value(summary.player_positions(*side, *starting_xi_only))?,
        Report::TopPerformers {
            metric,
            side,
            top_n,
        } => {
            let Some(parsed) = RankMetric::parse(metric) else {
                bail!("Unknown ranking metric: {metric}");
            };
            let n = top_n.unwrap_or(config.top_performers.top_n);
            serde_json::to_value(summary.top_performers(parsed, *side, n))?
        }
        Report::XgTimeline { side } => serde_json::to_value(summary.xg_timeline(*side))?,
        Report::KeyMoments => serde_json::to_value(summary.key_moments())?,
    };
    Ok(value)
}

/// Write JSON to `out`, or stdout when `None`.
pub fn write_json(out: Option<&Path>, value: &impl Serialize, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            fs::write(path, text)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Load, render and write in one step.
pub fn run(
    input: &Path,
    out: Option<&Path>,
    report: &Report,
    config: &AnalysisConfig,
    pretty: bool,
) -> Result<()> {
    let summary = load_summary(input, config)?;
    let value = render(&summary, report, config)?;
    write_json(out, &value, pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn extraction() -> serde_json::Value {
        let pass = |team: i64, player: i64, x: f64| {
            serde_json::json!({
                "teamId": team, "playerId": player,
                "type": {"displayName": "Pass"},
                "outcomeType": {"displayName": "Successful"},
                "x": x, "y": 50.0, "minute": x / 2.0,
            })
        };
        serde_json::json!({
            "match_id": 5,
            "match_centre": {
                "home_team": {"team_id": 1, "name": "Home"},
                "away_team": {"team_id": 2, "name": "Away"},
                "events": {"all_events": [
                    pass(1, 10, 20.0), pass(1, 11, 30.0), pass(1, 10, 40.0),
                    pass(1, 11, 50.0), pass(2, 20, 60.0), pass(1, 10, 70.0),
                ]},
                "players": {"all_players": [
                    {"player_id": 10, "team_id": 1, "name": "Ten", "is_first_eleven": true},
                    {"player_id": 11, "team_id": 1, "name": "Eleven", "is_first_eleven": true},
                    {"player_id": 20, "team_id": 2, "name": "Twenty", "is_first_eleven": true},
                ]},
            },
        })
    }

    fn input_file(doc: &serde_json::Value) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(doc.to_string().as_bytes())?;
        Ok(file)
    }

    #[test]
    fn test_run_writes_stats() -> Result<()> {
        let input = input_file(&extraction())?;
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("reports").join("stats.json");

        run(input.path(), Some(&out), &Report::Stats, &AnalysisConfig::default(), true)?;

        let written: Value = serde_json::from_str(&fs::read_to_string(&out)?)?;
        assert_eq!(written["home"]["passes"], 5);
        assert_eq!(written["home"]["pass_accuracy"], 100.0);
        let away = written["possession"]["away"].as_f64().unwrap();
        assert!((away - 100.0 / 6.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_pass_network_report() -> Result<()> {
        let input = input_file(&extraction())?;
        let config = AnalysisConfig::default();
        let summary = load_summary(input.path(), &config)?;
        let value = render(&summary, &Report::PassNetwork { side: Side::Home }, &config)?;
        let connections = value["connections"].as_array().unwrap();
        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0]["pass_count"], 4);
        Ok(())
    }

    #[test]
    fn test_unknown_metric_is_an_error() -> Result<()> {
        let input = input_file(&extraction())?;
        let config = AnalysisConfig::default();
        let summary = load_summary(input.path(), &config)?;
        let report = Report::TopPerformers {
            metric: "style_points".to_string(),
            side: None,
            top_n: None,
        };
        assert!(render(&summary, &report, &config).is_err());

        let report = Report::TopPerformers {
            metric: "passes_completed".to_string(),
            side: Some(Side::Home),
            top_n: Some(1),
        };
        let top = render(&summary, &report, &config)?;
        assert_eq!(top[0]["player_id"], 10);
        Ok(())
    }

    #[test]
    fn test_missing_feed() -> Result<()> {
        let mut doc = extraction();
        doc["match_centre"]
            .as_object_mut()
            .unwrap()
            .remove("events");
        let input = input_file(&doc)?;
        let config = AnalysisConfig::default();
        let summary = load_summary(input.path(), &config)?;

        let full = render(&summary, &Report::Summary, &config)?;
        assert_eq!(full["success"], false);
        assert!(render(&summary, &Report::Stats, &config).is_err());
        Ok(())
    }

    #[test]
    fn test_unreadable_input() {
        let err = load_summary(Path::new("/nonexistent/match.json"), &AnalysisConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read extraction file"));
    }

    #[test]
    fn test_config_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(br#"{"pass_network": {"min_pass_count": 7}}"#)?;
        let config = load_config(Some(file.path()))?;
        assert_eq!(config.pass_network.min_pass_count, 7);
        Ok(())
    }
}
