//! Zonal control grid
//!
//! Splits the 105m × 68m pitch into `cols × rows` equal cells and labels each
//! cell by which side has the most touches there.
//!
//! ## Bands (home share of the cell's touches)
//! - `> 0.6` → Home
//! - `< 0.4` → Away
//! - otherwise, or no touches → Contested
//!
//! The bands are fixed; existing renderings colour by them.

use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::events::EventTable;
use crate::models::TeamId;
use crate::pitch::field;

pub const HOME_DOMINANCE: f64 = 0.6;
pub const AWAY_DOMINANCE: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneLabel {
    Home,
    Away,
    Contested,
}

impl ZoneLabel {
    pub fn from_counts(home: usize, away: usize) -> Self {
        let total = home + away;
        if total == 0 {
            return ZoneLabel::Contested;
        }
        let home_share = home as f64 / total as f64;
        if home_share > HOME_DOMINANCE {
            ZoneLabel::Home
        } else if home_share < AWAY_DOMINANCE {
            ZoneLabel::Away
        } else {
            ZoneLabel::Contested
        }
    }
}

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneCell {
    pub home_touches: usize,
    pub away_touches: usize,
    pub label: ZoneLabel,
}

/// Labelled grid. `cells[row][col]`; row 0 is y = 0, col 0 is x = 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneMatrix {
    pub cols: usize,
    pub rows: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    pub cells: Vec<Vec<ZoneCell>>,
}

impl ZoneMatrix {
    pub fn label(&self, row: usize, col: usize) -> Option<ZoneLabel> {
        self.cells.get(row)?.get(col).map(|c| c.label)
    }

    pub fn labels(&self) -> Vec<Vec<ZoneLabel>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.label).collect())
            .collect()
    }

    /// Number of cells carrying `label`.
    pub fn count(&self, label: ZoneLabel) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.label == label)
            .count()
    }

    /// (row, col) of the cell holding a point; `None` for non-finite input
    /// or an empty grid.
    pub fn cell_of(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        Some((
            band_index(y, self.cell_height, self.rows)?,
            band_index(x, self.cell_width, self.cols)?,
        ))
    }
}

/// Points on the far touchline/goal line fall in the last band; points
/// slightly off the pitch are clamped in.
fn band_index(value: f64, width: f64, count: usize) -> Option<usize> {
    let last = count.checked_sub(1)?;
    if !value.is_finite() {
        return None;
    }
    let idx = (value / width).floor().max(0.0) as usize;
    Some(idx.min(last))
}

/// Label every cell from the events of `home_id` and `away_id`.
///
/// Events of other teams and events without coordinates are ignored.
pub fn classify(
    table: &EventTable,
    home_id: TeamId,
    away_id: TeamId,
    grid_cols: usize,
    grid_rows: usize,
) -> Result<ZoneMatrix> {
    if grid_cols == 0 || grid_rows == 0 {
        return Err(CoreError::InvalidParameter(format!(
            "zone grid must be at least 1x1, got {grid_cols}x{grid_rows}"
        )));
    }

    let empty = ZoneCell {
        home_touches: 0,
        away_touches: 0,
        label: ZoneLabel::Contested,
    };
    let mut matrix = ZoneMatrix {
        cols: grid_cols,
        rows: grid_rows,
        cell_width: field::LENGTH_M / grid_cols as f64,
        cell_height: field::WIDTH_M / grid_rows as f64,
        cells: vec![vec![empty; grid_cols]; grid_rows],
    };

    for event in table.iter() {
        let is_home = match event.team_id {
            Some(t) if t == home_id => true,
            Some(t) if t == away_id => false,
            _ => continue,
        };
        let Some((row, col)) = event.position().and_then(|(x, y)| matrix.cell_of(x, y)) else {
            continue;
        };
        let cell = &mut matrix.cells[row][col];
        if is_home {
            cell.home_touches += 1;
        } else {
            cell.away_touches += 1;
        }
    }

    for cell in matrix.cells.iter_mut().flatten() {
        cell.label = ZoneLabel::from_counts(cell.home_touches, cell.away_touches);
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::normalize_records;
    use serde_json::{json, Value};

    fn touch(team: i64, x: f64, y: f64) -> Value {
        json!({"teamId": team, "type": {"displayName": "Pass"}, "x": x, "y": y})
    }

    fn repeat(team: i64, x: f64, y: f64, n: usize) -> Vec<Value> {
        (0..n).map(|_| touch(team, x, y)).collect()
    }

    #[test]
    fn test_dominance_bands() {
        assert_eq!(ZoneLabel::from_counts(7, 3), ZoneLabel::Home);
        assert_eq!(ZoneLabel::from_counts(5, 5), ZoneLabel::Contested);
        assert_eq!(ZoneLabel::from_counts(6, 4), ZoneLabel::Contested);
        assert_eq!(ZoneLabel::from_counts(4, 6), ZoneLabel::Contested);
        assert_eq!(ZoneLabel::from_counts(3, 7), ZoneLabel::Away);
        assert_eq!(ZoneLabel::from_counts(0, 0), ZoneLabel::Contested);
        assert_eq!(ZoneLabel::from_counts(1, 0), ZoneLabel::Home);
    }

    #[test]
    fn test_classify_cells() {
        let mut records = repeat(1, 5.0, 5.0, 7);
        records.extend(repeat(2, 5.0, 5.0, 3));
        records.extend(repeat(1, 95.0, 95.0, 5));
        records.extend(repeat(2, 95.0, 95.0, 5));
        records.extend(repeat(2, 50.0, 50.0, 2));
        records.push(touch(3, 50.0, 50.0));
        records.push(json!({"teamId": 1, "type": {"displayName": "Pass"}}));
        let table = normalize_records(&records);

        let m = classify(&table, 1, 2, 6, 5).unwrap();
        assert_eq!(m.label(0, 0), Some(ZoneLabel::Home));
        assert_eq!(m.label(4, 5), Some(ZoneLabel::Contested));
        // 52.5m, 34m -> col 3, row 2
        assert_eq!(m.cell_of(52.5, 34.0), Some((2, 3)));
        assert_eq!(m.label(2, 3), Some(ZoneLabel::Away));
        assert_eq!(m.cells[2][3].away_touches, 2);
        assert_eq!(m.count(ZoneLabel::Home) + m.count(ZoneLabel::Away), 2);
        assert_eq!(m.count(ZoneLabel::Contested), 28);
    }

    #[test]
    fn test_far_edges_fall_in_last_cell() {
        let table = normalize_records(&[touch(1, 100.0, 100.0), touch(2, -1.0, 0.0)]);
        let m = classify(&table, 1, 2, 6, 5).unwrap();
        assert_eq!(m.cells[4][5].home_touches, 1);
        assert_eq!(m.cells[0][0].away_touches, 1);
    }

    #[test]
    fn test_cell_of_on_empty_matrix() {
        let matrix = ZoneMatrix {
            cols: 6,
            rows: 0,
            cell_width: 17.5,
            cell_height: 0.0,
            cells: Vec::new(),
        };
        assert_eq!(matrix.cell_of(50.0, 30.0), None);
        assert_eq!(matrix.label(0, 0), None);
    }

    #[test]
    fn test_zero_grid_is_rejected() {
        let table = EventTable::default();
        assert!(matches!(
            classify(&table, 1, 2, 0, 5),
            Err(CoreError::InvalidParameter(_))
        ));
        assert!(classify(&table, 1, 2, 6, 0).is_err());
    }

    #[test]
    fn test_empty_table_all_contested() {
        let m = classify(&EventTable::default(), 1, 2, 3, 2).unwrap();
        assert_eq!(m.labels(), vec![vec![ZoneLabel::Contested; 3]; 2]);
    }
}
