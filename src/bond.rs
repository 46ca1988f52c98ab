use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::DataResult;
use crate::remap::display_name;
use crate::schema::lookups::BOND_STAT_TYPES;
use crate::table::{Record, Table};

pub const BOND_COLUMNS: [&str; 3] = ["FavorLevel", "StatType", "StatValue"];

/// Two stats and their running totals, starting from an all-zero level 1
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BondCurve {
    #[serde(rename = "Stat1")]
    pub stat1: Option<String>,
    #[serde(rename = "Stat1Value")]
    pub stat1_values: Vec<i64>,
    #[serde(rename = "Stat2")]
    pub stat2: Option<String>,
    #[serde(rename = "Stat2Value")]
    pub stat2_values: Vec<i64>,
    #[serde(rename = "Level")]
    pub levels: Vec<i64>,
}

/// Build one curve per character from the favor level reward table
pub fn bond_curves(table: &Table) -> DataResult<HashMap<i64, BondCurve>> {
    table.require(&BOND_COLUMNS)?;
    table.require(&["CharacterId"])?;

    Ok(table
        .group_by("CharacterId")
        .into_iter()
        .filter_map(|(id, rows)| id.as_i64().map(|id| (id, build_bond_curve(&rows))))
        .collect())
}

/// Build a curve from one character's per-level rows.
///
/// The stat types in play are read from the highest level. Missing deltas
/// count as zero.
pub fn build_bond_curve(rows: &[&Record]) -> BondCurve {
    let mut sorted = rows.to_vec();
    sorted.sort_by_key(|r| r.get("FavorLevel").and_then(Value::as_i64).unwrap_or(0));

    let stat_types = sorted
        .last()
        .and_then(|r| r.get("StatType"))
        .and_then(Value::as_array);
    let stat = |idx: usize| -> Option<String> {
        let code = stat_types?.get(idx)?.as_str()?;
        Some(display_name(BOND_STAT_TYPES, code).unwrap_or(code).to_string())
    };

    let mut curve = BondCurve {
        stat1: stat(0),
        stat2: stat(1),
        stat1_values: vec![0],
        stat2_values: vec![0],
        levels: vec![1],
    };

    let (mut total1, mut total2) = (0, 0);
    for row in sorted {
        total1 += delta(row, 0);
        total2 += delta(row, 1);
        curve.stat1_values.push(total1);
        curve.stat2_values.push(total2);
        curve
            .levels
            .push(row.get("FavorLevel").and_then(Value::as_i64).unwrap_or(0));
    }

    curve
}

fn delta(row: &Record, idx: usize) -> i64 {
    row.get("StatValue")
        .and_then(Value::as_array)
        .and_then(|values| values.get(idx))
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .unwrap_or(0)
}
