use serde_json::Value;
use std::collections::HashMap;

use crate::error::DataResult;
use crate::table::{Record, Table};

/// Suffix given to right-hand columns whose names collide with the left side
pub const DUPE_SUFFIX: &str = "_dupe";

/// Key columns for an equality join
#[derive(Debug, Clone, Copy)]
pub struct JoinSpec<'a> {
    pub left_key: &'a str,
    pub right_key: &'a str,
}

impl<'a> JoinSpec<'a> {
    /// Join on a column both sides share
    pub fn on(key: &'a str) -> Self {
        Self {
            left_key: key,
            right_key: key,
        }
    }

    pub fn keys(left_key: &'a str, right_key: &'a str) -> Self {
        Self { left_key, right_key }
    }
}

/// Left-outer join. Each left row is repeated once per matching right row;
/// unmatched left rows get null right-hand fields.
pub fn join(left: &Table, right: &Table, spec: JoinSpec) -> DataResult<Table> {
    left.require(&[spec.left_key])?;
    right.require(&[spec.right_key])?;

    let shared_key = spec.left_key == spec.right_key;
    let right_columns: Vec<(&str, String)> = right
        .columns()
        .iter()
        .filter(|c| !(shared_key && c.as_str() == spec.right_key))
        .map(|c| {
            let dest = if left.has_column(c) {
                format!("{}{}", c, DUPE_SUFFIX)
            } else {
                c.clone()
            };
            (c.as_str(), dest)
        })
        .collect();

    let mut index: HashMap<String, Vec<&Record>> = HashMap::new();
    for row in right.rows() {
        if let Some(key) = row.get(spec.right_key).and_then(match_key) {
            index.entry(key).or_default().push(row);
        }
    }

    let mut rows = Vec::with_capacity(left.len());
    for row in left.rows() {
        let matches = row
            .get(spec.left_key)
            .and_then(match_key)
            .and_then(|k| index.get(&k));

        match matches {
            Some(matches) => {
                for other in matches {
                    let mut merged = row.clone();
                    for (src, dest) in &right_columns {
                        merged.insert(dest.clone(), other.get(*src).cloned().unwrap_or(Value::Null));
                    }
                    rows.push(merged);
                }
            }
            None => {
                let mut merged = row.clone();
                for (_, dest) in &right_columns {
                    merged.insert(dest.clone(), Value::Null);
                }
                rows.push(merged);
            }
        }
    }

    let mut columns = left.columns().to_vec();
    columns.extend(right_columns.into_iter().map(|(_, dest)| dest));

    Ok(Table::with_columns(left.name(), columns, rows))
}

/// Merge the primary and global copies of a localization table.
///
/// Every primary key is kept. Primary values win; global values only fill
/// fields that are null or empty in the primary copy. Remaining nulls become
/// empty strings.
pub fn combine_localization(primary: &Table, global: &Table, key: &str) -> DataResult<Table> {
    let joined = join(primary, global, JoinSpec::on(key))?;

    let dupes: Vec<(String, String)> = joined
        .columns()
        .iter()
        .filter_map(|c| {
            c.strip_suffix(DUPE_SUFFIX)
                .filter(|base| joined.has_column(base))
                .map(|base| (base.to_string(), c.clone()))
        })
        .collect();

    let columns: Vec<String> = joined
        .columns()
        .iter()
        .filter(|c| !dupes.iter().any(|(_, d)| d == *c))
        .cloned()
        .collect();

    let rows = joined
        .into_rows()
        .into_iter()
        .map(|mut row| {
            for (base, dupe) in &dupes {
                let fallback = row.remove(dupe).unwrap_or(Value::Null);
                if is_blank(row.get(base)) {
                    row.insert(base.clone(), fallback);
                }
            }
            for value in row.values_mut() {
                if value.is_null() {
                    *value = Value::String(String::new());
                }
            }
            row
        })
        .collect();

    Ok(Table::with_columns(primary.name(), columns, rows))
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        _ => false,
    }
}

/// Hashable form of a join key, consistent with `table::values_equal`
fn match_key(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                let f = n.as_f64()?;
                if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    Some((f as i64).to_string())
                } else {
                    Some(f.to_string())
                }
            }
        }
        Value::String(s) => Some(format!("\"{}", s)),
        other => Some(other.to_string()),
    }
}
