use serde_json::Value;
use tracing::debug;

use crate::schema::lookups::{lookup, Lookup};
use crate::table::{Record, Table};

/// Replace a coded string value with its display name. Unknown codes pass through.
pub fn remap(record: &mut Record, field: &str, table: Lookup) {
    let display = match record.get(field) {
        Some(Value::String(code)) => match lookup(table, code) {
            Some(display) => display,
            None => {
                debug!(field, code = %code, "No display name for code");
                return;
            }
        },
        _ => return,
    };

    record.insert(field.to_string(), Value::String(display.to_string()));
}

/// Apply `remap` to every row of a table
pub fn remap_column(mut table: Table, field: &str, lookup: Lookup) -> Table {
    for row in table.rows_mut() {
        remap(row, field, lookup);
    }
    table
}

/// Rename columns by (from, to) pairs; pairs naming absent columns are skipped
pub fn rename_columns(table: Table, pairs: Lookup) -> Table {
    pairs
        .iter()
        .fold(table, |table, (from, to)| table.rename_column(from, to))
}

/// Look up a single code, logging when it has no display name
pub fn display_name(table: Lookup, code: &str) -> Option<&'static str> {
    let found = lookup(table, code);
    if found.is_none() {
        debug!(code, "No display name for code");
    }
    found
}
