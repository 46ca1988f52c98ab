use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::error::{DataError, DataResult};
use crate::schema::{ColumnType, TableSchema};

/// One table row, in upstream field order
pub type Record = Map<String, Value>;

/// An ordered set of records sharing one field set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    /// Build a table whose columns are the union of every record's fields
    pub fn from_records(name: impl Into<String>, records: Vec<Record>) -> Self {
        let mut columns = Vec::new();
        let mut seen = HashSet::new();
        for record in &records {
            for key in record.keys() {
                if seen.insert(key.as_str()) {
                    columns.push(key.clone());
                }
            }
        }
        Self::with_columns(name, columns, records)
    }

    /// Build a table with a fixed column list; absent fields become null
    pub fn with_columns(name: impl Into<String>, columns: Vec<String>, records: Vec<Record>) -> Self {
        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|c| (c.clone(), record.remove(c).unwrap_or(Value::Null)))
                    .collect()
            })
            .collect();

        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Parse an upstream document and validate it against its schema
    pub fn parse(schema: &TableSchema, text: &str) -> DataResult<Self> {
        let doc: Value =
            serde_json::from_str(text).map_err(|e| DataError::malformed(schema.source_file, e))?;

        let list = doc
            .get("DataList")
            .and_then(Value::as_array)
            .ok_or_else(|| DataError::malformed(schema.source_file, "missing DataList array"))?;

        let mut records = Vec::with_capacity(list.len());
        for (idx, entry) in list.iter().enumerate() {
            let obj = entry.as_object().ok_or_else(|| {
                DataError::malformed(schema.source_file, format!("entry {} is not an object", idx))
            })?;
            let mut flat = Record::new();
            flatten_into("", obj, &mut flat);
            records.push(flat);
        }

        // An empty document still has the declared columns, so joins against it succeed
        let mut table = if records.is_empty() {
            let columns = schema.columns.iter().flat_map(|c| c.expand()).collect();
            Self::with_columns(schema.name, columns, records)
        } else {
            Self::from_records(schema.name, records)
        };

        if !table.is_empty() {
            for col in schema.required_columns() {
                if !col.expand().iter().any(|c| table.has_column(c)) {
                    return Err(DataError::malformed(
                        schema.source_file,
                        format!("missing required column {}", col.name),
                    ));
                }
            }
        }

        let before = table.len();
        table.rows = quarantine(schema, std::mem::take(&mut table.rows));
        debug!(
            table = schema.name,
            rows = table.len(),
            quarantined = before - table.len(),
            "Parsed table"
        );

        Ok(table)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Fail with `SchemaMismatch` unless every named column exists
    pub fn require(&self, columns: &[&str]) -> DataResult<()> {
        let missing: Vec<String> = columns
            .iter()
            .filter(|c| !self.has_column(c))
            .map(|c| c.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DataError::SchemaMismatch {
                table: self.name.clone(),
                columns: missing,
            })
        }
    }

    /// Append (or overwrite) a column computed from each row
    pub fn with_column(mut self, name: &str, compute: impl Fn(&Record) -> Value) -> Self {
        for row in &mut self.rows {
            let value = compute(row);
            row.insert(name.to_string(), value);
        }
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
        self
    }

    /// Rename one column in place, keeping its position
    pub fn rename_column(mut self, from: &str, to: &str) -> Self {
        if from == to || !self.has_column(from) {
            return self;
        }
        let columns: Vec<String> = self
            .columns
            .iter()
            .filter(|c| c.as_str() != to)
            .map(|c| if c == from { to.to_string() } else { c.clone() })
            .collect();
        let rows = std::mem::take(&mut self.rows)
            .into_iter()
            .map(|mut row| {
                if let Some(v) = row.remove(from) {
                    row.insert(to.to_string(), v);
                }
                row
            })
            .collect();
        Self::with_columns(self.name, columns, rows)
    }

    /// Mutable access for in-place value rewrites; the column set must not change
    pub(crate) fn rows_mut(&mut self) -> &mut [Record] {
        &mut self.rows
    }

    /// Drop rows whose values for `keys` repeat an earlier row
    pub fn dedup_by(mut self, keys: &[&str]) -> Self {
        let mut seen = HashSet::new();
        self.rows.retain(|row| {
            let key: Vec<String> = keys
                .iter()
                .map(|k| row.get(*k).map(Value::to_string).unwrap_or_default())
                .collect();
            seen.insert(key)
        });
        self
    }

    /// Group rows by a column, preserving first-seen group order
    pub fn group_by(&self, column: &str) -> Vec<(Value, Vec<&Record>)> {
        group_records(&self.rows, column)
    }
}

/// Group records by a column, preserving first-seen group order
pub fn group_records<'a>(
    rows: impl IntoIterator<Item = &'a Record>,
    column: &str,
) -> Vec<(Value, Vec<&'a Record>)> {
    let mut groups: Vec<(Value, Vec<&Record>)> = Vec::new();
    for row in rows {
        let key = row.get(column).cloned().unwrap_or(Value::Null);
        match groups.iter_mut().find(|(k, _)| values_equal(k, &key)) {
            Some((_, members)) => members.push(row),
            None => groups.push((key, vec![row])),
        }
    }
    groups
}

/// Equality used for joins and filters: numbers compare by value, null never matches
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        _ => a == b,
    }
}

/// Render a value as a mapping key (strings unquoted)
pub fn key_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Flatten nested objects into dotted field names
fn flatten_into(prefix: &str, obj: &Map<String, Value>, out: &mut Record) {
    for (key, value) in obj {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) => flatten_into(&name, inner, out),
            _ => {
                out.insert(name, value.clone());
            }
        }
    }
}

/// Drop records whose declared columns hold values of the wrong type
fn quarantine(schema: &TableSchema, rows: Vec<Record>) -> Vec<Record> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(idx, row)| match nonconforming_column(schema, &row) {
            Some(column) => {
                warn!(
                    table = schema.name,
                    row = idx,
                    column = %column,
                    "Quarantined record with unexpected value type"
                );
                None
            }
            None => Some(row),
        })
        .collect()
}

fn nonconforming_column(schema: &TableSchema, row: &Record) -> Option<String> {
    for col in schema.columns {
        if col.col_type == ColumnType::Any {
            continue;
        }
        for name in col.expand() {
            match row.get(&name) {
                None | Some(Value::Null) => {}
                Some(v) if col.col_type.accepts(v) => {}
                Some(_) => return Some(name),
            }
        }
    }
    None
}
