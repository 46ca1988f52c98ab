use anyhow::{bail, Result};
use serde_json::Value;
use tracing::debug;

use crate::table::{values_equal, Record, Table};

/// Equality/membership filter: every field must hold one of its accepted values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, Vec<Value>)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept any of `values` for `field`, adding to earlier values for the same field
    pub fn with<V: Into<Value>>(mut self, field: &str, values: impl IntoIterator<Item = V>) -> Self {
        for value in values {
            self.push(field, value.into());
        }
        self
    }

    pub fn push(&mut self, field: &str, value: Value) {
        match self.clauses.iter_mut().find(|(f, _)| f == field) {
            Some((_, values)) => values.push(value),
            None => self.clauses.push((field.to_string(), vec![value])),
        }
    }

    /// Parse `field=value` pairs; repeated fields accept any of their values
    pub fn from_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self> {
        let mut filter = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let Some((field, value)) = pair.split_once('=') else {
                bail!("Filter must look like field=value: {}", pair);
            };
            if field.is_empty() {
                bail!("Filter has an empty field name: {}", pair);
            }
            filter.push(field, parse_value(value));
        }
        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.clauses.iter().map(|(f, _)| f.as_str())
    }

    /// Drop clauses naming columns the table lacks. Returns `None` when a
    /// filter was given but none of its fields exist, meaning nothing can match.
    pub fn restrict_to(&self, table: &Table) -> Option<Filter> {
        let clauses: Vec<_> = self
            .clauses
            .iter()
            .filter(|(field, _)| {
                let known = table.has_column(field);
                if !known {
                    debug!(table = table.name(), field = %field, "Ignoring unknown filter field");
                }
                known
            })
            .cloned()
            .collect();

        if clauses.is_empty() && !self.is_empty() {
            None
        } else {
            Some(Filter { clauses })
        }
    }

    /// AND across fields, OR within each field's values
    pub fn matches(&self, record: &Record) -> bool {
        self.clauses.iter().all(|(field, accepted)| {
            record
                .get(field)
                .is_some_and(|v| accepted.iter().any(|a| values_equal(v, a)))
        })
    }
}

/// Best-effort typing of a query-string value: int, then float, then bool, else string
pub fn parse_value(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        return Value::from(i);
    }

    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let is_decimal = digits.contains('.')
        && !digits.ends_with('.')
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() == 1;
    if is_decimal {
        if let Ok(f) = raw.parse::<f64>() {
            return Value::from(f);
        }
    }

    match raw.to_ascii_lowercase().as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}
