use serde_json::Value;

use crate::localization::Lang;

/// Column data type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    Boolean,
    /// Fixed-length per-tier values (`[tier1, tier2, ...]`)
    List,
    /// Localized text expands to one column per language (NameJp, NameEn, ...)
    Localized,
    /// Carried through without a type check
    Any,
}

impl ColumnType {
    /// Whether a non-null JSON value conforms to this type
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            ColumnType::Integer => value.is_i64() || value.is_u64(),
            ColumnType::Real => value.is_number(),
            ColumnType::Text | ColumnType::Localized => value.is_string(),
            ColumnType::Boolean => value.is_boolean(),
            ColumnType::List => value.is_array(),
            ColumnType::Any => true,
        }
    }
}

/// Column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub name: &'static str,
    pub col_type: ColumnType,
    /// Tables without this column cannot be used at all
    pub required: bool,
}

impl Column {
    /// Create an optional column, type-checked when present
    pub const fn new(name: &'static str, col_type: ColumnType) -> Self {
        Self {
            name,
            col_type,
            required: false,
        }
    }

    /// Create a required column
    pub const fn required(name: &'static str, col_type: ColumnType) -> Self {
        Self {
            name,
            col_type,
            required: true,
        }
    }

    /// Physical column names, expanding localized columns per language
    pub fn expand(&self) -> Vec<String> {
        match self.col_type {
            ColumnType::Localized => Lang::ALL
                .iter()
                .map(|lang| format!("{}{}", self.name, lang.tag()))
                .collect(),
            _ => vec![self.name.to_string()],
        }
    }
}

/// Table schema definition
#[derive(Debug, Clone)]
pub struct TableSchema {
    /// Logical table name
    pub name: &'static str,
    /// Document name under each data root
    pub source_file: &'static str,
    /// Columns the pipeline reads; other fields pass through untyped
    pub columns: &'static [Column],
}

impl TableSchema {
    pub fn required_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.required)
    }
}
