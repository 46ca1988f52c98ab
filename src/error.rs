use thiserror::Error;

/// Errors raised while loading or deriving tables.
///
/// Data-quality gaps (missing translations, unmapped codes, absent
/// characters) are not errors; they degrade to empty values.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to fetch {table}: {reason}")]
    SourceUnavailable { table: String, reason: String },

    #[error("Malformed table {table}: {reason}")]
    MalformedTable { table: String, reason: String },

    #[error("Table {table} is missing columns: {}", columns.join(", "))]
    SchemaMismatch { table: String, columns: Vec<String> },
}

impl DataError {
    pub fn unavailable(table: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            table: table.into(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(table: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedTable {
            table: table.into(),
            reason: reason.to_string(),
        }
    }
}

pub type DataResult<T> = Result<T, DataError>;
