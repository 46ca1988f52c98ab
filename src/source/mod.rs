pub mod cache;
pub mod client;

pub use cache::*;
pub use client::*;

use std::fmt;
use tracing::info;

use crate::error::DataResult;
use crate::schema::TableSchema;
use crate::table::Table;

/// Which release a document comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Primary,
    Global,
}

impl Region {
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Primary => "primary",
            Region::Global => "global",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that can hand back the raw text of a named table document
pub trait TableSource: Send + Sync {
    fn fetch(&self, file: &str) -> DataResult<String>;
}

impl<T: TableSource + ?Sized> TableSource for Box<T> {
    fn fetch(&self, file: &str) -> DataResult<String> {
        (**self).fetch(file)
    }
}

/// One source per region
pub struct Sources {
    primary: Box<dyn TableSource>,
    global: Box<dyn TableSource>,
}

impl Sources {
    pub fn new(primary: impl TableSource + 'static, global: impl TableSource + 'static) -> Self {
        Self {
            primary: Box::new(primary),
            global: Box::new(global),
        }
    }

    pub fn get(&self, region: Region) -> &dyn TableSource {
        match region {
            Region::Primary => self.primary.as_ref(),
            Region::Global => self.global.as_ref(),
        }
    }
}

/// Fetch one table and parse it against its schema
pub fn load(source: &dyn TableSource, schema: &TableSchema) -> DataResult<Table> {
    let text = source.fetch(schema.source_file)?;
    let table = Table::parse(schema, &text)?;
    info!(table = schema.name, rows = table.len(), "Loaded table");
    Ok(table)
}
