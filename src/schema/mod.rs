pub mod columns;
pub mod lookups;
pub mod tables;
pub mod types;

pub use tables::*;
pub use types::*;
