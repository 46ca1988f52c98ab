pub mod bond;
pub mod character;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod extract;
pub mod filter;
pub mod join;
pub mod localization;
pub mod remap;
pub mod schema;
pub mod source;
pub mod table;

pub use character::{Character, CharacterResource, CharacterView};
pub use cli::{Cli, Commands};
pub use data::{AssetKind, GameData};
pub use error::{DataError, DataResult};
pub use filter::Filter;
pub use localization::{Lang, Localization};
