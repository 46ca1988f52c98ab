pub mod effects;
pub mod grammar;

pub use effects::*;
pub use grammar::*;
