//! Reference data: canonical records, name variants and team aliases.

mod aliases;
mod reference;
mod shared;

pub use aliases::team_alias;
pub use reference::{IndexStats, NameTable, NameVariant, ReferenceIndex};
pub use shared::SharedIndex;
