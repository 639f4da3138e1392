// Pokemon Confrontation Schema - Shared type definitions
// This crate contains the closed enums shared by every part of the battle
// engine: elemental types, stats, natures, move categories and status conditions.

// Re-export the main types
pub use battle_data::*;
pub use move_types::*;
pub use pokemon_types::*;
pub use stat_types::*;

// Exhaustive iteration over the enums above.
pub use strum::IntoEnumIterator;

pub mod battle_data;
pub mod move_types;
pub mod pokemon_types;
pub mod stat_types;
