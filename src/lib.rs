// In: src/lib.rs

//! Pokemon Confrontation Battle Engine
//!
//! Resolves battles between two trainers' teams one round at a time: turn ordering,
//! multi-stage moves, damage, status conditions, stat stages, experience and evolution.
//! Every random draw goes through a single injectable source so battles can be replayed
//! exactly in tests.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod content;
pub mod errors;
pub mod experience;
pub mod moves;
pub mod pokemon;
pub mod progression;
pub mod stats;
pub mod trainer;
pub mod types;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{ElementalType, MoveCategory, Nature, PokemonStatus, Stat};

// --- From this crate's modules (`src/`) ---

// Battle engine and its log.
pub use battle::{Battle, BattleEvent, BattleOutcome, History, Side, Turn, TurnRng};

// Companions, moves and the people who own them.
pub use moves::{PokemonMove, Stage};
pub use pokemon::{Pokemon, PokemonBuilder};
pub use trainer::{Decider, PlayerDecider, RandomDecider, ScriptedDecider, Team, Trainer};

// Persistence and configuration.
pub use config::Configuration;
pub use progression::Progression;

// Crate-specific error and result types.
pub use errors::{
    BattleError, BattleResult, ConfigError, ConfigResult, GameError, GameResult,
    ProgressionError, ProgressionResult,
};
