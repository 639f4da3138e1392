use crate::battle::turns::Side;
use thiserror::Error;

/// Main error type for the Pokemon Confrontation engine
#[derive(Debug, Error)]
pub enum GameError {
    /// Error related to invalid use of a battle
    #[error("Battle error: {0}")]
    Battle(#[from] BattleError),
    /// Error related to loading the application configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Error related to saving or loading a progression
    #[error("Progression error: {0}")]
    Progression(#[from] ProgressionError),
}

/// Contract violations when driving a battle.
///
/// Rule outcomes such as a miss or a frozen companion are events, never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("The battle has not begun yet")]
    NotStarted,
    #[error("The battle has already ended")]
    AlreadyEnded,
    #[error("A turn for the {0} side was submitted in the wrong slot")]
    WrongSide(Side),
    #[error("Move `{0}` has no stages")]
    MoveWithoutStages(String),
    #[error("Invalid move slot: {0}")]
    InvalidMoveSlot(usize),
    #[error("Invalid companion index: {0}")]
    InvalidCompanionIndex(usize),
    #[error("Stage {0} does not exist on the move")]
    StageOutOfRange(usize),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed configuration: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Could not write configuration: {0}")]
    Serialize(#[from] ron::Error),
}

#[derive(Debug, Error)]
pub enum ProgressionError {
    #[error("Could not access save file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed save file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}

/// Type alias for Results using GameError
pub type GameResult<T> = Result<T, GameError>;

/// Type alias for Results using BattleError
pub type BattleResult<T> = Result<T, BattleError>;

/// Type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Type alias for Results using ProgressionError
pub type ProgressionResult<T> = Result<T, ProgressionError>;
