pub mod checks;
pub mod engine;
pub mod history;
pub mod state;
pub mod stats;
pub mod turns;

pub use checks::{TurnCheck, TurnCleanup};
pub use engine::Battle;
pub use history::{Action, History, Round};
pub use state::{BattleEvent, BattleOutcome, EventBus, TurnRng};
pub use turns::{MoveTurn, RetreatTurn, Side, SwapTurn, Turn};

#[cfg(test)]
mod tests;
