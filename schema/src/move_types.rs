use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Decides which attack and defense stats a move uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}
