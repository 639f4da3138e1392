use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Battle-only status conditions. A companion holds each at most once.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum PokemonStatus {
    Burn,
    Freeze,
    Poison,
    Flinch,
}
