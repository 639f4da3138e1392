use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Stat {
    Health,
    Attack,
    Defense,
    #[strum(to_string = "special attack")]
    SpecialAttack,
    #[strum(to_string = "special defense")]
    SpecialDefense,
    Speed,
    Accuracy,
    Evasion,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Nature {
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
}

impl Nature {
    /// The stat this nature raises by ten percent, if any.
    pub fn increased(self) -> Option<Stat> {
        match self {
            Nature::Lonely | Nature::Brave | Nature::Adamant | Nature::Naughty => Some(Stat::Attack),
            Nature::Bold => Some(Stat::Defense),
            Nature::Hardy | Nature::Docile => None,
        }
    }

    /// The stat this nature lowers by ten percent, if any.
    pub fn decreased(self) -> Option<Stat> {
        match self {
            Nature::Lonely => Some(Stat::Defense),
            Nature::Brave => Some(Stat::Speed),
            Nature::Adamant => Some(Stat::SpecialAttack),
            Nature::Naughty => Some(Stat::SpecialDefense),
            Nature::Bold => Some(Stat::Attack),
            Nature::Hardy | Nature::Docile => None,
        }
    }
}
