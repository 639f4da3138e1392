use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The seventeen elemental types. Order follows the type chart.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ElementalType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
}

impl ElementalType {
    /// Types this type deals double damage to.
    pub fn advantages(self) -> &'static [ElementalType] {
        use ElementalType::*;

        match self {
            Normal => &[],
            Fighting => &[Normal, Rock, Steel, Ice, Dark],
            Flying => &[Fighting, Bug, Grass],
            Poison => &[Grass],
            Ground => &[Poison, Rock, Steel, Fire, Electric],
            Rock => &[Flying, Bug, Fire, Ice],
            Bug => &[Grass, Psychic, Dark],
            Ghost => &[Ghost, Psychic],
            Steel => &[Rock, Ice],
            Fire => &[Bug, Steel, Grass, Ice],
            Water => &[Ground, Rock, Fire],
            Grass => &[Ground, Rock, Water],
            Electric => &[Flying, Water],
            Psychic => &[Fighting, Ground],
            Ice => &[Flying, Ground, Grass, Dragon],
            Dragon => &[Dragon],
            Dark => &[Ghost, Psychic],
        }
    }

    /// Types this type deals half damage to.
    pub fn disadvantages(self) -> &'static [ElementalType] {
        use ElementalType::*;

        match self {
            Normal => &[Rock, Steel],
            Fighting => &[Flying, Poison, Bug, Psychic],
            Flying => &[Rock, Steel, Electric],
            Poison => &[Poison, Ground, Rock, Ghost],
            Ground => &[Bug, Grass],
            Rock => &[Fighting, Ground, Steel],
            Bug => &[Fighting, Flying, Poison, Ghost, Steel, Fire],
            Ghost => &[Dark],
            Steel => &[Steel, Fire, Water, Electric],
            Fire => &[Rock, Fire, Water, Dragon],
            Water => &[Water, Grass, Dragon],
            Grass => &[Flying, Poison, Bug, Steel, Fire, Grass, Dragon],
            Electric => &[Grass, Electric, Dragon],
            Psychic => &[Steel, Psychic],
            Ice => &[Steel, Fire, Water, Ice],
            Dragon => &[Steel],
            Dark => &[Fighting, Dark],
        }
    }

    /// Types this type cannot damage at all.
    pub fn nulled(self) -> &'static [ElementalType] {
        use ElementalType::*;

        match self {
            Normal | Fighting => &[Ghost],
            Poison => &[Steel],
            Ground => &[Flying],
            Ghost => &[Normal],
            Electric => &[Ground],
            Psychic => &[Dark],
            Flying | Rock | Bug | Steel | Fire | Water | Grass | Ice | Dragon | Dark => &[],
        }
    }
}
