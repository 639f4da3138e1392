use schema::ElementalType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of a type matchup, including dual-type products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effectiveness {
    Nullified,
    Ineffective,
    Disadvantaged,
    Default,
    Advantaged,
    Effective,
}

impl Effectiveness {
    pub fn multiplier(self) -> f64 {
        match self {
            Effectiveness::Nullified => 0.0,
            Effectiveness::Ineffective => 0.25,
            Effectiveness::Disadvantaged => 0.5,
            Effectiveness::Default => 1.0,
            Effectiveness::Advantaged => 2.0,
            Effectiveness::Effective => 4.0,
        }
    }

    /// Map a product of single-type modifiers back onto the fixed set.
    pub fn from_multiplier(multiplier: f64) -> Self {
        match multiplier {
            m if m <= 0.0 => Effectiveness::Nullified,
            m if m <= 0.25 => Effectiveness::Ineffective,
            m if m <= 0.5 => Effectiveness::Disadvantaged,
            m if m <= 1.0 => Effectiveness::Default,
            m if m <= 2.0 => Effectiveness::Advantaged,
            _ => Effectiveness::Effective,
        }
    }
}

impl fmt::Display for Effectiveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.multiplier())
    }
}

/// Modifier of a single attacking type against a single defending type.
/// Advantage wins over disadvantage, which wins over immunity.
pub fn modifier(attacking: ElementalType, defending: ElementalType) -> f64 {
    if attacking.advantages().contains(&defending) {
        Effectiveness::Advantaged.multiplier()
    } else if attacking.disadvantages().contains(&defending) {
        Effectiveness::Disadvantaged.multiplier()
    } else if attacking.nulled().contains(&defending) {
        Effectiveness::Nullified.multiplier()
    } else {
        Effectiveness::Default.multiplier()
    }
}

/// Effectiveness of an attacking type against a defender with one or two types.
pub fn effectiveness(attacking: ElementalType, defending: &[ElementalType]) -> Effectiveness {
    let product = defending
        .iter()
        .take(2)
        .map(|defender| modifier(attacking, *defender))
        .product();

    Effectiveness::from_multiplier(product)
}
