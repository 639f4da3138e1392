use super::PokemonMove;
use crate::battle::state::TurnRng;
use crate::pokemon::Pokemon;
use crate::types::{self, Effectiveness};
use schema::{MoveCategory, PokemonStatus, Stat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Multiplicative factors applied to the nominal damage of a move, in order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageModifier {
    /// Doubles damage on a critical hit. High-crit moves use the boosted threshold.
    Crit { high: bool },
    /// Same-type attack bonus.
    Stab,
    /// Type matchup against the defender.
    Effectiveness,
    /// Uniform variance between 85% and 100%.
    Random,
}

impl DamageModifier {
    /// The factor this modifier contributes. Records crits and effectiveness on `result`.
    pub fn apply(
        &self,
        result: &mut DamageResult,
        pokemon_move: &PokemonMove,
        attacker: &Pokemon,
        defender: &Pokemon,
        rng: &mut TurnRng,
    ) -> f64 {
        match self {
            DamageModifier::Crit { high } => {
                let threshold = crit_threshold(attacker, *high);
                result.critical = rng.next_in(0..255, "critical hit") < threshold;
                if result.critical {
                    2.0
                } else {
                    1.0
                }
            }
            DamageModifier::Stab => {
                if attacker.types.contains(&pokemon_move.element) {
                    1.5
                } else {
                    1.0
                }
            }
            DamageModifier::Effectiveness => {
                result.effectiveness = types::effectiveness(pokemon_move.element, &defender.types);
                result.effectiveness.multiplier()
            }
            DamageModifier::Random => rng.next_in(85..101, "damage variance") as f64 / 100.0,
        }
    }
}

/// Half the attacker's base speed, or eight times that (capped at 255) for high-crit moves.
pub fn crit_threshold(attacker: &Pokemon, high: bool) -> u32 {
    let base_speed = attacker
        .statistics
        .base
        .get(&Stat::Speed)
        .copied()
        .unwrap_or(0);

    if high {
        (8 * (base_speed / 2)).min(255)
    } else {
        base_speed / 2
    }
}

/// The outcome of a damage calculation. A `value` of `None` means the move deals no damage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageResult {
    pub value: Option<f64>,
    pub critical: bool,
    pub effectiveness: Effectiveness,
}

impl DamageResult {
    pub fn none() -> Self {
        Self {
            value: None,
            critical: false,
            effectiveness: Effectiveness::Default,
        }
    }

    pub fn fixed(value: f64) -> Self {
        Self {
            value: Some(value),
            ..Self::none()
        }
    }
}

/// Nominal damage of a move before any modifier:
/// `floor(2 * level / 5 + 2) * power * attack / defense / 50 + 2`, halved for burned
/// physical attackers before the flat bonus.
pub fn base_damage(pokemon_move: &PokemonMove, attacker: &Pokemon, defender: &Pokemon) -> Option<f64> {
    if pokemon_move.category == MoveCategory::Status {
        return None;
    }
    let power = pokemon_move.power?;

    let (attack_stat, defense_stat) = match pokemon_move.category {
        MoveCategory::Special => (Stat::SpecialAttack, Stat::SpecialDefense),
        _ => (Stat::Attack, Stat::Defense),
    };

    let basic = ((2 * attacker.level() / 5 + 2) * power) as f64;
    let attack = attacker.stat(attack_stat);
    // Stats never reach zero outside of forced test values.
    let defense = defender.stat(defense_stat).max(1.0);

    let damage = basic * (attack / defense) / 50.0;
    let burn = if attacker.has_status(PokemonStatus::Burn)
        && pokemon_move.category != MoveCategory::Special
    {
        0.5
    } else {
        1.0
    };

    Some(damage * burn + 2.0)
}

/// Full damage calculation: the nominal value with every modifier applied in order.
pub fn calculate(
    pokemon_move: &PokemonMove,
    attacker: &Pokemon,
    defender: &Pokemon,
    modifiers: &[DamageModifier],
    rng: &mut TurnRng,
) -> DamageResult {
    let Some(nominal) = base_damage(pokemon_move, attacker, defender) else {
        return DamageResult::none();
    };

    let mut result = DamageResult::fixed(nominal);
    let mut value = nominal;
    for modifier in modifiers {
        value *= modifier.apply(&mut result, pokemon_move, attacker, defender, rng);
    }
    result.value = Some(value);

    debug!(
        move_name = %pokemon_move.name,
        attacker = %attacker.name,
        defender = %defender.name,
        nominal,
        value,
        critical = result.critical,
        "damage calculated"
    );
    result
}
