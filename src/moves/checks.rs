use super::MoveContext;
use crate::battle::state::BattleEvent;
use schema::{PokemonStatus, Stat};
use serde::{Deserialize, Serialize};

/// A pre-condition of a stage. A check that produces an event stops the stage.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCheck {
    /// The attacker flinched; the flinch is consumed.
    Flinch,
    Frozen,
    /// The defender dodges when a 0..100 draw lands below its evasion stat.
    Evasion,
    /// The attacker misses when a 0..100 draw exceeds the move's accuracy.
    Accuracy,
    /// The attacker's copy of the move has no uses left, or it no longer knows the move.
    PowerPoint,
}

impl MoveCheck {
    pub fn execute(&self, ctx: &mut MoveContext<'_>) -> Option<BattleEvent> {
        match self {
            MoveCheck::Flinch => {
                let attacker = ctx.attacker_mut();
                attacker
                    .status_conditions
                    .remove(&PokemonStatus::Flinch)
                    .then(|| BattleEvent::Flinched {
                        pokemon: attacker.name.clone(),
                    })
            }
            MoveCheck::Frozen => {
                let attacker = ctx.attacker();
                attacker
                    .has_status(PokemonStatus::Freeze)
                    .then(|| BattleEvent::Frozen {
                        pokemon: attacker.name.clone(),
                    })
            }
            MoveCheck::Evasion => {
                let roll = ctx.rng.next_in(0..100, "evasion") as f64;
                (roll < ctx.defender().stat(Stat::Evasion)).then(|| BattleEvent::Evaded {
                    attacker: ctx.attacker().name.clone(),
                    defender: ctx.defender().name.clone(),
                })
            }
            MoveCheck::Accuracy => {
                let accuracy = ctx.pokemon_move.accuracy?;
                let roll = ctx.rng.next_in(0..100, "accuracy");
                (roll > accuracy).then(|| BattleEvent::Missed {
                    attacker: ctx.attacker().name.clone(),
                })
            }
            MoveCheck::PowerPoint => {
                ctx.known_move()
                    .map_or(true, |known| known.pp.is_exhausted())
                    .then(|| BattleEvent::Exhausted {
                        attacker: ctx.attacker().name.clone(),
                    })
            }
        }
    }
}
