//! Rules applied around the turns of a round.

use crate::battle::history::History;
use crate::battle::state::BattleEvent;
use crate::battle::turns::{Side, Turn};
use crate::trainer::Team;
use schema::PokemonStatus;
use tracing::debug;

/// Decides a side's turn for it before it gets to choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnCheck {
    /// A side in the middle of a multi-stage move must keep using it.
    Continue,
}

impl TurnCheck {
    pub fn check(&self, side: Side, history: &History, team: &Team) -> Option<Turn> {
        match self {
            TurnCheck::Continue => {
                let action = history.last_round()?.action(side)?;
                let Turn::Move(turn) = &action.turn else {
                    return None;
                };
                if turn.finished() || turn.actor() != team.actor_index() || team.actor().whiteout() {
                    return None;
                }
                debug!(%side, move_name = %turn.pokemon_move().name, "continuing move");
                Some(action.turn.clone())
            }
        }
    }
}

/// Applied to each side once both turns of a round have run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnCleanup {
    /// Burned actors lose an eighth of their maximum health.
    Burn,
    /// Poisoned actors lose an eighth of their maximum health.
    Poison,
}

impl TurnCleanup {
    pub fn execute(&self, team: &mut Team) -> Option<BattleEvent> {
        let status = match self {
            TurnCleanup::Burn => PokemonStatus::Burn,
            TurnCleanup::Poison => PokemonStatus::Poison,
        };

        let actor = team.actor_mut();
        if !actor.has_status(status) || actor.whiteout() {
            return None;
        }

        let damage = actor.max_health() / 8.0;
        actor.damage(damage);
        Some(BattleEvent::StatusDamage {
            status,
            pokemon: actor.name.clone(),
            damage,
        })
    }
}
