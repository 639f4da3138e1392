//! The actions a side can take in a round.

use crate::battle::state::{BattleEvent, TurnRng};
use crate::errors::{BattleError, BattleResult};
use crate::moves::{MoveContext, PokemonMove};
use crate::trainer::Team;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, trace};

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// One side's action for a round.
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    Move(MoveTurn),
    Swap(SwapTurn),
    Retreat(RetreatTurn),
}

impl Turn {
    /// Higher goes first. Swapping and retreating always go before moves.
    pub fn priority(&self) -> i32 {
        match self {
            Turn::Move(turn) => turn.priority,
            Turn::Swap(_) | Turn::Retreat(_) => i32::MAX,
        }
    }

    pub fn side(&self) -> Side {
        match self {
            Turn::Move(turn) => turn.side,
            Turn::Swap(turn) => turn.side,
            Turn::Retreat(turn) => turn.side,
        }
    }

    /// Run the turn for `own` against `target`.
    ///
    /// `None` means the turn did nothing visible, such as a declined retreat.
    pub fn execute(
        &mut self,
        own: &mut Team,
        target: &mut Team,
        rng: &mut TurnRng,
    ) -> BattleResult<Option<Vec<BattleEvent>>> {
        if own.side() != self.side() {
            return Err(BattleError::WrongSide(self.side()));
        }
        match self {
            Turn::Move(turn) => turn.execute(own, target, rng),
            Turn::Swap(turn) => Ok(turn.execute(own)),
            Turn::Retreat(turn) => Ok(turn.execute(own)),
        }
    }
}

/// Checks a move turn runs before its move does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTurnCheck {
    /// A fainted actor cannot move; its trainer replaces it instead.
    Whiteout,
}

impl MoveTurnCheck {
    fn execute(&self, own: &mut Team) -> Option<Vec<BattleEvent>> {
        match self {
            MoveTurnCheck::Whiteout => {
                if !own.actor().whiteout() {
                    return None;
                }

                let trainer = own.owner().name.clone();
                let original = own.actor().name.clone();
                let event = match own.replace_actor() {
                    Some(_) => BattleEvent::ActorReplaced {
                        trainer,
                        original,
                        replacement: own.actor().name.clone(),
                    },
                    None => BattleEvent::NoReplacement { trainer },
                };
                Some(vec![event])
            }
        }
    }
}

/// Using one of the actor's moves, one stage per round.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveTurn {
    side: Side,
    actor: usize,
    pokemon_move: PokemonMove,
    priority: i32,
    executed: Vec<usize>,
    checks: Vec<MoveTurnCheck>,
}

impl MoveTurn {
    /// A turn using the move in `move_slot` of the team's current actor.
    pub fn new(side: Side, team: &Team, move_slot: usize) -> BattleResult<Self> {
        let pokemon_move = team
            .actor()
            .moves
            .get(move_slot)
            .ok_or(BattleError::InvalidMoveSlot(move_slot))?;
        if pokemon_move.stages.is_empty() {
            return Err(BattleError::MoveWithoutStages(pokemon_move.name.clone()));
        }

        Ok(Self {
            side,
            actor: team.actor_index(),
            priority: pokemon_move.priority.unwrap_or(0),
            pokemon_move: pokemon_move.clone(),
            executed: Vec::new(),
            checks: vec![MoveTurnCheck::Whiteout],
        })
    }

    pub fn with_checks(mut self, checks: Vec<MoveTurnCheck>) -> Self {
        self.checks = checks;
        self
    }

    pub fn actor(&self) -> usize {
        self.actor
    }

    pub fn pokemon_move(&self) -> &PokemonMove {
        &self.pokemon_move
    }

    /// Stage indices run so far, in the order they ran.
    pub fn executed(&self) -> &[usize] {
        &self.executed
    }

    /// Whether every stage of the move has run.
    pub fn finished(&self) -> bool {
        self.executed.len() >= self.pokemon_move.stages.len()
    }

    fn execute(
        &mut self,
        own: &mut Team,
        target: &mut Team,
        rng: &mut TurnRng,
    ) -> BattleResult<Option<Vec<BattleEvent>>> {
        for check in &self.checks {
            if let Some(events) = check.execute(own) {
                trace!(side = %self.side, "move turn stopped by its checks");
                return Ok(Some(events));
            }
        }
        if self.finished() {
            return Ok(None);
        }

        let stage = self.executed.len();
        debug!(
            side = %self.side,
            move_name = %self.pokemon_move.name,
            stage = stage + 1,
            of = self.pokemon_move.stages.len(),
            "move turn"
        );

        let mut events = vec![BattleEvent::MoveUsed {
            trainer: own.owner().name.clone(),
            move_name: self.pokemon_move.name.clone(),
        }];
        let defender_index = target.actor_index();
        let mut ctx = MoveContext::new(
            own.owner_mut(),
            self.actor,
            target.owner_mut(),
            defender_index,
            &self.pokemon_move,
            rng,
        )?;
        events.extend(self.pokemon_move.execute(stage, &mut ctx)?);
        self.executed.push(stage);
        Ok(Some(events))
    }
}

/// Switching the acting companion for another member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapTurn {
    side: Side,
}

impl SwapTurn {
    pub fn new(side: Side) -> Self {
        Self { side }
    }

    fn execute(&self, own: &mut Team) -> Option<Vec<BattleEvent>> {
        let actor = own.actor_index();
        let candidates: Vec<usize> = own
            .available()
            .into_iter()
            .filter(|&index| index != actor)
            .collect();
        let chosen = own.choose_member("Which pokemon will take over?", &candidates)?;
        own.set_actor(chosen).ok()?;

        Some(vec![BattleEvent::Swapped {
            trainer: own.owner().name.clone(),
            pokemon: own.actor().name.clone(),
        }])
    }
}

/// Leaving the battle, once the trainer confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetreatTurn {
    side: Side,
}

impl RetreatTurn {
    pub fn new(side: Side) -> Self {
        Self { side }
    }

    fn execute(&self, own: &mut Team) -> Option<Vec<BattleEvent>> {
        let confirmed = own
            .owner_mut()
            .decider_mut()
            .confirm("Are you sure you want to retreat from this battle?");
        if !confirmed {
            return None;
        }
        Some(vec![BattleEvent::Retreated {
            trainer: own.owner().name.clone(),
        }])
    }
}
