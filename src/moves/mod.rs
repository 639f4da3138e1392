// In: src/moves/mod.rs

//! Move definitions and the stage pipeline that executes them.
//!
//! A move is an immutable definition plus one or more [`Stage`]s. Each stage runs its
//! checks, then its effects, then its cleanups. Multi-stage moves execute one stage per
//! round; the turn that uses the move tracks progress.

mod builder;
pub mod checks;
pub mod cleanups;
pub mod damage;
pub mod effects;
pub mod learnset;

pub use builder::{PokemonMoveBuilder, StageBuilder};
pub use checks::MoveCheck;
pub use cleanups::MoveCleanup;
pub use damage::{DamageModifier, DamageResult};
pub use effects::MoveEffect;

use crate::battle::state::{BattleEvent, TurnRng};
use crate::errors::{BattleError, BattleResult};
use crate::pokemon::{Pokemon, PowerPoint};
use crate::trainer::Trainer;
use schema::{ElementalType, MoveCategory};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PokemonMove {
    pub name: String,
    pub description: String,
    pub element: ElementalType,
    pub category: MoveCategory,
    pub power: Option<u32>,
    /// Percent chance to hit. Moves without accuracy never miss.
    pub accuracy: Option<u32>,
    pub pp: PowerPoint,
    pub priority: Option<i32>,
    pub stages: Vec<Stage>,
}

impl PokemonMove {
    /// Start building a move.
    pub fn create(
        name: &str,
        description: &str,
        element: ElementalType,
        category: MoveCategory,
    ) -> PokemonMoveBuilder {
        PokemonMoveBuilder::new(name, description, element, category)
    }

    /// Execute the stage at `index` for the attacker and defender in `ctx`.
    pub fn execute(&self, index: usize, ctx: &mut MoveContext<'_>) -> BattleResult<Vec<BattleEvent>> {
        let stage = self
            .stages
            .get(index)
            .ok_or(BattleError::StageOutOfRange(index))?;

        trace!(
            move_name = %self.name,
            stage = index + 1,
            of = self.stages.len(),
            "executing move stage"
        );
        Ok(stage.execute(ctx))
    }
}

impl fmt::Display for PokemonMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One beat of a move.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Stage {
    pub checks: Vec<MoveCheck>,
    pub effects: Vec<MoveEffect>,
    pub cleanups: Vec<MoveCleanup>,
    pub modifiers: Vec<DamageModifier>,
}

impl Stage {
    /// Every check runs. If any of them produced events the stage stops there;
    /// otherwise the effects run in order, followed by the cleanups.
    pub fn execute(&self, ctx: &mut MoveContext<'_>) -> Vec<BattleEvent> {
        let check_events: Vec<BattleEvent> = self
            .checks
            .iter()
            .filter_map(|check| check.execute(ctx))
            .collect();

        if !check_events.is_empty() {
            return check_events;
        }

        let mut events = Vec::new();
        for effect in &self.effects {
            events.extend(effect.execute(ctx, &self.modifiers));
        }
        for cleanup in &self.cleanups {
            events.extend(cleanup.execute(ctx));
        }
        events
    }
}

/// Everything a stage needs: both trainers, the index of each active companion, the
/// move being executed and the battle's random source.
pub struct MoveContext<'a> {
    pub attacker: &'a mut Trainer,
    pub attacker_index: usize,
    pub defender: &'a mut Trainer,
    pub defender_index: usize,
    pub pokemon_move: &'a PokemonMove,
    pub rng: &'a mut TurnRng,
    /// Whether the defender had already fainted before this stage ran.
    defender_was_down: bool,
}

impl<'a> MoveContext<'a> {
    pub fn new(
        attacker: &'a mut Trainer,
        attacker_index: usize,
        defender: &'a mut Trainer,
        defender_index: usize,
        pokemon_move: &'a PokemonMove,
        rng: &'a mut TurnRng,
    ) -> BattleResult<Self> {
        if attacker_index >= attacker.pokemon.len() {
            return Err(BattleError::InvalidCompanionIndex(attacker_index));
        }
        let defender_was_down = defender
            .pokemon
            .get(defender_index)
            .ok_or(BattleError::InvalidCompanionIndex(defender_index))?
            .whiteout();

        Ok(Self {
            attacker,
            attacker_index,
            defender,
            defender_index,
            pokemon_move,
            rng,
            defender_was_down,
        })
    }

    pub fn attacker(&self) -> &Pokemon {
        &self.attacker.pokemon[self.attacker_index]
    }

    pub fn attacker_mut(&mut self) -> &mut Pokemon {
        &mut self.attacker.pokemon[self.attacker_index]
    }

    pub fn defender(&self) -> &Pokemon {
        &self.defender.pokemon[self.defender_index]
    }

    pub fn defender_mut(&mut self) -> &mut Pokemon {
        &mut self.defender.pokemon[self.defender_index]
    }

    /// The attacker's own copy of the move being executed.
    ///
    /// Looked up by name: a level-up earlier in the stage may have reordered the moves.
    pub fn known_move(&self) -> Option<&PokemonMove> {
        let name = &self.pokemon_move.name;
        self.attacker().moves.iter().find(|known| &known.name == name)
    }

    pub fn known_move_mut(&mut self) -> Option<&mut PokemonMove> {
        let pokemon_move: &'a PokemonMove = self.pokemon_move;
        self.attacker_mut()
            .moves
            .iter_mut()
            .find(|known| known.name == pokemon_move.name)
    }

    pub(crate) fn defender_was_down(&self) -> bool {
        self.defender_was_down
    }

    /// Run the damage calculation for this move with the given modifiers.
    pub fn calculate_damage(&mut self, modifiers: &[DamageModifier]) -> DamageResult {
        damage::calculate(
            self.pokemon_move,
            &self.attacker.pokemon[self.attacker_index],
            &self.defender.pokemon[self.defender_index],
            modifiers,
            self.rng,
        )
    }
}
