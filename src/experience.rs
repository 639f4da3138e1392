//! Experience, levels and the effects that fire when a companion levels up.

use crate::battle::state::BattleEvent;
use crate::pokemon::{Pokemon, MAX_MOVES};
use crate::trainer::Trainer;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The level reached with `experience` points.
pub fn to_level(experience: f64) -> u32 {
    ((experience.max(0.0) + 1.0) * 5.0 / 4.0).cbrt().floor() as u32
}

/// The experience needed to reach `level`.
pub fn from_level(level: u32) -> f64 {
    let level = u64::from(level);
    (4 * level * level * level / 5) as f64
}

/// Experience granted for defeating `defeated`.
pub fn kill_yield(defeated: &Pokemon) -> f64 {
    f64::from(defeated.experience.kill_yield) * f64::from(defeated.level()) / 7.0 * (1.0 / 8.0)
        * 1.5
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExperienceList {
    pub value: f64,
    pub kill_yield: u32,
    pub effects: Vec<LevelEffect>,
}

impl ExperienceList {
    pub fn new(level: u32, kill_yield: u32, effects: Vec<LevelEffect>) -> Self {
        Self {
            value: from_level(level),
            kill_yield,
            effects,
        }
    }

    pub fn level(&self) -> u32 {
        to_level(self.value)
    }

    pub fn experience_to_next_level(&self) -> f64 {
        (from_level(self.level() + 1) - self.value).max(0.0)
    }
}

/// Something that happens when a companion gains levels. Effects run in list order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelEffect {
    /// Recalculate statistics for the new level.
    General,
    /// Offer the moves unlocked by the new level.
    Learn,
    /// Offer the evolution once its level is reached.
    Evolve,
}

impl LevelEffect {
    pub fn standard() -> Vec<LevelEffect> {
        vec![LevelEffect::General, LevelEffect::Learn, LevelEffect::Evolve]
    }

    /// Apply the effect to the companion at `index` of the trainer's roster.
    pub fn apply(&self, trainer: &mut Trainer, index: usize, old: u32, new: u32) -> Vec<BattleEvent> {
        match self {
            LevelEffect::General => {
                let Some(pokemon) = trainer.pokemon.get_mut(index) else {
                    return Vec::new();
                };
                let nature = pokemon.nature;
                pokemon.statistics.recalculate(nature, new);
                vec![BattleEvent::LeveledUp {
                    pokemon: pokemon.name.clone(),
                    from: old,
                    to: new,
                }]
            }
            LevelEffect::Learn => learn(trainer, index, old, new),
            LevelEffect::Evolve => evolve(trainer, index, new),
        }
    }
}

fn learn(trainer: &mut Trainer, index: usize, old: u32, new: u32) -> Vec<BattleEvent> {
    let Some((pokemon, decider)) = trainer.companion_and_decider(index) else {
        return Vec::new();
    };

    let unlocked: Vec<_> = pokemon
        .learn_set
        .unlocked(old, new)
        .filter(|candidate| !pokemon.knows(&candidate.name))
        .cloned()
        .collect();

    let mut events = Vec::new();
    for candidate in unlocked {
        if pokemon.moves.len() >= MAX_MOVES {
            let prompt = format!(
                "{} is able to learn {}, but has no available slots, do you wish to forget a move in order to learn this move?",
                pokemon.name, candidate.name
            );
            if !decider.confirm(&prompt) {
                debug!(pokemon = %pokemon.name, move_name = %candidate.name, "declined to learn move");
                continue;
            }

            let options: Vec<String> = pokemon.moves.iter().map(|known| known.name.clone()).collect();
            let prompt = format!("Which move will {} forget?", pokemon.name);
            let Some(slot) = decider.choose_one(&prompt, &options) else {
                continue;
            };
            let forgotten = pokemon.moves.remove(slot);
            events.push(BattleEvent::ForgotMove {
                pokemon: pokemon.name.clone(),
                move_name: forgotten.name,
            });
        }

        events.push(BattleEvent::LearnedMove {
            pokemon: pokemon.name.clone(),
            move_name: candidate.name.clone(),
        });
        pokemon.moves.push(candidate);
    }
    events
}

fn evolve(trainer: &mut Trainer, index: usize, level: u32) -> Vec<BattleEvent> {
    let Some((pokemon, decider)) = trainer.companion_and_decider(index) else {
        return Vec::new();
    };
    let Some(evolution) = pokemon.evolution.as_ref() else {
        return Vec::new();
    };
    if level < evolution.level {
        return Vec::new();
    }

    let prompt = format!("{} is ready to evolve, do you want to proceed?", pokemon.name);
    if !decider.confirm(&prompt) {
        return Vec::new();
    }

    let mut evolved = (*evolution.pokemon).clone();
    evolved.experience.value = pokemon.experience.value;
    evolved.moves = std::mem::take(&mut pokemon.moves);
    evolved.nature = pokemon.nature;
    evolved.statistics.evs = pokemon.statistics.evs.clone();
    evolved.statistics.recalculate(evolved.nature, level);

    info!(from = %pokemon.name, to = %evolved.name, level, "companion evolved");
    let event = BattleEvent::Evolved {
        pokemon: pokemon.name.clone(),
        evolution: evolved.name.clone(),
    };
    *pokemon = evolved;
    vec![event]
}

/// Grant experience to the companion at `index` and run its level effects if it levelled up.
pub fn add_experience(trainer: &mut Trainer, index: usize, amount: f64) -> Vec<BattleEvent> {
    let Some(pokemon) = trainer.pokemon.get_mut(index) else {
        return Vec::new();
    };

    let old = pokemon.level();
    pokemon.experience.value += amount;
    let new = pokemon.level();
    if old == new {
        return Vec::new();
    }

    debug!(pokemon = %pokemon.name, old, new, "level up");
    let effects = pokemon.experience.effects.clone();
    effects
        .iter()
        .flat_map(|effect| effect.apply(trainer, index, old, new))
        .collect()
}
