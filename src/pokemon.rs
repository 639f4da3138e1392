use crate::battle::stats::StageList;
use crate::experience::{ExperienceList, LevelEffect};
use crate::moves::learnset::LearnSet;
use crate::moves::PokemonMove;
use crate::stats::{StatList, StatMap};
use rand::Rng;
use schema::{ElementalType, Nature, PokemonStatus, Stat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A companion can know at most this many moves at once.
pub const MAX_MOVES: usize = 4;

/// Remaining and maximum uses of a move.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerPoint {
    pub maximum: u32,
    pub current: u32,
}

impl PowerPoint {
    pub fn new(maximum: u32) -> Self {
        Self {
            maximum,
            current: maximum,
        }
    }

    pub fn restore(&mut self) {
        self.current = self.maximum;
    }

    pub fn is_exhausted(&self) -> bool {
        self.current == 0
    }
}

impl fmt::Display for PowerPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.maximum)
    }
}

/// The form a companion may evolve into once it reaches `level`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Evolution {
    pub level: u32,
    pub pokemon: Box<Pokemon>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Pokemon {
    pub name: String,
    pub nature: Nature,
    pub types: Vec<ElementalType>,
    pub statistics: StatList,
    pub moves: Vec<PokemonMove>,
    pub learn_set: LearnSet,
    pub experience: ExperienceList,
    pub evolution: Option<Evolution>,

    // Battle-only state, never saved.
    #[serde(skip)]
    pub status_conditions: BTreeSet<PokemonStatus>,
    #[serde(skip)]
    pub stages: StageList,
}

impl Pokemon {
    /// Start building a companion.
    pub fn create(name: &str, nature: Nature, types: &[ElementalType]) -> PokemonBuilder {
        PokemonBuilder::new(name, nature, types)
    }

    pub fn level(&self) -> u32 {
        self.experience.level()
    }

    /// The value of a stat after applying its battle stage.
    pub fn stat(&self, stat: Stat) -> f64 {
        self.stages.effective(stat, self.statistics.value(stat))
    }

    pub fn health(&self) -> f64 {
        self.stat(Stat::Health)
    }

    pub fn max_health(&self) -> f64 {
        self.statistics.maximum(Stat::Health)
    }

    /// Whether the companion has fainted.
    pub fn whiteout(&self) -> bool {
        self.health() <= 0.0
    }

    pub fn has_status(&self, status: PokemonStatus) -> bool {
        self.status_conditions.contains(&status)
    }

    pub fn knows(&self, move_name: &str) -> bool {
        self.moves.iter().any(|known| known.name == move_name)
    }

    pub fn damage(&mut self, amount: f64) {
        self.statistics.adjust(Stat::Health, -amount);
    }

    /// Heal by `amount`, never above maximum health. Returns the health restored.
    pub fn heal(&mut self, amount: f64) -> f64 {
        let room = (self.max_health() - self.statistics.value(Stat::Health)).max(0.0);
        let healed = amount.clamp(0.0, room);
        self.statistics.adjust(Stat::Health, healed);
        healed
    }

    /// Restore health to its maximum. Returns the health restored.
    pub fn full_heal(&mut self) -> f64 {
        let before = self.health();
        self.statistics.reset(Stat::Health);
        self.health() - before
    }

    /// Clear everything a battle leaves behind: stages, statuses and spent move uses.
    pub fn reset(&mut self) {
        self.stages.reset();
        self.status_conditions.clear();
        for pokemon_move in &mut self.moves {
            pokemon_move.pp.restore();
        }
    }
}

impl fmt::Display for Pokemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Builds a companion with computed statistics and a starting move list.
///
/// # Example
/// ```
/// use pokemon_confrontation::pokemon::Pokemon;
/// use pokemon_confrontation::stats::StatMap;
/// use rand::SeedableRng;
/// use schema::{ElementalType, Nature, Stat};
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let pokemon = Pokemon::create("Squirtle", Nature::Hardy, &[ElementalType::Water])
///     .with_experience(5, 63)
///     .with_statistics(StatMap::from([(Stat::Health, 44)]), StatMap::new())
///     .build(&mut rng);
///
/// assert_eq!(pokemon.level(), 5);
/// assert!(!pokemon.whiteout());
/// ```
#[derive(Debug, Clone)]
pub struct PokemonBuilder {
    name: String,
    nature: Nature,
    types: Vec<ElementalType>,
    level: u32,
    kill_yield: u32,
    base: StatMap<u32>,
    yields: StatMap<u32>,
    ivs: Option<StatMap<u32>>,
    learn_set: LearnSet,
    moves: Option<Vec<PokemonMove>>,
    evolution: Option<Evolution>,
}

impl PokemonBuilder {
    fn new(name: &str, nature: Nature, types: &[ElementalType]) -> Self {
        Self {
            name: name.to_string(),
            nature,
            types: types.to_vec(),
            level: 1,
            kill_yield: 0,
            base: StatMap::new(),
            yields: StatMap::new(),
            ivs: None,
            learn_set: LearnSet::default(),
            moves: None,
            evolution: None,
        }
    }

    /// Starting level and the experience yield granted to whoever defeats this companion.
    pub fn with_experience(mut self, level: u32, kill_yield: u32) -> Self {
        self.level = level.max(1);
        self.kill_yield = kill_yield;
        self
    }

    pub fn with_evolution(mut self, level: u32, pokemon: Pokemon) -> Self {
        self.evolution = Some(Evolution {
            level,
            pokemon: Box::new(pokemon),
        });
        self
    }

    pub fn with_learn_set(mut self, learn_set: LearnSet) -> Self {
        self.learn_set = learn_set;
        self
    }

    /// Base stats and the effort values granted to whoever defeats this companion.
    pub fn with_statistics(mut self, base: StatMap<u32>, yields: StatMap<u32>) -> Self {
        self.base = base;
        self.yields = yields;
        self
    }

    /// Fixed individual values instead of randomly rolled ones.
    pub fn with_ivs(mut self, ivs: StatMap<u32>) -> Self {
        self.ivs = Some(ivs);
        self
    }

    /// Explicit moves instead of the last ones available from the learn set.
    pub fn with_moves(mut self, moves: Vec<PokemonMove>) -> Self {
        self.moves = Some(moves);
        self
    }

    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> Pokemon {
        let ivs = self.ivs.unwrap_or_else(|| StatList::roll_ivs(rng));
        let statistics = StatList::new(self.base, self.yields, ivs, self.nature, self.level);
        let moves = self
            .moves
            .unwrap_or_else(|| self.learn_set.defaults(self.level, MAX_MOVES));

        Pokemon {
            name: self.name,
            nature: self.nature,
            types: self.types,
            statistics,
            moves,
            learn_set: self.learn_set,
            experience: ExperienceList::new(self.level, self.kill_yield, LevelEffect::standard()),
            evolution: self.evolution,
            status_conditions: BTreeSet::new(),
            stages: StageList::default(),
        }
    }
}
