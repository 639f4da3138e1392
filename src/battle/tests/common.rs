use crate::battle::{Battle, Side, TurnRng};
use crate::moves::PokemonMove;
use crate::pokemon::Pokemon;
use crate::stats::StatMap;
use crate::trainer::{ScriptedDecider, Team, Trainer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use schema::{ElementalType, Nature, Stat};

/// A builder for creating test companions with common defaults.
///
/// Every base stat is 50 apart from speed, which is missing (so critical hits never
/// happen), and individual values are zero. Evasion is pinned to zero so that moves
/// only miss when a test asks them to.
pub struct TestPokemonBuilder {
    name: String,
    level: u32,
    types: Vec<ElementalType>,
    moves: Vec<PokemonMove>,
    forced: Vec<(Stat, f64)>,
}

impl TestPokemonBuilder {
    pub fn new(name: &str, level: u32) -> Self {
        Self {
            name: name.to_string(),
            level,
            types: vec![ElementalType::Normal],
            moves: Vec::new(),
            forced: vec![(Stat::Evasion, 0.0)],
        }
    }

    pub fn with_types(mut self, types: &[ElementalType]) -> Self {
        self.types = types.to_vec();
        self
    }

    pub fn with_moves(mut self, moves: Vec<PokemonMove>) -> Self {
        self.moves = moves;
        self
    }

    /// Pin a stat (current and maximum) to `value`.
    pub fn with_stat(mut self, stat: Stat, value: f64) -> Self {
        self.forced.push((stat, value));
        self
    }

    pub fn with_health(self, health: f64) -> Self {
        self.with_stat(Stat::Health, health)
    }

    pub fn build(self) -> Pokemon {
        let mut rng = StdRng::seed_from_u64(0);
        let base = StatMap::from([
            (Stat::Health, 50),
            (Stat::Attack, 50),
            (Stat::Defense, 50),
            (Stat::SpecialAttack, 50),
            (Stat::SpecialDefense, 50),
        ]);

        let mut pokemon = Pokemon::create(&self.name, Nature::Hardy, &self.types)
            .with_experience(self.level, 64)
            .with_statistics(base, StatMap::from([(Stat::Attack, 1)]))
            .with_ivs(StatMap::new())
            .with_moves(self.moves)
            .build(&mut rng);

        for (stat, value) in self.forced {
            pokemon.statistics.force(stat, value);
        }
        pokemon
    }
}

pub fn create_test_trainer(name: &str, pokemon: Vec<Pokemon>, decider: ScriptedDecider) -> Trainer {
    Trainer::new(name, Box::new(decider), pokemon)
}

/// A started battle between "Red" (player) and "Blue" (opponent), first companions acting.
pub fn create_test_battle(player: Trainer, opponent: Trainer, rng: TurnRng) -> Battle {
    let player = Team::from_roster(Side::Player, player, 0).expect("player team");
    let opponent = Team::from_roster(Side::Opponent, opponent, 0).expect("opponent team");
    let mut battle = Battle::new(player, opponent)
        .expect("sides are correct")
        .with_rng(rng);
    battle.begin().expect("battle begins");
    battle
}

/// One companion per side, each knowing `player_moves` and `opponent_moves`.
pub fn create_duel(player_moves: Vec<PokemonMove>, opponent_moves: Vec<PokemonMove>, rng: TurnRng) -> Battle {
    let player = create_test_trainer(
        "Red",
        vec![TestPokemonBuilder::new("Squirtle", 20).with_moves(player_moves).build()],
        ScriptedDecider::default(),
    );
    let opponent = create_test_trainer(
        "Blue",
        vec![TestPokemonBuilder::new("Charmander", 20).with_moves(opponent_moves).build()],
        ScriptedDecider::default(),
    );
    create_test_battle(player, opponent, rng)
}

/// Ties go to the opponent, every move hits, no critical hits, no variance
/// and chance effects below 100% never trigger.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![100; 200])
}

/// Like [`predictable_rng`], but the player wins the first tie.
pub fn player_first_rng() -> TurnRng {
    let mut outcomes = vec![0];
    outcomes.extend([100; 199]);
    TurnRng::new_for_test(outcomes)
}
