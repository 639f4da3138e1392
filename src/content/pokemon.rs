//! Catalog species. Each constructor builds the companion at the given level with a
//! random nature, random individual values and its evolution chain attached.

use super::{learnsets, random_nature};
use crate::pokemon::Pokemon;
use crate::stats::StatMap;
use rand::Rng;
use schema::{ElementalType, Stat};

/// Species a new player may start with.
pub const STARTERS: [&str; 3] = ["Bulbasaur", "Charmander", "Squirtle"];

/// Level at which each first stage evolves.
const FIRST_EVOLUTION: u32 = 16;
/// Level at which each second stage evolves.
const SECOND_EVOLUTION: u32 = 36;

fn base(health: u32, attack: u32, defense: u32, special_attack: u32, special_defense: u32, speed: u32) -> StatMap<u32> {
    StatMap::from([
        (Stat::Health, health),
        (Stat::Attack, attack),
        (Stat::Defense, defense),
        (Stat::SpecialAttack, special_attack),
        (Stat::SpecialDefense, special_defense),
        (Stat::Speed, speed),
    ])
}

fn yields(pairs: &[(Stat, u32)]) -> StatMap<u32> {
    pairs.iter().copied().collect()
}

/// Build a catalog companion by species name.
pub fn create<R: Rng + ?Sized>(species: &str, level: u32, rng: &mut R) -> Option<Pokemon> {
    let pokemon = match species {
        "Bulbasaur" => bulbasaur(level, rng),
        "Ivysaur" => ivysaur(level, rng),
        "Venusaur" => venusaur(level, rng),
        "Charmander" => charmander(level, rng),
        "Charmeleon" => charmeleon(level, rng),
        "Charizard" => charizard(level, rng),
        "Squirtle" => squirtle(level, rng),
        "Wartortle" => wartortle(level, rng),
        "Blastoise" => blastoise(level, rng),
        _ => return None,
    };
    Some(pokemon)
}

pub fn bulbasaur<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Pokemon {
    let evolution = ivysaur(FIRST_EVOLUTION, rng);
    Pokemon::create("Bulbasaur", random_nature(rng), &[ElementalType::Grass, ElementalType::Poison])
        .with_experience(level, 64)
        .with_statistics(base(45, 49, 49, 65, 65, 45), yields(&[(Stat::SpecialAttack, 1)]))
        .with_learn_set(learnsets::bulbasaur())
        .with_evolution(FIRST_EVOLUTION, evolution)
        .build(rng)
}

pub fn ivysaur<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Pokemon {
    let evolution = venusaur(SECOND_EVOLUTION, rng);
    Pokemon::create("Ivysaur", random_nature(rng), &[ElementalType::Grass, ElementalType::Poison])
        .with_experience(level, 142)
        .with_statistics(
            base(60, 62, 63, 80, 80, 60),
            yields(&[(Stat::SpecialAttack, 1), (Stat::SpecialDefense, 1)]),
        )
        .with_learn_set(learnsets::ivysaur())
        .with_evolution(SECOND_EVOLUTION, evolution)
        .build(rng)
}

pub fn venusaur<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Pokemon {
    Pokemon::create("Venusaur", random_nature(rng), &[ElementalType::Grass, ElementalType::Poison])
        .with_experience(level, 263)
        .with_statistics(
            base(80, 82, 83, 100, 100, 80),
            yields(&[(Stat::SpecialAttack, 2), (Stat::SpecialDefense, 1)]),
        )
        .with_learn_set(learnsets::venusaur())
        .build(rng)
}

pub fn charmander<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Pokemon {
    let evolution = charmeleon(FIRST_EVOLUTION, rng);
    let learn_set = learnsets::charmander(rng);
    Pokemon::create("Charmander", random_nature(rng), &[ElementalType::Fire])
        .with_experience(level, 62)
        .with_statistics(base(39, 52, 43, 60, 50, 65), yields(&[(Stat::Speed, 1)]))
        .with_learn_set(learn_set)
        .with_evolution(FIRST_EVOLUTION, evolution)
        .build(rng)
}

pub fn charmeleon<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Pokemon {
    let evolution = charizard(SECOND_EVOLUTION, rng);
    let learn_set = learnsets::charmeleon(rng);
    Pokemon::create("Charmeleon", random_nature(rng), &[ElementalType::Fire])
        .with_experience(level, 142)
        .with_statistics(
            base(58, 64, 58, 80, 65, 80),
            yields(&[(Stat::SpecialAttack, 1), (Stat::Speed, 1)]),
        )
        .with_learn_set(learn_set)
        .with_evolution(SECOND_EVOLUTION, evolution)
        .build(rng)
}

pub fn charizard<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Pokemon {
    let learn_set = learnsets::charizard(rng);
    Pokemon::create("Charizard", random_nature(rng), &[ElementalType::Fire, ElementalType::Flying])
        .with_experience(level, 167)
        .with_statistics(base(78, 84, 78, 109, 85, 100), yields(&[(Stat::SpecialAttack, 3)]))
        .with_learn_set(learn_set)
        .build(rng)
}

pub fn squirtle<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Pokemon {
    let evolution = wartortle(FIRST_EVOLUTION, rng);
    Pokemon::create("Squirtle", random_nature(rng), &[ElementalType::Water])
        .with_experience(level, 63)
        .with_statistics(base(44, 48, 65, 50, 64, 43), yields(&[(Stat::Defense, 1)]))
        .with_learn_set(learnsets::squirtle())
        .with_evolution(FIRST_EVOLUTION, evolution)
        .build(rng)
}

pub fn wartortle<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Pokemon {
    let evolution = blastoise(SECOND_EVOLUTION, rng);
    Pokemon::create("Wartortle", random_nature(rng), &[ElementalType::Water])
        .with_experience(level, 142)
        .with_statistics(
            base(59, 63, 80, 65, 80, 58),
            yields(&[(Stat::Defense, 1), (Stat::SpecialDefense, 1)]),
        )
        .with_learn_set(learnsets::wartortle())
        .with_evolution(SECOND_EVOLUTION, evolution)
        .build(rng)
}

pub fn blastoise<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Pokemon {
    Pokemon::create("Blastoise", random_nature(rng), &[ElementalType::Water])
        .with_experience(level, 165)
        .with_statistics(base(79, 83, 100, 85, 105, 78), yields(&[(Stat::SpecialDefense, 3)]))
        .with_learn_set(learnsets::blastoise())
        .build(rng)
}
