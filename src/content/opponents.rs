//! Trainers the player can challenge.

use super::pokemon::create;
use crate::trainer::{RandomDecider, Trainer};
use rand::Rng;

/// Every opponent and the species and levels of its team.
const OPPONENTS: [(&str, &[(&str, u32)]); 12] = [
    ("Lian", &[("Bulbasaur", 1)]),
    ("Benga", &[("Ivysaur", 16)]),
    ("Arven", &[("Venusaur", 36)]),
    ("Hassel", &[("Charmander", 8)]),
    ("Janin", &[("Charmeleon", 23)]),
    ("Ash", &[("Charizard", 43)]),
    ("Elesa", &[("Squirtle", 15)]),
    ("Grant", &[("Wartortle", 30)]),
    ("Misty", &[("Blastoise", 50)]),
    ("Jeff", &[("Bulbasaur", 8), ("Charmander", 15), ("Squirtle", 1)]),
    ("Akari", &[("Ivysaur", 23), ("Charmeleon", 30), ("Wartortle", 16)]),
    ("Gary Oak", &[("Venusaur", 60), ("Charizard", 80), ("Blastoise", 100)]),
];

pub fn names() -> impl Iterator<Item = &'static str> {
    OPPONENTS.iter().map(|(name, _)| *name)
}

/// Build the named opponent with a fresh team and a random decider.
pub fn opponent<R: Rng + ?Sized>(name: &str, rng: &mut R) -> Option<Trainer> {
    let (name, team) = OPPONENTS.iter().find(|(candidate, _)| *candidate == name)?;
    let pokemon = team
        .iter()
        .map(|(species, level)| create(species, *level, rng))
        .collect::<Option<Vec<_>>>()?;
    let decider = RandomDecider::seeded(rng.random());
    Some(Trainer::new(name, Box::new(decider), pokemon))
}

/// Every opponent, freshly built.
pub fn opponents<R: Rng + ?Sized>(rng: &mut R) -> Vec<Trainer> {
    names().filter_map(|name| opponent(name, rng)).collect()
}
