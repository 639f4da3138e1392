use super::PokemonMove;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Bound;

/// The moves a species unlocks, keyed by the level that unlocks them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct LearnSet {
    levels: BTreeMap<u32, Vec<PokemonMove>>,
}

impl LearnSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add moves unlocked at `level`.
    pub fn with(mut self, level: u32, moves: Vec<PokemonMove>) -> Self {
        self.levels.entry(level).or_default().extend(moves);
        self
    }

    /// Every move unlocked at or below `level`, lowest level first.
    pub fn available(&self, level: u32) -> impl Iterator<Item = &PokemonMove> {
        self.levels
            .range(..=level)
            .flat_map(|(_, moves)| moves.iter())
    }

    /// The last `count` moves available at `level`.
    pub fn defaults(&self, level: u32, count: usize) -> Vec<PokemonMove> {
        let available: Vec<&PokemonMove> = self.available(level).collect();
        let skip = available.len().saturating_sub(count);
        available.into_iter().skip(skip).cloned().collect()
    }

    /// Moves unlocked above `from` and at or below `to`, lowest level first.
    pub fn unlocked(&self, from: u32, to: u32) -> impl Iterator<Item = &PokemonMove> {
        self.levels
            .range((Bound::Excluded(from), Bound::Included(to.max(from))))
            .flat_map(|(_, moves)| moves.iter())
    }
}
