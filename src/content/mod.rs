//! Static catalogs: moves, learn sets, species and opponents.

pub mod learnsets;
pub mod moves;
pub mod opponents;
pub mod pokemon;

use rand::seq::IndexedRandom;
use rand::Rng;
use schema::{IntoEnumIterator, Nature};

pub fn random_nature<R: Rng + ?Sized>(rng: &mut R) -> Nature {
    let natures: Vec<Nature> = Nature::iter().collect();
    natures.choose(rng).copied().unwrap_or(Nature::Hardy)
}
