//! Level-up moves for each catalog species.

use super::moves::*;
use crate::moves::learnset::LearnSet;
use crate::moves::PokemonMove;
use rand::Rng;

/// Every species of a line learns the same moves; only the levels differ.
fn leveled(levels: [u32; 9], moves: [fn() -> PokemonMove; 9]) -> LearnSet {
    levels
        .into_iter()
        .zip(moves)
        .fold(LearnSet::new(), |set, (level, create)| set.with(level, vec![create()]))
}

const BULBASAUR_MOVES: [fn() -> PokemonMove; 9] = [
    tackle,
    growl,
    vine_whip,
    poison_powder,
    razor_leaf,
    sweet_scent,
    growth,
    synthesis,
    solar_beam,
];

pub fn bulbasaur() -> LearnSet {
    leveled([1, 4, 10, 15, 20, 25, 32, 39, 45], BULBASAUR_MOVES)
}

pub fn ivysaur() -> LearnSet {
    leveled([1, 4, 10, 15, 22, 29, 38, 47, 56], BULBASAUR_MOVES)
}

pub fn venusaur() -> LearnSet {
    leveled([1, 4, 10, 15, 22, 29, 41, 53, 65], BULBASAUR_MOVES)
}

fn charmander_line<R: Rng + ?Sized>(levels: [u32; 10], rng: &mut R) -> LearnSet {
    LearnSet::new()
        .with(levels[0], vec![scratch()])
        .with(levels[1], vec![growl()])
        .with(levels[2], vec![ember()])
        .with(levels[3], vec![metal_claw()])
        .with(levels[4], vec![smokescreen()])
        .with(levels[5], vec![scary_face()])
        .with(levels[6], vec![flamethrower()])
        .with(levels[7], vec![slash()])
        .with(levels[8], vec![dragon_rage()])
        .with(levels[9], vec![fire_spin(rng)])
}

pub fn charmander<R: Rng + ?Sized>(rng: &mut R) -> LearnSet {
    charmander_line([1, 2, 7, 13, 19, 25, 31, 37, 43, 49], rng)
}

pub fn charmeleon<R: Rng + ?Sized>(rng: &mut R) -> LearnSet {
    charmander_line([1, 2, 7, 13, 20, 27, 34, 41, 48, 55], rng)
}

pub fn charizard<R: Rng + ?Sized>(rng: &mut R) -> LearnSet {
    LearnSet::new()
        .with(1, vec![scratch()])
        .with(2, vec![growl()])
        .with(4, vec![heat_wave()])
        .with(7, vec![ember()])
        .with(13, vec![metal_claw()])
        .with(20, vec![smokescreen()])
        .with(27, vec![scary_face()])
        .with(34, vec![flamethrower()])
        .with(36, vec![wing_attack()])
        .with(40, vec![skull_bash()])
        .with(44, vec![slash()])
        .with(54, vec![dragon_rage()])
        .with(64, vec![fire_spin(rng)])
}

fn squirtle_line(levels: [u32; 6]) -> LearnSet {
    LearnSet::new()
        .with(1, vec![tackle(), tail_whip()])
        .with(levels[0], vec![bubble()])
        .with(levels[1], vec![water_gun()])
        .with(levels[2], vec![bite()])
        .with(levels[3], vec![withdraw()])
        .with(levels[4], vec![skull_bash()])
        .with(levels[5], vec![hydro_pump()])
}

pub fn squirtle() -> LearnSet {
    squirtle_line([8, 15, 22, 28, 35, 42])
}

pub fn wartortle() -> LearnSet {
    squirtle_line([8, 15, 24, 31, 39, 47])
}

pub fn blastoise() -> LearnSet {
    squirtle_line([8, 15, 24, 31, 42, 52])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::MAX_MOVES;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn names(set: &LearnSet, level: u32) -> Vec<String> {
        set.defaults(level, MAX_MOVES)
            .into_iter()
            .map(|known| known.name)
            .collect()
    }

    #[test]
    fn test_starting_moves() {
        assert_eq!(names(&bulbasaur(), 1), vec!["Tackle"]);
        assert_eq!(names(&squirtle(), 1), vec!["Tackle", "Tail Whip"]);
        assert_eq!(
            names(&ivysaur(), 23),
            vec!["Growl", "Vine Whip", "Poison Powder", "Razor Leaf"]
        );
    }

    #[test]
    fn test_charizard_learns_fire_spin_last() {
        let mut rng = StdRng::seed_from_u64(2);
        let set = charizard(&mut rng);
        assert_eq!(set.available(63).count(), 12);
        assert_eq!(names(&set, 100).last().map(String::as_str), Some("Fire Spin"));
    }
}
