//! Every move a catalog companion can learn.

use crate::moves::{DamageModifier, MoveCleanup, MoveEffect, PokemonMove};
use rand::Rng;
use schema::{ElementalType, MoveCategory, PokemonStatus, Stat};

fn chance(effect: MoveEffect, chance: u32) -> MoveEffect {
    MoveEffect::Chance {
        effect: Box::new(effect),
        chance,
    }
}

fn status(status: PokemonStatus) -> MoveEffect {
    MoveEffect::Status { status }
}

fn on_defender(stat: Stat, stages: i32) -> MoveEffect {
    MoveEffect::StatStage {
        stat,
        stages,
        on_attacker: false,
    }
}

fn on_attacker(stat: Stat, stages: i32) -> MoveEffect {
    MoveEffect::StatStage {
        stat,
        stages,
        on_attacker: true,
    }
}

/// A single hit with the standard checks and cleanups.
fn strike(
    name: &str,
    description: &str,
    element: ElementalType,
    category: MoveCategory,
    pp: u32,
    accuracy: u32,
    power: u32,
) -> PokemonMove {
    PokemonMove::create(name, description, element, category)
        .with_power_point(pp)
        .with_accuracy(accuracy)
        .with_power(power)
        .stage()
        .with_hit_effects()
        .with_hit_cleanups()
        .add(1)
        .build()
}

pub fn tackle() -> PokemonMove {
    strike(
        "Tackle",
        "A physical attack in which the user charges and slams into the target with its whole body.",
        ElementalType::Normal,
        MoveCategory::Physical,
        35,
        100,
        40,
    )
}

pub fn growl() -> PokemonMove {
    PokemonMove::create(
        "Growl",
        "The user growls in an endearing way, making the opposing pokemon less wary. This lowers their Attack stat.",
        ElementalType::Normal,
        MoveCategory::Status,
    )
    .with_power_point(40)
    .with_accuracy(100)
    .stage()
    .with_effects(vec![on_defender(Stat::Attack, -1)])
    .add(1)
    .build()
}

pub fn vine_whip() -> PokemonMove {
    strike(
        "Vine Whip",
        "The target is struck with slender, whiplike vines to inflict damage.",
        ElementalType::Grass,
        MoveCategory::Special,
        25,
        100,
        35,
    )
}

pub fn poison_powder() -> PokemonMove {
    PokemonMove::create(
        "Poison Powder",
        "The user scatters a cloud of poisonous dust that poisons the target.",
        ElementalType::Poison,
        MoveCategory::Status,
    )
    .with_power_point(35)
    .with_accuracy(75)
    .with_priority(1)
    .stage()
    .with_effects(vec![status(PokemonStatus::Poison)])
    .add(1)
    .build()
}

pub fn razor_leaf() -> PokemonMove {
    PokemonMove::create(
        "Razor Leaf",
        "Sharp-edged leaves are launched to slash at the target. Critical hits land more easily.",
        ElementalType::Grass,
        MoveCategory::Physical,
    )
    .with_power_point(25)
    .with_accuracy(95)
    .with_power(55)
    .stage()
    .with_hit_effects()
    .with_hit_cleanups()
    .replace_modifier(DamageModifier::Crit { high: true })
    .add(1)
    .build()
}

pub fn sweet_scent() -> PokemonMove {
    PokemonMove::create(
        "Sweet Scent",
        "A sweet scent that harshly lowers the target's evasiveness.",
        ElementalType::Normal,
        MoveCategory::Status,
    )
    .with_power_point(20)
    .with_accuracy(100)
    .with_priority(1)
    .stage()
    .with_effects(vec![on_defender(Stat::Evasion, -2)])
    .add(1)
    .build()
}

pub fn growth() -> PokemonMove {
    PokemonMove::create(
        "Growth",
        "The user's body grows all at once, raising its Attack and Special Attack stats.",
        ElementalType::Normal,
        MoveCategory::Status,
    )
    .with_power_point(20)
    .with_priority(1)
    .stage()
    .with_effects(vec![
        on_attacker(Stat::Attack, 1),
        on_attacker(Stat::SpecialAttack, 1),
    ])
    .add(1)
    .build()
}

pub fn synthesis() -> PokemonMove {
    PokemonMove::create(
        "Synthesis",
        "The user restores a quarter of its own health.",
        ElementalType::Grass,
        MoveCategory::Status,
    )
    .with_power_point(5)
    .stage()
    .with_effects(vec![MoveEffect::Heal {
        amount: 0.25,
        relative: true,
    }])
    .add(1)
    .build()
}

pub fn solar_beam() -> PokemonMove {
    PokemonMove::create(
        "Solar Beam",
        "In this two-turn attack, the user gathers light, then blasts a bundled beam on the next turn.",
        ElementalType::Grass,
        MoveCategory::Special,
    )
    .with_power_point(10)
    .with_accuracy(100)
    .with_power(120)
    .stage()
    .with_cleanups(Vec::new())
    .add(1)
    .stage()
    .with_hit_effects()
    .with_hit_cleanups()
    .add(1)
    .build()
}

pub fn scratch() -> PokemonMove {
    strike(
        "Scratch",
        "Hard, pointed, sharp claws rake the target to inflict damage.",
        ElementalType::Normal,
        MoveCategory::Physical,
        35,
        100,
        40,
    )
}

fn burning(
    name: &str,
    description: &str,
    pp: u32,
    accuracy: u32,
    power: u32,
) -> PokemonMove {
    PokemonMove::create(name, description, ElementalType::Fire, MoveCategory::Special)
        .with_power_point(pp)
        .with_accuracy(accuracy)
        .with_power(power)
        .stage()
        .with_effects(vec![MoveEffect::Hit, chance(status(PokemonStatus::Burn), 10)])
        .with_hit_cleanups()
        .add(1)
        .build()
}

pub fn heat_wave() -> PokemonMove {
    burning(
        "Heat Wave",
        "The user attacks by exhaling hot breath on the target. This may also leave it with a burn.",
        10,
        90,
        100,
    )
}

pub fn ember() -> PokemonMove {
    burning(
        "Ember",
        "The target is attacked with small flames. This may also leave the target with a burn.",
        25,
        100,
        40,
    )
}

pub fn flamethrower() -> PokemonMove {
    burning(
        "Flamethrower",
        "The target is scorched with an intense blast of fire. This may also leave the target with a burn.",
        15,
        100,
        90,
    )
}

pub fn smokescreen() -> PokemonMove {
    PokemonMove::create(
        "Smokescreen",
        "The user releases an obscuring cloud of smoke or ink. This lowers the target's accuracy.",
        ElementalType::Normal,
        MoveCategory::Status,
    )
    .with_power_point(20)
    .with_accuracy(100)
    .with_priority(2)
    .stage()
    .with_effects(vec![on_defender(Stat::Accuracy, -1)])
    .add(1)
    .build()
}

pub fn metal_claw() -> PokemonMove {
    PokemonMove::create(
        "Metal Claw",
        "The target is raked with steel claws. This may also raise the user's Attack stat.",
        ElementalType::Steel,
        MoveCategory::Physical,
    )
    .with_power_point(35)
    .with_accuracy(95)
    .with_power(50)
    .stage()
    .with_effects(vec![MoveEffect::Hit, chance(on_attacker(Stat::Attack, 1), 10)])
    .with_hit_cleanups()
    .add(1)
    .build()
}

pub fn scary_face() -> PokemonMove {
    PokemonMove::create(
        "Scary Face",
        "The user frightens the target with a scary face to harshly lower its Speed stat.",
        ElementalType::Normal,
        MoveCategory::Status,
    )
    .with_power_point(10)
    .with_accuracy(100)
    .with_priority(1)
    .stage()
    .with_effects(vec![on_defender(Stat::Speed, -2)])
    .add(1)
    .build()
}

pub fn wing_attack() -> PokemonMove {
    strike(
        "Wing Attack",
        "The target is struck with large, imposing wings spread wide to inflict damage.",
        ElementalType::Flying,
        MoveCategory::Physical,
        35,
        100,
        60,
    )
}

pub fn slash() -> PokemonMove {
    PokemonMove::create(
        "Slash",
        "The target is attacked with a slash of claws or blades. Critical hits land more easily.",
        ElementalType::Normal,
        MoveCategory::Physical,
    )
    .with_power_point(20)
    .with_accuracy(100)
    .with_power(70)
    .stage()
    .with_hit_effects()
    .with_hit_cleanups()
    .replace_modifier(DamageModifier::Crit { high: true })
    .add(1)
    .build()
}

pub fn dragon_rage() -> PokemonMove {
    PokemonMove::create(
        "Dragon Rage",
        "This attack hits the target with a shock wave of pure rage. This attack always inflicts 40 damage.",
        ElementalType::Dragon,
        MoveCategory::Special,
    )
    .with_power_point(10)
    .with_accuracy(100)
    .stage()
    .with_effects(vec![MoveEffect::Damage { amount: 40.0 }])
    .with_hit_cleanups()
    .add(1)
    .build()
}

/// Keeps burning for three or four rounds before the final hit. The duration is
/// drawn once, when the move is built.
pub fn fire_spin<R: Rng + ?Sized>(rng: &mut R) -> PokemonMove {
    let rounds = rng.random_range(3..5);
    PokemonMove::create(
        "Fire Spin",
        "The target becomes trapped within a fierce vortex of fire that rages for four to five turns.",
        ElementalType::Fire,
        MoveCategory::Special,
    )
    .with_power_point(10)
    .with_accuracy(100)
    .with_power(35)
    .stage()
    .with_hit_effects()
    .with_cleanups(vec![MoveCleanup::Kill])
    .add(rounds)
    .stage()
    .with_hit_effects()
    .with_hit_cleanups()
    .add(1)
    .build()
}

pub fn tail_whip() -> PokemonMove {
    PokemonMove::create(
        "Tail Whip",
        "The user wags its tail cutely, making opposing pokemon less wary and lowering their Defense stat.",
        ElementalType::Normal,
        MoveCategory::Status,
    )
    .with_power_point(30)
    .with_accuracy(100)
    .stage()
    .with_effects(vec![on_defender(Stat::Defense, -1)])
    .add(1)
    .build()
}

pub fn bubble() -> PokemonMove {
    PokemonMove::create(
        "Bubble",
        "A spray of countless bubbles is jetted at the opposing pokemon. This may also lower their Speed stat.",
        ElementalType::Water,
        MoveCategory::Special,
    )
    .with_power_point(30)
    .with_accuracy(100)
    .with_power(40)
    .stage()
    .with_effects(vec![MoveEffect::Hit, chance(on_defender(Stat::Speed, -1), 10)])
    .with_hit_cleanups()
    .add(1)
    .build()
}

pub fn withdraw() -> PokemonMove {
    PokemonMove::create(
        "Withdraw",
        "The user withdraws its body into its hard shell, raising its Defense stat.",
        ElementalType::Water,
        MoveCategory::Status,
    )
    .with_power_point(40)
    .with_priority(3)
    .stage()
    .with_effects(vec![on_attacker(Stat::Defense, 1)])
    .add(1)
    .build()
}

pub fn water_gun() -> PokemonMove {
    strike(
        "Water Gun",
        "The target is blasted with a forceful shot of water.",
        ElementalType::Water,
        MoveCategory::Special,
        25,
        100,
        40,
    )
}

pub fn bite() -> PokemonMove {
    PokemonMove::create(
        "Bite",
        "The target is bitten with viciously sharp fangs. This may also make the target flinch.",
        ElementalType::Dark,
        MoveCategory::Physical,
    )
    .with_power_point(25)
    .with_accuracy(100)
    .with_power(60)
    .stage()
    .with_effects(vec![MoveEffect::Hit, chance(status(PokemonStatus::Flinch), 30)])
    .with_hit_cleanups()
    .add(1)
    .build()
}

pub fn skull_bash() -> PokemonMove {
    PokemonMove::create(
        "Skull Bash",
        "The user tucks in its head to raise its Defense stat on the first turn, then rams the target on the next turn.",
        ElementalType::Normal,
        MoveCategory::Physical,
    )
    .with_power_point(10)
    .with_accuracy(100)
    .with_power(130)
    .stage()
    .with_effects(vec![on_attacker(Stat::Defense, 1)])
    .add(1)
    .stage()
    .with_hit_effects()
    .with_hit_cleanups()
    .add(1)
    .build()
}

pub fn hydro_pump() -> PokemonMove {
    strike(
        "Hydro Pump",
        "The target is blasted by a huge volume of water launched under great pressure.",
        ElementalType::Water,
        MoveCategory::Special,
        5,
        80,
        120,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fire_spin_burns_for_three_or_four_rounds() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..20 {
            let fire_spin = fire_spin(&mut rng);
            let stages = fire_spin.stages.len();
            assert!((4..=5).contains(&stages), "{stages} stages");

            let (last, repeated) = fire_spin.stages.split_last().expect("stages");
            assert!(repeated
                .iter()
                .all(|stage| stage.cleanups == vec![MoveCleanup::Kill]));
            assert_eq!(last.cleanups, vec![MoveCleanup::Kill, MoveCleanup::PowerPoint]);
        }
    }

    #[test]
    fn test_charge_moves_have_two_stages() {
        for charge in [solar_beam(), skull_bash()] {
            assert_eq!(charge.stages.len(), 2, "{}", charge.name);
            assert_eq!(charge.stages[1].effects, vec![MoveEffect::Hit]);
        }
        assert!(solar_beam().stages[0].effects.is_empty());
        assert!(solar_beam().stages[0].cleanups.is_empty());
    }

    #[test]
    fn test_high_crit_moves() {
        for pokemon_move in [razor_leaf(), slash()] {
            assert_eq!(
                pokemon_move.stages[0].modifiers[0],
                DamageModifier::Crit { high: true }
            );
        }
        assert_eq!(tackle().stages[0].modifiers[0], DamageModifier::Crit { high: false });
    }
}
