// In: src/moves/effects.rs

use super::{DamageModifier, DamageResult, MoveContext};
use crate::battle::state::BattleEvent;
use schema::{MoveCategory, PokemonStatus, Stat};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Something a stage does once its checks pass.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum MoveEffect {
    /// Damage the defender through the modifier pipeline.
    Hit,
    /// Deal a fixed amount of damage, ignoring modifiers.
    Damage { amount: f64 },
    /// Heal the attacker by `amount`, or by that fraction of its maximum health.
    Heal { amount: f64, relative: bool },
    /// Apply a status condition to the defender.
    Status { status: PokemonStatus },
    /// Move a stat stage of the attacker or of the defender.
    StatStage {
        stat: Stat,
        stages: i32,
        on_attacker: bool,
    },
    /// Run the wrapped effect with a percent chance.
    Chance { effect: Box<MoveEffect>, chance: u32 },
}

impl MoveEffect {
    pub fn execute(
        &self,
        ctx: &mut MoveContext<'_>,
        modifiers: &[DamageModifier],
    ) -> Vec<BattleEvent> {
        match self {
            MoveEffect::Hit => {
                let damage = ctx.calculate_damage(modifiers);
                apply_damage(ctx, damage)
            }
            MoveEffect::Damage { amount } => {
                let damage = if ctx.pokemon_move.category == MoveCategory::Status {
                    DamageResult::none()
                } else {
                    DamageResult::fixed(*amount)
                };
                apply_damage(ctx, damage)
            }
            MoveEffect::Heal { amount, relative } => {
                let attacker = ctx.attacker_mut();
                let amount = if *relative {
                    attacker.max_health() * amount
                } else {
                    *amount
                };
                let healed = attacker.heal(amount);

                vec![BattleEvent::Healed {
                    pokemon: attacker.name.clone(),
                    amount: healed,
                }]
            }
            MoveEffect::Status { status } => {
                let attacker = ctx.attacker().name.clone();
                let defender = ctx.defender_mut();
                defender.status_conditions.insert(*status);

                vec![BattleEvent::StatusApplied {
                    attacker,
                    defender: defender.name.clone(),
                    status: *status,
                }]
            }
            MoveEffect::StatStage {
                stat,
                stages,
                on_attacker,
            } => {
                let target = if *on_attacker {
                    ctx.attacker_mut()
                } else {
                    ctx.defender_mut()
                };

                if !target.stages.can_change(*stat, *stages) {
                    return vec![BattleEvent::MaximumStage {
                        pokemon: target.name.clone(),
                        stat: *stat,
                    }];
                }

                target.stages.change(*stat, *stages);
                vec![BattleEvent::StageChanged {
                    pokemon: target.name.clone(),
                    stat: *stat,
                    stages: *stages,
                }]
            }
            MoveEffect::Chance { effect, chance } => {
                let roll = ctx.rng.next_in(0..100, "effect chance");
                if *chance != 100 && roll > *chance {
                    trace!(roll, chance, "chance effect skipped");
                    return Vec::new();
                }
                effect.execute(ctx, modifiers)
            }
        }
    }
}

fn apply_damage(ctx: &mut MoveContext<'_>, damage: DamageResult) -> Vec<BattleEvent> {
    let attacker = ctx.attacker().name.clone();

    let Some(value) = damage.value else {
        return vec![BattleEvent::NoEffect {
            attacker,
            defender: ctx.defender().name.clone(),
            move_name: ctx.pokemon_move.name.clone(),
        }];
    };

    let defender = ctx.defender_mut();
    defender.damage(value);

    vec![BattleEvent::Hit {
        attacker,
        defender: defender.name.clone(),
        damage: value,
        remaining: defender.health(),
        whiteout: defender.whiteout(),
        critical: damage.critical,
        effectiveness: damage.effectiveness,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::state::TurnRng;
    use crate::moves::PokemonMove;
    use crate::pokemon::Pokemon;
    use crate::stats::StatMap;
    use crate::trainer::{RandomDecider, Trainer};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use schema::{ElementalType, Nature};

    fn trainer(name: &str) -> Trainer {
        let mut rng = StdRng::seed_from_u64(5);
        let pokemon = Pokemon::create(name, Nature::Hardy, &[ElementalType::Normal])
            .with_experience(20, 50)
            .with_statistics(
                StatMap::from([(Stat::Health, 60), (Stat::Attack, 50), (Stat::Defense, 50)]),
                StatMap::new(),
            )
            .build(&mut rng);
        Trainer::new(name, Box::new(RandomDecider::seeded(1)), vec![pokemon])
    }

    fn status_move() -> PokemonMove {
        PokemonMove::create("Glare", "", ElementalType::Normal, MoveCategory::Status)
            .stage()
            .add(1)
            .build()
    }

    fn run(effect: &MoveEffect, attacker: &mut Trainer, defender: &mut Trainer, rng: &mut TurnRng) -> Vec<BattleEvent> {
        let pokemon_move = status_move();
        let mut ctx = MoveContext::new(attacker, 0, defender, 0, &pokemon_move, rng)
            .expect("valid indices");
        effect.execute(&mut ctx, &[])
    }

    #[test]
    fn test_stat_stage_reports_maximum_on_the_target() {
        let mut attacker = trainer("Charmander");
        let mut defender = trainer("Squirtle");
        let mut rng = TurnRng::new_for_test(vec![]);
        let lower = MoveEffect::StatStage {
            stat: Stat::Defense,
            stages: -2,
            on_attacker: false,
        };

        for _ in 0..3 {
            run(&lower, &mut attacker, &mut defender, &mut rng);
        }
        assert_eq!(defender.pokemon[0].stages.get(Stat::Defense), -6);

        let events = run(&lower, &mut attacker, &mut defender, &mut rng);
        assert_eq!(
            events,
            vec![BattleEvent::MaximumStage {
                pokemon: "Squirtle".to_string(),
                stat: Stat::Defense,
            }]
        );
        assert_eq!(defender.pokemon[0].stages.get(Stat::Defense), -6);
        // The attacker's own stage never blocked the change.
        assert_eq!(attacker.pokemon[0].stages.get(Stat::Defense), 0);
    }

    #[test]
    fn test_relative_heal_uses_maximum_health() {
        let mut attacker = trainer("Bulbasaur");
        let mut defender = trainer("Squirtle");
        let mut rng = TurnRng::new_for_test(vec![]);
        let maximum = attacker.pokemon[0].max_health();
        attacker.pokemon[0].damage(maximum / 2.0);

        let events = run(
            &MoveEffect::Heal {
                amount: 0.25,
                relative: true,
            },
            &mut attacker,
            &mut defender,
            &mut rng,
        );

        assert_eq!(
            events,
            vec![BattleEvent::Healed {
                pokemon: "Bulbasaur".to_string(),
                amount: maximum * 0.25,
            }]
        );
    }

    #[test]
    fn test_fixed_damage_from_a_status_move_has_no_effect() {
        let mut attacker = trainer("Charmander");
        let mut defender = trainer("Bulbasaur");
        let mut rng = TurnRng::new_for_test(vec![]);
        let health = defender.pokemon[0].health();

        let events = run(&MoveEffect::Damage { amount: 40.0 }, &mut attacker, &mut defender, &mut rng);

        assert!(matches!(events.as_slice(), [BattleEvent::NoEffect { .. }]));
        assert_eq!(defender.pokemon[0].health(), health);
    }

    #[rstest::rstest]
    #[case(10, 10, true)]
    #[case(10, 11, false)]
    #[case(100, 99, true)]
    fn test_chance_wrapper(#[case] chance: u32, #[case] roll: u32, #[case] applied: bool) {
        let mut attacker = trainer("Charmander");
        let mut defender = trainer("Bulbasaur");
        let mut rng = TurnRng::new_for_test(vec![roll]);
        let burn = MoveEffect::Chance {
            effect: Box::new(MoveEffect::Status {
                status: PokemonStatus::Burn,
            }),
            chance,
        };

        let events = run(&burn, &mut attacker, &mut defender, &mut rng);

        assert_eq!(events.len(), usize::from(applied));
        assert_eq!(defender.pokemon[0].has_status(PokemonStatus::Burn), applied);
    }
}
