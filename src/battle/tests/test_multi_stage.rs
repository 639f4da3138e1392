#[cfg(test)]
mod tests {
    use crate::battle::state::{BattleEvent, TurnRng};
    use crate::battle::tests::common::{
        create_duel, create_test_battle, create_test_trainer, predictable_rng, TestPokemonBuilder,
    };
    use crate::battle::{Side, Turn};
    use crate::content::moves::{fire_spin, growl, skull_bash, solar_beam, tackle};
    use crate::trainer::ScriptedDecider;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn executed_stages(turn: &Turn) -> Vec<usize> {
        match turn {
            Turn::Move(turn) => turn.executed().to_vec(),
            other => panic!("expected a move turn, got {other:?}"),
        }
    }

    #[test]
    fn test_two_stage_move_runs_one_stage_per_round() {
        let mut battle = create_duel(vec![solar_beam()], vec![growl()], predictable_rng());

        // Round one: the charge stage, nothing hits.
        let player = battle.move_turn(Side::Player, 0).unwrap();
        let opponent = battle.move_turn(Side::Opponent, 0).unwrap();
        assert_eq!(battle.execute(player, opponent).unwrap(), None);
        let events = battle.take_events();
        assert!(!events.iter().any(|event| matches!(event, BattleEvent::Hit { .. })));

        // The continue check forces the same move for round two.
        let forced = battle.check_turn(Side::Player).expect("solar beam continues");
        assert_eq!(executed_stages(&forced), vec![0]);
        assert_eq!(battle.check_turn(Side::Opponent), None);

        let opponent = battle.move_turn(Side::Opponent, 0).unwrap();
        assert_eq!(battle.execute(forced, opponent).unwrap(), None);
        let events = battle.take_events();
        assert!(events.iter().any(|event| matches!(
            event,
            BattleEvent::Hit { attacker, .. } if attacker == "Squirtle"
        )));

        // Finished: the player picks freely again.
        assert_eq!(battle.check_turn(Side::Player), None);

        // Only the final stage spends a use.
        let solar_beam = &battle.team(Side::Player).actor().moves[0];
        assert_eq!(solar_beam.pp.current, solar_beam.pp.maximum - 1);
    }

    #[test]
    fn test_every_stage_announces_the_move() {
        let mut battle = create_duel(vec![solar_beam()], vec![growl()], predictable_rng());

        let player = battle.move_turn(Side::Player, 0).unwrap();
        let opponent = battle.move_turn(Side::Opponent, 0).unwrap();
        battle.execute(player, opponent).unwrap();
        let forced = battle.check_turn(Side::Player).unwrap();
        let opponent = battle.move_turn(Side::Opponent, 0).unwrap();
        battle.execute(forced, opponent).unwrap();

        let announced = battle
            .history()
            .rounds()
            .iter()
            .filter_map(|round| round.action(Side::Player))
            .filter(|action| {
                action.events.first()
                    == Some(&BattleEvent::MoveUsed {
                        trainer: "Red".to_string(),
                        move_name: "Solar Beam".to_string(),
                    })
            })
            .count();
        assert_eq!(announced, 2);
    }

    #[test]
    fn test_continue_stops_when_the_actor_changes() {
        let player = create_test_trainer(
            "Red",
            vec![
                TestPokemonBuilder::new("Bulbasaur", 20)
                    .with_moves(vec![solar_beam()])
                    .build(),
                TestPokemonBuilder::new("Ivysaur", 20)
                    .with_moves(vec![tackle()])
                    .build(),
            ],
            ScriptedDecider::default(),
        );
        let opponent = create_test_trainer(
            "Blue",
            vec![TestPokemonBuilder::new("Squirtle", 20).with_moves(vec![growl()]).build()],
            ScriptedDecider::default(),
        );
        let mut battle = create_test_battle(player, opponent, predictable_rng());

        let player = battle.move_turn(Side::Player, 0).unwrap();
        let opponent = battle.move_turn(Side::Opponent, 0).unwrap();
        battle.execute(player, opponent).unwrap();
        assert!(battle.check_turn(Side::Player).is_some());

        // Swapping out abandons the charged move.
        let swap = battle.swap_turn(Side::Player);
        let opponent = battle.move_turn(Side::Opponent, 0).unwrap();
        battle.execute(swap, opponent).unwrap();
        assert_eq!(battle.team(Side::Player).actor().name, "Ivysaur");
        assert_eq!(battle.check_turn(Side::Player), None);
    }

    #[test]
    fn test_fire_spin_keeps_hitting_until_finished() {
        let mut rng = StdRng::seed_from_u64(5);
        let fire_spin = fire_spin(&mut rng);
        let stages = fire_spin.stages.len();

        let mut battle = create_duel(vec![fire_spin], vec![growl()], TurnRng::new_for_test(vec![100; 500]));
        let mut player = battle.move_turn(Side::Player, 0).unwrap();
        let mut hits = 0;

        for _ in 0..stages {
            let opponent = battle.move_turn(Side::Opponent, 0).unwrap();
            assert_eq!(battle.execute(player, opponent).unwrap(), None);
            hits += battle
                .take_events()
                .iter()
                .filter(|event| matches!(event, BattleEvent::Hit { attacker, .. } if attacker == "Squirtle"))
                .count();

            player = match battle.check_turn(Side::Player) {
                Some(turn) => turn,
                None => break,
            };
        }

        assert_eq!(hits, stages);
        assert_eq!(battle.check_turn(Side::Player), None);
    }

    #[test]
    fn test_later_stage_sees_uses_spent_by_earlier_stages() {
        let mut squirtle = TestPokemonBuilder::new("Squirtle", 20)
            .with_moves(vec![skull_bash()])
            .build();
        squirtle.moves[0].pp.current = 1;
        let player = create_test_trainer("Red", vec![squirtle], ScriptedDecider::default());
        let opponent = create_test_trainer(
            "Blue",
            vec![TestPokemonBuilder::new("Charmander", 20).with_moves(vec![growl()]).build()],
            ScriptedDecider::default(),
        );
        let mut battle = create_test_battle(player, opponent, predictable_rng());

        // The charge stage spends the last use.
        let player = battle.move_turn(Side::Player, 0).unwrap();
        let opponent = battle.move_turn(Side::Opponent, 0).unwrap();
        battle.execute(player, opponent).unwrap();
        assert_eq!(battle.team(Side::Player).actor().moves[0].pp.current, 0);
        battle.take_events();

        let forced = battle.check_turn(Side::Player).expect("skull bash continues");
        let opponent = battle.move_turn(Side::Opponent, 0).unwrap();
        assert_eq!(battle.execute(forced, opponent).unwrap(), None);

        let events = battle.take_events();
        assert!(events.contains(&BattleEvent::Exhausted {
            attacker: "Squirtle".to_string(),
        }));
        assert!(!events.iter().any(|event| matches!(event, BattleEvent::Hit { .. })));

        let charmander = battle.team(Side::Opponent).actor();
        assert_eq!(charmander.health(), charmander.max_health());
        assert_eq!(battle.team(Side::Player).actor().moves[0].pp.current, 0);
        assert_eq!(battle.check_turn(Side::Player), None);
    }
}
