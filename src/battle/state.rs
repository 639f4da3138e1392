use crate::battle::turns::Side;
use crate::types::Effectiveness;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::{PokemonStatus, Stat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use tracing::{trace, warn};

/// Something that happened during a battle (or a level-up outside of one).
///
/// Events are descriptive: every state change they mention has already been applied
/// by the time the event is constructed. Their `Display` output is the text shown
/// to the player.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Move outcomes
    MoveUsed {
        trainer: String,
        move_name: String,
    },
    Hit {
        attacker: String,
        defender: String,
        damage: f64,
        remaining: f64,
        whiteout: bool,
        critical: bool,
        effectiveness: Effectiveness,
    },
    NoEffect {
        attacker: String,
        defender: String,
        move_name: String,
    },
    Healed {
        pokemon: String,
        amount: f64,
    },
    Killed {
        attacker: String,
        defender: String,
        experience: f64,
    },

    // Checks that stop a move
    Missed {
        attacker: String,
    },
    Evaded {
        attacker: String,
        defender: String,
    },
    Exhausted {
        attacker: String,
    },
    Flinched {
        pokemon: String,
    },
    Frozen {
        pokemon: String,
    },

    // Stages and statuses
    StageChanged {
        pokemon: String,
        stat: Stat,
        stages: i32,
    },
    MaximumStage {
        pokemon: String,
        stat: Stat,
    },
    StatusApplied {
        attacker: String,
        defender: String,
        status: PokemonStatus,
    },
    StatusDamage {
        status: PokemonStatus,
        pokemon: String,
        damage: f64,
    },

    // Team management
    ActorReplaced {
        trainer: String,
        original: String,
        replacement: String,
    },
    NoReplacement {
        trainer: String,
    },
    Swapped {
        trainer: String,
        pokemon: String,
    },
    Retreated {
        trainer: String,
    },

    // Experience
    LeveledUp {
        pokemon: String,
        from: u32,
        to: u32,
    },
    LearnedMove {
        pokemon: String,
        move_name: String,
    },
    ForgotMove {
        pokemon: String,
        move_name: String,
    },
    Evolved {
        pokemon: String,
        evolution: String,
    },
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::MoveUsed { trainer, move_name } => {
                write!(f, "{trainer} chose {move_name}!")
            }
            BattleEvent::Hit {
                attacker,
                defender,
                damage,
                remaining,
                whiteout,
                critical,
                effectiveness,
            } => {
                write!(f, "{attacker} hit {defender} for {damage:.1} damage!")?;

                if *effectiveness != Effectiveness::Nullified {
                    if !whiteout {
                        write!(f, " {defender}'s HP is now down to {remaining:.1} health.")?;
                    }
                    if *critical {
                        write!(f, " A critical hit!")?;
                    }
                }

                match effectiveness {
                    Effectiveness::Default => Ok(()),
                    Effectiveness::Ineffective | Effectiveness::Disadvantaged => {
                        write!(f, " It was not very effective!")
                    }
                    Effectiveness::Advantaged | Effectiveness::Effective => {
                        write!(f, " It was very effective!")
                    }
                    Effectiveness::Nullified => write!(f, " It had no effect!"),
                }
            }
            BattleEvent::NoEffect {
                attacker,
                defender,
                move_name,
            } => write!(
                f,
                "{attacker} tried to hit {defender} with {move_name}, but it does not deal damage!"
            ),
            BattleEvent::Healed { pokemon, amount } => {
                write!(f, "{pokemon} healed itself for {amount:.1} health!")
            }
            BattleEvent::Killed {
                attacker,
                defender,
                experience,
            } => write!(
                f,
                "{attacker} killed {defender}! {attacker} gained {experience:.1} experience!"
            ),
            BattleEvent::Missed { attacker } => write!(f, "{attacker}'s move missed!"),
            BattleEvent::Evaded { attacker, defender } => {
                write!(f, "{defender} successfully dodged {attacker}'s move!")
            }
            BattleEvent::Exhausted { attacker } => write!(
                f,
                "{attacker} could not perform its move because it is exhausted!"
            ),
            BattleEvent::Flinched { pokemon } => {
                write!(f, "{pokemon} flinched and couldn't execute its move!")
            }
            BattleEvent::Frozen { pokemon } => {
                write!(f, "{pokemon} could not attack because they are frozen!")
            }
            BattleEvent::StageChanged {
                pokemon,
                stat,
                stages,
            } => {
                let change = match stages {
                    1 => "rose!",
                    2 => "sharply rose!",
                    s if *s >= 3 => "rose drastically!",
                    -1 => "fell!",
                    -2 => "harshly fell!",
                    s if *s <= -3 => "severely fell!",
                    _ => "remains unchanged!",
                };
                write!(f, "{pokemon}'s {stat} {change}")
            }
            BattleEvent::MaximumStage { pokemon, stat } => {
                write!(f, "{pokemon}'s {stat} could not go any further!")
            }
            BattleEvent::StatusApplied {
                attacker,
                defender,
                status,
            } => write!(f, "{attacker} applied the {status} effect to {defender}!"),
            BattleEvent::StatusDamage {
                status,
                pokemon,
                damage,
            } => write!(
                f,
                "The {status} effect on {pokemon} hurt it by {damage:.1} damage!"
            ),
            BattleEvent::ActorReplaced {
                trainer,
                original,
                replacement,
            } => write!(
                f,
                "{trainer} replaced their team's actor {original} with {replacement}!"
            ),
            BattleEvent::NoReplacement { trainer } => write!(
                f,
                "{trainer} has no more pokemon left in their team that haven't whited out."
            ),
            BattleEvent::Swapped { trainer, pokemon } => write!(
                f,
                "{trainer} chose {pokemon} to be their new acting pokemon."
            ),
            BattleEvent::Retreated { trainer } => {
                write!(f, "{trainer} has retreated from battle!")
            }
            BattleEvent::LeveledUp { pokemon, from, to } => {
                write!(f, "{pokemon} leveled up from level {from} to level {to}!")
            }
            BattleEvent::LearnedMove { pokemon, move_name } => {
                write!(f, "{pokemon} learned the move {move_name}!")
            }
            BattleEvent::ForgotMove { pokemon, move_name } => {
                write!(f, "{pokemon} forgot the move {move_name}!")
            }
            BattleEvent::Evolved { pokemon, evolution } => {
                write!(f, "{pokemon} evolved into {evolution}!")
            }
        }
    }
}

/// Collects the events of a battle until the presentation layer drains them.
///
/// # Example
/// ```
/// use pokemon_confrontation::battle::state::{BattleEvent, EventBus};
///
/// let mut bus = EventBus::new();
/// bus.push(BattleEvent::Missed { attacker: "Bulbasaur".to_string() });
/// assert_eq!(bus.to_string(), "Bulbasaur's move missed!\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = BattleEvent>) {
        self.events.extend(events);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Hand every collected event to the caller, leaving the bus empty.
    pub fn take(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl fmt::Display for EventBus {
    /// One message per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "{event}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Seeded(StdRng),
    Scripted { outcomes: Vec<u32>, index: usize },
}

/// The single source of randomness of a battle: turn order ties, accuracy, evasion,
/// critical hits, damage variance and chance effects all draw from it.
///
/// Tests script the outcomes with [`TurnRng::new_for_test`]; scripted values are
/// clamped into the requested range.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u32>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Seeded(StdRng::from_rng(&mut rand::rng())),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    /// Draw a value in `range`, logging what it was drawn for.
    pub fn next_in(&mut self, range: Range<u32>, reason: &str) -> u32 {
        if range.is_empty() {
            return range.start;
        }

        let outcome = match &mut self.source {
            RngSource::Seeded(rng) => rng.random_range(range.clone()),
            RngSource::Scripted { outcomes, index } => match outcomes.get(*index) {
                Some(outcome) => {
                    *index += 1;
                    (*outcome).clamp(range.start, range.end - 1)
                }
                None => {
                    warn!(reason, "scripted rng exhausted, using the lowest outcome");
                    range.start
                }
            },
        };

        trace!(outcome, reason, "rng draw");
        outcome
    }

    /// True half of the time.
    pub fn coin_flip(&mut self, reason: &str) -> bool {
        self.next_in(0..2, reason) == 0
    }
}

impl Default for TurnRng {
    fn default() -> Self {
        Self::new_random()
    }
}

/// How a battle ended.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Defeated { winner: Side, defeated: Side },
    Retreated { side: Side },
}

impl BattleOutcome {
    /// The closing line of a battle, given the names of both trainers.
    pub fn message(&self, player: &str, opponent: &str) -> String {
        let name = |side: Side| match side {
            Side::Player => player,
            Side::Opponent => opponent,
        };

        match self {
            BattleOutcome::Defeated { winner, defeated } => {
                format!("{} has defeated {}!", name(*winner), name(*defeated))
            }
            BattleOutcome::Retreated { side } => format!("{} retreated from battle!", name(*side)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn hit(whiteout: bool, critical: bool, effectiveness: Effectiveness) -> BattleEvent {
        BattleEvent::Hit {
            attacker: "Charmander".to_string(),
            defender: "Bulbasaur".to_string(),
            damage: 12.345,
            remaining: 20.0,
            whiteout,
            critical,
            effectiveness,
        }
    }

    #[rstest]
    #[case(
        hit(false, false, Effectiveness::Default),
        "Charmander hit Bulbasaur for 12.3 damage! Bulbasaur's HP is now down to 20.0 health."
    )]
    #[case(
        hit(false, true, Effectiveness::Advantaged),
        "Charmander hit Bulbasaur for 12.3 damage! Bulbasaur's HP is now down to 20.0 health. A critical hit! It was very effective!"
    )]
    #[case(
        hit(true, false, Effectiveness::Disadvantaged),
        "Charmander hit Bulbasaur for 12.3 damage! It was not very effective!"
    )]
    #[case(
        hit(false, true, Effectiveness::Nullified),
        "Charmander hit Bulbasaur for 12.3 damage! It had no effect!"
    )]
    fn test_hit_messages(#[case] event: BattleEvent, #[case] expected: &str) {
        assert_eq!(event.to_string(), expected);
    }

    #[rstest]
    #[case(1, "rose!")]
    #[case(2, "sharply rose!")]
    #[case(4, "rose drastically!")]
    #[case(-1, "fell!")]
    #[case(-2, "harshly fell!")]
    #[case(-3, "severely fell!")]
    #[case(0, "remains unchanged!")]
    fn test_stage_change_messages(#[case] stages: i32, #[case] expected: &str) {
        let event = BattleEvent::StageChanged {
            pokemon: "Squirtle".to_string(),
            stat: Stat::SpecialDefense,
            stages,
        };
        assert_eq!(
            event.to_string(),
            format!("Squirtle's special defense {expected}")
        );
    }

    #[test]
    fn test_scripted_rng_clamps_and_falls_back() {
        let mut rng = TurnRng::new_for_test(vec![150, 3, 0]);

        assert_eq!(rng.next_in(0..100, "accuracy"), 99);
        assert_eq!(rng.next_in(0..100, "evasion"), 3);
        assert_eq!(rng.next_in(85..101, "variance"), 85);
        // Exhausted
        assert_eq!(rng.next_in(10..20, "anything"), 10);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut first = TurnRng::seeded(7);
        let mut second = TurnRng::seeded(7);

        let a: Vec<u32> = (0..20).map(|_| first.next_in(0..255, "crit")).collect();
        let b: Vec<u32> = (0..20).map(|_| second.next_in(0..255, "crit")).collect();
        assert_eq!(a, b);
        assert!(a.iter().all(|value| *value < 255));
    }

    #[test]
    fn test_outcome_messages() {
        let defeated = BattleOutcome::Defeated {
            winner: Side::Opponent,
            defeated: Side::Player,
        };
        assert_eq!(defeated.message("Red", "Misty"), "Misty has defeated Red!");

        let retreated = BattleOutcome::Retreated { side: Side::Player };
        assert_eq!(retreated.message("Red", "Misty"), "Red retreated from battle!");
    }

    #[test]
    fn test_event_bus_take_empties_the_bus() {
        let mut bus = EventBus::new();
        bus.push(BattleEvent::Frozen {
            pokemon: "Squirtle".to_string(),
        });
        bus.extend([BattleEvent::Retreated {
            trainer: "Red".to_string(),
        }]);

        assert_eq!(bus.len(), 2);
        let taken = bus.take();
        assert_eq!(taken.len(), 2);
        assert!(bus.is_empty());
    }
}
