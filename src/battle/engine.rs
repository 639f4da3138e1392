//! Round resolution: ordering two turns, running them, applying end-of-round cleanups
//! and detecting the end of the battle.

use crate::battle::checks::{TurnCheck, TurnCleanup};
use crate::battle::history::History;
use crate::battle::state::{BattleEvent, BattleOutcome, EventBus, TurnRng};
use crate::battle::turns::{MoveTurn, RetreatTurn, Side, SwapTurn, Turn};
use crate::errors::{BattleError, BattleResult};
use crate::trainer::{Decider, Team, Trainer};
use tracing::{debug, info};

/// One encounter between the player's team and an opponent's.
#[derive(Debug)]
pub struct Battle {
    player: Team,
    opponent: Team,
    outcome: Option<BattleOutcome>,
    history: History,
    checks: Vec<TurnCheck>,
    cleanups: Vec<TurnCleanup>,
    rng: TurnRng,
    events: EventBus,
    started: bool,
}

impl Battle {
    pub fn new(player: Team, opponent: Team) -> BattleResult<Self> {
        if player.side() != Side::Player {
            return Err(BattleError::WrongSide(player.side()));
        }
        if opponent.side() != Side::Opponent {
            return Err(BattleError::WrongSide(opponent.side()));
        }

        Ok(Self {
            player,
            opponent,
            outcome: None,
            history: History::default(),
            checks: vec![TurnCheck::Continue],
            cleanups: vec![TurnCleanup::Burn, TurnCleanup::Poison],
            rng: TurnRng::new_random(),
            events: EventBus::new(),
            started: false,
        })
    }

    pub fn with_rng(mut self, rng: TurnRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_turn_checks(mut self, checks: Vec<TurnCheck>) -> Self {
        self.checks = checks;
        self
    }

    pub fn with_turn_cleanups(mut self, cleanups: Vec<TurnCleanup>) -> Self {
        self.cleanups = cleanups;
        self
    }

    /// Start recording the first round.
    pub fn begin(&mut self) -> BattleResult<()> {
        if self.outcome.is_some() {
            return Err(BattleError::AlreadyEnded);
        }
        info!(
            player = %self.player.owner().name,
            opponent = %self.opponent.owner().name,
            "battle begins"
        );
        self.history.begin();
        self.started = true;
        Ok(())
    }

    /// Resolve one round from one turn per side.
    ///
    /// Returns the outcome once a side has been defeated or has retreated; the caller
    /// then passes it to [`Battle::end`]. `None` means the battle goes on.
    pub fn execute(&mut self, first: Turn, second: Turn) -> BattleResult<Option<BattleOutcome>> {
        if self.outcome.is_some() {
            return Err(BattleError::AlreadyEnded);
        }
        if !self.started {
            return Err(BattleError::NotStarted);
        }
        if first.side() == second.side() {
            return Err(BattleError::WrongSide(second.side()));
        }

        let mut order = self.order(first, second);

        for turn in order.iter_mut() {
            let side = turn.side();
            let retreating = matches!(turn, Turn::Retreat(_));
            let (own, target, rng) = self.split(side);

            let Some(events) = turn.execute(own, target, rng)? else {
                debug!(%side, "turn had no effect");
                continue;
            };
            self.record(turn, events);

            if retreating {
                return Ok(Some(BattleOutcome::Retreated { side }));
            }
            if self.team(side.other()).is_defeated() {
                return Ok(Some(BattleOutcome::Defeated {
                    winner: side,
                    defeated: side.other(),
                }));
            }
        }

        for cleanup in self.cleanups.clone() {
            for turn in &order {
                let side = turn.side();
                if let Some(event) = cleanup.execute(self.team_mut(side)) {
                    self.record(turn, vec![event]);
                }
            }
        }

        // The side that acted second is checked first.
        for turn in order.iter().rev() {
            let side = turn.side();
            if self.team(side).is_defeated() {
                return Ok(Some(BattleOutcome::Defeated {
                    winner: side.other(),
                    defeated: side,
                }));
            }
        }

        self.history.lapse();
        Ok(None)
    }

    /// Finish the battle: reset both rosters and store the outcome.
    pub fn end(&mut self, outcome: BattleOutcome) -> BattleResult<()> {
        if self.outcome.is_some() {
            return Err(BattleError::AlreadyEnded);
        }

        self.player.owner_mut().reset();
        self.opponent.owner_mut().reset();
        self.history.end();
        self.outcome = Some(outcome);

        info!(
            outcome = %outcome.message(&self.player.owner().name, &self.opponent.owner().name),
            rounds = self.history.rounds().len(),
            "battle ended"
        );
        Ok(())
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome_message(&self) -> Option<String> {
        self.outcome
            .map(|outcome| outcome.message(&self.player.owner().name, &self.opponent.owner().name))
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    fn team_mut(&mut self, side: Side) -> &mut Team {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// The decision source of the side's trainer.
    pub fn decider_mut(&mut self, side: Side) -> &mut dyn Decider {
        self.team_mut(side).owner_mut().decider_mut()
    }

    /// Events recorded since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<BattleEvent> {
        self.events.take()
    }

    /// The first turn forced on `side` by the battle's turn checks, if any.
    pub fn check_turn(&self, side: Side) -> Option<Turn> {
        self.checks
            .iter()
            .find_map(|check| check.check(side, &self.history, self.team(side)))
    }

    pub fn move_turn(&self, side: Side, move_slot: usize) -> BattleResult<Turn> {
        MoveTurn::new(side, self.team(side), move_slot).map(Turn::Move)
    }

    pub fn swap_turn(&self, side: Side) -> Turn {
        Turn::Swap(SwapTurn::new(side))
    }

    pub fn retreat_turn(&self, side: Side) -> Turn {
        Turn::Retreat(RetreatTurn::new(side))
    }

    /// Let the side's decider pick a move, unless a turn check forces one.
    pub fn choose_turn(&mut self, side: Side) -> BattleResult<Turn> {
        if let Some(turn) = self.check_turn(side) {
            return Ok(turn);
        }

        let team = self.team_mut(side);
        let actor = team.actor();
        let prompt = format!("Which move will {actor} use?");
        let options: Vec<String> = actor
            .moves
            .iter()
            .map(|known| format!("{known} ({})", known.pp))
            .collect();
        let slot = team
            .owner_mut()
            .decider_mut()
            .choose_one(&prompt, &options)
            .ok_or(BattleError::InvalidMoveSlot(0))?;

        self.move_turn(side, slot)
    }

    /// Hand both trainers back once the battle is over.
    pub fn into_trainers(self) -> (Trainer, Trainer) {
        (self.player.into_owner(), self.opponent.into_owner())
    }

    /// Tie-break by coin flip, otherwise higher priority first.
    fn order(&mut self, first: Turn, second: Turn) -> [Turn; 2] {
        let (player, opponent) = match first.side() {
            Side::Player => (first, second),
            Side::Opponent => (second, first),
        };

        let player_first = match player.priority().cmp(&opponent.priority()) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => {
                let player_first = self.rng.coin_flip("turn order");
                debug!(player_first, "priority tie broken");
                player_first
            }
        };

        if player_first {
            [player, opponent]
        } else {
            [opponent, player]
        }
    }

    fn split(&mut self, side: Side) -> (&mut Team, &mut Team, &mut TurnRng) {
        let Battle {
            player,
            opponent,
            rng,
            ..
        } = self;
        match side {
            Side::Player => (player, opponent, rng),
            Side::Opponent => (opponent, player, rng),
        }
    }

    fn record(&mut self, turn: &Turn, events: Vec<BattleEvent>) {
        self.events.extend(events.iter().cloned());
        self.history.log(turn, events);
    }
}
