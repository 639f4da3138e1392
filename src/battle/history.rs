//! The record of what each side did, round by round.

use crate::battle::state::BattleEvent;
use crate::battle::turns::{Side, Turn};
use std::collections::BTreeMap;
use tracing::trace;

/// The turn a side took in a round and everything it caused.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub side: Side,
    pub turn: Turn,
    pub events: Vec<BattleEvent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub number: u32,
    actions: BTreeMap<Side, Action>,
}

impl Round {
    fn new(number: u32) -> Self {
        Self {
            number,
            actions: BTreeMap::new(),
        }
    }

    pub fn action(&self, side: Side) -> Option<&Action> {
        self.actions.get(&side)
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }
}

/// Finalized rounds plus the round in progress, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    current: Option<Round>,
    rounds: Vec<Round>,
}

impl History {
    /// Open the first round.
    pub fn begin(&mut self) {
        self.current = Some(Round::new(1));
    }

    /// Record a side's turn in the current round. A side logged again in the same
    /// round keeps its first turn and gains the new events.
    pub fn log(&mut self, turn: &Turn, events: Vec<BattleEvent>) {
        let Some(round) = self.current.as_mut() else {
            trace!("no round in progress, nothing logged");
            return;
        };
        let side = turn.side();
        round
            .actions
            .entry(side)
            .and_modify(|action| action.events.extend(events.iter().cloned()))
            .or_insert_with(|| Action {
                side,
                turn: turn.clone(),
                events,
            });
    }

    /// Finalize the current round and open the next one.
    pub fn lapse(&mut self) {
        if let Some(round) = self.current.take() {
            let next = round.number + 1;
            self.rounds.push(round);
            self.current = Some(Round::new(next));
        }
    }

    /// Finalize the current round without opening another.
    pub fn end(&mut self) {
        if let Some(round) = self.current.take() {
            self.rounds.push(round);
        }
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn current(&self) -> Option<&Round> {
        self.current.as_ref()
    }

    /// The most recently finalized round.
    pub fn last_round(&self) -> Option<&Round> {
        self.rounds.last()
    }
}
