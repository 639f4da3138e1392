// In: src/moves/cleanups.rs

use super::MoveContext;
use crate::battle::state::BattleEvent;
use crate::experience;
use serde::{Deserialize, Serialize};

/// Runs after the effects of a stage, whatever they did.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCleanup {
    /// If the defender fainted from this stage, hand its effort values and experience
    /// to the attacker.
    Kill,
    /// Spend one use of the move.
    PowerPoint,
}

impl MoveCleanup {
    pub fn execute(&self, ctx: &mut MoveContext<'_>) -> Vec<BattleEvent> {
        match self {
            MoveCleanup::Kill => kill(ctx),
            MoveCleanup::PowerPoint => {
                if let Some(known) = ctx.known_move_mut() {
                    known.pp.current = known.pp.current.saturating_sub(1);
                }
                Vec::new()
            }
        }
    }
}

fn kill(ctx: &mut MoveContext<'_>) -> Vec<BattleEvent> {
    if !ctx.defender().whiteout() || ctx.defender_was_down() {
        return Vec::new();
    }

    let yields = ctx.defender().statistics.yields.clone();
    let gained = experience::kill_yield(ctx.defender());
    let defender = ctx.defender().name.clone();
    let attacker = ctx.attacker().name.clone();

    ctx.attacker_mut().statistics.add_evs(&yields);

    let mut events = vec![BattleEvent::Killed {
        attacker,
        defender,
        experience: gained,
    }];
    events.extend(experience::add_experience(
        ctx.attacker,
        ctx.attacker_index,
        gained,
    ));
    events
}
