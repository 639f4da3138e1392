use schema::{IntoEnumIterator, Stat};
use std::collections::BTreeMap;

/// Lowest and highest reachable stat stage.
pub const MIN_STAGE: i32 = -6;
pub const MAX_STAGE: i32 = 6;

/// Transient, battle-only stat stages. Every stat sits at 0 outside of battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageList {
    value: BTreeMap<Stat, i32>,
}

impl Default for StageList {
    fn default() -> Self {
        StageList {
            value: Stat::iter().map(|stat| (stat, 0)).collect(),
        }
    }
}

impl StageList {
    pub fn get(&self, stat: Stat) -> i32 {
        self.value.get(&stat).copied().unwrap_or(0)
    }

    /// Move a stage by `amount`, clamped to [-6, 6]. Returns the new stage.
    pub fn change(&mut self, stat: Stat, amount: i32) -> i32 {
        let stage = (self.get(stat) + amount).clamp(MIN_STAGE, MAX_STAGE);
        self.value.insert(stat, stage);
        stage
    }

    /// Whether a change in the direction of `amount` can still move the stage.
    pub fn can_change(&self, stat: Stat, amount: i32) -> bool {
        let stage = self.get(stat);
        !((amount > 0 && stage >= MAX_STAGE) || (amount < 0 && stage <= MIN_STAGE))
    }

    pub fn is_active(&self) -> bool {
        self.value.values().any(|stage| *stage != 0)
    }

    pub fn reset(&mut self) {
        *self = StageList::default();
    }

    /// Iterate over the stats with a non-zero stage.
    pub fn active(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        self.value
            .iter()
            .filter(|(_, stage)| **stage != 0)
            .map(|(stat, stage)| (*stat, *stage))
    }

    /// Apply the stage multiplier of `stat` to a computed stat value.
    pub fn effective(&self, stat: Stat, value: f64) -> f64 {
        value * stage_multiplier(self.get(stat))
    }
}

/// (2 + stage) / 2 for raised stages, 2 / (2 - stage) for lowered ones.
pub fn stage_multiplier(stage: i32) -> f64 {
    let stage = stage.clamp(MIN_STAGE, MAX_STAGE) as f64;
    if stage > 0.0 {
        (2.0 + stage) / 2.0
    } else {
        2.0 / (2.0 - stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1.0)]
    #[case(1, 1.5)]
    #[case(2, 2.0)]
    #[case(6, 4.0)]
    #[case(-1, 2.0 / 3.0)]
    #[case(-2, 0.5)]
    #[case(-6, 0.25)]
    fn test_stage_multipliers(#[case] stage: i32, #[case] expected: f64) {
        assert!((stage_multiplier(stage) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_stage_zero_is_identity_for_every_stat() {
        let stages = StageList::default();
        for stat in Stat::iter() {
            assert_eq!(stages.effective(stat, 123.4), 123.4);
        }
    }

    #[test]
    fn test_change_clamps_to_bounds() {
        let mut stages = StageList::default();

        assert_eq!(stages.change(Stat::Attack, 4), 4);
        assert_eq!(stages.change(Stat::Attack, 4), 6);
        assert!(!stages.can_change(Stat::Attack, 1));
        assert!(stages.can_change(Stat::Attack, -1));

        assert_eq!(stages.change(Stat::Speed, -10), -6);
        assert!(!stages.can_change(Stat::Speed, -2));
    }

    #[test]
    fn test_change_round_trip_within_bounds() {
        for start in MIN_STAGE..=MAX_STAGE {
            for amount in -3..=3 {
                let mut stages = StageList::default();
                stages.change(Stat::Defense, start);

                stages.change(Stat::Defense, amount);
                stages.change(Stat::Defense, -amount);

                let crossed = start + amount > MAX_STAGE || start + amount < MIN_STAGE;
                if crossed {
                    assert_ne!(stages.get(Stat::Defense), start, "start {start}, amount {amount}");
                } else {
                    assert_eq!(stages.get(Stat::Defense), start, "start {start}, amount {amount}");
                }
            }
        }
    }

    #[test]
    fn test_stats_are_tracked_independently() {
        let mut stages = StageList::default();
        stages.change(Stat::Attack, 2);
        stages.change(Stat::Evasion, -1);

        assert_eq!(stages.get(Stat::Defense), 0);
        assert_eq!(
            stages.active().collect::<Vec<_>>(),
            vec![(Stat::Attack, 2), (Stat::Evasion, -1)]
        );

        stages.reset();
        assert!(!stages.is_active());
        assert_eq!(stages, StageList::default());
    }
}
