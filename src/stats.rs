use rand::Rng;
use schema::{IntoEnumIterator, Nature, Stat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A value per stat, kept ordered so saves and debug output are stable.
pub type StatMap<T> = BTreeMap<Stat, T>;

/// Upper bound (exclusive) of a freshly rolled individual value.
pub const MAX_IV: u32 = 31;

/// Persistent statistics of a companion.
///
/// `value` holds the current numbers (health goes down as the companion takes
/// damage), `maximum` the numbers computed for the current level.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatList {
    pub base: StatMap<u32>,
    pub yields: StatMap<u32>,
    pub ivs: StatMap<u32>,
    pub evs: StatMap<u32>,
    value: StatMap<f64>,
    maximum: StatMap<f64>,
}

impl StatList {
    /// Build the stat list and compute its values for the given nature and level.
    /// Stats missing from `base` count as zero.
    pub fn new(
        base: StatMap<u32>,
        yields: StatMap<u32>,
        ivs: StatMap<u32>,
        nature: Nature,
        level: u32,
    ) -> Self {
        let mut stats = StatList {
            base,
            yields,
            ivs,
            evs: Stat::iter().map(|stat| (stat, 0)).collect(),
            value: StatMap::new(),
            maximum: StatMap::new(),
        };
        stats.recalculate(nature, level);
        stats
    }

    /// Roll a random individual value in `0..31` for every stat.
    pub fn roll_ivs<R: Rng + ?Sized>(rng: &mut R) -> StatMap<u32> {
        Stat::iter()
            .map(|stat| (stat, rng.random_range(0..MAX_IV)))
            .collect()
    }

    /// Recompute maximum and current values. Current health is restored as well.
    pub fn recalculate(&mut self, nature: Nature, level: u32) {
        self.maximum = self.calculate(nature, level);
        self.value = self.maximum.clone();
    }

    pub fn calculate(&self, nature: Nature, level: u32) -> StatMap<f64> {
        Stat::iter()
            .map(|stat| {
                let base = self.base.get(&stat).copied().unwrap_or(0);
                let iv = self.ivs.get(&stat).copied().unwrap_or(0);
                let ev = self.evs.get(&stat).copied().unwrap_or(0);

                let value = match stat {
                    Stat::Health => health_stat(level, base, iv, ev),
                    _ => normal_stat(level, base, iv, ev, nature_modifier(nature, stat)),
                };
                (stat, value)
            })
            .collect()
    }

    pub fn value(&self, stat: Stat) -> f64 {
        self.value.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn maximum(&self, stat: Stat) -> f64 {
        self.maximum.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn values(&self) -> &StatMap<f64> {
        &self.value
    }

    /// Restore the current value of a stat to its maximum.
    pub fn reset(&mut self, stat: Stat) {
        self.value.insert(stat, self.maximum(stat));
    }

    /// Shift the current value of a stat. Health may go below zero.
    pub fn adjust(&mut self, stat: Stat, delta: f64) {
        *self.value.entry(stat).or_insert(0.0) += delta;
    }

    pub fn add_evs(&mut self, yields: &StatMap<u32>) {
        for (stat, amount) in yields {
            *self.evs.entry(*stat).or_insert(0) += amount;
        }
    }

    /// Pin a stat to a fixed value. Only used to set up exact scenarios in tests.
    #[cfg(test)]
    pub fn force(&mut self, stat: Stat, value: f64) {
        self.value.insert(stat, value);
        self.maximum.insert(stat, value);
    }
}

/// floor(0.01 * (2b + iv + floor(ev / 4)) * level) + level + 10
pub fn health_stat(level: u32, base: u32, iv: u32, ev: u32) -> f64 {
    scaled(level, base, iv, ev) + level as f64 + 10.0
}

/// (floor(0.01 * (2b + iv + floor(ev / 4)) * level) + 5) * nature
pub fn normal_stat(level: u32, base: u32, iv: u32, ev: u32, nature: f64) -> f64 {
    (scaled(level, base, iv, ev) + 5.0) * nature
}

// Integer division keeps the floors exact.
fn scaled(level: u32, base: u32, iv: u32, ev: u32) -> f64 {
    ((2 * base + iv + ev / 4) * level / 100) as f64
}

pub fn nature_modifier(nature: Nature, stat: Stat) -> f64 {
    if nature.increased() == Some(stat) {
        1.10
    } else if nature.decreased() == Some(stat) {
        0.90
    } else {
        1.0
    }
}
