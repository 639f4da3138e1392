use super::{DamageModifier, MoveCheck, MoveCleanup, MoveEffect, PokemonMove, Stage};
use crate::pokemon::PowerPoint;
use schema::{ElementalType, MoveCategory};
use std::mem;

/// Builds a [`PokemonMove`] one stage at a time.
///
/// # Example
/// ```
/// use pokemon_confrontation::moves::PokemonMove;
/// use schema::{ElementalType, MoveCategory};
///
/// let scratch = PokemonMove::create("Scratch", "", ElementalType::Normal, MoveCategory::Physical)
///     .with_power_point(35)
///     .with_accuracy(100)
///     .with_power(40)
///     .stage()
///         .with_hit_effects()
///         .with_hit_cleanups()
///         .add(1)
///     .build();
///
/// assert_eq!(scratch.stages.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PokemonMoveBuilder {
    instance: PokemonMove,
}

impl PokemonMoveBuilder {
    pub(super) fn new(
        name: &str,
        description: &str,
        element: ElementalType,
        category: MoveCategory,
    ) -> Self {
        Self {
            instance: PokemonMove {
                name: name.to_string(),
                description: description.to_string(),
                element,
                category,
                power: None,
                accuracy: None,
                pp: PowerPoint::new(10),
                priority: None,
                stages: Vec::new(),
            },
        }
    }

    pub fn with_power_point(mut self, maximum: u32) -> Self {
        self.instance.pp = PowerPoint::new(maximum);
        self
    }

    pub fn with_power(mut self, power: u32) -> Self {
        self.instance.power = Some(power);
        self
    }

    pub fn with_accuracy(mut self, accuracy: u32) -> Self {
        self.instance.accuracy = Some(accuracy);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.instance.priority = Some(priority);
        self
    }

    pub fn add_stage(mut self, stage: Stage) -> Self {
        self.instance.stages.push(stage);
        self
    }

    /// Start a stage with the standard checks, cleanups and damage modifiers.
    pub fn stage(self) -> StageBuilder {
        StageBuilder::new(self)
    }

    pub fn build(self) -> PokemonMove {
        self.instance
    }
}

/// Builds one [`Stage`] and hands control back to the move builder with [`StageBuilder::add`].
#[derive(Debug, Clone)]
pub struct StageBuilder {
    parent: PokemonMoveBuilder,
    instance: Stage,
}

impl StageBuilder {
    fn new(parent: PokemonMoveBuilder) -> Self {
        Self {
            parent,
            instance: Stage {
                checks: vec![
                    MoveCheck::Flinch,
                    MoveCheck::Frozen,
                    MoveCheck::Evasion,
                    MoveCheck::Accuracy,
                    MoveCheck::PowerPoint,
                ],
                effects: Vec::new(),
                cleanups: vec![MoveCleanup::PowerPoint],
                modifiers: vec![
                    DamageModifier::Crit { high: false },
                    DamageModifier::Stab,
                    DamageModifier::Effectiveness,
                    DamageModifier::Random,
                ],
            },
        }
    }

    pub fn with_checks(mut self, checks: Vec<MoveCheck>) -> Self {
        self.instance.checks = checks;
        self
    }

    pub fn with_effects(mut self, effects: Vec<MoveEffect>) -> Self {
        self.instance.effects = effects;
        self
    }

    pub fn add_effect(mut self, effect: MoveEffect) -> Self {
        self.instance.effects.push(effect);
        self
    }

    pub fn with_hit_effects(self) -> Self {
        self.with_effects(vec![MoveEffect::Hit])
    }

    pub fn with_cleanups(mut self, cleanups: Vec<MoveCleanup>) -> Self {
        self.instance.cleanups = cleanups;
        self
    }

    pub fn with_hit_cleanups(self) -> Self {
        self.with_cleanups(vec![MoveCleanup::Kill, MoveCleanup::PowerPoint])
    }

    pub fn with_damage_modifiers(mut self, modifiers: Vec<DamageModifier>) -> Self {
        self.instance.modifiers = modifiers;
        self
    }

    /// Swap the modifier of the same kind for `replacement`, keeping its position.
    /// Appends it if no modifier of that kind is present.
    pub fn replace_modifier(mut self, replacement: DamageModifier) -> Self {
        let existing = self
            .instance
            .modifiers
            .iter_mut()
            .find(|modifier| mem::discriminant(&**modifier) == mem::discriminant(&replacement));

        match existing {
            Some(modifier) => *modifier = replacement,
            None => self.instance.modifiers.push(replacement),
        }
        self
    }

    /// Append `amount` copies of this stage to the move (at least one).
    pub fn add(self, amount: usize) -> PokemonMoveBuilder {
        let mut parent = self.parent;
        for _ in 0..amount.max(1) {
            parent = parent.add_stage(self.instance.clone());
        }
        parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn builder() -> PokemonMoveBuilder {
        PokemonMove::create("Test", "A move.", ElementalType::Fire, MoveCategory::Special)
    }

    #[test]
    fn test_stage_defaults() {
        let pokemon_move = builder().stage().add(1).build();
        let stage = &pokemon_move.stages[0];

        assert_eq!(
            stage.checks,
            vec![
                MoveCheck::Flinch,
                MoveCheck::Frozen,
                MoveCheck::Evasion,
                MoveCheck::Accuracy,
                MoveCheck::PowerPoint,
            ]
        );
        assert_eq!(stage.cleanups, vec![MoveCleanup::PowerPoint]);
        assert!(stage.effects.is_empty());
        assert_eq!(stage.modifiers.len(), 4);
    }

    #[test]
    fn test_replace_modifier_keeps_position() {
        let pokemon_move = builder()
            .stage()
            .replace_modifier(DamageModifier::Crit { high: true })
            .add(1)
            .build();

        assert_eq!(
            pokemon_move.stages[0].modifiers,
            vec![
                DamageModifier::Crit { high: true },
                DamageModifier::Stab,
                DamageModifier::Effectiveness,
                DamageModifier::Random,
            ]
        );
    }

    #[test]
    fn test_add_repeats_stages_in_order() {
        let pokemon_move = builder()
            .with_power(35)
            .stage()
            .with_hit_effects()
            .with_cleanups(vec![MoveCleanup::Kill])
            .add(3)
            .stage()
            .with_hit_effects()
            .with_hit_cleanups()
            .add(0)
            .build();

        assert_eq!(pokemon_move.stages.len(), 4);
        assert!(pokemon_move.stages[..3]
            .iter()
            .all(|stage| stage.cleanups == vec![MoveCleanup::Kill]));
        assert_eq!(
            pokemon_move.stages[3].cleanups,
            vec![MoveCleanup::Kill, MoveCleanup::PowerPoint]
        );
    }

    #[test]
    fn test_move_defaults() {
        let pokemon_move = builder().with_priority(2).build();

        assert_eq!(pokemon_move.pp, PowerPoint::new(10));
        assert_eq!(pokemon_move.priority, Some(2));
        assert_eq!(pokemon_move.accuracy, None);
        assert!(pokemon_move.stages.is_empty());
    }
}
