//! Trainers own companions; teams are a trainer's side of one battle.

pub mod decider;

pub use decider::{Decider, PlayerDecider, RandomDecider, ScriptedDecider};

use crate::battle::turns::Side;
use crate::errors::{BattleError, BattleResult};
use crate::pokemon::Pokemon;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

fn default_decider() -> Box<dyn Decider> {
    Box::new(RandomDecider::new())
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Trainer {
    pub name: String,
    pub pokemon: Vec<Pokemon>,
    #[serde(skip, default = "default_decider")]
    decider: Box<dyn Decider>,
}

impl Trainer {
    pub fn new(name: &str, decider: Box<dyn Decider>, pokemon: Vec<Pokemon>) -> Self {
        Self {
            name: name.to_string(),
            pokemon,
            decider,
        }
    }

    pub fn decider_mut(&mut self) -> &mut dyn Decider {
        self.decider.as_mut()
    }

    pub fn set_decider(&mut self, decider: Box<dyn Decider>) {
        self.decider = decider;
    }

    /// A companion alongside the decider, for choices made about that companion.
    pub fn companion_and_decider(&mut self, index: usize) -> Option<(&mut Pokemon, &mut dyn Decider)> {
        let pokemon = self.pokemon.get_mut(index)?;
        Some((pokemon, self.decider.as_mut()))
    }

    pub fn add_pokemon(&mut self, pokemon: Pokemon) {
        self.pokemon.push(pokemon);
    }

    pub fn remove_pokemon(&mut self, index: usize) -> Option<Pokemon> {
        (index < self.pokemon.len()).then(|| self.pokemon.remove(index))
    }

    /// Put `pokemon` in the roster slot at `index`, returning the companion it replaced.
    pub fn replace_pokemon(&mut self, index: usize, pokemon: Pokemon) -> Option<Pokemon> {
        self.pokemon
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, pokemon))
    }

    /// Clear battle state from every companion.
    pub fn reset(&mut self) {
        self.pokemon.iter_mut().for_each(Pokemon::reset);
    }

    pub fn average_level(&self) -> u32 {
        if self.pokemon.is_empty() {
            return 0;
        }
        let total: u32 = self.pokemon.iter().map(Pokemon::level).sum();
        total / self.pokemon.len() as u32
    }

    pub fn all_whited_out(&self) -> bool {
        self.pokemon.iter().all(Pokemon::whiteout)
    }

    /// Fully heal the whole roster. Returns the total health restored.
    pub fn heal_all(&mut self) -> f64 {
        self.pokemon.iter_mut().map(Pokemon::full_heal).sum()
    }

    pub fn full_heal(&mut self, index: usize) -> Option<f64> {
        self.pokemon.get_mut(index).map(Pokemon::full_heal)
    }
}

impl fmt::Display for Trainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - Level {}", self.name, self.average_level())
    }
}

/// A trainer's side of a battle: the members taking part and the one currently acting.
///
/// Members and the actor are indices into the owner's roster.
#[derive(Debug)]
pub struct Team {
    side: Side,
    owner: Trainer,
    members: Vec<usize>,
    actor: usize,
}

impl Team {
    pub fn new(side: Side, owner: Trainer, members: Vec<usize>, actor: usize) -> BattleResult<Self> {
        if let Some(&invalid) = members.iter().find(|&&index| index >= owner.pokemon.len()) {
            return Err(BattleError::InvalidCompanionIndex(invalid));
        }
        if !members.contains(&actor) {
            return Err(BattleError::InvalidCompanionIndex(actor));
        }
        Ok(Self {
            side,
            owner,
            members,
            actor,
        })
    }

    /// Every companion in the trainer's roster takes part.
    pub fn from_roster(side: Side, owner: Trainer, actor: usize) -> BattleResult<Self> {
        let members = (0..owner.pokemon.len()).collect();
        Self::new(side, owner, members, actor)
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn owner(&self) -> &Trainer {
        &self.owner
    }

    pub(crate) fn owner_mut(&mut self) -> &mut Trainer {
        &mut self.owner
    }

    pub fn into_owner(self) -> Trainer {
        self.owner
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn actor_index(&self) -> usize {
        self.actor
    }

    pub fn actor(&self) -> &Pokemon {
        &self.owner.pokemon[self.actor]
    }

    pub fn actor_mut(&mut self) -> &mut Pokemon {
        &mut self.owner.pokemon[self.actor]
    }

    pub fn is_defeated(&self) -> bool {
        self.members
            .iter()
            .all(|&index| self.owner.pokemon[index].whiteout())
    }

    /// Members that have not whited out.
    pub fn available(&self) -> Vec<usize> {
        self.members
            .iter()
            .copied()
            .filter(|&index| !self.owner.pokemon[index].whiteout())
            .collect()
    }

    /// Ask the owner to replace a fainted actor. `None` when no member can stand in.
    pub fn replace_actor(&mut self) -> Option<usize> {
        let candidates: Vec<usize> = self
            .available()
            .into_iter()
            .filter(|&index| index != self.actor)
            .collect();
        let replacement = self.choose_member(
            "Your actor has fainted! Please choose a replacement.",
            &candidates,
        )?;
        self.actor = replacement;
        Some(replacement)
    }

    /// Ask the owner to pick one of `candidates`, which are roster indices.
    pub fn choose_member(&mut self, prompt: &str, candidates: &[usize]) -> Option<usize> {
        let Trainer {
            pokemon, decider, ..
        } = &mut self.owner;
        decider::choose(decider.as_mut(), prompt, candidates, |&index| {
            pokemon[index].to_string()
        })
        .copied()
    }

    pub fn set_actor(&mut self, index: usize) -> BattleResult<()> {
        if !self.members.contains(&index) {
            return Err(BattleError::InvalidCompanionIndex(index));
        }
        debug!(side = %self.side, actor = %self.owner.pokemon[index], "actor set");
        self.actor = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatMap;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use schema::{ElementalType, Nature, Stat};

    fn pokemon(name: &str, level: u32) -> Pokemon {
        let mut rng = StdRng::seed_from_u64(8);
        Pokemon::create(name, Nature::Docile, &[ElementalType::Fire])
            .with_experience(level, 62)
            .with_statistics(StatMap::from([(Stat::Health, 39)]), StatMap::new())
            .build(&mut rng)
    }

    fn trainer(decider: ScriptedDecider) -> Trainer {
        Trainer::new(
            "Hassel",
            Box::new(decider),
            vec![pokemon("Charmander", 8), pokemon("Charmeleon", 20), pokemon("Vulpix", 14)],
        )
    }

    fn faint(team: &mut Team, index: usize) {
        let health = team.owner.pokemon[index].health();
        team.owner.pokemon[index].damage(health + 3.0);
    }

    #[test]
    fn test_trainer_display_uses_average_level() {
        assert_eq!(trainer(ScriptedDecider::default()).to_string(), "Hassel - Level 14");
    }

    #[test]
    fn test_team_rejects_an_actor_outside_its_members() {
        let result = Team::new(Side::Player, trainer(ScriptedDecider::default()), vec![0, 1], 2);
        assert_eq!(result.err(), Some(BattleError::InvalidCompanionIndex(2)));

        let result = Team::new(Side::Player, trainer(ScriptedDecider::default()), vec![0, 5], 0);
        assert_eq!(result.err(), Some(BattleError::InvalidCompanionIndex(5)));
    }

    #[test]
    fn test_whiteout_and_defeat() {
        let mut team = Team::from_roster(Side::Opponent, trainer(ScriptedDecider::default()), 0)
            .expect("valid team");
        let health = team.actor().health();
        team.actor_mut().damage(health - 5.0);
        assert!(!team.actor().whiteout());

        team.actor_mut().damage(8.0);
        assert!(team.actor().whiteout());
        assert!(!team.is_defeated());

        faint(&mut team, 1);
        faint(&mut team, 2);
        assert!(team.is_defeated());
        assert!(team.available().is_empty());
    }

    #[test]
    fn test_replace_actor_offers_only_standing_members() {
        let decider = ScriptedDecider::default().with_choices(vec![0]);
        let mut team = Team::from_roster(Side::Player, trainer(decider), 0).expect("valid team");
        faint(&mut team, 0);
        faint(&mut team, 1);

        assert_eq!(team.replace_actor(), Some(2));
        assert_eq!(team.actor().name, "Vulpix");

        faint(&mut team, 2);
        assert_eq!(team.replace_actor(), None);
        assert_eq!(team.actor_index(), 2);
    }

    #[test]
    fn test_full_heal_reports_restored_health() {
        let mut trainer = trainer(ScriptedDecider::default());
        trainer.pokemon[1].damage(10.0);

        assert_eq!(trainer.full_heal(1), Some(10.0));
        assert_eq!(trainer.full_heal(1), Some(0.0));
        assert_eq!(trainer.full_heal(7), None);
        assert!(!trainer.all_whited_out());
    }

    #[test]
    fn test_roster_edits() {
        let mut trainer = trainer(ScriptedDecider::default());
        let replaced = trainer.replace_pokemon(0, pokemon("Growlithe", 9));
        assert_eq!(replaced.map(|p| p.name), Some("Charmander".to_string()));

        let removed = trainer.remove_pokemon(2);
        assert_eq!(removed.map(|p| p.name), Some("Vulpix".to_string()));
        assert_eq!(trainer.remove_pokemon(2), None);

        trainer.add_pokemon(pokemon("Ponyta", 11));
        let names: Vec<&str> = trainer.pokemon.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Growlithe", "Charmeleon", "Ponyta"]);
    }
}
