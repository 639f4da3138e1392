//! Terminal front end: pick a starter, then battle the catalog opponents.

use pokemon_confrontation::battle::{Battle, Side, TurnRng};
use pokemon_confrontation::config::{Configuration, DEFAULT_CONFIG_PATH};
use pokemon_confrontation::content::{opponents, pokemon::STARTERS};
use pokemon_confrontation::errors::GameResult;
use pokemon_confrontation::experience::add_experience;
use pokemon_confrontation::trainer::{decider, Decider, PlayerDecider, RandomDecider, Team, Trainer};
use pokemon_confrontation::{content, BattleEvent, BattleOutcome, Pokemon, Progression};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;
use std::mem;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Commands:
  help     show this list
  battle   challenge an opponent
  team     list your pokemon
  heal     restore your pokemon to full health
  level    give one of your pokemon a level
  inspect  look closely at one of your pokemon
  save     save your progress
  reset    start over with a new trainer
  exit     save and quit";

const BATTLE_HELP: &str = "\
Each round you pick one action:
  move     use one of your acting pokemon's moves
  swap     send in another pokemon
  retreat  leave the battle
  inspect  look at both acting pokemon
  help     show this list";

fn main() -> ExitCode {
    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let configuration = match Configuration::load(&path) {
        Ok(configuration) => configuration,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&configuration.log_filter);

    match run(configuration) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "game stopped");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(configuration: Configuration) -> GameResult<()> {
    let mut rng = match configuration.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let progression = match Progression::load(&configuration.save_file_path)? {
        Some(mut progression) => {
            progression.profile.set_decider(Box::new(PlayerDecider::new()));
            println!("Welcome back, {}!", progression.profile.name);
            progression
        }
        None => {
            let Some(profile) = introduction(&mut rng) else {
                return Ok(());
            };
            Progression::new(profile)
        }
    };
    let mut game = Game {
        configuration,
        rng,
        progression,
    };
    game.save()?;

    println!("{HELP}");
    let mut input = PlayerDecider::new();
    loop {
        print!("What would you like to do? ");
        let Some(command) = input.read_line() else {
            game.save()?;
            return Ok(());
        };

        match command.to_ascii_lowercase().as_str() {
            "help" => println!("{HELP}"),
            "battle" => game.battle()?,
            "team" => game.team(),
            "heal" => game.heal(),
            "level" => game.level(),
            "inspect" => game.inspect(),
            "save" => println!("Your progress has been saved."),
            "reset" => {
                if !game.reset()? {
                    return Ok(());
                }
            }
            "exit" | "quit" => {
                game.save()?;
                println!("Goodbye!");
                return Ok(());
            }
            "" => continue,
            other => println!("Unknown command `{other}`. Type help for the list of commands."),
        }
        game.save()?;
    }
}

/// Ask for a name and starters. `None` when the input ran out.
fn introduction(rng: &mut StdRng) -> Option<Trainer> {
    let mut decider = PlayerDecider::new();
    println!("Welcome to Pokemon Confrontation! What is your name?");
    let name = match decider.read_line()? {
        name if name.is_empty() => "Red".to_string(),
        name => name,
    };

    let options: Vec<String> = STARTERS.iter().map(|species| species.to_string()).collect();
    let chosen = loop {
        let chosen = decider.choose_many("Which pokemon will you start with?", &options);
        if decider.is_closed() {
            return None;
        }
        let names: Vec<&str> = chosen.iter().map(|&index| STARTERS[index]).collect();
        if names.is_empty() {
            println!("You need at least one pokemon to begin.");
            continue;
        }
        if decider.confirm(&format!("You chose {}. Is that right?", names.join(", "))) {
            break names;
        }
        if decider.is_closed() {
            return None;
        }
    };

    let pokemon: Vec<Pokemon> = chosen
        .into_iter()
        .filter_map(|species| content::pokemon::create(species, 5, &mut *rng))
        .collect();
    info!(trainer = %name, starters = pokemon.len(), "new trainer");
    println!("Good luck on your journey, {name}!");
    Some(Trainer::new(&name, Box::new(decider), pokemon))
}

fn print_events(events: &[BattleEvent]) {
    for event in events {
        println!("{event}");
    }
}

fn describe(pokemon: &Pokemon) -> String {
    let types: Vec<String> = pokemon.types.iter().map(ToString::to_string).collect();
    let mut lines = vec![
        format!("{} - Level {} ({})", pokemon.name, pokemon.level(), types.join("/")),
        format!("Nature: {}", pokemon.nature),
        format!("Health: {:.1}/{:.1}", pokemon.health(), pokemon.max_health()),
    ];
    for (stat, value) in pokemon.statistics.values() {
        lines.push(format!("  {stat}: {:.1}", pokemon.stages.effective(*stat, *value)));
    }
    for known in &pokemon.moves {
        lines.push(format!("  {known} ({}) - {}", known.pp, known.description));
    }
    lines.join("\n")
}

struct Game {
    configuration: Configuration,
    rng: StdRng,
    progression: Progression,
}

impl Game {
    fn save(&self) -> GameResult<()> {
        self.progression.save(&self.configuration.save_file_path)?;
        Ok(())
    }

    fn profile(&self) -> &Trainer {
        &self.progression.profile
    }

    fn profile_mut(&mut self) -> &mut Trainer {
        &mut self.progression.profile
    }

    fn decider(&mut self) -> &mut dyn Decider {
        self.profile_mut().decider_mut()
    }

    fn team(&self) {
        for (index, pokemon) in self.profile().pokemon.iter().enumerate() {
            let state = if pokemon.whiteout() { " (whited out)" } else { "" };
            println!(
                "{}. {} - Level {} - {:.1}/{:.1} health{state}",
                index + 1,
                pokemon.name,
                pokemon.level(),
                pokemon.health(),
                pokemon.max_health()
            );
        }
    }

    fn heal(&mut self) {
        let options: Vec<String> = self.profile().pokemon.iter().map(ToString::to_string).collect();
        let chosen = self.decider().choose_many("Which pokemon do you want to heal?", &options);
        for index in chosen {
            let Some(restored) = self.profile_mut().full_heal(index) else {
                continue;
            };
            let pokemon = &self.profile().pokemon[index];
            if restored > 0.0 {
                println!("{}'s health has been restored to {:.1}!", pokemon.name, pokemon.health());
            } else {
                println!("{}'s health was already at its maximum.", pokemon.name);
            }
        }
    }

    fn level(&mut self) {
        let options: Vec<String> = self.profile().pokemon.iter().map(ToString::to_string).collect();
        let Some(index) = self.decider().choose_one("Which pokemon should gain a level?", &options) else {
            return;
        };
        let amount = self.profile().pokemon[index].experience.experience_to_next_level();
        print_events(&add_experience(self.profile_mut(), index, amount));
    }

    fn inspect(&mut self) {
        let options: Vec<String> = self.profile().pokemon.iter().map(ToString::to_string).collect();
        if let Some(index) = self.decider().choose_one("Which pokemon do you want to inspect?", &options) {
            println!("{}", describe(&self.profile().pokemon[index]));
        }
    }

    /// Start over. Returns false when the input ran out before a new trainer was made.
    fn reset(&mut self) -> GameResult<bool> {
        if !self.decider().confirm("This deletes your progress. Are you sure?") {
            return Ok(true);
        }
        Progression::remove(&self.configuration.save_file_path)?;
        match introduction(&mut self.rng) {
            Some(profile) => {
                self.progression = Progression::new(profile);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn battle(&mut self) -> GameResult<()> {
        if self.profile().all_whited_out() {
            println!("All of your pokemon have whited out. Heal them before battling.");
            return Ok(());
        }
        if !self.decider().confirm("Are you ready to battle?") {
            return Ok(());
        }

        let mut challengers = opponents::opponents(&mut self.rng);
        let Some(index) = self.decider().choose_one(
            "Who do you want to challenge?",
            &challengers.iter().map(ToString::to_string).collect::<Vec<_>>(),
        ) else {
            return Ok(());
        };
        let mut opponent = challengers.swap_remove(index);

        let names: Vec<String> = opponent.pokemon.iter().map(ToString::to_string).collect();
        let opponent_actor = opponent
            .decider_mut()
            .choose_one("Choose your first pokemon.", &names)
            .unwrap_or(0);

        let standing: Vec<usize> = (0..self.profile().pokemon.len())
            .filter(|&index| !self.profile().pokemon[index].whiteout())
            .collect();
        let labels: Vec<String> = self.profile().pokemon.iter().map(ToString::to_string).collect();
        let Some(&player_actor) = decider::choose(
            self.decider(),
            "Which pokemon will you send out first?",
            &standing,
            |&index| labels[index].clone(),
        ) else {
            return Ok(());
        };

        let placeholder = Trainer::new("", Box::new(RandomDecider::seeded(0)), Vec::new());
        let profile = mem::replace(&mut self.progression.profile, placeholder);
        let player = Team::from_roster(Side::Player, profile, player_actor)?;
        let opponent = Team::from_roster(Side::Opponent, opponent, opponent_actor)?;
        let mut battle = Battle::new(player, opponent)?.with_rng(TurnRng::seeded(self.rng.random()));

        println!(
            "{} sends out {}!",
            battle.team(Side::Opponent).owner().name,
            battle.team(Side::Opponent).actor()
        );
        battle.begin()?;

        loop {
            let player_turn = match battle.check_turn(Side::Player) {
                Some(turn) => turn,
                None => {
                    let options = ["move", "swap", "retreat", "inspect", "help"].map(String::from);
                    let choice = battle
                        .decider_mut(Side::Player)
                        .choose_one("What will you do?", &options);
                    match choice {
                        Some(0) => battle.choose_turn(Side::Player)?,
                        Some(1) => battle.swap_turn(Side::Player),
                        Some(2) => battle.retreat_turn(Side::Player),
                        Some(3) => {
                            println!("{}\n", describe(battle.team(Side::Player).actor()));
                            println!("{}", describe(battle.team(Side::Opponent).actor()));
                            continue;
                        }
                        Some(_) => {
                            println!("{BATTLE_HELP}");
                            continue;
                        }
                        None => {
                            battle.end(BattleOutcome::Retreated {
                                side: Side::Player,
                            })?;
                            break;
                        }
                    }
                }
            };
            let opponent_turn = battle.choose_turn(Side::Opponent)?;

            let outcome = battle.execute(player_turn, opponent_turn)?;
            print_events(&battle.take_events());

            if let Some(outcome) = outcome {
                battle.end(outcome)?;
                break;
            }
        }

        if let Some(message) = battle.outcome_message() {
            println!("{message}");
        }
        let (profile, _) = battle.into_trainers();
        self.progression.profile = profile;
        Ok(())
    }
}
