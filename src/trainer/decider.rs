//! Decision sources: whatever resolves a choice for a trainer.

use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, Write};
use tracing::{trace, warn};

/// Resolves choices for a trainer. Every answer is an index into the supplied options.
pub trait Decider: fmt::Debug {
    /// Pick one option. `None` only when there was nothing to pick from or no answer came.
    fn choose_one(&mut self, prompt: &str, options: &[String]) -> Option<usize>;

    /// Pick any number of options, in ascending order without repeats.
    fn choose_many(&mut self, prompt: &str, options: &[String]) -> Vec<usize>;

    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Pick one of `items` through `decider`, labelling each with `label`.
pub fn choose<'a, T>(
    decider: &mut dyn Decider,
    prompt: &str,
    items: &'a [T],
    label: impl Fn(&T) -> String,
) -> Option<&'a T> {
    let options: Vec<String> = items.iter().map(label).collect();
    decider
        .choose_one(prompt, &options)
        .and_then(|index| items.get(index))
}

/// Answers uniformly at random.
#[derive(Debug, Clone)]
pub struct RandomDecider {
    rng: StdRng,
}

impl RandomDecider {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomDecider {
    fn default() -> Self {
        Self::new()
    }
}

impl Decider for RandomDecider {
    fn choose_one(&mut self, prompt: &str, options: &[String]) -> Option<usize> {
        if options.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..options.len());
        trace!(prompt, choice = %options[index], "random decider chose");
        Some(index)
    }

    fn choose_many(&mut self, _prompt: &str, options: &[String]) -> Vec<usize> {
        let amount = self.rng.random_range(0..=options.len());
        let mut chosen = sample(&mut self.rng, options.len(), amount).into_vec();
        chosen.sort_unstable();
        chosen
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        let answer = self.rng.random_bool(0.5);
        trace!(prompt, answer, "random decider confirmed");
        answer
    }
}

/// Replays queued answers. Once a queue runs dry it picks the first option,
/// selects nothing and declines.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecider {
    choices: VecDeque<usize>,
    selections: VecDeque<Vec<usize>>,
    confirmations: VecDeque<bool>,
}

impl ScriptedDecider {
    pub fn with_choices(mut self, choices: Vec<usize>) -> Self {
        self.choices.extend(choices);
        self
    }

    pub fn with_selections(mut self, selections: Vec<Vec<usize>>) -> Self {
        self.selections.extend(selections);
        self
    }

    pub fn with_confirmations(mut self, confirmations: Vec<bool>) -> Self {
        self.confirmations.extend(confirmations);
        self
    }
}

impl Decider for ScriptedDecider {
    fn choose_one(&mut self, prompt: &str, options: &[String]) -> Option<usize> {
        if options.is_empty() {
            return None;
        }
        let choice = self.choices.pop_front().unwrap_or_else(|| {
            warn!(prompt, "scripted choices exhausted");
            0
        });
        Some(choice.min(options.len() - 1))
    }

    fn choose_many(&mut self, prompt: &str, options: &[String]) -> Vec<usize> {
        let mut selection = self.selections.pop_front().unwrap_or_else(|| {
            warn!(prompt, "scripted selections exhausted");
            Vec::new()
        });
        selection.retain(|index| *index < options.len());
        selection.sort_unstable();
        selection.dedup();
        selection
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.confirmations.pop_front().unwrap_or_else(|| {
            warn!(prompt, "scripted confirmations exhausted");
            false
        })
    }
}

/// Asks a person on the terminal, one line per answer.
pub struct PlayerDecider {
    /// `None` reads from standard input.
    input: Option<Box<dyn BufRead>>,
    closed: bool,
}

impl PlayerDecider {
    pub fn new() -> Self {
        Self {
            input: None,
            closed: false,
        }
    }

    pub fn from_reader(input: impl BufRead + 'static) -> Self {
        Self {
            input: Some(Box::new(input)),
            closed: false,
        }
    }

    /// Whether the input has run out.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Read one trimmed line. `None` at end of input.
    pub fn read_line(&mut self) -> Option<String> {
        if let Err(error) = io::stdout().flush() {
            warn!(%error, "could not flush the prompt");
        }
        let mut line = String::new();
        let read = match self.input.as_mut() {
            Some(input) => input.read_line(&mut line),
            None => io::stdin().read_line(&mut line),
        };
        match read {
            Ok(0) => {
                self.closed = true;
                None
            }
            Ok(_) => Some(line.trim().to_string()),
            Err(error) => {
                warn!(%error, "failed to read answer");
                self.closed = true;
                None
            }
        }
    }
}

impl Default for PlayerDecider {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PlayerDecider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerDecider").finish_non_exhaustive()
    }
}

fn print_options(prompt: &str, options: &[String]) {
    println!("{prompt}");
    for (index, option) in options.iter().enumerate() {
        println!("  {}. {option}", index + 1);
    }
}

/// Accepts a 1-based number or an option's name, ignoring case.
pub(crate) fn parse_choice(answer: &str, options: &[String]) -> Option<usize> {
    let answer = answer.trim();
    if let Ok(number) = answer.parse::<usize>() {
        return (1..=options.len()).contains(&number).then(|| number - 1);
    }
    options
        .iter()
        .position(|option| option.eq_ignore_ascii_case(answer))
}

/// Accepts choices separated by commas.
pub(crate) fn parse_choices(answer: &str, options: &[String]) -> Option<Vec<usize>> {
    let mut chosen = answer
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_choice(part, options))
        .collect::<Option<Vec<usize>>>()?;
    chosen.sort_unstable();
    chosen.dedup();
    Some(chosen)
}

impl Decider for PlayerDecider {
    fn choose_one(&mut self, prompt: &str, options: &[String]) -> Option<usize> {
        if options.is_empty() {
            return None;
        }
        print_options(prompt, options);
        loop {
            print!("> ");
            let answer = self.read_line()?;
            match parse_choice(&answer, options) {
                Some(index) => return Some(index),
                None => println!("Please answer with a number from 1 to {}.", options.len()),
            }
        }
    }

    fn choose_many(&mut self, prompt: &str, options: &[String]) -> Vec<usize> {
        print_options(prompt, options);
        println!("Separate several choices with commas.");
        loop {
            print!("> ");
            let Some(answer) = self.read_line() else {
                return Vec::new();
            };
            match parse_choices(&answer, options) {
                Some(chosen) => return chosen,
                None => println!("Please answer with numbers from 1 to {}.", options.len()),
            }
        }
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        println!("{prompt} (y/n)");
        loop {
            print!("> ");
            let Some(answer) = self.read_line() else {
                return false;
            };
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => println!("Please answer yes or no."),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Cursor;

    fn options() -> Vec<String> {
        ["Tackle", "Growl", "Vine Whip"].map(String::from).to_vec()
    }

    #[rstest]
    #[case("1", Some(0))]
    #[case("3", Some(2))]
    #[case("4", None)]
    #[case("0", None)]
    #[case("vine whip", Some(2))]
    #[case("Ember", None)]
    fn test_parse_choice(#[case] answer: &str, #[case] expected: Option<usize>) {
        assert_eq!(parse_choice(answer, &options()), expected);
    }

    #[test]
    fn test_parse_choices() {
        assert_eq!(parse_choices("3, 1,1", &options()), Some(vec![0, 2]));
        assert_eq!(parse_choices("", &options()), Some(vec![]));
        assert_eq!(parse_choices("1, 9", &options()), None);
    }

    #[test]
    fn test_player_decider_retries_until_valid() {
        let mut decider = PlayerDecider::from_reader(Cursor::new("seven\n2\nmaybe\nyes\n"));
        assert_eq!(decider.choose_one("Pick", &options()), Some(1));
        assert!(decider.confirm("Sure?"));
        assert!(!decider.confirm("Again?"));
    }

    #[test]
    fn test_read_line_trims_and_reports_end_of_input() {
        let mut decider = PlayerDecider::from_reader(Cursor::new("  battle \n"));
        assert_eq!(decider.read_line().as_deref(), Some("battle"));
        assert!(!decider.is_closed());
        assert_eq!(decider.read_line(), None);
        assert!(decider.is_closed());
    }

    #[test]
    fn test_scripted_decider_clamps_and_falls_back() {
        let mut decider = ScriptedDecider::default()
            .with_choices(vec![9])
            .with_selections(vec![vec![2, 0, 7, 2]])
            .with_confirmations(vec![true]);

        assert_eq!(decider.choose_one("Pick", &options()), Some(2));
        assert_eq!(decider.choose_one("Pick", &options()), Some(0));
        assert_eq!(decider.choose_one("Pick", &[]), None);
        assert_eq!(decider.choose_many("Pick", &options()), vec![0, 2]);
        assert!(decider.confirm("Sure?"));
        assert!(!decider.confirm("Sure?"));
    }

    #[test]
    fn test_random_decider_stays_in_range() {
        let mut decider = RandomDecider::seeded(11);
        for _ in 0..100 {
            let choice = decider.choose_one("Pick", &options());
            assert!(choice.is_some_and(|index| index < 3));

            let chosen = decider.choose_many("Pick", &options());
            assert!(chosen.windows(2).all(|pair| pair[0] < pair[1]));
            assert!(chosen.iter().all(|index| *index < 3));
        }
    }

    #[test]
    fn test_choose_maps_back_to_items() {
        let mut decider = ScriptedDecider::default().with_choices(vec![1]);
        let levels = [5u32, 16, 36];
        let chosen = choose(&mut decider, "Pick", &levels, |level| format!("Level {level}"));
        assert_eq!(chosen, Some(&16));
    }
}
