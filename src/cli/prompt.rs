//! Line-based prompts on the terminal.

use console::{style, Term};
use photo_date_game::core::game::{
    parse_answer, parse_player_count, parse_player_name, GuessSource, Player,
};
use photo_date_game::core::timestamp::TIMESTAMP_HINT;
use photo_date_game::error::{DateFormatError, SessionError};
use std::io::{self, BufRead, ErrorKind};

/// Asks questions on stdout and reads answers from stdin.
///
/// Answers are read straight from stdin rather than through `Term` so a
/// game can also be driven from a pipe.
pub struct Prompter {
    term: Term,
}

impl Prompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    /// Print `question` and return the typed line without its line ending
    pub fn ask(&self, question: &str) -> Result<String, SessionError> {
        self.term.write_str(question)?;
        self.term.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed").into());
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask a yes/no question until the answer is understood
    pub fn confirm(&self, question: &str, default: bool) -> Result<bool, SessionError> {
        loop {
            match parse_answer(&self.ask(question)?, default) {
                Ok(answer) => return Ok(answer),
                Err(e) => self.warn(&e.to_string()),
            }
        }
    }

    pub fn player_count(&self) -> Result<usize, SessionError> {
        loop {
            match parse_player_count(&self.ask("Number of players: ")?) {
                Ok(count) => return Ok(count),
                Err(e) => self.warn(&e.to_string()),
            }
        }
    }

    pub fn player_names(&self, count: usize) -> Result<Vec<String>, SessionError> {
        (1..=count)
            .map(|id| {
                let raw = self.ask(&format!("Player {}/{}: ", id, count))?;
                Ok(parse_player_name(&raw, id as u32))
            })
            .collect()
    }

    pub fn warn(&self, message: &str) {
        self.term
            .write_line(&style(message).yellow().to_string())
            .ok();
    }
}

impl GuessSource for Prompter {
    fn next_guess(&mut self, _round: u32, player: &Player) -> Result<String, SessionError> {
        self.ask(&format!("{}'s guess: ", style(player.name()).bold()))
    }

    fn rejected(&mut self, _player: &Player, _error: &DateFormatError) {
        self.warn(&format!(
            "Incorrect date format! It must be '{}'. Try again:",
            TIMESTAMP_HINT
        ));
    }
}
