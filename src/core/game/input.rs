//! Validators for what players type, and the guess source seam.
//!
//! Each prompt of a session has a pure function that turns the raw line into
//! a value or a named error. The loop that reads lines and re-asks lives
//! with the UI.

use super::player::{Player, PlayerId};
use crate::error::{DateFormatError, PromptError, SessionError, SetupError};
use std::collections::VecDeque;

/// Where the engine gets guesses from.
///
/// `next_guess` may block for as long as it likes; there is no timeout.
pub trait GuessSource {
    /// Produce the next raw guess for `player` in `round`
    fn next_guess(&mut self, round: u32, player: &Player) -> Result<String, SessionError>;

    /// Called when a guess did not parse, before the same player is asked again
    fn rejected(&mut self, _player: &Player, _error: &DateFormatError) {}
}

/// Parse the number of players, which must be at least one
pub fn parse_player_count(raw: &str) -> Result<usize, SetupError> {
    match raw.trim().parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(SetupError::InvalidPlayerCount {
            raw: raw.to_string(),
        }),
    }
}

/// Clean up a player name, falling back to "Player N" when blank
pub fn parse_player_name(raw: &str, id: PlayerId) -> String {
    let name = raw.trim();
    if name.is_empty() {
        format!("Player {}", id)
    } else {
        name.to_string()
    }
}

/// Interpret a yes/no answer; an empty answer takes `default`
pub fn parse_answer(raw: &str, default: bool) -> Result<bool, PromptError> {
    match raw.trim().to_lowercase().as_str() {
        "" => Ok(default),
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(PromptError::Unrecognized {
            raw: raw.to_string(),
        }),
    }
}

/// Replays a fixed list of guesses, for tests and scripted games
#[derive(Debug, Default)]
pub struct ScriptedGuesses {
    queue: VecDeque<String>,
    rejected: Vec<(PlayerId, String)>,
}

impl ScriptedGuesses {
    pub fn new<I, S>(guesses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: guesses.into_iter().map(Into::into).collect(),
            rejected: Vec::new(),
        }
    }

    /// Queue more guesses behind the remaining ones
    pub fn push(&mut self, guess: impl Into<String>) {
        self.queue.push_back(guess.into());
    }

    /// Rejected guesses so far, with the player who typed them
    pub fn rejected_guesses(&self) -> &[(PlayerId, String)] {
        &self.rejected
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl GuessSource for ScriptedGuesses {
    fn next_guess(&mut self, _round: u32, _player: &Player) -> Result<String, SessionError> {
        self.queue.pop_front().ok_or_else(|| {
            SessionError::Input(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "no scripted guesses left",
            ))
        })
    }

    fn rejected(&mut self, player: &Player, error: &DateFormatError) {
        self.rejected.push((player.id(), error.input.clone()));
    }
}
