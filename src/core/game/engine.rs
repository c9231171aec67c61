//! The round state machine.

use super::input::GuessSource;
use super::player::{Player, PlayerId};
use super::round::{PlayerGuess, RoundResult};
use super::viewer::ImageViewer;
use crate::core::corpus::CorpusPool;
use crate::core::timestamp::{validate_guess, Timestamp};
use crate::error::{SessionError, SetupError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Players are set up, no round played yet
    Setup,
    /// Guesses are being collected
    RoundInProgress,
    /// The last round has been scored
    RoundComplete,
    /// No further rounds can be played
    Ended,
}

/// Owns the roster and drives rounds over a corpus
pub struct GameEngine {
    pool: CorpusPool,
    players: Vec<Player>,
    rng: StdRng,
    phase: GamePhase,
    rounds_played: u32,
}

impl GameEngine {
    /// Start a session with one player per name.
    ///
    /// Fails if the pool is empty or no names are given; the pool is
    /// guaranteed non-empty for the engine's whole life.
    pub fn new(pool: CorpusPool, names: Vec<String>) -> Result<Self, SetupError> {
        Self::with_rng(pool, names, StdRng::from_entropy())
    }

    /// Like [`GameEngine::new`] but with reproducible image picks
    pub fn with_seed(pool: CorpusPool, names: Vec<String>, seed: u64) -> Result<Self, SetupError> {
        Self::with_rng(pool, names, StdRng::seed_from_u64(seed))
    }

    fn with_rng(pool: CorpusPool, names: Vec<String>, rng: StdRng) -> Result<Self, SetupError> {
        if pool.is_empty() {
            return Err(SetupError::EmptyPool);
        }
        if names.is_empty() {
            return Err(SetupError::InvalidPlayerCount {
                raw: "0".to_string(),
            });
        }

        let players = names
            .into_iter()
            .zip(1..)
            .map(|(name, id)| Player::new(id, name))
            .collect();

        Ok(Self {
            pool,
            players,
            rng,
            phase: GamePhase::Setup,
            rounds_played: 0,
        })
    }

    /// Play one round: show a random image, collect a valid guess from every
    /// player, then score it.
    ///
    /// Invalid guesses are handed back to `guesses` via
    /// [`GuessSource::rejected`] and the same player is asked again. If the
    /// source itself fails, the round is abandoned and nothing is scored.
    pub fn play_round(
        &mut self,
        viewer: &mut dyn ImageViewer,
        guesses: &mut dyn GuessSource,
    ) -> Result<RoundResult, SessionError> {
        if self.phase == GamePhase::Ended {
            return Err(SessionError::Ended);
        }

        // Sampling with replacement: the pool is never drained
        let image = self
            .pool
            .choose(&mut self.rng)
            .cloned()
            .ok_or(SetupError::EmptyPool)?;

        let previous = self.phase;
        self.phase = GamePhase::RoundInProgress;
        let round = self.rounds_played + 1;
        debug!(round, path = %image.path().display(), "image drawn");

        if let Err(e) = viewer.show(&image) {
            warn!(error = %e, "could not display image");
        }

        let truth = image.captured_at();
        let collected: Result<Vec<PlayerGuess>, SessionError> = self
            .players
            .iter()
            .map(|player| collect_guess(round, player, truth, &mut *guesses))
            .collect();

        let collected = match collected {
            Ok(collected) => collected,
            Err(e) => {
                self.phase = previous;
                return Err(e);
            }
        };

        let result = RoundResult::new(round, image, collected);
        for (player, guess) in self.players.iter_mut().zip(result.guesses()) {
            player.record_round(guess.diff, result.is_winner(player.id()));
        }

        self.rounds_played = round;
        self.phase = GamePhase::RoundComplete;
        info!(round, winners = ?result.winners(), "round scored");

        Ok(result)
    }

    /// Close the session and return the final standings
    pub fn end(&mut self) -> &[Player] {
        self.phase = GamePhase::Ended;
        &self.players
    }

    /// Current scores and wins, in roster order
    pub fn standings(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }
}

/// Ask one player until a guess parses
fn collect_guess(
    round: u32,
    player: &Player,
    truth: Timestamp,
    guesses: &mut dyn GuessSource,
) -> Result<PlayerGuess, SessionError> {
    loop {
        let raw = guesses.next_guess(round, player)?;
        match validate_guess(&raw) {
            Ok(guess) => {
                return Ok(PlayerGuess {
                    player_id: player.id(),
                    diff: truth.days_between(&guess),
                    raw,
                    guess,
                })
            }
            Err(e) => {
                debug!(player = player.id(), error = %e, "guess rejected");
                guesses.rejected(player, &e);
            }
        }
    }
}
