//! # Game Module
//!
//! The turn-based guessing game.
//!
//! ## Round Lifecycle
//! `Setup → RoundInProgress → RoundComplete → (RoundInProgress | Ended)`
//!
//! 1. A random image is drawn from the corpus (repeats across rounds are fine)
//! 2. It is shown through an [`ImageViewer`]
//! 3. Every player, in roster order, is asked for a guess until it parses
//! 4. Each player's distance in days is added to their score (lower is better)
//! 5. Everyone sharing the smallest distance wins the round
//!
//! Scores and wins only change once every guess of the round is valid, so an
//! interrupted round leaves no trace.
//!
//! ## Example
//! ```rust,ignore
//! let mut engine = GameEngine::new(pool, vec!["Ada".into(), "Linus".into()])?;
//! let result = engine.play_round(&mut CommandViewer::system_default(), &mut prompts)?;
//! for guess in result.ranking() {
//!     println!("{}: {:.2} days", guess.player_id, guess.diff);
//! }
//! ```

mod engine;
mod input;
mod player;
mod round;
mod viewer;

pub use engine::{GameEngine, GamePhase};
pub use input::{
    parse_answer, parse_player_count, parse_player_name, GuessSource, ScriptedGuesses,
};
pub use player::{Player, PlayerId};
pub use round::{select_winners, PlayerGuess, RoundResult};
pub use viewer::{CommandViewer, ImageViewer, NoopViewer};
