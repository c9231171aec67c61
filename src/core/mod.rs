//! # Core Module
//!
//! The UI-agnostic game engine.
//!
//! ## Modules
//! - `timestamp` - Parses `YYYY:MM:DD HH:MM:SS` and measures distances in days
//! - `metadata` - Reads capture times from EXIF
//! - `scanner` - Builds a corpus of dated images from folders
//! - `corpus` - The image pool games draw from
//! - `cache` - Saves and restores corpora by name
//! - `game` - Players, rounds and scoring

pub mod cache;
pub mod corpus;
pub mod game;
pub mod metadata;
pub mod scanner;
pub mod timestamp;

// Re-export commonly used types
pub use corpus::{CorpusPool, ImageRecord};
pub use game::{GameEngine, Player, RoundResult};
pub use scanner::{BuildConfig, CorpusBuilder};
pub use timestamp::{date_diff, validate_guess, Timestamp};
