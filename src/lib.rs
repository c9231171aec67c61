//! # Photo Date Game
//!
//! Guess when a photo was taken. Players look at a random picture from their
//! own library and try to name its capture date; the closest guess wins.
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation layers:
//! - `core` - Corpus indexing, caching, date arithmetic and the game engine
//! - `events` - Event-driven progress reporting
//! - `error` - User-friendly error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{PhotoGameError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. Log output goes to
/// stderr so it never interleaves with prompts on stdout.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
