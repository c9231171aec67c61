//! Player roster entries.

use serde::{Deserialize, Serialize};

/// Position-based id, assigned once at setup starting from 1
pub type PlayerId = u32;

/// A participant and their running totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    /// Sum of per-round distances in days
    score: f64,
    wins: u32,
}

impl Player {
    pub(crate) fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            score: 0.0,
            wins: 0,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// Fold one finished round into the totals
    pub(crate) fn record_round(&mut self, diff: f64, won: bool) {
        self.score += diff;
        if won {
            self.wins += 1;
        }
    }
}
