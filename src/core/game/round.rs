//! Per-round results and winner selection.

use super::player::PlayerId;
use crate::core::corpus::ImageRecord;
use crate::core::timestamp::Timestamp;
use serde::Serialize;

/// One player's accepted guess for a round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerGuess {
    pub player_id: PlayerId,
    /// Exactly what the player typed
    pub raw: String,
    pub guess: Timestamp,
    /// Distance to the capture time in days
    pub diff: f64,
}

/// Outcome of a finished round
#[derive(Debug, Clone, Serialize)]
pub struct RoundResult {
    round: u32,
    image: ImageRecord,
    guesses: Vec<PlayerGuess>,
    winners: Vec<PlayerId>,
}

impl RoundResult {
    pub(crate) fn new(round: u32, image: ImageRecord, guesses: Vec<PlayerGuess>) -> Self {
        let diffs: Vec<(PlayerId, f64)> = guesses.iter().map(|g| (g.player_id, g.diff)).collect();
        let winners = select_winners(&diffs);
        Self {
            round,
            image,
            guesses,
            winners,
        }
    }

    /// 1-based round number
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn image(&self) -> &ImageRecord {
        &self.image
    }

    /// The capture time players were guessing
    pub fn answer(&self) -> Timestamp {
        self.image.captured_at()
    }

    /// Guesses in roster order
    pub fn guesses(&self) -> &[PlayerGuess] {
        &self.guesses
    }

    pub fn winners(&self) -> &[PlayerId] {
        &self.winners
    }

    pub fn is_winner(&self, id: PlayerId) -> bool {
        self.winners.contains(&id)
    }

    pub fn diff_for(&self, id: PlayerId) -> Option<f64> {
        self.guesses.iter().find(|g| g.player_id == id).map(|g| g.diff)
    }

    /// Guesses from closest to furthest; equal distances keep roster order
    pub fn ranking(&self) -> Vec<&PlayerGuess> {
        let mut ranked: Vec<&PlayerGuess> = self.guesses.iter().collect();
        ranked.sort_by(|a, b| a.diff.total_cmp(&b.diff));
        ranked
    }
}

/// Every player whose distance equals the smallest one.
///
/// Ties are kept: two players with the same best distance both win.
pub fn select_winners(diffs: &[(PlayerId, f64)]) -> Vec<PlayerId> {
    let best = diffs
        .iter()
        .map(|&(_, diff)| diff)
        .fold(f64::INFINITY, f64::min);

    diffs
        .iter()
        .filter(|&&(_, diff)| diff == best)
        .map(|&(id, _)| id)
        .collect()
}
