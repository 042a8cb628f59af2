//! Final game results reported by the engine.

use serde::{Deserialize, Serialize};

use super::cards::{Card, Category};

/// One player's standing at game end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub player_name: String,
    pub ending_deck: Vec<Card>,
    pub score: i32,
}

impl PlayerResult {
    /// Sum of victory-card values in the ending deck.
    pub fn victory_points(&self) -> i32 {
        self.ending_deck
            .iter()
            .filter(|c| c.category() == Category::Victory)
            .map(|c| c.card_type.value())
            .sum()
    }
}

/// Outcome of a completed game. Ordering and count of `player_results` are
/// what the checks verify, so nothing about them is assumed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub player_results: Vec<PlayerResult>,
}
