//! Game state snapshots as revealed by the engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::cards::{Card, CardType};

/// Phase of the current player's turn.
///
/// `Action`, `Money`, `Buy` and `Cleanup` are the ordered main phases.
/// `Reaction`, `Gain` and `Discard` are sub-phases that interrupt a main
/// phase without advancing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TurnPhase {
    Action,
    Money,
    Buy,
    Cleanup,
    Reaction,
    Gain,
    Discard,
}

impl TurnPhase {
    /// Position in the main-phase sequence, or `None` for sub-phases.
    pub fn main_ordinal(self) -> Option<u8> {
        match self {
            TurnPhase::Action => Some(0),
            TurnPhase::Money => Some(1),
            TurnPhase::Buy => Some(2),
            TurnPhase::Cleanup => Some(3),
            TurnPhase::Reaction | TurnPhase::Gain | TurnPhase::Discard => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TurnPhase::Action => "ACTION",
            TurnPhase::Money => "MONEY",
            TurnPhase::Buy => "BUY",
            TurnPhase::Cleanup => "CLEANUP",
            TurnPhase::Reaction => "REACTION",
            TurnPhase::Gain => "GAIN",
            TurnPhase::Discard => "DISCARD",
        }
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The current player's hand, split into played and unplayed cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub played: Vec<Card>,
    pub unplayed: Vec<Card>,
}

impl Hand {
    pub fn new(played: Vec<Card>, unplayed: Vec<Card>) -> Self {
        Self { played, unplayed }
    }

    /// Iterate over played then unplayed cards.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.played.iter().chain(self.unplayed.iter())
    }
}

/// Remaining count per buyable card type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Supply(BTreeMap<CardType, u32>);

impl Supply {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining count for `card_type`; absent types count as zero.
    pub fn count(&self, card_type: CardType) -> u32 {
        self.0.get(&card_type).copied().unwrap_or(0)
    }

    pub fn set(&mut self, card_type: CardType, count: u32) {
        self.0.insert(card_type, count);
    }

    /// Remove one card of `card_type`; returns false when the pile is empty.
    pub fn take(&mut self, card_type: CardType) -> bool {
        match self.0.get_mut(&card_type) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }

    /// Sum of all pile counts.
    pub fn total(&self) -> u64 {
        self.0.values().map(|n| u64::from(*n)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CardType, u32)> + '_ {
        self.0.iter().map(|(t, n)| (*t, *n))
    }
}

impl FromIterator<(CardType, u32)> for Supply {
    fn from_iter<I: IntoIterator<Item = (CardType, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Immutable snapshot of what the engine shows a player at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub current_player: String,
    pub phase: TurnPhase,
    pub spendable_money: u32,
    pub available_actions: u32,
    pub available_buys: u32,
    pub hand: Hand,
    pub supply: Supply,
}

impl GameState {
    /// One-line resource summary used as violation context.
    pub fn resource_summary(&self) -> String {
        format!(
            "State: actions={}, money={}, buys={}",
            self.available_actions, self.spendable_money, self.available_buys
        )
    }
}
