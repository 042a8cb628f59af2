//! Decisions an engine offers to a player.

use serde::{Deserialize, Serialize};

use super::cards::{Card, CardType};
use super::state::TurnPhase;

/// One menu entry offered by the engine (and the shape of the answer).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Decision {
    /// Buy one card of the given type from the supply.
    Buy { card_type: CardType },
    /// Play a card from hand.
    PlayCard { card: Card },
    /// Gain a card of the given type (effect-driven, not a purchase).
    GainCard { card_type: CardType },
    /// Discard a card from hand.
    DiscardCard { card: Card },
    /// Trash a card from hand.
    TrashCard { card: Card },
    /// Finish the given phase.
    EndPhase { phase: TurnPhase },
}

impl Decision {
    pub fn buy(card_type: CardType) -> Self {
        Decision::Buy { card_type }
    }

    pub fn play(card: Card) -> Self {
        Decision::PlayCard { card }
    }

    pub fn end_phase(phase: TurnPhase) -> Self {
        Decision::EndPhase { phase }
    }

    pub fn is_end_phase(&self) -> bool {
        matches!(self, Decision::EndPhase { .. })
    }

    pub fn description(&self) -> String {
        match self {
            Decision::Buy { card_type } => format!("Buy {card_type}"),
            Decision::PlayCard { card } => format!("Play {}", card.card_type),
            Decision::GainCard { card_type } => format!("Gain {card_type}"),
            Decision::DiscardCard { card } => format!("Discard {}", card.card_type),
            Decision::TrashCard { card } => format!("Trash {}", card.card_type),
            Decision::EndPhase { phase } => format!("End {phase} phase"),
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description())
    }
}
