//! Events an engine emits to its observer.

use serde::{Deserialize, Serialize};

use super::cards::{Card, CardType};
use super::state::Supply;

/// Game lifecycle and card-movement notifications, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Event {
    /// The game has been set up; supply counts after starting decks are dealt.
    GameStart { initial_supply: Supply },

    /// The game is over.
    GameEnd { final_supply: Supply },

    /// A player's turn finished.
    EndTurn { player: String },

    /// A card was played from hand.
    PlayCard { player: String, card: Card },

    /// A card moved from the supply to a player.
    GainCard { player: String, card_type: CardType },

    /// A card left the game.
    TrashCard { player: String, card: Card },

    /// A card was discarded.
    DiscardCard { player: String, card: Card },
}

impl Event {
    /// Stable snake_case label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::GameStart { .. } => "game_start",
            Event::GameEnd { .. } => "game_end",
            Event::EndTurn { .. } => "end_turn",
            Event::PlayCard { .. } => "play_card",
            Event::GainCard { .. } => "gain_card",
            Event::TrashCard { .. } => "trash_card",
            Event::DiscardCard { .. } => "discard_card",
        }
    }

    /// Human-readable line for verbose trace dumps.
    pub fn description(&self) -> String {
        match self {
            Event::GameStart { initial_supply } => {
                format!("Game started ({} cards in supply)", initial_supply.total())
            }
            Event::GameEnd { final_supply } => {
                format!("Game ended ({} cards left in supply)", final_supply.total())
            }
            Event::EndTurn { player } => format!("{player} ended their turn"),
            Event::PlayCard { player, card } => format!("{player} played {}", card.card_type),
            Event::GainCard { player, card_type } => format!("{player} gained {card_type}"),
            Event::TrashCard { player, card } => format!("{player} trashed {}", card.card_type),
            Event::DiscardCard { player, card } => {
                format!("{player} discarded {}", card.card_type)
            }
        }
    }
}
