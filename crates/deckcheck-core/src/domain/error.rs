//! Error taxonomy for deckcheck.

use serde::{Deserialize, Serialize};

/// Failures raised by the engine under test.
///
/// Stored verbatim in a [`GameTrace`](crate::trace::GameTrace) when a game
/// does not complete, so it is serializable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineError {
    /// The engine could not be built from the supplied players and kingdom.
    #[error("engine construction failed: {reason}")]
    Construction { reason: String },

    /// A player returned a decision that was not on the offered menu.
    #[error("player \"{player}\" made an illegal decision: {reason}")]
    PlayerViolation { player: String, reason: String },

    /// Any other failure raised while the game was in progress.
    #[error("game logic failure: {reason}")]
    GameLogic { reason: String },
}

impl EngineError {
    pub fn is_player_violation(&self) -> bool {
        matches!(self, EngineError::PlayerViolation { .. })
    }
}

/// Errors that abort a verification run.
#[derive(Debug, thiserror::Error)]
pub enum VerifierError {
    #[error("engine construction failed for game {game_index}: {source}")]
    EngineConstruction {
        game_index: usize,
        #[source]
        source: EngineError,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("check task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for verifier operations.
pub type Result<T> = std::result::Result<T, VerifierError>;
