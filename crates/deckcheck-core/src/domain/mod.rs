//! Domain model for deckcheck.
//!
//! Canonical definitions for what an engine reveals during a game:
//! - `CardType`/`Card`: the fixed card catalog
//! - `GameState`: per-decision and per-event snapshots
//! - `Decision`/`Event`: closed variant sets offered and emitted by the engine
//! - `GameResult`: the engine's final standings

pub mod cards;
pub mod decision;
pub mod error;
pub mod event;
pub mod result;
pub mod state;

pub use cards::{Card, CardType, Category};
pub use decision::Decision;
pub use error::{EngineError, Result, VerifierError};
pub use event::Event;
pub use result::{GameResult, PlayerResult};
pub use state::{GameState, Hand, Supply, TurnPhase};
