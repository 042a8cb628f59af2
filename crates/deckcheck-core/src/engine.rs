//! Boundary between the verifier and the engine under test.
//!
//! The engine is a black box: it is built from an ordered player list by an
//! [`EngineFactory`], reports events to one [`GameObserver`], asks players
//! for decisions synchronously, and either returns a [`GameResult`] or fails
//! with an [`EngineError`].

use crate::domain::{CardType, Decision, EngineError, Event, GameResult, GameState};

/// A participant the engine asks for decisions.
pub trait Player {
    fn name(&self) -> &str;

    /// Pick one of `options`. `event` is the event that triggered the request,
    /// if any (e.g. an attack prompting a reaction).
    fn make_decision(
        &mut self,
        state: &GameState,
        options: &[Decision],
        event: Option<&Event>,
    ) -> Decision;
}

/// Receives every event the engine emits, in order.
pub trait GameObserver {
    fn notify(&mut self, state: Option<GameState>, event: Event);
}

/// A constructed engine bound to one game's players.
pub trait Engine {
    fn set_observer(&mut self, observer: Box<dyn GameObserver>);

    /// Run the game to completion.
    fn play(&mut self) -> Result<GameResult, EngineError>;
}

/// Builds engines for the harness.
pub trait EngineFactory: Send + Sync {
    /// Whether the engine accepts an explicit kingdom. When false the harness
    /// falls back to the players-only form and the engine picks its own
    /// action cards.
    fn supports_action_cards(&self) -> bool {
        true
    }

    /// Build an engine. `action_cards` is `Some` exactly when
    /// [`supports_action_cards`](Self::supports_action_cards) is true.
    fn create(
        &self,
        players: Vec<Box<dyn Player>>,
        action_cards: Option<&[CardType]>,
    ) -> Result<Box<dyn Engine>, EngineError>;
}
