//! Observer adapter: captures the engine's event stream verbatim.
//!
//! Usage:
//! 1. Create an [`EventRecorder`] and keep a [`EventRecorder::handle`].
//! 2. Hand the recorder to [`Engine::set_observer`](crate::engine::Engine::set_observer).
//! 3. After `play` returns, call [`EventRecorder::events`] on the handle.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

use crate::domain::{Event, GameState};
use crate::engine::GameObserver;
use crate::metrics::METRICS;
use crate::trace::ObservedEvent;

/// Append-only, emission-ordered event log for one game.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    game_index: usize,
    events: Arc<Mutex<Vec<ObservedEvent>>>,
}

impl EventRecorder {
    pub fn new(game_index: usize) -> Self {
        Self {
            game_index,
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A second handle onto the same log.
    pub fn handle(&self) -> Self {
        self.clone()
    }

    /// Copy of everything recorded so far, in emission order.
    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GameObserver for EventRecorder {
    fn notify(&mut self, state: Option<GameState>, event: Event) {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        let seq = events.len();
        trace!(game = self.game_index, seq, kind = event.kind(), "event recorded");
        events.push(ObservedEvent { state, event });
        METRICS.inc_events_recorded();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Supply;

    #[test]
    fn test_records_in_emission_order() {
        let recorder = EventRecorder::new(0);
        let mut observer: Box<dyn GameObserver> = Box::new(recorder.handle());

        observer.notify(
            None,
            Event::GameStart {
                initial_supply: Supply::new(),
            },
        );
        observer.notify(
            None,
            Event::EndTurn {
                player: "a".to_string(),
            },
        );
        observer.notify(
            None,
            Event::EndTurn {
                player: "a".to_string(),
            },
        );

        let events = recorder.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].event.kind(), "game_start");
        // Duplicates are kept.
        assert_eq!(events[1], events[2]);
    }

    #[test]
    fn test_new_recorder_is_empty() {
        let recorder = EventRecorder::new(4);
        assert!(recorder.is_empty());
        assert!(recorder.events().is_empty());
    }
}
