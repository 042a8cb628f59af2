//! Instrumented player that records every decision call.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

use crate::domain::{Decision, Event, GameState};
use crate::engine::Player;
use crate::metrics::METRICS;
use crate::strategy::DecisionStrategy;
use crate::trace::DecisionRecord;

/// Shared, append-only decision log.
///
/// The engine owns the player; the harness keeps a clone of this handle and
/// snapshots it once the game is over.
#[derive(Debug, Clone, Default)]
pub struct DecisionLog {
    records: Arc<Mutex<Vec<DecisionRecord>>>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, record: DecisionRecord) {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.push(record);
    }

    /// Copy of the log in call order.
    pub fn snapshot(&self) -> Vec<DecisionRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A [`Player`] that delegates to a strategy and logs each call.
pub struct CapturingPlayer {
    name: String,
    strategy: Box<dyn DecisionStrategy>,
    log: DecisionLog,
}

impl CapturingPlayer {
    pub fn new(name: impl Into<String>, strategy: Box<dyn DecisionStrategy>) -> Self {
        Self {
            name: name.into(),
            strategy,
            log: DecisionLog::new(),
        }
    }

    /// A handle onto this player's log that outlives the player.
    pub fn log(&self) -> DecisionLog {
        self.log.clone()
    }
}

impl Player for CapturingPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn make_decision(
        &mut self,
        state: &GameState,
        options: &[Decision],
        event: Option<&Event>,
    ) -> Decision {
        // An empty menu leaves nothing legal to pick; answer with the phase
        // end and let the engine judge it.
        let chosen = self
            .strategy
            .choose(state, options, event)
            .unwrap_or_else(|| Decision::end_phase(state.phase));

        trace!(
            player = %self.name,
            strategy = self.strategy.name(),
            phase = %state.phase,
            offered = options.len(),
            chosen = %chosen,
            "decision recorded"
        );

        self.log.push(DecisionRecord {
            state: state.clone(),
            options: options.to_vec(),
            chosen: chosen.clone(),
            triggering_event: event.cloned(),
        });
        METRICS.inc_decisions_recorded();
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CardType, TurnPhase};
    use crate::strategy::test_support::state;
    use crate::strategy::{BigMoneyStrategy, PassiveStrategy};

    #[test]
    fn test_every_call_is_logged_in_order() {
        let mut player = CapturingPlayer::new("BigMoney-1", Box::new(BigMoneyStrategy));
        let log = player.log();

        let buy_menu = vec![
            Decision::buy(CardType::Ethereum),
            Decision::end_phase(TurnPhase::Buy),
        ];
        let cleanup_menu = vec![Decision::end_phase(TurnPhase::Cleanup)];

        let first = player.make_decision(&state(TurnPhase::Buy), &buy_menu, None);
        let second = player.make_decision(&state(TurnPhase::Cleanup), &cleanup_menu, None);
        // Identical calls are not deduplicated.
        player.make_decision(&state(TurnPhase::Cleanup), &cleanup_menu, None);

        let records = log.snapshot();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].chosen, first);
        assert_eq!(records[0].options, buy_menu);
        assert_eq!(records[1].chosen, second);
        assert_eq!(records[1].state.phase, TurnPhase::Cleanup);
        assert_eq!(records[2], records[1]);
    }

    #[test]
    fn test_triggering_event_is_kept() {
        let mut player = CapturingPlayer::new("Passive", Box::new(PassiveStrategy));
        let event = Event::EndTurn {
            player: "other".to_string(),
        };
        let menu = vec![Decision::end_phase(TurnPhase::Reaction)];
        player.make_decision(&state(TurnPhase::Reaction), &menu, Some(&event));
        assert_eq!(player.log().snapshot()[0].triggering_event, Some(event));
    }

    #[test]
    fn test_empty_menu_answers_end_phase() {
        let mut player = CapturingPlayer::new("Passive", Box::new(PassiveStrategy));
        let chosen = player.make_decision(&state(TurnPhase::Gain), &[], None);
        assert_eq!(chosen, Decision::end_phase(TurnPhase::Gain));
        assert_eq!(player.log().len(), 1);
    }
}
