//! Trace model: everything observable about one game.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{Decision, EngineError, Event, GameResult, GameState, Supply};

/// One `make_decision` call as seen by an instrumented player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// State shown to the player before deciding.
    pub state: GameState,
    /// The full menu, in the order the engine offered it.
    pub options: Vec<Decision>,
    pub chosen: Decision,
    pub triggering_event: Option<Event>,
}

/// One observer notification. Only emission order relates entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedEvent {
    pub state: Option<GameState>,
    pub event: Event,
}

/// Complete record of one game.
///
/// # Invariants
///
/// Exactly one of `result` and `failure` is set once the harness has
/// packaged the trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameTrace {
    pub game_index: usize,
    pub num_players: usize,
    pub events: Vec<ObservedEvent>,
    /// Decision log per agent name. Ordered by name so digests are stable.
    pub decisions: BTreeMap<String, Vec<DecisionRecord>>,
    pub result: Option<GameResult>,
    pub failure: Option<EngineError>,
}

impl GameTrace {
    /// The game finished normally and reported a result.
    pub fn completed_successfully(&self) -> bool {
        self.failure.is_none() && self.result.is_some()
    }

    /// Number of events matching `pred`.
    pub fn count_events(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|oe| pred(&oe.event)).count()
    }

    /// Initial supply from the first `GameStart` event.
    pub fn initial_supply(&self) -> Option<&Supply> {
        self.events.iter().find_map(|oe| match &oe.event {
            Event::GameStart { initial_supply } => Some(initial_supply),
            _ => None,
        })
    }

    /// Final supply from the last `GameEnd` event.
    pub fn final_supply(&self) -> Option<&Supply> {
        self.events.iter().rev().find_map(|oe| match &oe.event {
            Event::GameEnd { final_supply } => Some(final_supply),
            _ => None,
        })
    }

    /// Number of `TrashCard` notifications.
    pub fn trashed_count(&self) -> usize {
        self.count_events(|e| matches!(e, Event::TrashCard { .. }))
    }

    /// Total decision records across all agents.
    pub fn decision_count(&self) -> usize {
        self.decisions.values().map(Vec::len).sum()
    }

    /// Hex SHA-256 of the canonical JSON encoding.
    ///
    /// Two runs with the same seed against a deterministic engine produce
    /// the same digest for every game.
    pub fn digest(&self) -> crate::Result<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CardType, GameResult};

    fn trace_with(events: Vec<Event>) -> GameTrace {
        GameTrace {
            game_index: 0,
            num_players: 2,
            events: events
                .into_iter()
                .map(|event| ObservedEvent { state: None, event })
                .collect(),
            decisions: BTreeMap::new(),
            result: Some(GameResult {
                player_results: vec![],
            }),
            failure: None,
        }
    }

    #[test]
    fn test_completed_requires_result_and_no_failure() {
        let mut trace = trace_with(vec![]);
        assert!(trace.completed_successfully());

        trace.failure = Some(EngineError::GameLogic {
            reason: "boom".to_string(),
        });
        assert!(!trace.completed_successfully());

        trace.failure = None;
        trace.result = None;
        assert!(!trace.completed_successfully());
    }

    #[test]
    fn test_supply_lookups() {
        let start: Supply = [(CardType::Bitcoin, 60)].into_iter().collect();
        let end: Supply = [(CardType::Bitcoin, 55)].into_iter().collect();
        let trace = trace_with(vec![
            Event::GameStart {
                initial_supply: start.clone(),
            },
            Event::EndTurn {
                player: "a".to_string(),
            },
            Event::GameEnd {
                final_supply: end.clone(),
            },
        ]);
        assert_eq!(trace.initial_supply(), Some(&start));
        assert_eq!(trace.final_supply(), Some(&end));
        assert_eq!(trace.trashed_count(), 0);
    }

    #[test]
    fn test_digest_is_stable_and_content_sensitive() {
        let a = trace_with(vec![Event::EndTurn {
            player: "a".to_string(),
        }]);
        let b = a.clone();
        let c = trace_with(vec![Event::EndTurn {
            player: "b".to_string(),
        }]);
        let da = a.digest().expect("digest a");
        assert_eq!(da, b.digest().expect("digest b"));
        assert_ne!(da, c.digest().expect("digest c"));
        assert_eq!(da.len(), 64);
    }
}
