//! Checks over the decision menus each agent was offered.

use crate::domain::{Category, Decision, GameState, TurnPhase};
use crate::trace::GameTrace;
use crate::verdict::{CheckName, Violation};

/// Outcome of feeding one phase into a [`PhaseTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhaseStep {
    /// Sub-phase; the main-phase position is unchanged.
    Transparent,
    /// Same or later main phase within the current turn.
    Advance,
    /// Wrapped back to ACTION: a new turn began.
    NewTurn,
    /// Moved backwards to something other than ACTION.
    OutOfOrder { after: TurnPhase },
}

/// Per-agent main-phase state machine.
///
/// Turns are counted from zero and only advance when the sequence wraps
/// back to ACTION.
#[derive(Debug, Default)]
struct PhaseTracker {
    current: Option<TurnPhase>,
    turn: u32,
}

impl PhaseTracker {
    fn observe(&mut self, phase: TurnPhase) -> PhaseStep {
        let Some(ordinal) = phase.main_ordinal() else {
            return PhaseStep::Transparent;
        };
        let current = self.current.and_then(TurnPhase::main_ordinal);
        match current {
            Some(cur) if ordinal < cur => {
                if ordinal == 0 {
                    self.turn += 1;
                    self.current = Some(phase);
                    PhaseStep::NewTurn
                } else {
                    // Position is left where it was.
                    PhaseStep::OutOfOrder {
                        after: self.current.unwrap_or(phase),
                    }
                }
            }
            _ => {
                self.current = Some(phase);
                PhaseStep::Advance
            }
        }
    }
}

/// Every offered option (not only the chosen one) was legal at that moment.
///
/// - A `Buy` must be affordable and its pile non-empty.
/// - An action-card `PlayCard` in the ACTION phase needs an action left.
///
/// Each failed condition is its own violation, carrying the state's
/// resource counts as context. Turns are counted the same way as
/// [`check_phase_ordering`].
pub fn check_legal_decisions(trace: &GameTrace) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (player, records) in &trace.decisions {
        let mut tracker = PhaseTracker::default();
        for record in records {
            tracker.observe(record.state.phase);
            for option in &record.options {
                for description in illegal_reasons(&record.state, option) {
                    violations.push(
                        Violation::new(CheckName::LegalDecisions, trace.game_index, description)
                            .with_turn(tracker.turn)
                            .with_player(player.clone())
                            .with_context(record.state.resource_summary()),
                    );
                }
            }
        }
    }
    violations
}

fn illegal_reasons(state: &GameState, option: &Decision) -> Vec<String> {
    let mut reasons = Vec::new();
    match option {
        Decision::Buy { card_type } => {
            let cost = card_type.cost();
            if cost > state.spendable_money {
                reasons.push(format!(
                    "Buy {card_type} (cost {cost}) offered but spendable money is {}",
                    state.spendable_money
                ));
            }
            if state.supply.count(*card_type) == 0 {
                reasons.push(format!("Buy {card_type} offered but supply is empty"));
            }
        }
        Decision::PlayCard { card } => {
            if state.phase == TurnPhase::Action
                && card.category() == Category::Action
                && state.available_actions == 0
            {
                reasons.push(format!(
                    "Play {} offered in ACTION phase but available actions is 0",
                    card.card_type
                ));
            }
        }
        Decision::GainCard { .. }
        | Decision::DiscardCard { .. }
        | Decision::TrashCard { .. }
        | Decision::EndPhase { .. } => {}
    }
    reasons
}

/// Within each agent's decision sequence, main phases run
/// ACTION → MONEY → BUY → CLEANUP, wrapping to ACTION for a new turn.
/// REACTION, GAIN and DISCARD are skipped.
pub fn check_phase_ordering(trace: &GameTrace) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (player, records) in &trace.decisions {
        let mut tracker = PhaseTracker::default();
        for record in records {
            let phase = record.state.phase;
            if let PhaseStep::OutOfOrder { after } = tracker.observe(phase) {
                violations.push(
                    Violation::new(
                        CheckName::PhaseOrdering,
                        trace.game_index,
                        format!("{phase} phase after {after} phase"),
                    )
                    .with_turn(tracker.turn)
                    .with_player(player.clone()),
                );
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::test_support::{clean_trace, end_phase_record, snapshot};
    use crate::domain::{Card, CardType};
    use crate::trace::DecisionRecord;

    fn phases_trace(phases: &[TurnPhase]) -> GameTrace {
        let mut trace = clean_trace();
        let supply = trace.initial_supply().cloned().unwrap_or_default();
        let records = phases
            .iter()
            .map(|p| end_phase_record(snapshot("alice", *p, &supply)))
            .collect();
        trace.decisions.insert("alice".to_string(), records);
        trace
    }

    #[test]
    fn test_tracker_counts_turns_on_wrap() {
        let mut t = PhaseTracker::default();
        assert_eq!(t.observe(TurnPhase::Action), PhaseStep::Advance);
        assert_eq!(t.observe(TurnPhase::Buy), PhaseStep::Advance);
        assert_eq!(t.observe(TurnPhase::Gain), PhaseStep::Transparent);
        assert_eq!(t.observe(TurnPhase::Action), PhaseStep::NewTurn);
        assert_eq!(t.turn, 1);
    }

    #[test]
    fn test_backward_move_reported_without_moving() {
        let trace = phases_trace(&[
            TurnPhase::Action,
            TurnPhase::Buy,
            TurnPhase::Money,
            TurnPhase::Money,
            TurnPhase::Cleanup,
        ]);
        let violations = check_phase_ordering(&trace);
        // The tracker stays at BUY, so both MONEY records are flagged.
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].description, "MONEY phase after BUY phase");
        assert_eq!(violations[0].player.as_deref(), Some("alice"));
        assert_eq!(violations[0].turn, Some(0));
    }

    #[test]
    fn test_sub_phases_are_transparent() {
        let trace = phases_trace(&[
            TurnPhase::Action,
            TurnPhase::Reaction,
            TurnPhase::Money,
            TurnPhase::Discard,
            TurnPhase::Buy,
            TurnPhase::Gain,
            TurnPhase::Cleanup,
            TurnPhase::Action,
            TurnPhase::Cleanup,
        ]);
        assert!(check_phase_ordering(&trace).is_empty());
    }

    #[test]
    fn test_violation_turn_follows_wraps() {
        let trace = phases_trace(&[
            TurnPhase::Action,
            TurnPhase::Cleanup,
            TurnPhase::Action,
            TurnPhase::Cleanup,
            TurnPhase::Money,
        ]);
        let violations = check_phase_ordering(&trace);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].turn, Some(1));
    }

    fn buy_record(money: u32, options: Vec<Decision>) -> DecisionRecord {
        let supply = clean_trace().initial_supply().cloned().unwrap_or_default();
        let mut state = snapshot("alice", TurnPhase::Buy, &supply);
        state.spendable_money = money;
        state.supply.set(CardType::Module, 0);
        let chosen = options[0].clone();
        DecisionRecord {
            state,
            options,
            chosen,
            triggering_event: None,
        }
    }

    #[test]
    fn test_every_offered_option_is_checked() {
        let mut trace = clean_trace();
        let record = buy_record(
            3,
            vec![
                Decision::end_phase(TurnPhase::Buy),
                Decision::buy(CardType::Ethereum),
                Decision::buy(CardType::Framework),
                Decision::buy(CardType::Module),
            ],
        );
        trace.decisions.insert("alice".to_string(), vec![record]);

        let violations = check_legal_decisions(&trace);
        let descriptions: Vec<&str> = violations.iter().map(|v| v.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "Buy Framework (cost 8) offered but spendable money is 3",
                "Buy Module (cost 5) offered but spendable money is 3",
                "Buy Module offered but supply is empty",
            ]
        );
        assert!(violations.iter().all(|v| {
            v.context.as_deref() == Some("State: actions=1, money=3, buys=1")
                && v.player.as_deref() == Some("alice")
        }));
    }

    #[test]
    fn test_action_play_needs_actions() {
        let mut trace = clean_trace();
        let supply = trace.initial_supply().cloned().unwrap_or_default();
        let hack = Card::new(CardType::Hack, 50);
        let bitcoin = Card::new(CardType::Bitcoin, 51);

        let mut no_actions = snapshot("alice", TurnPhase::Action, &supply);
        no_actions.available_actions = 0;
        let mut money_phase = snapshot("alice", TurnPhase::Money, &supply);
        money_phase.available_actions = 0;

        let options = vec![Decision::play(hack), Decision::play(bitcoin)];
        let records = [no_actions, money_phase]
            .into_iter()
            .map(|state| DecisionRecord {
                state,
                options: options.clone(),
                chosen: options[1].clone(),
                triggering_event: None,
            })
            .collect();
        trace.decisions.insert("alice".to_string(), records);

        let violations = check_legal_decisions(&trace);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            "Play Hack offered in ACTION phase but available actions is 0"
        );
    }
}
