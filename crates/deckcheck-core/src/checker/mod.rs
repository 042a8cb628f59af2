//! Invariant checks over completed game traces.
//!
//! Every check is a pure function from a [`GameTrace`] to the violations it
//! finds. Checks are independent of one another and may run in any order;
//! [`check`] runs all of them in a fixed order so output is stable.
//!
//! Traces that did not complete are not checked at all. Their failure is
//! visible only through the passed-game count.

pub mod conservation;
pub mod decisions;
pub mod events;
pub mod scoring;
pub mod setup;

pub use conservation::{check_card_conservation, check_supply_depletion};
pub use decisions::{check_legal_decisions, check_phase_ordering};
pub use events::{check_end_turn_events, check_game_end_event, check_lifecycle_events};
pub use scoring::{check_results_sorted, check_score_calculation};
pub use setup::{check_initial_supply, check_starting_hands};

use tracing::debug;

use crate::trace::GameTrace;
use crate::verdict::Violation;

/// Signature shared by every invariant check.
pub type Check = fn(&GameTrace) -> Vec<Violation>;

/// All checks, in reporting order.
pub const ALL_CHECKS: [Check; 11] = [
    check_score_calculation,
    check_results_sorted,
    check_starting_hands,
    check_initial_supply,
    check_game_end_event,
    check_legal_decisions,
    check_phase_ordering,
    check_end_turn_events,
    check_card_conservation,
    check_supply_depletion,
    check_lifecycle_events,
];

/// Run every check against `trace`.
///
/// Returns nothing for a trace that did not complete successfully.
pub fn check(trace: &GameTrace) -> Vec<Violation> {
    if !trace.completed_successfully() {
        debug!(game = trace.game_index, "trace not completed, skipping checks");
        return Vec::new();
    }
    let violations: Vec<Violation> = ALL_CHECKS.iter().flat_map(|c| c(trace)).collect();
    debug!(
        game = trace.game_index,
        events = trace.events.len(),
        decisions = trace.decision_count(),
        violations = violations.len(),
        "trace checked"
    );
    violations
}
