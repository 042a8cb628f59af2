//! Checks over the presence and count of lifecycle events.

use tracing::debug;

use crate::domain::{CardType, Event};
use crate::trace::GameTrace;
use crate::verdict::{CheckName, Violation};

/// A `GameEnd` event exists.
///
/// Never reports on its own: a missing or repeated `GameEnd` is counted by
/// [`check_lifecycle_events`], and an engine may end the game on a turn
/// limit with Frameworks left, so the final supply is not judged here.
pub fn check_game_end_event(trace: &GameTrace) -> Vec<Violation> {
    let first_end = trace.events.iter().find_map(|oe| match &oe.event {
        Event::GameEnd { final_supply } => Some(final_supply),
        _ => None,
    });
    if let Some(final_supply) = first_end {
        let frameworks = final_supply.count(CardType::Framework);
        if frameworks > 0 {
            debug!(game = trace.game_index, frameworks, "game ended with Frameworks left");
        }
    }
    Vec::new()
}

/// A non-empty event stream contains at least one `EndTurn`.
pub fn check_end_turn_events(trace: &GameTrace) -> Vec<Violation> {
    if trace.events.is_empty() {
        return Vec::new();
    }
    let has_end_turn = trace
        .events
        .iter()
        .any(|oe| matches!(oe.event, Event::EndTurn { .. }));
    if has_end_turn {
        return Vec::new();
    }
    vec![Violation::new(
        CheckName::EndTurnEvent,
        trace.game_index,
        "No EndTurnEvent found in observer event stream",
    )]
}

/// `GameStart` and `GameEnd` each fire exactly once.
pub fn check_lifecycle_events(trace: &GameTrace) -> Vec<Violation> {
    let starts = trace.count_events(|e| matches!(e, Event::GameStart { .. }));
    let ends = trace.count_events(|e| matches!(e, Event::GameEnd { .. }));
    [("GameStartEvent", starts), ("GameEndEvent", ends)]
        .into_iter()
        .filter(|(_, count)| *count != 1)
        .map(|(name, count)| {
            Violation::new(
                CheckName::LifecycleEvents,
                trace.game_index,
                format!("{name} fired {count} time(s), expected 1"),
            )
        })
        .collect()
}
