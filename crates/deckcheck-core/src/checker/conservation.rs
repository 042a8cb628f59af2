//! Checks that cards are neither created nor lost without a trace.

use crate::domain::cards::STARTING_DECK_SIZE;
use crate::domain::{Event, Supply};
use crate::trace::GameTrace;
use crate::verdict::{CheckName, Violation};

/// Cards in play at the end account for every card present at the start.
///
/// ```text
/// initial = players × starting deck + Σ initial supply
/// final   = Σ ending deck sizes + Σ final supply + TrashCard events
/// ```
///
/// Uses the last `GameStart` and last `GameEnd`; skipped when either is
/// missing.
pub fn check_card_conservation(trace: &GameTrace) -> Vec<Violation> {
    let Some(result) = &trace.result else {
        return Vec::new();
    };
    let mut start: Option<&Supply> = None;
    let mut end: Option<&Supply> = None;
    for oe in &trace.events {
        match &oe.event {
            Event::GameStart { initial_supply } => start = Some(initial_supply),
            Event::GameEnd { final_supply } => end = Some(final_supply),
            _ => {}
        }
    }
    let (Some(start), Some(end)) = (start, end) else {
        return Vec::new();
    };

    let initial = trace.num_players as u64 * u64::from(STARTING_DECK_SIZE) + start.total();
    let trashed = trace.trashed_count() as u64;
    let ending_decks: u64 = result
        .player_results
        .iter()
        .map(|pr| pr.ending_deck.len() as u64)
        .sum();
    let final_total = ending_decks + end.total() + trashed;

    let description = if final_total > initial {
        format!(
            "Final total {final_total} > initial total {initial}: cards appeared \
             (ending decks + final supply + {trashed} trashed)"
        )
    } else if final_total < initial && trashed == 0 {
        format!(
            "Initial total {initial} > final total {final_total} with 0 TrashCardEvents; \
             engine may not be firing TrashCardEvents"
        )
    } else if final_total != initial {
        format!(
            "Initial total {initial} != final total {final_total} \
             (ending decks + final supply + {trashed} trashed)"
        )
    } else {
        return Vec::new();
    };
    vec![Violation::new(
        CheckName::CardConservation,
        trace.game_index,
        description,
    )]
}

/// A gained card's pile never grows between the gain and the next
/// supply-bearing snapshot.
///
/// Only the next snapshot after each `GainCard` is compared, and only when
/// the gain event carried its own snapshot. A pile that grows and shrinks
/// again between two gains goes unnoticed.
pub fn check_supply_depletion(trace: &GameTrace) -> Vec<Violation> {
    let events = &trace.events;
    let mut violations = Vec::new();
    for (i, current) in events.iter().enumerate() {
        let Event::GainCard { card_type, .. } = &current.event else {
            continue;
        };
        let Some(next) = events[i + 1..].iter().find_map(|oe| oe.state.as_ref()) else {
            continue;
        };
        let Some(before_state) = &current.state else {
            continue;
        };
        let before = before_state.supply.count(*card_type);
        let after = next.supply.count(*card_type);
        if after > before {
            violations.push(Violation::new(
                CheckName::SupplyDepletion,
                trace.game_index,
                format!("{card_type} supply increased from {before} to {after} after GainCardEvent"),
            ));
        }
    }
    violations
}
