//! Checks over the engine's reported standings.

use crate::trace::GameTrace;
use crate::verdict::{CheckName, Violation};

/// Each reported score equals the sum of victory-card values in that
/// player's ending deck.
pub fn check_score_calculation(trace: &GameTrace) -> Vec<Violation> {
    let Some(result) = &trace.result else {
        return Vec::new();
    };
    result
        .player_results
        .iter()
        .filter_map(|pr| {
            let computed = pr.victory_points();
            (computed != pr.score).then(|| {
                Violation::new(
                    CheckName::ScoreCalculation,
                    trace.game_index,
                    format!(
                        "Player \"{}\" reported score {} but ending deck victory cards sum to {}",
                        pr.player_name, pr.score, computed
                    ),
                )
            })
        })
        .collect()
}

/// Results are ordered by non-increasing score. Every adjacent inversion is
/// reported.
pub fn check_results_sorted(trace: &GameTrace) -> Vec<Violation> {
    let Some(result) = &trace.result else {
        return Vec::new();
    };
    result
        .player_results
        .windows(2)
        .filter(|pair| pair[1].score > pair[0].score)
        .map(|pair| {
            Violation::new(
                CheckName::ResultsSorted,
                trace.game_index,
                format!(
                    "Player \"{}\" (score {}) ranked after \"{}\" (score {})",
                    pair[1].player_name, pair[1].score, pair[0].player_name, pair[0].score
                ),
            )
        })
        .collect()
}
