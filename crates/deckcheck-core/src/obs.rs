//! Structured observability hooks for the verification lifecycle.
//!
//! This module provides:
//! - Run- and game-scoped tracing spans via RAII guards
//! - Emission functions for key lifecycle events: run start, game finish,
//!   adversarial outcome, violations, verbose trace dumps, run finish
//!
//! Events are emitted at `info!` level unless noted; filter with `RUST_LOG`.

use tracing::{info, warn};

use crate::trace::GameTrace;
use crate::verdict::Violation;

/// RAII guard that enters a run-scoped span for one verification run.
///
/// # Example
///
/// ```ignore
/// let _span = VerificationSpan::enter("reference", 42);
/// // every event below carries engine = "reference", seed = 42
/// ```
pub struct VerificationSpan {
    _span: tracing::span::EnteredSpan,
}

impl VerificationSpan {
    pub fn enter(engine: &str, seed: u64) -> Self {
        let span = tracing::info_span!("deckcheck.verify", engine = %engine, seed = seed);
        Self {
            _span: span.entered(),
        }
    }
}

/// RAII guard scoped to one game.
pub struct GameSpan {
    _span: tracing::span::EnteredSpan,
}

impl GameSpan {
    pub fn enter(game_index: usize, lineup: &str) -> Self {
        let span = tracing::info_span!("deckcheck.game", game = game_index, lineup = %lineup);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: verification run started.
pub fn emit_run_started(games: usize, seed: u64) {
    info!(event = "run.started", games = games, seed = seed);
}

/// Emit event: one normal game finished, successfully or not.
pub fn emit_game_finished(trace: &GameTrace) {
    match &trace.failure {
        None => info!(
            event = "game.finished",
            game = trace.game_index,
            players = trace.num_players,
            events = trace.events.len(),
            decisions = trace.decision_count(),
        ),
        Some(err) => warn!(
            event = "game.failed",
            game = trace.game_index,
            events = trace.events.len(),
            error = %err,
        ),
    }
}

/// Emit event: trace digest, for reproducibility comparisons between runs.
pub fn emit_trace_digest(game_index: usize, digest: &str) {
    tracing::debug!(event = "game.digest", game = game_index, digest = %digest);
}

/// Emit event: outcome of the adversarial game.
pub fn emit_adversarial_outcome(game_index: usize, rejected: bool, detail: &str) {
    if rejected {
        info!(event = "adversary.rejected", game = game_index, detail = %detail);
    } else {
        warn!(event = "adversary.accepted", game = game_index);
    }
}

/// Emit event: one violation found (warning level).
pub fn emit_violation(violation: &Violation) {
    warn!(
        event = "violation.found",
        game = violation.game_index,
        check = %violation.check,
        description = %violation.description,
    );
}

/// Dump every captured event of a game (verbose mode).
pub fn emit_trace_dump(trace: &GameTrace) {
    info!(event = "trace.dump.begin", game = trace.game_index);
    for (seq, oe) in trace.events.iter().enumerate() {
        info!(event = "trace.dump.event", game = trace.game_index, seq = seq, description = %oe.event.description());
    }
    info!(event = "trace.dump.end", game = trace.game_index);
}

/// Emit event: verification run finished.
pub fn emit_run_finished(attempted: usize, passed: usize, violations: usize, duration_ms: u64) {
    info!(
        event = "run.finished",
        attempted = attempted,
        passed = passed,
        violations = violations,
        compliant = violations == 0,
        duration_ms = duration_ms,
    );
}
