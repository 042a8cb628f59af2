//! Findings produced by the invariant checks and the adversarial game.
//!
//! A [`Violation`] pins one rule breach to a game (and optionally a turn and
//! a player). A [`VerificationResult`] aggregates a whole run; compliance is
//! simply the absence of violations.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Check names
// ---------------------------------------------------------------------------

/// The closed set of checks that can report a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckName {
    ScoreCalculation,
    ResultsSorted,
    StartingHands,
    InitialSupply,
    GameEndEvent,
    LegalDecisions,
    PhaseOrdering,
    EndTurnEvent,
    CardConservation,
    SupplyDepletion,
    LifecycleEvents,
    /// The adversarial game: an illegal decision must be rejected.
    MoveLegality,
}

impl CheckName {
    /// Stable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            CheckName::ScoreCalculation => "Score calculation",
            CheckName::ResultsSorted => "Results sorted",
            CheckName::StartingHands => "Starting hands",
            CheckName::InitialSupply => "Initial supply",
            CheckName::GameEndEvent => "GameEndEvent",
            CheckName::LegalDecisions => "Legal decisions",
            CheckName::PhaseOrdering => "Phase ordering",
            CheckName::EndTurnEvent => "EndTurnEvent",
            CheckName::CardConservation => "Card conservation",
            CheckName::SupplyDepletion => "Supply depletion",
            CheckName::LifecycleEvents => "Lifecycle events",
            CheckName::MoveLegality => "Move legality",
        }
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Violation
// ---------------------------------------------------------------------------

/// One rule breach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub check: CheckName,
    pub description: String,
    pub game_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    /// Extra diagnostic line, e.g. the resource summary of a state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Violation {
    pub fn new(check: CheckName, game_index: usize, description: impl Into<String>) -> Self {
        Self {
            check,
            description: description.into(),
            game_index,
            turn: None,
            player: None,
            context: None,
        }
    }

    pub fn with_turn(mut self, turn: u32) -> Self {
        self.turn = Some(turn);
        self
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Game {}", self.game_index)?;
        if let Some(turn) = self.turn {
            write!(f, ", Turn {turn}")?;
        }
        if let Some(player) = &self.player {
            write!(f, ", Player: {player}")?;
        }
        write!(f, "] {}: {}", self.check, self.description)?;
        if let Some(context) = &self.context {
            write!(f, "\n  {context}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Run result
// ---------------------------------------------------------------------------

/// Aggregate outcome of a verification run.
///
/// # Invariants
///
/// `games_passed <= games_attempted`. `violations` are in game order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub games_attempted: usize,
    pub games_passed: usize,
    pub violations: Vec<Violation>,
}

impl VerificationResult {
    /// True when no violation was found.
    ///
    /// A game that crashed counts against `games_passed` but does not by
    /// itself make the run non-compliant.
    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn games_failed(&self) -> usize {
        self.games_attempted.saturating_sub(self.games_passed)
    }
}
