//! Always ends the phase. Exercises the degenerate game where nobody takes
//! an optional action.

use crate::domain::{Decision, Event, GameState};

use super::{end_phase_or_first, DecisionStrategy};

#[derive(Debug, Default, Clone, Copy)]
pub struct PassiveStrategy;

impl PassiveStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl DecisionStrategy for PassiveStrategy {
    fn name(&self) -> &'static str {
        "passive"
    }

    fn choose(
        &mut self,
        _state: &GameState,
        options: &[Decision],
        _event: Option<&Event>,
    ) -> Option<Decision> {
        end_phase_or_first(options)
    }
}
