//! Prioritizes buying and playing action cards so that action, reaction,
//! gain, discard and trash paths in the engine get exercised.

use crate::domain::{CardType, Category, Decision, Event, GameState, TurnPhase};

use super::{
    buys, end_phase_or_first, first_max_by, gain_highest_cost, play_money_or_end,
    DecisionStrategy,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct ActionHeavyStrategy;

impl ActionHeavyStrategy {
    pub fn new() -> Self {
        Self
    }

    fn play_action_or_end(options: &[Decision]) -> Option<Decision> {
        options
            .iter()
            .find(|d| {
                matches!(d, Decision::PlayCard { card } if card.category() == Category::Action)
            })
            .cloned()
            .or_else(|| end_phase_or_first(options))
    }

    fn buy_action_or_framework(options: &[Decision]) -> Option<Decision> {
        let actions = buys(options).filter(|(_, t)| t.category() == Category::Action);
        if let Some(best) = first_max_by(actions, |t| i64::from(t.cost())) {
            return Some(best.clone());
        }
        buys(options)
            .find(|(_, t)| *t == CardType::Framework)
            .map(|(d, _)| d.clone())
            .or_else(|| end_phase_or_first(options))
    }

    fn discard_first(options: &[Decision]) -> Option<Decision> {
        options
            .iter()
            .find(|d| matches!(d, Decision::DiscardCard { .. }))
            .cloned()
            .or_else(|| end_phase_or_first(options))
    }
}

impl DecisionStrategy for ActionHeavyStrategy {
    fn name(&self) -> &'static str {
        "action_heavy"
    }

    fn choose(
        &mut self,
        state: &GameState,
        options: &[Decision],
        _event: Option<&Event>,
    ) -> Option<Decision> {
        match state.phase {
            TurnPhase::Action => Self::play_action_or_end(options),
            TurnPhase::Money => play_money_or_end(options),
            TurnPhase::Buy => Self::buy_action_or_framework(options),
            TurnPhase::Gain => gain_highest_cost(options),
            TurnPhase::Discard => Self::discard_first(options),
            TurnPhase::Reaction | TurnPhase::Cleanup => end_phase_or_first(options),
        }
    }
}
