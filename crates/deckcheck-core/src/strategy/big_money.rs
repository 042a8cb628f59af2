//! Buys Framework when offered, otherwise the best money card. Plays all
//! money and skips actions.

use crate::domain::{CardType, Category, Decision, Event, GameState, TurnPhase};

use super::{
    buys, end_phase_or_first, first_max_by, gain_highest_cost, play_money_or_end,
    DecisionStrategy,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct BigMoneyStrategy;

impl BigMoneyStrategy {
    pub fn new() -> Self {
        Self
    }

    fn buy_best(options: &[Decision]) -> Option<Decision> {
        if let Some((framework, _)) = buys(options).find(|(_, t)| *t == CardType::Framework) {
            return Some(framework.clone());
        }
        let money = buys(options).filter(|(_, t)| t.category() == Category::Money);
        first_max_by(money, |t| i64::from(t.value()))
            .cloned()
            .or_else(|| end_phase_or_first(options))
    }
}

impl DecisionStrategy for BigMoneyStrategy {
    fn name(&self) -> &'static str {
        "big_money"
    }

    fn choose(
        &mut self,
        state: &GameState,
        options: &[Decision],
        _event: Option<&Event>,
    ) -> Option<Decision> {
        match state.phase {
            TurnPhase::Action | TurnPhase::Reaction | TurnPhase::Discard | TurnPhase::Cleanup => {
                end_phase_or_first(options)
            }
            TurnPhase::Money => play_money_or_end(options),
            TurnPhase::Buy => Self::buy_best(options),
            TurnPhase::Gain => gain_highest_cost(options),
        }
    }
}
