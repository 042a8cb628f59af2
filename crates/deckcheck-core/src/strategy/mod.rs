//! Decision strategies driving the instrumented players.
//!
//! A strategy maps (state, offered options, triggering event) to one of the
//! offered options. Strategies are trusted: whatever they return is taken
//! from `options`. Dispatch is on `state.phase` with exhaustive matches so a
//! new phase cannot be silently ignored.
//!
//! "Highest X" selections keep the first qualifying option seen in menu
//! order when several tie.

pub mod action_heavy;
pub mod big_money;
pub mod passive;
pub mod random_legal;

pub use action_heavy::ActionHeavyStrategy;
pub use big_money::BigMoneyStrategy;
pub use passive::PassiveStrategy;
pub use random_legal::RandomLegalStrategy;

use crate::domain::{CardType, Category, Decision, Event, GameState};

/// Chooses one decision from an offered menu.
pub trait DecisionStrategy: Send {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Returns `None` only when `options` is empty.
    fn choose(
        &mut self,
        state: &GameState,
        options: &[Decision],
        event: Option<&Event>,
    ) -> Option<Decision>;
}

/// The first `EndPhase` option, or the first option of any kind.
pub(crate) fn end_phase_or_first(options: &[Decision]) -> Option<Decision> {
    options
        .iter()
        .find(|d| d.is_end_phase())
        .or_else(|| options.first())
        .cloned()
}

/// The first money card offered for play, else end the phase.
pub(crate) fn play_money_or_end(options: &[Decision]) -> Option<Decision> {
    options
        .iter()
        .find(|d| matches!(d, Decision::PlayCard { card } if card.category() == Category::Money))
        .cloned()
        .or_else(|| end_phase_or_first(options))
}

/// Highest-cost `GainCard` option, else the first option.
pub(crate) fn gain_highest_cost(options: &[Decision]) -> Option<Decision> {
    let gains = options.iter().filter_map(|d| match d {
        Decision::GainCard { card_type } => Some((d, *card_type)),
        _ => None,
    });
    first_max_by(gains, |t| i64::from(t.cost()))
        .or_else(|| options.first())
        .cloned()
}

/// Offered `Buy` options with their card types, in menu order.
pub(crate) fn buys(options: &[Decision]) -> impl Iterator<Item = (&Decision, CardType)> {
    options.iter().filter_map(|d| match d {
        Decision::Buy { card_type } => Some((d, *card_type)),
        _ => None,
    })
}

/// Stable arg-max: among equal keys the earliest item wins.
pub(crate) fn first_max_by<'a, I, F>(items: I, key: F) -> Option<&'a Decision>
where
    I: Iterator<Item = (&'a Decision, CardType)>,
    F: Fn(CardType) -> i64,
{
    let mut best: Option<(&'a Decision, i64)> = None;
    for (decision, card_type) in items {
        let k = key(card_type);
        match best {
            Some((_, best_key)) if k <= best_key => {}
            _ => best = Some((decision, k)),
        }
    }
    best.map(|(d, _)| d)
}
