//! Fault-injection player used to confirm the engine enforces move legality.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::domain::{CardType, Decision, Event, GameState};
use crate::engine::Player;

/// Number of calls answered legally before cheating starts.
pub const WARM_UP_CALLS: u32 = 2;

/// Plays the first offered option for [`WARM_UP_CALLS`] calls, then always
/// asks to buy a Framework, whatever the menu says.
pub struct FaultInjectionPlayer {
    name: String,
    calls: Arc<AtomicU32>,
}

impl FaultInjectionPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Shared counter of decision calls received so far.
    pub fn call_counter(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.calls)
    }

    /// The decision returned once warm-up is over. Built without looking at
    /// the menu.
    pub fn illegal_decision() -> Decision {
        Decision::buy(CardType::Framework)
    }
}

impl Player for FaultInjectionPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn make_decision(
        &mut self,
        state: &GameState,
        options: &[Decision],
        _event: Option<&Event>,
    ) -> Decision {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= WARM_UP_CALLS {
            if let Some(first) = options.first() {
                return first.clone();
            }
            return Decision::end_phase(state.phase);
        }
        debug!(player = %self.name, call, phase = %state.phase, "injecting illegal decision");
        Self::illegal_decision()
    }
}

impl Default for FaultInjectionPlayer {
    fn default() -> Self {
        Self::new("Cheater")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TurnPhase;
    use crate::strategy::test_support::state;

    #[test]
    fn test_warm_up_then_cheat() {
        let mut player = FaultInjectionPlayer::new("Cheater");
        let counter = player.call_counter();
        let menu = vec![
            Decision::end_phase(TurnPhase::Action),
            Decision::buy(CardType::Bitcoin),
        ];
        let s = state(TurnPhase::Action);

        assert_eq!(player.make_decision(&s, &menu, None), menu[0]);
        assert_eq!(player.make_decision(&s, &menu, None), menu[0]);
        let third = player.make_decision(&s, &menu, None);
        assert_eq!(third, FaultInjectionPlayer::illegal_decision());
        assert!(!menu.contains(&third));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }
}
