//! Picks uniformly among the offered options. Over many games this covers
//! more engine paths than any scripted strategy.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::{Decision, Event, GameState};

use super::DecisionStrategy;

/// Uniform random choice from a private, seeded source.
#[derive(Debug, Clone)]
pub struct RandomLegalStrategy {
    rng: ChaCha8Rng,
}

impl RandomLegalStrategy {
    /// Same seed, same sequence of choices for the same menus.
    pub fn new(seed: [u8; 32]) -> Self {
        Self {
            rng: ChaCha8Rng::from_seed(seed),
        }
    }

    pub fn from_rng(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }
}

impl DecisionStrategy for RandomLegalStrategy {
    fn name(&self) -> &'static str {
        "random_legal"
    }

    fn choose(
        &mut self,
        _state: &GameState,
        options: &[Decision],
        _event: Option<&Event>,
    ) -> Option<Decision> {
        if options.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..options.len());
        options.get(idx).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CardType, TurnPhase};
    use crate::strategy::test_support::state;

    fn menu() -> Vec<Decision> {
        vec![
            Decision::buy(CardType::Bitcoin),
            Decision::buy(CardType::Ethereum),
            Decision::buy(CardType::Method),
            Decision::buy(CardType::Bug),
            Decision::end_phase(TurnPhase::Buy),
        ]
    }

    #[test]
    fn test_same_seed_same_choices() {
        let options = menu();
        let s = state(TurnPhase::Buy);
        let mut a = RandomLegalStrategy::new([7; 32]);
        let mut b = RandomLegalStrategy::new([7; 32]);
        for _ in 0..50 {
            assert_eq!(a.choose(&s, &options, None), b.choose(&s, &options, None));
        }
    }

    #[test]
    fn test_always_picks_from_menu() {
        let options = menu();
        let s = state(TurnPhase::Buy);
        let mut strategy = RandomLegalStrategy::new([1; 32]);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let chosen = strategy.choose(&s, &options, None).expect("non-empty menu");
            assert!(options.contains(&chosen));
            seen.insert(chosen);
        }
        assert!(seen.len() > 1, "uniform choice should vary over 200 draws");
        assert_eq!(strategy.choose(&s, &[], None), None);
    }
}
