//! Checks over the game as it was set up.

use crate::domain::cards::{expected_basic_supply, ACTION_PILE_SIZE, KINGDOM_SIZE, STARTING_HAND_TYPES};
use crate::domain::{Card, CardType};
use crate::trace::GameTrace;
use crate::verdict::{CheckName, Violation};

/// Each agent's first decision shows a hand made only of starting types.
///
/// At most one violation per hand partition per agent.
pub fn check_starting_hands(trace: &GameTrace) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (player, records) in &trace.decisions {
        let Some(first) = records.first() else {
            continue;
        };
        let hand = &first.state.hand;
        for (cards, location) in [
            (&hand.unplayed, "starting hand"),
            (&hand.played, "starting played cards"),
        ] {
            if let Some(card) = first_foreign(cards) {
                violations.push(
                    Violation::new(
                        CheckName::StartingHands,
                        trace.game_index,
                        format!(
                            "Player \"{player}\" has {} in {location}, expected only Bitcoin/Method",
                            card.card_type
                        ),
                    )
                    .with_turn(0)
                    .with_player(player.clone()),
                );
            }
        }
    }
    violations
}

fn first_foreign(cards: &[Card]) -> Option<&Card> {
    cards
        .iter()
        .find(|c| !STARTING_HAND_TYPES.contains(&c.card_type))
}

/// The first `GameStart` supply matches the setup formula.
///
/// Basic piles are compared one by one against the expected counts for the
/// trace's player count. Every action pile present must hold exactly ten
/// cards and at least ten action piles must be present.
pub fn check_initial_supply(trace: &GameTrace) -> Vec<Violation> {
    // A missing GameStart is reported by the lifecycle check.
    let Some(supply) = trace.initial_supply() else {
        return Vec::new();
    };
    let game = trace.game_index;
    let mut violations = Vec::new();

    for (card_type, expected) in expected_basic_supply(trace.num_players) {
        let actual = supply.count(card_type);
        if actual != expected {
            violations.push(Violation::new(
                CheckName::InitialSupply,
                game,
                format!("{card_type}: expected {expected} but found {actual}"),
            ));
        }
    }

    let mut action_piles = 0;
    for card_type in CardType::ACTIONS {
        let count = supply.count(card_type);
        if count == 0 {
            continue;
        }
        action_piles += 1;
        if count != ACTION_PILE_SIZE {
            violations.push(Violation::new(
                CheckName::InitialSupply,
                game,
                format!("{card_type}: expected {ACTION_PILE_SIZE} but found {count}"),
            ));
        }
    }
    if action_piles < KINGDOM_SIZE {
        violations.push(Violation::new(
            CheckName::InitialSupply,
            game,
            format!(
                "Expected at least {KINGDOM_SIZE} action card types in supply but found {action_piles}"
            ),
        ));
    }
    violations
}
