//! Fixed card catalog consulted by strategies and invariant checks.
//!
//! The catalog is configuration data from the rules contract: the verifier
//! reads costs, values and categories from here but never defines card
//! behaviour.

use serde::{Deserialize, Serialize};

/// Number of cards in every player's starting deck.
pub const STARTING_DECK_SIZE: u32 = 10;

/// Number of action card types placed in the supply for one game.
pub const KINGDOM_SIZE: usize = 10;

/// Initial pile size for every action card type in the supply.
pub const ACTION_PILE_SIZE: u32 = 10;

/// The only card types a starting hand may contain.
pub const STARTING_HAND_TYPES: [CardType; 2] = [CardType::Bitcoin, CardType::Method];

/// Broad classification of a card type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Money,
    Victory,
    Action,
}

/// Every card type known to the rules contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    // Money
    Bitcoin,
    Ethereum,
    Dogecoin,

    // Victory
    Method,
    Module,
    Framework,
    Bug,

    // Action
    Backlog,
    CodeReview,
    DailyScrum,
    Deployment,
    EvergreenTest,
    Hack,
    Hotfix,
    Ipo,
    Monitoring,
    PairProgramming,
    Parallelization,
    Refactor,
    SprintPlanning,
    Standup,
    TechDebt,
}

impl CardType {
    /// All card types in declaration order.
    pub const ALL: [CardType; 22] = [
        CardType::Bitcoin,
        CardType::Ethereum,
        CardType::Dogecoin,
        CardType::Method,
        CardType::Module,
        CardType::Framework,
        CardType::Bug,
        CardType::Backlog,
        CardType::CodeReview,
        CardType::DailyScrum,
        CardType::Deployment,
        CardType::EvergreenTest,
        CardType::Hack,
        CardType::Hotfix,
        CardType::Ipo,
        CardType::Monitoring,
        CardType::PairProgramming,
        CardType::Parallelization,
        CardType::Refactor,
        CardType::SprintPlanning,
        CardType::Standup,
        CardType::TechDebt,
    ];

    /// The fifteen action card types a kingdom is drawn from.
    pub const ACTIONS: [CardType; 15] = [
        CardType::Backlog,
        CardType::CodeReview,
        CardType::DailyScrum,
        CardType::Deployment,
        CardType::EvergreenTest,
        CardType::Hack,
        CardType::Hotfix,
        CardType::Ipo,
        CardType::Monitoring,
        CardType::PairProgramming,
        CardType::Parallelization,
        CardType::Refactor,
        CardType::SprintPlanning,
        CardType::Standup,
        CardType::TechDebt,
    ];

    pub fn category(self) -> Category {
        match self {
            CardType::Bitcoin | CardType::Ethereum | CardType::Dogecoin => Category::Money,
            CardType::Method | CardType::Module | CardType::Framework | CardType::Bug => {
                Category::Victory
            }
            CardType::Backlog
            | CardType::CodeReview
            | CardType::DailyScrum
            | CardType::Deployment
            | CardType::EvergreenTest
            | CardType::Hack
            | CardType::Hotfix
            | CardType::Ipo
            | CardType::Monitoring
            | CardType::PairProgramming
            | CardType::Parallelization
            | CardType::Refactor
            | CardType::SprintPlanning
            | CardType::Standup
            | CardType::TechDebt => Category::Action,
        }
    }

    /// Purchase cost.
    pub fn cost(self) -> u32 {
        match self {
            CardType::Bitcoin => 0,
            CardType::Ethereum => 3,
            CardType::Dogecoin => 6,
            CardType::Method => 2,
            CardType::Module => 5,
            CardType::Framework => 8,
            CardType::Bug => 0,
            CardType::Backlog => 2,
            CardType::CodeReview => 3,
            CardType::DailyScrum => 5,
            CardType::Deployment => 6,
            CardType::EvergreenTest => 5,
            CardType::Hack => 5,
            CardType::Hotfix => 3,
            CardType::Ipo => 5,
            CardType::Monitoring => 4,
            CardType::PairProgramming => 4,
            CardType::Parallelization => 4,
            CardType::Refactor => 2,
            CardType::SprintPlanning => 3,
            CardType::Standup => 2,
            CardType::TechDebt => 4,
        }
    }

    /// Money value for money cards, victory points for victory cards, 0 for actions.
    pub fn value(self) -> i32 {
        match self {
            CardType::Bitcoin => 1,
            CardType::Ethereum => 2,
            CardType::Dogecoin => 3,
            CardType::Method => 1,
            CardType::Module => 3,
            CardType::Framework => 6,
            CardType::Bug => -1,
            _ => 0,
        }
    }

    /// Human-readable name.
    pub fn description(self) -> &'static str {
        match self {
            CardType::Bitcoin => "Bitcoin",
            CardType::Ethereum => "Ethereum",
            CardType::Dogecoin => "Dogecoin",
            CardType::Method => "Method",
            CardType::Module => "Module",
            CardType::Framework => "Framework",
            CardType::Bug => "Bug",
            CardType::Backlog => "Backlog",
            CardType::CodeReview => "Code Review",
            CardType::DailyScrum => "Daily Scrum",
            CardType::Deployment => "Deployment",
            CardType::EvergreenTest => "Evergreen Test",
            CardType::Hack => "Hack",
            CardType::Hotfix => "Hotfix",
            CardType::Ipo => "IPO",
            CardType::Monitoring => "Monitoring",
            CardType::PairProgramming => "Pair Programming",
            CardType::Parallelization => "Parallelization",
            CardType::Refactor => "Refactor",
            CardType::SprintPlanning => "Sprint Planning",
            CardType::Standup => "Standup",
            CardType::TechDebt => "Tech Debt",
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// A physical card: a type plus an engine-assigned identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub card_type: CardType,
    pub id: u32,
}

impl Card {
    pub fn new(card_type: CardType, id: u32) -> Self {
        Self { card_type, id }
    }

    pub fn category(&self) -> Category {
        self.card_type.category()
    }
}

/// Expected supply counts for the basic (non-action) card types after the
/// starting decks have been dealt, for `num_players` players.
pub fn expected_basic_supply(num_players: usize) -> [(CardType, u32); 7] {
    [
        (CardType::Bitcoin, 60),
        (CardType::Ethereum, 40),
        (CardType::Dogecoin, 30),
        (CardType::Method, 14),
        (CardType::Module, 8),
        (CardType::Framework, 8),
        (CardType::Bug, 10 * num_players as u32),
    ]
}
