//! In-memory reference engine (testing and demos).
//!
//! Provides `ReferenceEngine` and `ReferenceEngineFactory`: a small,
//! deterministic engine that honours the engine boundary contract without
//! implementing real card effects. Opt-in [`Quirk`]s make it break the
//! contract in specific, known ways so scenario tests can confirm that the
//! checks catch them.
//!
//! Simplifications:
//! - hands are the next five cards of the deck, drawn cyclically
//! - action cards cost an action and have no effect, except Refactor which
//!   trashes itself
//! - the game ends once the Framework pile is empty or after a fixed number
//!   of rounds

use tracing::debug;

use crate::domain::cards::{expected_basic_supply, ACTION_PILE_SIZE, KINGDOM_SIZE};
use crate::domain::{
    Card, CardType, Category, Decision, EngineError, Event, GameResult, GameState, Hand,
    PlayerResult, Supply, TurnPhase,
};
use crate::engine::{Engine, EngineFactory, GameObserver, Player};

/// Cards drawn at the start of each turn.
pub const HAND_SIZE: usize = 5;

/// Rounds played before the engine ends the game on its own.
pub const DEFAULT_MAX_ROUNDS: u32 = 40;

const MIN_PLAYERS: usize = 2;
const MAX_PLAYERS: usize = 4;

// ---------------------------------------------------------------------------
// Quirks
// ---------------------------------------------------------------------------

/// Deliberate contract breaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quirk {
    /// Deal one Bug fewer than the setup formula requires.
    ShortBugSupply,
    /// Emit `GameEnd` twice.
    DuplicateGameEnd,
    /// Report the first player's score one point too high.
    MisreportScore,
    /// Treat an unoffered decision as ending the phase instead of failing.
    AcceptIllegalDecisions,
    /// Trash cards without emitting `TrashCard`.
    SilentTrash,
    /// Fail with a game-logic error when the given (1-based) turn starts.
    CrashOnTurn(u32),
    /// Refuse to build an engine at all.
    RefuseConstruction,
}

// ---------------------------------------------------------------------------
// ReferenceEngineFactory
// ---------------------------------------------------------------------------

/// Builds [`ReferenceEngine`]s.
#[derive(Debug, Clone)]
pub struct ReferenceEngineFactory {
    quirks: Vec<Quirk>,
    players_only: bool,
    max_rounds: u32,
}

impl Default for ReferenceEngineFactory {
    fn default() -> Self {
        Self {
            quirks: Vec::new(),
            players_only: false,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl ReferenceEngineFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quirk(mut self, quirk: Quirk) -> Self {
        self.quirks.push(quirk);
        self
    }

    /// Only accept the players-only construction form; the engine picks its
    /// own kingdom.
    pub fn players_only(mut self) -> Self {
        self.players_only = true;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }
}

impl EngineFactory for ReferenceEngineFactory {
    fn supports_action_cards(&self) -> bool {
        !self.players_only
    }

    fn create(
        &self,
        players: Vec<Box<dyn Player>>,
        action_cards: Option<&[CardType]>,
    ) -> Result<Box<dyn Engine>, EngineError> {
        if self.quirks.contains(&Quirk::RefuseConstruction) {
            return Err(EngineError::Construction {
                reason: "no usable constructor".to_string(),
            });
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(EngineError::Construction {
                reason: format!(
                    "expected {MIN_PLAYERS} to {MAX_PLAYERS} players, got {}",
                    players.len()
                ),
            });
        }
        let kingdom = match action_cards {
            Some(cards) => validate_kingdom(cards)?,
            None => CardType::ACTIONS[..KINGDOM_SIZE].to_vec(),
        };
        Ok(Box::new(ReferenceEngine::new(
            players,
            &kingdom,
            self.quirks.clone(),
            self.max_rounds,
        )))
    }
}

fn validate_kingdom(cards: &[CardType]) -> Result<Vec<CardType>, EngineError> {
    let mut kingdom = cards.to_vec();
    kingdom.sort();
    kingdom.dedup();
    if kingdom.len() != KINGDOM_SIZE || cards.len() != KINGDOM_SIZE {
        return Err(EngineError::Construction {
            reason: format!("expected {KINGDOM_SIZE} distinct action cards, got {cards:?}"),
        });
    }
    if let Some(bad) = kingdom.iter().find(|t| t.category() != Category::Action) {
        return Err(EngineError::Construction {
            reason: format!("{bad} is not an action card"),
        });
    }
    Ok(kingdom)
}

// ---------------------------------------------------------------------------
// ReferenceEngine
// ---------------------------------------------------------------------------

struct Seat {
    player: Box<dyn Player>,
    name: String,
    deck: Vec<Card>,
    cursor: usize,
}

/// Per-turn resources of the active seat.
struct Turn {
    phase: TurnPhase,
    actions: u32,
    money: u32,
    buys: u32,
    hand: Hand,
}

/// Simplified deterministic engine. See the module docs.
pub struct ReferenceEngine {
    seats: Vec<Seat>,
    supply: Supply,
    observer: Option<Box<dyn GameObserver>>,
    quirks: Vec<Quirk>,
    max_rounds: u32,
    next_card_id: u32,
    finished: bool,
}

impl ReferenceEngine {
    fn new(
        players: Vec<Box<dyn Player>>,
        kingdom: &[CardType],
        quirks: Vec<Quirk>,
        max_rounds: u32,
    ) -> Self {
        let num_players = players.len();
        let mut supply: Supply = expected_basic_supply(num_players).into_iter().collect();
        for card_type in kingdom {
            supply.set(*card_type, ACTION_PILE_SIZE);
        }
        if quirks.contains(&Quirk::ShortBugSupply) {
            let bugs = supply.count(CardType::Bug);
            supply.set(CardType::Bug, bugs.saturating_sub(1));
        }

        let mut next_card_id = 1;
        let seats = players
            .into_iter()
            .map(|player| {
                let deck = [(CardType::Bitcoin, 7), (CardType::Method, 3)]
                    .into_iter()
                    .flat_map(|(t, n)| std::iter::repeat(t).take(n))
                    .map(|t| {
                        let card = Card::new(t, next_card_id);
                        next_card_id += 1;
                        card
                    })
                    .collect();
                Seat {
                    name: player.name().to_string(),
                    player,
                    deck,
                    cursor: 0,
                }
            })
            .collect();

        Self {
            seats,
            supply,
            observer: None,
            quirks,
            max_rounds,
            next_card_id,
            finished: false,
        }
    }

    fn has(&self, quirk: Quirk) -> bool {
        self.quirks.contains(&quirk)
    }

    fn crash_turn(&self) -> Option<u32> {
        self.quirks.iter().find_map(|q| match q {
            Quirk::CrashOnTurn(n) => Some(*n),
            _ => None,
        })
    }

    fn emit(&mut self, state: Option<GameState>, event: Event) {
        if let Some(observer) = self.observer.as_mut() {
            observer.notify(state, event);
        }
    }

    fn snapshot(&self, seat: usize, turn: &Turn) -> GameState {
        GameState {
            current_player: self.seats[seat].name.clone(),
            phase: turn.phase,
            spendable_money: turn.money,
            available_actions: turn.actions,
            available_buys: turn.buys,
            hand: turn.hand.clone(),
            supply: self.supply.clone(),
        }
    }

    fn draw_hand(&mut self, seat: usize) -> Hand {
        let seat = &mut self.seats[seat];
        let len = seat.deck.len();
        if len == 0 {
            return Hand::default();
        }
        let n = len.min(HAND_SIZE);
        let unplayed = (0..n).map(|k| seat.deck[(seat.cursor + k) % len]).collect();
        seat.cursor = (seat.cursor + n) % len;
        Hand::new(Vec::new(), unplayed)
    }

    /// Offer `options` and validate the answer.
    fn ask(
        &mut self,
        seat: usize,
        turn: &Turn,
        options: Vec<Decision>,
    ) -> Result<Decision, EngineError> {
        let state = self.snapshot(seat, turn);
        let choice = self.seats[seat]
            .player
            .make_decision(&state, &options, None);
        if options.contains(&choice) {
            return Ok(choice);
        }
        let player = self.seats[seat].name.clone();
        if self.has(Quirk::AcceptIllegalDecisions) {
            debug!(player = %player, choice = %choice, "accepting unoffered decision");
            return Ok(Decision::end_phase(turn.phase));
        }
        Err(EngineError::PlayerViolation {
            player,
            reason: format!("{choice} was not among the {} offered options", options.len()),
        })
    }

    fn play_from_hand(&mut self, seat: usize, turn: &mut Turn, card: Card) {
        if let Some(pos) = turn.hand.unplayed.iter().position(|c| *c == card) {
            turn.hand.unplayed.remove(pos);
            turn.hand.played.push(card);
        }
        let state = self.snapshot(seat, turn);
        let player = self.seats[seat].name.clone();
        self.emit(Some(state), Event::PlayCard { player, card });
    }

    fn trash(&mut self, seat: usize, turn: &mut Turn, card: Card) {
        turn.hand.played.retain(|c| *c != card);
        let s = &mut self.seats[seat];
        if let Some(pos) = s.deck.iter().position(|c| *c == card) {
            s.deck.remove(pos);
            if pos < s.cursor {
                s.cursor -= 1;
            }
            if s.cursor >= s.deck.len() {
                s.cursor = 0;
            }
        }
        if self.has(Quirk::SilentTrash) {
            return;
        }
        let state = self.snapshot(seat, turn);
        let player = self.seats[seat].name.clone();
        self.emit(Some(state), Event::TrashCard { player, card });
    }

    fn gain(&mut self, seat: usize, turn: &mut Turn, card_type: CardType) {
        if !self.supply.take(card_type) {
            return;
        }
        turn.money = turn.money.saturating_sub(card_type.cost());
        turn.buys = turn.buys.saturating_sub(1);
        let card = Card::new(card_type, self.next_card_id);
        self.next_card_id += 1;
        self.seats[seat].deck.push(card);
        let state = self.snapshot(seat, turn);
        let player = self.seats[seat].name.clone();
        self.emit(Some(state), Event::GainCard { player, card_type });
    }

    fn play_turn(&mut self, seat: usize) -> Result<(), EngineError> {
        let hand = self.draw_hand(seat);
        let mut turn = Turn {
            phase: TurnPhase::Action,
            actions: 1,
            money: 0,
            buys: 1,
            hand,
        };

        loop {
            let mut options: Vec<Decision> = if turn.actions > 0 {
                playable(&turn.hand, Category::Action)
            } else {
                Vec::new()
            };
            options.push(Decision::end_phase(TurnPhase::Action));
            match self.ask(seat, &turn, options)? {
                Decision::PlayCard { card } => {
                    turn.actions -= 1;
                    self.play_from_hand(seat, &mut turn, card);
                    if card.card_type == CardType::Refactor {
                        self.trash(seat, &mut turn, card);
                    }
                }
                _ => break,
            }
        }

        turn.phase = TurnPhase::Money;
        loop {
            let mut options = playable(&turn.hand, Category::Money);
            options.push(Decision::end_phase(TurnPhase::Money));
            match self.ask(seat, &turn, options)? {
                Decision::PlayCard { card } => {
                    turn.money += u32::try_from(card.card_type.value()).unwrap_or(0);
                    self.play_from_hand(seat, &mut turn, card);
                }
                _ => break,
            }
        }

        turn.phase = TurnPhase::Buy;
        while turn.buys > 0 {
            let mut options: Vec<Decision> = self
                .supply
                .iter()
                .filter(|(t, n)| *n > 0 && t.cost() <= turn.money)
                .map(|(t, _)| Decision::buy(t))
                .collect();
            options.push(Decision::end_phase(TurnPhase::Buy));
            match self.ask(seat, &turn, options)? {
                Decision::Buy { card_type } => self.gain(seat, &mut turn, card_type),
                _ => break,
            }
        }

        turn.phase = TurnPhase::Cleanup;
        self.ask(seat, &turn, vec![Decision::end_phase(TurnPhase::Cleanup)])?;
        let state = self.snapshot(seat, &turn);
        let player = self.seats[seat].name.clone();
        self.emit(Some(state), Event::EndTurn { player });
        Ok(())
    }

    fn results(&self) -> GameResult {
        let mut player_results: Vec<PlayerResult> = self
            .seats
            .iter()
            .map(|seat| {
                let mut result = PlayerResult {
                    player_name: seat.name.clone(),
                    ending_deck: seat.deck.clone(),
                    score: 0,
                };
                result.score = result.victory_points();
                result
            })
            .collect();
        if self.has(Quirk::MisreportScore) {
            if let Some(first) = player_results.first_mut() {
                first.score += 1;
            }
        }
        // Stable: tied players keep seat order.
        player_results.sort_by(|a, b| b.score.cmp(&a.score));
        GameResult { player_results }
    }
}

fn playable(hand: &Hand, category: Category) -> Vec<Decision> {
    hand.unplayed
        .iter()
        .filter(|c| c.category() == category)
        .map(|c| Decision::play(*c))
        .collect()
}

impl Engine for ReferenceEngine {
    fn set_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observer = Some(observer);
    }

    fn play(&mut self) -> Result<GameResult, EngineError> {
        if self.finished {
            return Err(EngineError::GameLogic {
                reason: "game already played".to_string(),
            });
        }
        self.finished = true;

        let initial_supply = self.supply.clone();
        self.emit(None, Event::GameStart { initial_supply });

        let crash_turn = self.crash_turn();
        let mut turn_number = 0;
        'game: for _round in 0..self.max_rounds {
            for seat in 0..self.seats.len() {
                turn_number += 1;
                if crash_turn == Some(turn_number) {
                    return Err(EngineError::GameLogic {
                        reason: format!("simulated crash on turn {turn_number}"),
                    });
                }
                self.play_turn(seat)?;
                if self.supply.count(CardType::Framework) == 0 {
                    break 'game;
                }
            }
        }
        debug!(turns = turn_number, "reference game over");

        let repeats = if self.has(Quirk::DuplicateGameEnd) { 2 } else { 1 };
        for _ in 0..repeats {
            let final_supply = self.supply.clone();
            self.emit(None, Event::GameEnd { final_supply });
        }
        Ok(self.results())
    }
}
