//! Verification harness.
//!
//! Plays `games` normal games plus one adversarial game against an engine
//! factory, captures a [`GameTrace`] per normal game, checks every trace and
//! aggregates a [`VerificationResult`].
//!
//! Games run one after another on the calling thread. Checking is pure and
//! may fan out over the blocking pool; results are merged back in game
//! order.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::adversary::FaultInjectionPlayer;
use crate::checker;
use crate::config::HarnessConfig;
use crate::domain::cards::KINGDOM_SIZE;
use crate::domain::{CardType, EngineError, Result, VerifierError};
use crate::engine::{Engine, EngineFactory, Player};
use crate::metrics::METRICS;
use crate::obs::{self, GameSpan};
use crate::player::{CapturingPlayer, DecisionLog};
use crate::recording::EventRecorder;
use crate::seed::{SeedDeriver, SeedStream};
use crate::strategy::{
    ActionHeavyStrategy, BigMoneyStrategy, PassiveStrategy, RandomLegalStrategy,
};
use crate::trace::GameTrace;
use crate::verdict::{CheckName, VerificationResult, Violation};

// ---------------------------------------------------------------------------
// Lineups
// ---------------------------------------------------------------------------

/// Player configurations, cycled by game index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lineup {
    BigMoneyPair,
    ActionHeavyPair,
    Mixed,
    RandomQuartet,
    PassivePair,
}

impl Lineup {
    pub const ROTATION: [Lineup; 5] = [
        Lineup::BigMoneyPair,
        Lineup::ActionHeavyPair,
        Lineup::Mixed,
        Lineup::RandomQuartet,
        Lineup::PassivePair,
    ];

    pub fn for_game(game_index: usize) -> Self {
        Self::ROTATION[game_index % Self::ROTATION.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Lineup::BigMoneyPair => "big-money-pair",
            Lineup::ActionHeavyPair => "action-heavy-pair",
            Lineup::Mixed => "mixed",
            Lineup::RandomQuartet => "random-quartet",
            Lineup::PassivePair => "passive-pair",
        }
    }

    /// Build the instrumented agents for `game_index`, in seat order.
    pub fn agents(self, seeds: &SeedDeriver, game_index: usize) -> Vec<CapturingPlayer> {
        match self {
            Lineup::BigMoneyPair => vec![
                CapturingPlayer::new("BigMoney-1", Box::new(BigMoneyStrategy)),
                CapturingPlayer::new("BigMoney-2", Box::new(BigMoneyStrategy)),
            ],
            Lineup::ActionHeavyPair => vec![
                CapturingPlayer::new("ActionHeavy-1", Box::new(ActionHeavyStrategy)),
                CapturingPlayer::new("ActionHeavy-2", Box::new(ActionHeavyStrategy)),
            ],
            Lineup::Mixed => vec![
                CapturingPlayer::new("BigMoney", Box::new(BigMoneyStrategy)),
                CapturingPlayer::new("ActionHeavy", Box::new(ActionHeavyStrategy)),
                CapturingPlayer::new("Passive", Box::new(PassiveStrategy)),
            ],
            Lineup::RandomQuartet => (1..=4)
                .map(|seat| {
                    let rng = seeds.rng(SeedStream::RandomAgent, game_index, seat);
                    CapturingPlayer::new(
                        format!("Random-{seat}"),
                        Box::new(RandomLegalStrategy::from_rng(rng)),
                    )
                })
                .collect(),
            Lineup::PassivePair => vec![
                CapturingPlayer::new("Passive-1", Box::new(PassiveStrategy)),
                CapturingPlayer::new("Passive-2", Box::new(PassiveStrategy)),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Adversarial outcome
// ---------------------------------------------------------------------------

/// What happened when the fault-injection agent played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdversarialOutcome {
    pub game_index: usize,
    /// Decision calls the fault-injection agent received.
    pub calls: u32,
    /// The engine's failure, if it raised one.
    pub failure: Option<EngineError>,
}

impl AdversarialOutcome {
    /// Any failure counts; only silent acceptance is a violation.
    pub fn passed(&self) -> bool {
        self.failure.is_some()
    }

    pub fn violation(&self) -> Option<Violation> {
        if self.passed() {
            return None;
        }
        Some(Violation::new(
            CheckName::MoveLegality,
            self.game_index,
            "engine silently accepted an illegal decision",
        ))
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// Drives one engine factory through a full verification run.
pub struct Harness {
    factory: Arc<dyn EngineFactory>,
    config: HarnessConfig,
    seeds: SeedDeriver,
}

impl Harness {
    pub fn new(factory: Arc<dyn EngineFactory>, config: HarnessConfig) -> Self {
        let seeds = SeedDeriver::new(config.seed);
        Self {
            factory,
            config,
            seeds,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Ten of the fifteen action types, drawn without replacement.
    pub fn select_action_cards(&self, game_index: usize) -> Vec<CardType> {
        let mut rng = self.seeds.rng(SeedStream::ActionCards, game_index, 0);
        let mut pool = CardType::ACTIONS.to_vec();
        pool.shuffle(&mut rng);
        pool.truncate(KINGDOM_SIZE);
        pool
    }

    fn build_engine(
        &self,
        game_index: usize,
        players: Vec<Box<dyn Player>>,
    ) -> Result<Box<dyn Engine>> {
        let kingdom = self.select_action_cards(game_index);
        let action_cards = self
            .factory
            .supports_action_cards()
            .then_some(kingdom.as_slice());
        if action_cards.is_none() {
            debug!(game = game_index, "engine picks its own kingdom");
        }
        self.factory
            .create(players, action_cards)
            .map_err(|source| VerifierError::EngineConstruction { game_index, source })
    }

    /// Play one normal game and package its trace.
    ///
    /// In-game failures are captured in the trace. Only construction
    /// failures are returned as errors.
    pub fn run_game(&self, game_index: usize) -> Result<GameTrace> {
        let lineup = Lineup::for_game(game_index);
        let _span = GameSpan::enter(game_index, lineup.label());

        let agents = lineup.agents(&self.seeds, game_index);
        let num_players = agents.len();
        let logs: Vec<(String, DecisionLog)> = agents
            .iter()
            .map(|a| (a.name().to_string(), a.log()))
            .collect();
        let players: Vec<Box<dyn Player>> = agents
            .into_iter()
            .map(|a| Box::new(a) as Box<dyn Player>)
            .collect();

        let mut engine = self.build_engine(game_index, players)?;
        let recorder = EventRecorder::new(game_index);
        engine.set_observer(Box::new(recorder.handle()));
        let outcome = engine.play();
        drop(engine);

        let (result, failure) = match outcome {
            Ok(result) => (Some(result), None),
            Err(err) => (None, Some(err)),
        };
        let trace = GameTrace {
            game_index,
            num_players,
            events: recorder.events(),
            decisions: logs
                .into_iter()
                .map(|(name, log)| (name, log.snapshot()))
                .collect(),
            result,
            failure,
        };

        METRICS.inc_games_played();
        obs::emit_game_finished(&trace);
        obs::emit_trace_digest(game_index, &trace.digest()?);
        Ok(trace)
    }

    /// Play the fault-injection agent against one honest BigMoney agent.
    pub fn run_adversarial_game(&self, game_index: usize) -> Result<AdversarialOutcome> {
        let _span = GameSpan::enter(game_index, "adversarial");

        let cheater = FaultInjectionPlayer::default();
        let calls = cheater.call_counter();
        let honest = CapturingPlayer::new("Honest", Box::new(BigMoneyStrategy));
        let players: Vec<Box<dyn Player>> = vec![Box::new(cheater), Box::new(honest)];

        let mut engine = self.build_engine(game_index, players)?;
        engine.set_observer(Box::new(EventRecorder::new(game_index)));
        let failure = engine.play().err();
        drop(engine);

        let outcome = AdversarialOutcome {
            game_index,
            calls: calls.load(std::sync::atomic::Ordering::SeqCst),
            failure,
        };
        let detail = outcome
            .failure
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        obs::emit_adversarial_outcome(game_index, outcome.passed(), &detail);
        Ok(outcome)
    }

    /// Play every normal game in order.
    pub fn play_games(&self) -> Result<Vec<GameTrace>> {
        (0..self.config.games).map(|i| self.run_game(i)).collect()
    }

    /// Run the full verification: normal games, adversarial game, checks.
    pub async fn verify(&self) -> Result<VerificationResult> {
        let started = Instant::now();
        obs::emit_run_started(self.config.games, self.config.seed);

        let traces = self.play_games()?;
        let adversarial = self.run_adversarial_game(self.config.games)?;
        let per_game = check_traces(&traces, self.config.parallel_checks).await?;

        let mut violations = Vec::new();
        let mut games_passed = 0;
        for (trace, found) in traces.iter().zip(per_game) {
            if found.is_empty() && trace.completed_successfully() {
                games_passed += 1;
            }
            if self.config.verbose && !found.is_empty() {
                obs::emit_trace_dump(trace);
            }
            found.iter().for_each(obs::emit_violation);
            violations.extend(found);
        }
        match adversarial.violation() {
            Some(v) => {
                obs::emit_violation(&v);
                violations.push(v);
            }
            None => games_passed += 1,
        }

        METRICS.add_violations(violations.len() as u64);
        let result = VerificationResult {
            games_attempted: self.config.games + 1,
            games_passed,
            violations,
        };
        obs::emit_run_finished(
            result.games_attempted,
            result.games_passed,
            result.violations.len(),
            started.elapsed().as_millis() as u64,
        );
        METRICS.flush();
        Ok(result)
    }
}

/// Check each trace, keeping input order.
///
/// With `parallel` set, every trace is checked on the blocking pool and the
/// results are joined in order.
pub async fn check_traces(traces: &[GameTrace], parallel: bool) -> Result<Vec<Vec<Violation>>> {
    if !parallel {
        return Ok(traces.iter().map(checker::check).collect());
    }
    info!(traces = traces.len(), "checking traces in parallel");
    let tasks = traces
        .iter()
        .cloned()
        .map(|trace| tokio::task::spawn_blocking(move || checker::check(&trace)));
    join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.map_err(VerifierError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::ReferenceEngineFactory;

    fn harness(config: HarnessConfig) -> Harness {
        Harness::new(Arc::new(ReferenceEngineFactory::new()), config)
    }

    #[test]
    fn test_lineups_cycle_by_game_index() {
        assert_eq!(Lineup::for_game(0), Lineup::BigMoneyPair);
        assert_eq!(Lineup::for_game(3), Lineup::RandomQuartet);
        assert_eq!(Lineup::for_game(9), Lineup::PassivePair);
        assert_eq!(Lineup::for_game(10), Lineup::BigMoneyPair);
    }

    #[test]
    fn test_lineup_agent_names() {
        let seeds = SeedDeriver::new(42);
        let names = |l: Lineup| -> Vec<String> {
            l.agents(&seeds, 0)
                .iter()
                .map(|a| a.name().to_string())
                .collect()
        };
        assert_eq!(names(Lineup::Mixed), vec!["BigMoney", "ActionHeavy", "Passive"]);
        assert_eq!(
            names(Lineup::RandomQuartet),
            vec!["Random-1", "Random-2", "Random-3", "Random-4"]
        );
        assert_eq!(names(Lineup::PassivePair), vec!["Passive-1", "Passive-2"]);
    }

    #[test]
    fn test_kingdom_is_ten_distinct_actions_and_reproducible() {
        let h = harness(HarnessConfig::default());
        let kingdom = h.select_action_cards(4);
        let mut sorted = kingdom.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), KINGDOM_SIZE);
        assert!(kingdom.iter().all(|t| CardType::ACTIONS.contains(t)));
        assert_eq!(kingdom, h.select_action_cards(4));
    }

    #[test]
    fn test_run_game_packages_trace() {
        let h = harness(HarnessConfig::default());
        let trace = h.run_game(0).expect("run game");
        assert!(trace.completed_successfully());
        assert_eq!(trace.num_players, 2);
        assert_eq!(
            trace.decisions.keys().cloned().collect::<Vec<_>>(),
            vec!["BigMoney-1".to_string(), "BigMoney-2".to_string()]
        );
        assert!(trace.decision_count() > 0);
        assert!(checker::check(&trace).is_empty());
    }

    #[test]
    fn test_adversary_fails_on_third_call() {
        let h = harness(HarnessConfig::default());
        let outcome = h.run_adversarial_game(10).expect("adversarial game");
        assert!(outcome.passed());
        assert_eq!(outcome.calls, 3);
        assert!(matches!(
            outcome.failure,
            Some(EngineError::PlayerViolation { ref player, .. }) if player == "Cheater"
        ));
        assert!(outcome.violation().is_none());
    }

    #[tokio::test]
    async fn test_parallel_and_sequential_checks_agree() {
        let h = harness(HarnessConfig::default().with_games(5));
        let mut traces = h.play_games().expect("play");
        if let Some(r) = traces[1].result.as_mut() {
            r.player_results[0].score += 10;
        }
        let parallel = check_traces(&traces, true).await.expect("parallel");
        let sequential = check_traces(&traces, false).await.expect("sequential");
        assert_eq!(parallel, sequential);
        assert!(parallel[0].is_empty());
        assert!(!parallel[1].is_empty());
    }
}
