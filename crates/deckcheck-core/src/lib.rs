//! deckcheck Core Library
//!
//! Re-exports the components of the conformance verifier: the engine
//! boundary, decision strategies, instrumented agents, trace capture, the
//! invariant checker and the harness that ties them together.

pub mod adversary;
pub mod checker;
pub mod config;
pub mod domain;
pub mod engine;
pub mod fakes;
pub mod harness;
pub mod metrics;
pub mod obs;
pub mod player;
pub mod recording;
pub mod reporting;
pub mod seed;
pub mod strategy;
pub mod telemetry;
pub mod trace;
pub mod verdict;

pub use domain::{
    Card, CardType, Category, Decision, EngineError, Event, GameResult, GameState, Hand,
    PlayerResult, Result, Supply, TurnPhase, VerifierError,
};

pub use adversary::FaultInjectionPlayer;
pub use checker::check;
pub use config::HarnessConfig;
pub use engine::{Engine, EngineFactory, GameObserver, Player};
pub use harness::{check_traces, AdversarialOutcome, Harness, Lineup};
pub use metrics::METRICS;
pub use obs::{GameSpan, VerificationSpan};
pub use player::{CapturingPlayer, DecisionLog};
pub use recording::EventRecorder;
pub use reporting::{format_report, write_report_json, VerificationArtifact};
pub use seed::{SeedDeriver, SeedStream};
pub use strategy::{
    ActionHeavyStrategy, BigMoneyStrategy, DecisionStrategy, PassiveStrategy, RandomLegalStrategy,
};
pub use telemetry::init_tracing;
pub use trace::{DecisionRecord, GameTrace, ObservedEvent};
pub use verdict::{CheckName, VerificationResult, Violation};

/// deckcheck version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
