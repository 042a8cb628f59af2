//! Harness configuration, loadable from a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Result, VerifierError};

/// Root seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Number of normal games played when none is given.
pub const DEFAULT_GAMES: usize = 10;

/// Settings for one verification run.
///
/// Every field has a default, so an empty file is a valid config:
///
/// ```toml
/// games = 25
/// seed = 7
/// verbose = true
/// parallel_checks = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Normal games to play. The adversarial game is played in addition.
    pub games: usize,
    /// Root seed for kingdom selection and random agents.
    pub seed: u64,
    /// Dump the event trace of every game that produced violations.
    pub verbose: bool,
    /// Check completed traces on the blocking thread pool.
    pub parallel_checks: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            games: DEFAULT_GAMES,
            seed: DEFAULT_SEED,
            verbose: false,
            parallel_checks: true,
        }
    }
}

impl HarnessConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(VerifierError::Config(
                "games must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_parallel_checks(mut self, parallel_checks: bool) -> Self {
        self.parallel_checks = parallel_checks;
        self
    }
}
