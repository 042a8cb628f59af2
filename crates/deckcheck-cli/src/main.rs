//! deckcheck - conformance verifier CLI
//!
//! ## Commands
//!
//! - `verify`: run the scripted games against an engine and report violations
//! - `engines`: list the engines this binary can build
//!
//! `verify` exits with status 1 when the engine is non-compliant.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use deckcheck_core::reporting::{format_report, write_report_json, VerificationArtifact};
use deckcheck_core::{Harness, HarnessConfig, VerificationSpan};

mod engines;

#[derive(Parser)]
#[command(name = "deckcheck")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Conformance verifier for deck-building game engines", long_about = None)]
struct Cli {
    /// Enable verbose output (also dumps every game trace)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify an engine against the rules contract
    Verify {
        /// Engine name (see `deckcheck engines`)
        engine: String,

        /// Number of scripted games, not counting the adversarial one
        #[arg(short, long)]
        games: Option<usize>,

        /// Root seed for kingdoms and random agents
        #[arg(short, long, env = "DECKCHECK_SEED")]
        seed: Option<u64>,

        /// TOML config file; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write a JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Check traces one after another instead of in parallel
        #[arg(long)]
        sequential: bool,
    },

    /// List available engines
    Engines,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    deckcheck_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Verify {
            engine,
            games,
            seed,
            config,
            output,
            sequential,
        } => {
            let overrides = Overrides {
                games,
                seed,
                verbose: cli.verbose,
                sequential,
            };
            let config = resolve_config(config.as_deref(), &overrides)?;
            let compliant = cmd_verify(&engine, config, output.as_deref()).await?;
            if !compliant {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Engines => {
            cmd_engines();
            Ok(())
        }
    }
}

struct Overrides {
    games: Option<usize>,
    seed: Option<u64>,
    verbose: bool,
    sequential: bool,
}

fn resolve_config(path: Option<&Path>, overrides: &Overrides) -> Result<HarnessConfig> {
    let mut config = match path {
        Some(path) => HarnessConfig::load(path)
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => HarnessConfig::default(),
    };
    if let Some(games) = overrides.games {
        config = config.with_games(games);
    }
    if let Some(seed) = overrides.seed {
        config = config.with_seed(seed);
    }
    if overrides.verbose {
        config = config.with_verbose(true);
    }
    if overrides.sequential {
        config = config.with_parallel_checks(false);
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

async fn cmd_verify(engine: &str, config: HarnessConfig, output: Option<&Path>) -> Result<bool> {
    let factory = engines::lookup(engine)?;
    let seed = config.seed;
    let _span = VerificationSpan::enter(engine, seed);

    let result = Harness::new(factory, config)
        .verify()
        .await
        .with_context(|| format!("Verification of engine {engine:?} aborted"))?;

    print!("{}", format_report(&result, engine));

    if let Some(path) = output {
        let artifact = VerificationArtifact::new(engine, seed, &result);
        write_report_json(path, &artifact)?;
        info!(path = %path.display(), run_id = %artifact.run_id, "report written");
    }

    Ok(result.is_compliant())
}

fn cmd_engines() {
    for entry in engines::ENGINES {
        println!("{:<20} {}", entry.name, entry.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckcheck_core::EngineFactory;

    fn no_overrides() -> Overrides {
        Overrides {
            games: None,
            seed: None,
            verbose: false,
            sequential: false,
        }
    }

    #[test]
    fn test_cli_parses_verify_flags() {
        let cli = Cli::try_parse_from([
            "deckcheck", "-v", "verify", "reference", "--games", "3", "--seed", "7", "--sequential",
        ])
        .expect("parse");
        assert!(cli.verbose);
        match cli.command {
            Commands::Verify {
                engine,
                games,
                seed,
                sequential,
                ..
            } => {
                assert_eq!(engine, "reference");
                assert_eq!(games, Some(3));
                assert_eq!(seed, Some(7));
                assert!(sequential);
            }
            Commands::Engines => panic!("expected verify"),
        }
    }

    #[test]
    fn test_defaults_without_config_file() {
        let config = resolve_config(None, &no_overrides()).expect("config");
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("deckcheck.toml");
        std::fs::write(&path, "games = 4\nseed = 9\n").expect("write");

        let config = resolve_config(Some(&path), &no_overrides()).expect("file only");
        assert_eq!(config.games, 4);
        assert_eq!(config.seed, 9);

        let overrides = Overrides {
            games: Some(2),
            verbose: true,
            sequential: true,
            ..no_overrides()
        };
        let config = resolve_config(Some(&path), &overrides).expect("with flags");
        assert_eq!(config.games, 2);
        assert_eq!(config.seed, 9);
        assert!(config.verbose);
        assert!(!config.parallel_checks);
    }

    #[test]
    fn test_zero_games_rejected() {
        let overrides = Overrides {
            games: Some(0),
            ..no_overrides()
        };
        assert!(resolve_config(None, &overrides).is_err());
    }

    #[test]
    fn test_lookup_known_and_unknown_engines() {
        for entry in engines::ENGINES {
            assert!(engines::lookup(entry.name).is_ok(), "{}", entry.name);
        }
        let err = engines::lookup("nope").err().expect("unknown engine");
        assert!(err.to_string().contains("reference-lenient"));
    }

    #[test]
    fn test_legacy_engine_only_takes_players() {
        let factory = engines::lookup("reference-legacy").expect("legacy");
        assert!(!factory.supports_action_cards());
        assert!(engines::lookup("reference")
            .expect("reference")
            .supports_action_cards());
    }

    #[tokio::test]
    async fn test_verify_writes_report() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.json");
        let config = HarnessConfig::default().with_games(2);

        let compliant = cmd_verify("reference", config, Some(&path))
            .await
            .expect("verify");
        assert!(compliant);

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(report["engine"], "reference");
        assert_eq!(report["summary"]["games_attempted"], 3);
        assert_eq!(report["summary"]["compliant"], true);
    }

    #[tokio::test]
    async fn test_lenient_engine_is_not_compliant() {
        let config = HarnessConfig::default().with_games(2);
        let compliant = cmd_verify("reference-lenient", config, None)
            .await
            .expect("verify");
        assert!(!compliant);
    }
}
