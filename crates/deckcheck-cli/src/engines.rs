//! Engines the CLI knows how to build, by name.

use anyhow::{bail, Result};
use std::sync::Arc;

use deckcheck_core::fakes::{Quirk, ReferenceEngineFactory};
use deckcheck_core::EngineFactory;

pub struct EngineEntry {
    pub name: &'static str,
    pub description: &'static str,
    build: fn() -> ReferenceEngineFactory,
}

pub const ENGINES: &[EngineEntry] = &[
    EngineEntry {
        name: "reference",
        description: "Deterministic reference engine",
        build: ReferenceEngineFactory::new,
    },
    EngineEntry {
        name: "reference-legacy",
        description: "Reference engine that only accepts the players-only constructor",
        build: legacy,
    },
    EngineEntry {
        name: "reference-lenient",
        description: "Reference engine that accepts decisions it never offered",
        build: lenient,
    },
];

fn legacy() -> ReferenceEngineFactory {
    ReferenceEngineFactory::new().players_only()
}

fn lenient() -> ReferenceEngineFactory {
    ReferenceEngineFactory::new().with_quirk(Quirk::AcceptIllegalDecisions)
}

/// Resolve an engine name to its factory.
pub fn lookup(name: &str) -> Result<Arc<dyn EngineFactory>> {
    match ENGINES.iter().find(|e| e.name == name) {
        Some(entry) => Ok(Arc::new((entry.build)())),
        None => {
            let known: Vec<&str> = ENGINES.iter().map(|e| e.name).collect();
            bail!(
                "unknown engine {:?}; available engines: {}",
                name,
                known.join(", ")
            )
        }
    }
}
