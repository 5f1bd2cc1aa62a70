//! Host for the scout research core.
//!
//! Loads TOML configuration overrides and JSON fixture backends, then runs
//! research turns through [`scout_search`]. The `scout-turn` binary is a
//! thin wrapper around [`run_fixture_turn`].

pub mod error;
pub mod fixtures;
pub mod settings;

use std::path::Path;

pub use error::{HostError, Result};
pub use fixtures::FixtureSet;

use scout_search::ResearchTurnOutput;

/// Run one research turn against the fixture file at `fixtures`, using
/// the override file at `config` when given.
///
/// # Errors
///
/// Returns an error if either file cannot be loaded, the configuration is
/// invalid, or the turn fails.
pub async fn run_fixture_turn(
    query: &str,
    fixtures: &Path,
    config: Option<&Path>,
) -> Result<ResearchTurnOutput> {
    let config = settings::resolve_config(config)?;
    let (keyword, dense) = FixtureSet::from_file(fixtures)?.into_backends();
    let output =
        scout_search::research_turn_with_config(query, &keyword, &dense, &config).await?;
    Ok(output)
}
