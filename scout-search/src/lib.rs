//! # scout-search
//!
//! Hybrid retrieval and ranking orchestrator for one research turn.
//!
//! A turn takes a raw user query and two injected retrieval backends
//! (keyword and dense) and produces a curated, ranked, security-filtered
//! result list with quality metrics. The crate owns no index and opens no
//! sockets; backends are plain trait objects supplied by the caller.
//!
//! ## Design
//!
//! - Sanitizes the query, then plans research actions with fixed rules
//! - Builds one structured [`SearchQuery`] from the primary action
//! - Queries both backends concurrently; either failure fails the turn
//! - Fuses scores with a weighted sum plus Reciprocal Rank Fusion
//! - Classifies every URL by trust tier and security status
//! - Drops blocked results, dedupes, caps per domain, ranks by a
//!   five-factor final score
//!
//! ## Security
//!
//! - Script, iframe, object and embed markup is stripped from the query
//! - Blocked TLDs never reach the output
//! - Query text is logged only at trace level

pub mod backend;
pub mod config;
pub mod error;
pub mod explore;
pub mod orchestrator;
pub mod planner;
pub mod policy;
pub mod query_builder;
pub mod sanitize;
pub mod types;

use chrono::{DateTime, Utc};

pub use backend::{backend_fn, RetrievalBackend, StaticBackend};
pub use config::{ConfigOverride, ResearchConfig};
pub use error::{BackendKind, ResearchError, Result};
pub use explore::ExploratoryCandidate;
pub use types::{
    CurationAudit, DropReason, DroppedResult, MergedResult, RawBackendResult, ResearchAction,
    ResearchTurnOutput, SearchQuery, SecurityStatus, TimeRange, TrustTier, TurnMetrics,
};

/// Run one research turn with the default configuration, optionally
/// overridden.
///
/// Fields present in `overrides` replace the defaults; lists are
/// replaced, not appended.
///
/// # Errors
///
/// Returns [`ResearchError::Config`] if the merged configuration is
/// invalid (no backend is called in that case), or
/// [`ResearchError::Backend`] if either backend fails.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> scout_search::Result<()> {
/// use scout_search::{StaticBackend, research_turn};
///
/// let keyword = StaticBackend::default();
/// let dense = StaticBackend::default();
/// let out = research_turn("compare pgvector vs opensearch", &keyword, &dense, None).await?;
/// for result in &out.results {
///     println!("{:.3} {}", result.final_score, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn research_turn<K, D>(
    raw_query: &str,
    keyword: &K,
    dense: &D,
    overrides: Option<&ConfigOverride>,
) -> Result<ResearchTurnOutput>
where
    K: RetrievalBackend,
    D: RetrievalBackend,
{
    let base = ResearchConfig::default();
    let config = match overrides {
        Some(o) => base.merged(o),
        None => base,
    };
    research_turn_with_config(raw_query, keyword, dense, &config).await
}

/// Run one research turn with a fully specified configuration.
///
/// # Errors
///
/// Same as [`research_turn`].
pub async fn research_turn_with_config<K, D>(
    raw_query: &str,
    keyword: &K,
    dense: &D,
    config: &ResearchConfig,
) -> Result<ResearchTurnOutput>
where
    K: RetrievalBackend,
    D: RetrievalBackend,
{
    research_turn_at(raw_query, keyword, dense, config, Utc::now()).await
}

/// [`research_turn_with_config`] with an explicit clock for recency scoring.
///
/// # Errors
///
/// Same as [`research_turn`].
pub async fn research_turn_at<K, D>(
    raw_query: &str,
    keyword: &K,
    dense: &D,
    config: &ResearchConfig,
    now: DateTime<Utc>,
) -> Result<ResearchTurnOutput>
where
    K: RetrievalBackend,
    D: RetrievalBackend,
{
    orchestrator::turn::run_turn(raw_query, keyword, dense, config, now).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn research_turn_validates_override_zero_max_per_domain() {
        let empty = StaticBackend::default();
        let overrides = ConfigOverride {
            max_per_domain: Some(0),
            ..Default::default()
        };
        let result = research_turn("test", &empty, &empty, Some(&overrides)).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("max_per_domain"));
    }

    #[tokio::test]
    async fn research_turn_validates_negative_weight() {
        let mut config = ResearchConfig::default();
        config.hybrid_weights.dense = -1.0;
        let empty = StaticBackend::default();
        let result = research_turn_with_config("test", &empty, &empty, &config).await;
        assert!(result.unwrap_err().to_string().contains("hybrid_weights.dense"));
    }

    #[tokio::test]
    async fn research_turn_with_no_results() {
        let empty = StaticBackend::default();
        let out = research_turn("", &empty, &empty, None)
            .await
            .expect("empty turn succeeds");
        assert!(out.results.is_empty());
        assert_eq!(out.query, "");
        assert!(out.actions_planned.contains(&ResearchAction::HybridSearch));
        assert_eq!(out.metrics.coverage_score, 0.0);
    }
}
