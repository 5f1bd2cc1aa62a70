//! Core research turn: sanitize, plan, build, fan out, fuse, classify, curate.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::RetrievalBackend;
use crate::config::ResearchConfig;
use crate::error::ResearchError;
use crate::planner::{plan, primary_action};
use crate::policy::classify_results;
use crate::policy::security::SecurityRules;
use crate::query_builder::build_query;
use crate::sanitize::sanitize;
use crate::types::{ResearchAction, ResearchTurnOutput};

use super::curation::curate;
use super::fanout::{fan_out, ingest};
use super::fusion::fuse;
use super::metrics::compute_metrics;

/// Run one research turn against the given backends.
///
/// # Pipeline
///
/// 1. Validate `config` and compile its security patterns
/// 2. Sanitize the raw query and plan research actions
/// 3. Build one [`crate::SearchQuery`] from the primary action
/// 4. Query both backends concurrently and ingest into merged records
/// 5. Fuse scores (weighted sum + RRF)
/// 6. Classify trust tier and URL security
/// 7. Curate: drop blocked, dedupe, cap per domain, final score, sort
/// 8. Compute turn metrics
///
/// `now` anchors recency scoring.
///
/// # Errors
///
/// Returns [`ResearchError::Config`] before any backend is called if the
/// configuration is invalid, and [`ResearchError::Backend`] if either
/// backend fails.
pub async fn run_turn<K, D>(
    raw_query: &str,
    keyword: &K,
    dense: &D,
    config: &ResearchConfig,
    now: DateTime<Utc>,
) -> Result<ResearchTurnOutput, ResearchError>
where
    K: RetrievalBackend,
    D: RetrievalBackend,
{
    // 1. Reject bad configuration up front.
    config.validate()?;
    let rules = SecurityRules::compile(&config.security)?;

    // 2. Sanitize and plan.
    let request_id = Uuid::new_v4().to_string();
    let query = sanitize(raw_query);
    let actions = plan(&query);
    let primary = primary_action(&actions).unwrap_or(ResearchAction::HybridSearch);
    tracing::trace!(%request_id, %query, "sanitized research query");
    tracing::debug!(%request_id, %primary, planned = actions.len(), "research turn started");

    // 3. One structured query, from the primary action only.
    let search_query = build_query(&query, primary);

    // 4. Concurrent retrieval; either failure fails the turn.
    let sets = fan_out(
        &search_query,
        config.max_results_per_action,
        keyword,
        dense,
    )
    .await?;
    let mut merged = ingest(&sets);

    // 5–6. Fuse, then classify.
    fuse(&mut merged, &sets, config);
    classify_results(&mut merged, &config.trust_tiers, &rules);

    // 7. Curate into the final ranking.
    let (results, audit) = curate(merged, config, now);

    // 8. Metrics over what survived.
    let metrics = compute_metrics(&results, &audit);
    tracing::debug!(
        %request_id,
        results = metrics.result_count,
        coverage = metrics.coverage_score,
        "research turn finished"
    );

    Ok(ResearchTurnOutput {
        request_id,
        query,
        actions_planned: actions,
        primary_action: primary,
        search_query,
        results,
        metrics,
        audit,
    })
}
