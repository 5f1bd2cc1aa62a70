//! Result curation: security filter, dedup, per-domain cap, final score, sort.
//!
//! Steps run in a fixed order over the ingestion order of the merged
//! results:
//!
//! 1. drop results whose security status is `blocked`
//! 2. drop later results sharing an earlier result's `(url, title)`
//! 3. drop results past `max_per_domain` for their hostname
//! 4. compute the five-factor final score
//! 5. stable sort, descending by final score
//!
//! Capping happens before the sort, so the kept results for a host are
//! its first `max_per_domain` in input order, not its best-scoring ones.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::config::{ResearchConfig, ScoringWeights};
use crate::types::{CurationAudit, DropReason, DroppedResult, MergedResult, SecurityStatus};

/// Diversity factor applied to every result. Not computed against the
/// result set.
pub const DIVERSITY_PLACEHOLDER: f64 = 0.5;

/// Recency factor for a result with no usable publication date.
pub const RECENCY_UNKNOWN: f64 = 0.5;

/// Curate merged, fused and classified results into the final ranking.
///
/// Returns the sorted survivors and an audit of everything dropped.
pub fn curate(
    results: Vec<MergedResult>,
    config: &ResearchConfig,
    now: DateTime<Utc>,
) -> (Vec<MergedResult>, CurationAudit) {
    let mut audit = CurationAudit::default();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut per_host: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<MergedResult> = Vec::with_capacity(results.len());

    for result in results {
        if result.security_status == SecurityStatus::Blocked {
            audit.dropped.push(dropped(&result, DropReason::Blocked));
            continue;
        }
        if !seen.insert((result.url.clone(), result.title.clone())) {
            audit.dropped.push(dropped(&result, DropReason::Duplicate));
            continue;
        }
        let count = per_host.entry(result.hostname.clone()).or_insert(0);
        if *count >= config.max_per_domain {
            audit.dropped.push(dropped(&result, DropReason::DomainCap));
            continue;
        }
        *count += 1;
        kept.push(result);
    }

    for result in &mut kept {
        result.final_score = final_score(result, &config.scoring_weights, now);
    }
    kept.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal)
    });

    tracing::debug!(
        kept = kept.len(),
        blocked = audit.count(DropReason::Blocked),
        duplicates = audit.count(DropReason::Duplicate),
        capped = audit.count(DropReason::DomainCap),
        "curated results"
    );
    (kept, audit)
}

fn dropped(result: &MergedResult, reason: DropReason) -> DroppedResult {
    DroppedResult {
        id: result.id.clone(),
        url: result.url.clone(),
        reason,
    }
}

/// Weighted sum of relevance, authority, recency, diversity and security.
pub fn final_score(result: &MergedResult, weights: &ScoringWeights, now: DateTime<Utc>) -> f64 {
    let relevance = result.hybrid_score;
    let authority = result.trust_tier.authority_score();
    let recency = recency_score(result.published_date.as_deref(), now);
    let diversity = DIVERSITY_PLACEHOLDER;
    let security = result.security_score;

    weights.relevance * relevance
        + weights.authority * authority
        + weights.recency * recency
        + weights.diversity * diversity
        + weights.security * security
}

/// Bucketed recency factor from a publication date's age.
///
/// | age            | score |
/// |----------------|-------|
/// | ≤ 30 days      | 1.0   |
/// | ≤ 365 days     | 0.8   |
/// | ≤ 730 days     | 0.6   |
/// | older          | 0.3   |
/// | missing/invalid| 0.5   |
///
/// Ages are compared exactly, so 30 days and one hour is past the first
/// bucket. Dates in the future count as fresh.
pub fn recency_score(published: Option<&str>, now: DateTime<Utc>) -> f64 {
    let Some(published) = published.and_then(parse_published) else {
        return RECENCY_UNKNOWN;
    };
    let age = now - published;
    if age <= Duration::days(30) {
        1.0
    } else if age <= Duration::days(365) {
        0.8
    } else if age <= Duration::days(730) {
        0.6
    } else {
        0.3
    }
}

/// Parse RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC),
/// or plain `YYYY-MM-DD` dates.
fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
