//! Per-turn quality metrics over the curated result set.

use std::collections::HashSet;

use crate::types::{CurationAudit, DropReason, MergedResult, SecurityStatus, TurnMetrics};

/// Compute coverage, authority and security summaries for a finished turn.
///
/// `redundancy_score` is reported as a constant `1.0`; duplicates are
/// already gone by the time this runs and no rate is measured.
pub fn compute_metrics(results: &[MergedResult], audit: &CurationAudit) -> TurnMetrics {
    let count = results.len();
    let hosts: HashSet<&str> = results.iter().map(|r| r.hostname.as_str()).collect();

    TurnMetrics {
        result_count: count,
        coverage_score: hosts.len() as f64 / count.max(1) as f64,
        avg_authority_score: mean(results.iter().map(|r| r.trust_tier.authority_score())),
        avg_security_score: mean(results.iter().map(|r| r.security_score)),
        redundancy_score: 1.0,
        suspicious_count: results
            .iter()
            .filter(|r| r.security_status == SecurityStatus::Suspicious)
            .count(),
        blocked_count: audit.count(DropReason::Blocked),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}
