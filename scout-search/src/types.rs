//! Core types for research actions, retrieval queries and ranked results.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BackendKind;

/// A named retrieval or verification strategy chosen from query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResearchAction {
    /// Always emitted first: decompose the question.
    Plan,
    /// Restrict retrieval to recent material.
    UpdateCheck,
    /// Compare two or more alternatives side by side.
    Contrastive,
    /// Follow implications across several retrieval hops.
    MultiHop,
    /// Combined sparse + dense retrieval. Always planned.
    HybridSearch,
    /// Retrieval restricted to a product's own documentation sites.
    FocusedSearch,
    /// Verify claims against authoritative references.
    FactCheck,
    /// Audit the provenance of the sources found.
    SourceAudit,
    /// Broad, recall-oriented browsing. Always planned last.
    ExploratoryBrowse,
}

impl ResearchAction {
    /// Returns the stable kebab-case identifier of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::UpdateCheck => "update-check",
            Self::Contrastive => "contrastive",
            Self::MultiHop => "multi-hop",
            Self::HybridSearch => "hybrid-search",
            Self::FocusedSearch => "focused-search",
            Self::FactCheck => "fact-check",
            Self::SourceAudit => "source-audit",
            Self::ExploratoryBrowse => "exploratory-browse",
        }
    }
}

impl fmt::Display for ResearchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time window restricting retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    /// The last twelve months.
    PastYear,
}

/// Structured retrieval query handed to both backends.
///
/// Built once per turn by [`crate::query_builder::build_query`] and never
/// modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// The sanitised free text the query was built from.
    pub text: String,
    /// Terms every result should contain. Ordered, no duplicates.
    pub must_keywords: Vec<String>,
    /// Terms that should boost a result when present.
    pub should_keywords: Vec<String>,
    /// Terms results must not contain.
    pub excluded_keywords: Vec<String>,
    /// Hostnames retrieval is restricted to. Ordered, no duplicates.
    pub site_filters: Vec<String>,
    /// Optional recency window.
    pub time_range: Option<TimeRange>,
}

/// A single result as returned by an injected retrieval backend.
///
/// Backends supply only their own score field. Adapters that emit a
/// generic `score` (or `confidence`) are accepted too; the generic value
/// is attributed to whichever backend returned the result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawBackendResult {
    /// Stable document id. Falls back to `url` when absent.
    pub id: Option<String>,
    /// Document URL.
    pub url: String,
    /// Document title.
    pub title: String,
    /// Short text excerpt.
    pub snippet: String,
    /// Keyword relevance score, set by the keyword backend.
    pub sparse_score: Option<f64>,
    /// Embedding similarity score, set by the dense backend.
    pub dense_score: Option<f64>,
    /// Untyped score from loosely shaped adapters.
    #[serde(alias = "confidence")]
    pub score: Option<f64>,
    /// Publication date as an ISO-8601 string.
    pub published_date: Option<String>,
}

impl RawBackendResult {
    /// The merge key: `id` when present and non-empty, else `url`.
    pub fn key(&self) -> &str {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => &self.url,
        }
    }

    /// The score this result carries for `backend`, non-finite values
    /// coerced to `0.0`.
    pub fn score_for(&self, backend: BackendKind) -> f64 {
        let typed = match backend {
            BackendKind::Keyword => self.sparse_score,
            BackendKind::Dense => self.dense_score,
        };
        finite_or_zero(typed.or(self.score).unwrap_or(0.0))
    }
}

/// Coarse reliability classification of a hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrustTier {
    /// Reference sources: encyclopedias, preprint servers, standards bodies.
    Authoritative,
    /// Vendor documentation and well-moderated communities.
    HighTrust,
    /// Anything else with a parseable hostname.
    OpenWeb,
    /// The hostname could not be extracted.
    Unknown,
}

impl TrustTier {
    /// Authority factor used in final scoring.
    pub fn authority_score(&self) -> f64 {
        match self {
            Self::Authoritative => 1.0,
            Self::HighTrust => 0.8,
            Self::OpenWeb => 0.5,
            Self::Unknown => 0.3,
        }
    }
}

/// Heuristic URL safety verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityStatus {
    Clean,
    Suspicious,
    Blocked,
}

/// Canonical per-document record flowing through fusion and curation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedResult {
    /// Merge key (explicit id or URL).
    pub id: String,
    pub url: String,
    pub title: String,
    pub snippet: String,
    /// Lower-cased hostname, empty when the URL does not parse.
    pub hostname: String,
    /// Keyword score, `0.0` when the keyword backend did not return this document.
    pub sparse_score: f64,
    /// Dense score, `0.0` when the dense backend did not return this document.
    pub dense_score: f64,
    /// Reciprocal Rank Fusion component of `hybrid_score`.
    pub rrf_score: f64,
    /// Weighted sum plus RRF. Not normalised.
    pub hybrid_score: f64,
    pub trust_tier: TrustTier,
    pub security_status: SecurityStatus,
    pub security_score: f64,
    /// Multi-factor score the output is sorted by.
    pub final_score: f64,
    pub published_date: Option<String>,
}

impl MergedResult {
    /// Create a record from the first backend occurrence of `raw`, with
    /// all derived fields at their defaults.
    pub fn from_raw(raw: &RawBackendResult, hostname: String) -> Self {
        Self {
            id: raw.key().to_owned(),
            url: raw.url.clone(),
            title: raw.title.clone(),
            snippet: raw.snippet.clone(),
            hostname,
            sparse_score: 0.0,
            dense_score: 0.0,
            rrf_score: 0.0,
            hybrid_score: 0.0,
            trust_tier: TrustTier::Unknown,
            security_status: SecurityStatus::Clean,
            security_score: 1.0,
            final_score: 0.0,
            published_date: raw.published_date.clone(),
        }
    }
}

/// Why the curator removed a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DropReason {
    /// The URL failed the security gate.
    Blocked,
    /// Same `(url, title)` as an earlier result.
    Duplicate,
    /// Its hostname had already reached `max_per_domain`.
    DomainCap,
}

/// A result removed during curation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedResult {
    pub id: String,
    pub url: String,
    pub reason: DropReason,
}

/// Everything the curator removed, in removal order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurationAudit {
    pub dropped: Vec<DroppedResult>,
}

impl CurationAudit {
    /// Number of dropped results with the given reason.
    pub fn count(&self, reason: DropReason) -> usize {
        self.dropped.iter().filter(|d| d.reason == reason).count()
    }
}

/// Quality summary for one completed turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnMetrics {
    pub result_count: usize,
    /// Distinct hostnames per result.
    pub coverage_score: f64,
    pub avg_authority_score: f64,
    pub avg_security_score: f64,
    /// Always `1.0`: duplicates are removed before metrics are computed,
    /// so no redundancy rate is measured.
    pub redundancy_score: f64,
    /// Final results flagged suspicious.
    pub suspicious_count: usize,
    /// Results removed by the security gate.
    pub blocked_count: usize,
}

/// The value returned by one research turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchTurnOutput {
    /// Unique per turn.
    pub request_id: String,
    /// The sanitised query.
    pub query: String,
    pub actions_planned: Vec<ResearchAction>,
    /// The action the retrieval query was built from.
    pub primary_action: ResearchAction,
    pub search_query: SearchQuery,
    /// Sorted descending by `final_score`.
    pub results: Vec<MergedResult>,
    pub metrics: TurnMetrics,
    pub audit: CurationAudit,
}

/// Returns `value` if it is finite, otherwise `0.0`.
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_display_matches_kebab_ids() {
        assert_eq!(ResearchAction::Plan.to_string(), "plan");
        assert_eq!(ResearchAction::UpdateCheck.to_string(), "update-check");
        assert_eq!(ResearchAction::MultiHop.to_string(), "multi-hop");
        assert_eq!(
            ResearchAction::ExploratoryBrowse.to_string(),
            "exploratory-browse"
        );
    }

    #[test]
    fn action_serializes_as_kebab_case() {
        let json = serde_json::to_string(&ResearchAction::FactCheck).expect("serialize");
        assert_eq!(json, "\"fact-check\"");
    }

    #[test]
    fn time_range_serializes_as_past_year() {
        let json = serde_json::to_string(&TimeRange::PastYear).expect("serialize");
        assert_eq!(json, "\"past_year\"");
    }

    #[test]
    fn raw_result_key_falls_back_to_url() {
        let mut raw = RawBackendResult {
            url: "https://example.com/a".into(),
            ..Default::default()
        };
        assert_eq!(raw.key(), "https://example.com/a");

        raw.id = Some(String::new());
        assert_eq!(raw.key(), "https://example.com/a");

        raw.id = Some("doc-1".into());
        assert_eq!(raw.key(), "doc-1");
    }

    #[test]
    fn raw_result_decodes_camel_case_wire_shape() {
        let raw: RawBackendResult = serde_json::from_str(
            r#"{"id":"a","url":"https://a.com","title":"A","sparseScore":0.9,"publishedDate":"2025-01-02"}"#,
        )
        .expect("deserialize");
        assert_eq!(raw.sparse_score, Some(0.9));
        assert_eq!(raw.published_date.as_deref(), Some("2025-01-02"));
        assert!(raw.snippet.is_empty());
    }

    #[test]
    fn generic_confidence_is_attributed_to_owning_backend() {
        let raw: RawBackendResult =
            serde_json::from_str(r#"{"url":"https://a.com","confidence":0.4}"#).expect("deserialize");
        assert!((raw.score_for(BackendKind::Dense) - 0.4).abs() < f64::EPSILON);
        assert!((raw.score_for(BackendKind::Keyword) - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn typed_score_wins_over_generic() {
        let raw = RawBackendResult {
            url: "https://a.com".into(),
            dense_score: Some(0.7),
            score: Some(0.1),
            ..Default::default()
        };
        assert!((raw.score_for(BackendKind::Dense) - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn non_finite_scores_become_zero() {
        let raw = RawBackendResult {
            url: "https://a.com".into(),
            sparse_score: Some(f64::NAN),
            dense_score: Some(f64::INFINITY),
            ..Default::default()
        };
        assert_eq!(raw.score_for(BackendKind::Keyword), 0.0);
        assert_eq!(raw.score_for(BackendKind::Dense), 0.0);
    }

    #[test]
    fn authority_scores_per_tier() {
        assert!((TrustTier::Authoritative.authority_score() - 1.0).abs() < f64::EPSILON);
        assert!((TrustTier::HighTrust.authority_score() - 0.8).abs() < f64::EPSILON);
        assert!((TrustTier::OpenWeb.authority_score() - 0.5).abs() < f64::EPSILON);
        assert!((TrustTier::Unknown.authority_score() - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn trust_tier_serializes_as_kebab_case() {
        let json = serde_json::to_string(&TrustTier::HighTrust).expect("serialize");
        assert_eq!(json, "\"high-trust\"");
    }

    #[test]
    fn audit_counts_by_reason() {
        let audit = CurationAudit {
            dropped: vec![
                DroppedResult {
                    id: "a".into(),
                    url: "https://a.zip".into(),
                    reason: DropReason::Blocked,
                },
                DroppedResult {
                    id: "b".into(),
                    url: "https://b.com".into(),
                    reason: DropReason::Duplicate,
                },
            ],
        };
        assert_eq!(audit.count(DropReason::Blocked), 1);
        assert_eq!(audit.count(DropReason::DomainCap), 0);
    }
}
