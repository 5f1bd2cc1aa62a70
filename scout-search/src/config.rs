//! Research configuration with sensible defaults.
//!
//! [`ResearchConfig`] holds the static retrieval limits, fusion weights,
//! trust tables, security heuristics and scoring weights used by a turn.
//! Per-call changes go through [`ConfigOverride`], which is merged into a
//! fresh copy; a config value is never mutated while a turn runs.

use serde::{Deserialize, Serialize};

use crate::error::ResearchError;

/// Configuration for a research turn.
///
/// Use [`Default::default()`] for the standard tables, or
/// [`ResearchConfig::merged`] to apply a partial override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// Result limit passed to each backend call.
    pub max_results_per_action: usize,
    /// Maximum results kept per hostname after deduplication.
    pub max_per_domain: usize,
    /// Weights of the dense and sparse scores in the weighted sum.
    pub hybrid_weights: HybridWeights,
    /// Reciprocal Rank Fusion settings.
    pub rrf: RrfConfig,
    /// Hostname tables for trust classification.
    pub trust_tiers: TrustTiers,
    /// File extensions exploratory candidates may point at.
    pub content_types: Vec<String>,
    /// URL security heuristics.
    pub security: SecurityPolicy,
    /// Weights of the five final-score factors.
    pub scoring_weights: ScoringWeights,
}

/// Dense/sparse weights. Not required to sum to exactly 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridWeights {
    pub dense: f64,
    pub sparse: f64,
}

/// Reciprocal Rank Fusion parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RrfConfig {
    /// Smoothing constant. Higher `k` flattens the rank contribution curve.
    pub k: f64,
}

/// Ordered hostname tables; the first table that matches wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustTiers {
    pub authoritative: Vec<String>,
    #[serde(alias = "high-trust")]
    pub high_trust: Vec<String>,
}

/// Static URL security heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityPolicy {
    /// Top-level domains whose results are always blocked.
    #[serde(alias = "blockedTLDs")]
    pub blocked_tlds: Vec<String>,
    /// Regexes matched against the lower-cased URL (piracy-style terms).
    pub suspicious_query_patterns: Vec<String>,
    /// Regexes matched against the lower-cased URL (exposed admin/plugin paths).
    pub suspicious_path_patterns: Vec<String>,
}

/// Weights of the final-score factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub relevance: f64,
    pub authority: f64,
    pub recency: f64,
    pub diversity: f64,
    pub security: f64,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_results_per_action: 24,
            max_per_domain: 5,
            hybrid_weights: HybridWeights::default(),
            rrf: RrfConfig::default(),
            trust_tiers: TrustTiers::default(),
            content_types: strings(&["html", "htm", "pdf", "md", "txt", "json", "xml"]),
            security: SecurityPolicy::default(),
            scoring_weights: ScoringWeights::default(),
        }
    }
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            dense: 0.55,
            sparse: 0.45,
        }
    }
}

impl Default for RrfConfig {
    fn default() -> Self {
        Self { k: 60.0 }
    }
}

impl Default for TrustTiers {
    fn default() -> Self {
        Self {
            authoritative: strings(&[
                "arxiv.org",
                "wikipedia.org",
                "ieee.org",
                "acm.org",
                "nature.com",
                "nih.gov",
                "nist.gov",
                "ietf.org",
                "w3.org",
            ]),
            high_trust: strings(&[
                "learn.microsoft.com",
                "docs.oracle.com",
                "elastic.co",
                "postgresql.org",
                "opensearch.org",
                "github.com",
                "stackoverflow.com",
                "docs.rs",
                "rust-lang.org",
                "aws.amazon.com",
                "cloud.google.com",
            ]),
        }
    }
}

impl Default for SecurityPolicy {
    fn default() -> Self {
        Self {
            blocked_tlds: strings(&[
                "zip", "mov", "tk", "ml", "ga", "cf", "gq", "xyz", "top", "click", "work",
            ]),
            suspicious_query_patterns: strings(&[
                r"\bcrack(ed|s)?\b",
                r"\bkeygen\b",
                r"\bserial[-_ ]?(key|number)s?\b",
                r"\bnulled\b",
                r"\bwarez\b",
                r"\bactivation[-_ ]?bypass\b",
            ]),
            suspicious_path_patterns: strings(&[
                r"/wp-content/plugins/",
                r"/wp-admin/",
                r"/phpmyadmin/",
                r"/cgi-bin/",
                r"/\.env\b",
                r"/\.git/",
            ]),
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            relevance: 0.45,
            authority: 0.25,
            recency: 0.15,
            diversity: 0.10,
            security: 0.05,
        }
    }
}

impl ResearchConfig {
    /// Returns a copy of this configuration with every field present in
    /// `overrides` replaced. Lists are replaced wholesale, not appended.
    pub fn merged(&self, overrides: &ConfigOverride) -> Self {
        let mut out = self.clone();
        if let Some(v) = overrides.max_results_per_action {
            out.max_results_per_action = v;
        }
        if let Some(v) = overrides.max_per_domain {
            out.max_per_domain = v;
        }
        if let Some(w) = &overrides.hybrid_weights {
            out.hybrid_weights.dense = w.dense.unwrap_or(out.hybrid_weights.dense);
            out.hybrid_weights.sparse = w.sparse.unwrap_or(out.hybrid_weights.sparse);
        }
        if let Some(rrf) = &overrides.rrf {
            out.rrf.k = rrf.k.unwrap_or(out.rrf.k);
        }
        if let Some(t) = &overrides.trust_tiers {
            if let Some(v) = &t.authoritative {
                out.trust_tiers.authoritative = v.clone();
            }
            if let Some(v) = &t.high_trust {
                out.trust_tiers.high_trust = v.clone();
            }
        }
        if let Some(v) = &overrides.content_types {
            out.content_types = v.clone();
        }
        if let Some(s) = &overrides.security {
            if let Some(v) = &s.blocked_tlds {
                out.security.blocked_tlds = v.clone();
            }
            if let Some(v) = &s.suspicious_query_patterns {
                out.security.suspicious_query_patterns = v.clone();
            }
            if let Some(v) = &s.suspicious_path_patterns {
                out.security.suspicious_path_patterns = v.clone();
            }
        }
        if let Some(w) = &overrides.scoring_weights {
            let sw = &mut out.scoring_weights;
            sw.relevance = w.relevance.unwrap_or(sw.relevance);
            sw.authority = w.authority.unwrap_or(sw.authority);
            sw.recency = w.recency.unwrap_or(sw.recency);
            sw.diversity = w.diversity.unwrap_or(sw.diversity);
            sw.security = w.security.unwrap_or(sw.security);
        }
        out
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results_per_action` and `max_per_domain` must be greater than 0
    /// - every hybrid and scoring weight must be finite and non-negative
    /// - `rrf.k` must be finite and non-negative
    ///
    /// Security patterns are checked when they are compiled into
    /// [`crate::policy::security::SecurityRules`].
    pub fn validate(&self) -> Result<(), ResearchError> {
        if self.max_results_per_action == 0 {
            return Err(ResearchError::Config(
                "max_results_per_action must be greater than 0".into(),
            ));
        }
        if self.max_per_domain == 0 {
            return Err(ResearchError::Config(
                "max_per_domain must be greater than 0".into(),
            ));
        }
        let weights = [
            ("hybrid_weights.dense", self.hybrid_weights.dense),
            ("hybrid_weights.sparse", self.hybrid_weights.sparse),
            ("scoring_weights.relevance", self.scoring_weights.relevance),
            ("scoring_weights.authority", self.scoring_weights.authority),
            ("scoring_weights.recency", self.scoring_weights.recency),
            ("scoring_weights.diversity", self.scoring_weights.diversity),
            ("scoring_weights.security", self.scoring_weights.security),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ResearchError::Config(format!(
                    "{name} must be a finite non-negative number"
                )));
            }
        }
        if !self.rrf.k.is_finite() || self.rrf.k < 0.0 {
            return Err(ResearchError::Config(
                "rrf.k must be a finite non-negative number".into(),
            ));
        }
        Ok(())
    }
}

/// Partial configuration applied on top of a base [`ResearchConfig`].
///
/// Every field is optional; absent fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverride {
    pub max_results_per_action: Option<usize>,
    pub max_per_domain: Option<usize>,
    pub hybrid_weights: Option<HybridWeightsOverride>,
    pub rrf: Option<RrfOverride>,
    pub trust_tiers: Option<TrustTiersOverride>,
    pub content_types: Option<Vec<String>>,
    pub security: Option<SecurityPolicyOverride>,
    pub scoring_weights: Option<ScoringWeightsOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridWeightsOverride {
    pub dense: Option<f64>,
    pub sparse: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RrfOverride {
    pub k: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustTiersOverride {
    pub authoritative: Option<Vec<String>>,
    #[serde(alias = "high-trust")]
    pub high_trust: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityPolicyOverride {
    #[serde(alias = "blockedTLDs")]
    pub blocked_tlds: Option<Vec<String>>,
    pub suspicious_query_patterns: Option<Vec<String>>,
    pub suspicious_path_patterns: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeightsOverride {
    pub relevance: Option<f64>,
    pub authority: Option<f64>,
    pub recency: Option<f64>,
    pub diversity: Option<f64>,
    pub security: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_documented_values() {
        let config = ResearchConfig::default();
        assert_eq!(config.max_results_per_action, 24);
        assert_eq!(config.max_per_domain, 5);
        assert!((config.hybrid_weights.dense - 0.55).abs() < f64::EPSILON);
        assert!((config.hybrid_weights.sparse - 0.45).abs() < f64::EPSILON);
        assert!((config.rrf.k - 60.0).abs() < f64::EPSILON);
        let sw = config.scoring_weights;
        assert!((sw.relevance - 0.45).abs() < f64::EPSILON);
        assert!((sw.authority - 0.25).abs() < f64::EPSILON);
        assert!((sw.recency - 0.15).abs() < f64::EPSILON);
        assert!((sw.diversity - 0.10).abs() < f64::EPSILON);
        assert!((sw.security - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn default_tables_are_populated() {
        let config = ResearchConfig::default();
        assert!(config
            .trust_tiers
            .authoritative
            .contains(&"arxiv.org".to_string()));
        assert!(config.security.blocked_tlds.contains(&"zip".to_string()));
        assert!(!config.security.suspicious_query_patterns.is_empty());
        assert!(!config.security.suspicious_path_patterns.is_empty());
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(ResearchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_max_results_rejected() {
        let config = ResearchConfig {
            max_results_per_action: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_results_per_action"));
    }

    #[test]
    fn zero_max_per_domain_rejected() {
        let config = ResearchConfig {
            max_per_domain: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_per_domain"));
    }

    #[test]
    fn negative_weight_rejected() {
        let mut config = ResearchConfig::default();
        config.scoring_weights.recency = -0.1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scoring_weights.recency"));
    }

    #[test]
    fn nan_rrf_k_rejected() {
        let mut config = ResearchConfig::default();
        config.rrf.k = f64::NAN;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("rrf.k"));
    }

    #[test]
    fn weights_need_not_sum_to_one() {
        let mut config = ResearchConfig::default();
        config.hybrid_weights.dense = 2.0;
        config.hybrid_weights.sparse = 3.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn merge_replaces_only_present_fields() {
        let base = ResearchConfig::default();
        let overrides = ConfigOverride {
            max_per_domain: Some(2),
            hybrid_weights: Some(HybridWeightsOverride {
                dense: Some(0.7),
                sparse: None,
            }),
            ..Default::default()
        };
        let merged = base.merged(&overrides);
        assert_eq!(merged.max_per_domain, 2);
        assert!((merged.hybrid_weights.dense - 0.7).abs() < f64::EPSILON);
        assert!((merged.hybrid_weights.sparse - 0.45).abs() < f64::EPSILON);
        assert_eq!(merged.max_results_per_action, 24);
        assert_eq!(merged.trust_tiers, base.trust_tiers);
    }

    #[test]
    fn merge_does_not_mutate_base() {
        let base = ResearchConfig::default();
        let overrides = ConfigOverride {
            security: Some(SecurityPolicyOverride {
                blocked_tlds: Some(vec!["biz".into()]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = base.merged(&overrides);
        assert_eq!(merged.security.blocked_tlds, vec!["biz".to_string()]);
        assert!(base.security.blocked_tlds.contains(&"zip".to_string()));
        assert_eq!(
            merged.security.suspicious_path_patterns,
            base.security.suspicious_path_patterns
        );
    }

    #[test]
    fn empty_override_is_identity() {
        let base = ResearchConfig::default();
        assert_eq!(base.merged(&ConfigOverride::default()), base);
    }

    #[test]
    fn override_decodes_from_partial_json() {
        let overrides: ConfigOverride = serde_json::from_str(
            r#"{"rrf":{"k":10},"trust_tiers":{"high-trust":["example.org"]}}"#,
        )
        .expect("deserialize");
        let merged = ResearchConfig::default().merged(&overrides);
        assert!((merged.rrf.k - 10.0).abs() < f64::EPSILON);
        assert_eq!(merged.trust_tiers.high_trust, vec!["example.org".to_string()]);
        assert!(!merged.trust_tiers.authoritative.is_empty());
    }
}
