//! Exploratory path generation for follow-up discovery.
//!
//! Given a seed result, derives same-origin candidate URLs:
//!
//! - the parent path, when the path has more than one segment
//! - numeric siblings of the last segment (`report-7.pdf` →
//!   `report-6.pdf`, `report-8.pdf`), skipping values ≤ 0
//!
//! Generation is pure string work. Candidates are only suggestions; use
//! [`explore_candidates`] to run them through the trust and security
//! policy before fetching anything.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ResearchConfig;
use crate::error::ResearchError;
use crate::policy::hostname;
use crate::policy::security::SecurityRules;
use crate::policy::trust::classify_trust;
use crate::types::{MergedResult, SecurityStatus, TrustTier};

/// Candidates longer than this are discarded.
pub const MAX_URL_BYTES: usize = 2048;

static RE_NUMBERED_SEGMENT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(?P<base>.*?)(?P<num>[0-9]+)(?P<ext>\.[A-Za-z0-9]+)?$").ok()
});

/// A generated candidate that passed the security gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExploratoryCandidate {
    pub url: String,
    pub hostname: String,
    pub trust_tier: TrustTier,
    pub security_status: SecurityStatus,
    pub security_score: f64,
}

/// Candidate URLs derived from a seed result: parent first, then the
/// lower sibling, then the higher sibling.
pub fn exploratory_paths(seed: &MergedResult) -> Vec<String> {
    paths_for_url(&seed.url)
}

/// [`exploratory_paths`] for a bare URL string.
///
/// # Examples
///
/// ```
/// use scout_search::explore::paths_for_url;
///
/// assert_eq!(
///     paths_for_url("https://example.com/docs/page2.html?x=1"),
///     vec![
///         "https://example.com/docs",
///         "https://example.com/docs/page1.html",
///         "https://example.com/docs/page3.html",
///     ]
/// );
/// ```
pub fn paths_for_url(raw: &str) -> Vec<String> {
    let Ok(parsed) = Url::parse(raw) else {
        return Vec::new();
    };
    if parsed.cannot_be_a_base() || parsed.host_str().is_none() {
        return Vec::new();
    }
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();
    let Some((last, prefix)) = segments.split_last() else {
        return Vec::new();
    };

    let mut paths: Vec<String> = Vec::new();
    if !prefix.is_empty() {
        paths.push(format!("/{}", prefix.join("/")));
    }
    for sibling in numeric_siblings(last) {
        let mut parts = prefix.to_vec();
        parts.push(&sibling);
        paths.push(format!("/{}", parts.join("/")));
    }

    let mut out: Vec<String> = Vec::with_capacity(paths.len());
    for path in paths {
        let mut candidate = parsed.clone();
        candidate.set_query(None);
        candidate.set_fragment(None);
        candidate.set_path(&path);
        let candidate = candidate.to_string();
        if candidate.len() <= MAX_URL_BYTES && candidate != raw && !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}

/// `n-1` (when > 0) and `n+1` variants of a `<base><digits><.ext>`
/// segment, keeping the digit run's zero padding.
fn numeric_siblings(segment: &str) -> Vec<String> {
    let Some(caps) = LazyLock::force(&RE_NUMBERED_SEGMENT)
        .as_ref()
        .and_then(|re| re.captures(segment))
    else {
        return Vec::new();
    };
    let base = caps.name("base").map_or("", |m| m.as_str());
    let ext = caps.name("ext").map_or("", |m| m.as_str());
    let Some(digits) = caps.name("num").map(|m| m.as_str()) else {
        return Vec::new();
    };
    let Ok(value) = digits.parse::<u64>() else {
        return Vec::new();
    };
    let width = digits.len();

    [value.checked_sub(1).filter(|v| *v > 0), value.checked_add(1)]
        .into_iter()
        .flatten()
        .map(|n| format!("{base}{n:0width$}{ext}"))
        .collect()
}

/// Generate candidates for `seed` and classify them like any other
/// result. Blocked candidates and candidates whose file extension is not
/// in `config.content_types` are dropped.
///
/// # Errors
///
/// Returns [`ResearchError::Config`] if the security patterns in `config`
/// do not compile.
pub fn explore_candidates(
    seed: &MergedResult,
    config: &ResearchConfig,
) -> Result<Vec<ExploratoryCandidate>, ResearchError> {
    let rules = SecurityRules::compile(&config.security)?;
    let candidates: Vec<ExploratoryCandidate> = exploratory_paths(seed)
        .into_iter()
        .filter(|url| extension_allowed(url, &config.content_types))
        .filter_map(|url| {
            let host = hostname(&url);
            let verdict = rules.classify(&url, &host);
            if verdict.status == SecurityStatus::Blocked {
                return None;
            }
            Some(ExploratoryCandidate {
                trust_tier: classify_trust(&host, &config.trust_tiers),
                security_status: verdict.status,
                security_score: verdict.score,
                hostname: host,
                url,
            })
        })
        .collect();
    tracing::debug!(count = candidates.len(), "exploratory candidates generated");
    Ok(candidates)
}

/// Paths without a file extension are always allowed.
fn extension_allowed(url: &str, content_types: &[String]) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let last = parsed
        .path_segments()
        .and_then(|mut s| s.next_back())
        .unwrap_or_default();
    match last.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => content_types
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext)),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawBackendResult;

    fn seed(url: &str) -> MergedResult {
        let raw = RawBackendResult {
            url: url.into(),
            ..Default::default()
        };
        MergedResult::from_raw(&raw, hostname(url))
    }

    #[test]
    fn parent_and_numeric_siblings() {
        let paths = exploratory_paths(&seed("https://example.com/reports/2024/q3.pdf"));
        assert_eq!(
            paths,
            vec![
                "https://example.com/reports/2024",
                "https://example.com/reports/2024/q2.pdf",
                "https://example.com/reports/2024/q4.pdf",
            ]
        );
    }

    #[test]
    fn single_segment_has_no_parent() {
        let paths = paths_for_url("https://example.com/chapter5");
        assert_eq!(
            paths,
            vec!["https://example.com/chapter4", "https://example.com/chapter6"]
        );
    }

    #[test]
    fn lower_sibling_skipped_at_one() {
        let paths = paths_for_url("https://example.com/part1.html");
        assert_eq!(paths, vec!["https://example.com/part2.html"]);
    }

    #[test]
    fn zero_is_never_emitted() {
        let paths = paths_for_url("https://example.com/docs/v0");
        assert_eq!(
            paths,
            vec!["https://example.com/docs", "https://example.com/docs/v1"]
        );
    }

    #[test]
    fn zero_padding_is_preserved() {
        let paths = paths_for_url("https://example.com/img007.png");
        assert_eq!(
            paths,
            vec!["https://example.com/img006.png", "https://example.com/img008.png"]
        );
    }

    #[test]
    fn non_numeric_segment_only_yields_parent() {
        let paths = paths_for_url("https://example.com/guide/intro/");
        assert_eq!(paths, vec!["https://example.com/guide"]);
    }

    #[test]
    fn port_is_kept_and_query_fragment_dropped() {
        let paths = paths_for_url("http://localhost:8080/a/b9?x=1#top");
        assert_eq!(
            paths,
            vec![
                "http://localhost:8080/a",
                "http://localhost:8080/a/b8",
                "http://localhost:8080/a/b10",
            ]
        );
    }

    #[test]
    fn root_and_unparseable_urls_yield_nothing() {
        assert!(paths_for_url("https://example.com/").is_empty());
        assert!(paths_for_url("not a url").is_empty());
        assert!(paths_for_url("mailto:a@b.com").is_empty());
    }

    #[test]
    fn overlong_candidates_are_dropped() {
        let long = "a".repeat(MAX_URL_BYTES);
        let url = format!("https://example.com/{long}/page2");
        let paths = paths_for_url(&url);
        assert!(paths.iter().all(|p| p.len() <= MAX_URL_BYTES));
        assert!(paths.is_empty());
    }

    #[test]
    fn candidates_are_classified_and_blocked_ones_dropped() {
        let config = ResearchConfig::default();
        let ok = explore_candidates(&seed("https://arxiv.org/list/cs/2"), &config).expect("ok");
        assert_eq!(ok.len(), 3);
        assert!(ok.iter().all(|c| c.trust_tier == TrustTier::Authoritative));
        assert!(ok.iter().all(|c| c.security_status == SecurityStatus::Clean));

        let blocked = explore_candidates(&seed("https://evil.zip/a/3"), &config).expect("ok");
        assert!(blocked.is_empty());
    }

    #[test]
    fn candidates_outside_content_allowlist_are_dropped() {
        let config = ResearchConfig::default();
        let exe = explore_candidates(&seed("https://example.com/dl/setup2.exe"), &config)
            .expect("ok");
        let urls: Vec<&str> = exe.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(urls, vec!["https://example.com/dl"]);
    }

    #[test]
    fn suspicious_candidates_are_kept_with_their_verdict() {
        let config = ResearchConfig::default();
        let out = explore_candidates(
            &seed("https://example.com/wp-content/plugins/item4"),
            &config,
        )
        .expect("ok");
        let siblings: Vec<&ExploratoryCandidate> =
            out.iter().filter(|c| c.url.contains("/item")).collect();
        assert_eq!(siblings.len(), 2);
        assert!(siblings
            .iter()
            .all(|c| c.security_status == SecurityStatus::Suspicious));
    }
}
