//! Domain trust and URL security policy.
//!
//! Both classifiers are static-table heuristics evaluated independently
//! per result. Nothing here fetches or inspects page content.

pub mod security;
pub mod trust;

use url::Url;

use crate::config::TrustTiers;
use crate::types::MergedResult;

use security::SecurityRules;
use trust::classify_trust;

/// Extract the lower-cased hostname of `raw`, or an empty string when the
/// URL cannot be parsed or has no host.
///
/// # Examples
///
/// ```
/// use scout_search::policy::hostname;
///
/// assert_eq!(hostname("https://Docs.RS/tokio"), "docs.rs");
/// assert_eq!(hostname("not a url"), "");
/// ```
pub fn hostname(raw: &str) -> String {
    Url::parse(raw)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_end_matches('.').to_lowercase()))
        .unwrap_or_default()
}

/// Assign trust tier and security verdict to every result in place.
pub fn classify_results(results: &mut [MergedResult], tiers: &TrustTiers, rules: &SecurityRules) {
    for result in results.iter_mut() {
        result.trust_tier = classify_trust(&result.hostname, tiers);
        let verdict = rules.classify(&result.url, &result.hostname);
        result.security_status = verdict.status;
        result.security_score = verdict.score;
    }
}

/// Returns `true` when `host` equals `domain` or is a subdomain of it.
pub(crate) fn host_matches(host: &str, domain: &str) -> bool {
    let domain = domain.trim_start_matches('.');
    if domain.is_empty() {
        return false;
    }
    host == domain
        || (host.len() > domain.len()
            && host.ends_with(domain)
            && host.as_bytes()[host.len() - domain.len() - 1] == b'.')
}
