//! Domain trust classification.

use crate::config::TrustTiers;
use crate::types::TrustTier;

use super::host_matches;

/// Classify a hostname against the ordered trust tables.
///
/// `authoritative` is checked before `high_trust`; the first table with an
/// exact or subdomain match wins. Any other non-empty hostname is
/// [`TrustTier::OpenWeb`]. An empty hostname means the URL did not parse
/// and yields [`TrustTier::Unknown`].
pub fn classify_trust(hostname: &str, tiers: &TrustTiers) -> TrustTier {
    if hostname.is_empty() {
        return TrustTier::Unknown;
    }
    let in_table = |table: &[String]| table.iter().any(|d| host_matches(hostname, &d.to_lowercase()));

    if in_table(&tiers.authoritative) {
        TrustTier::Authoritative
    } else if in_table(&tiers.high_trust) {
        TrustTier::HighTrust
    } else {
        TrustTier::OpenWeb
    }
}
