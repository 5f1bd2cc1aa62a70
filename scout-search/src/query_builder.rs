//! Builds the structured [`SearchQuery`] for one research action.
//!
//! Baseline: lower-case whitespace tokens, deduplicated in order, become
//! `must_keywords`, dash-prefixed tokens included. `excluded_keywords`
//! stays empty. The action then shapes the baseline:
//!
//! | action               | effect                                              |
//! |----------------------|-----------------------------------------------------|
//! | `focused-search`     | adds product documentation hosts to `site_filters`  |
//! | `fact-check`         | replaces `site_filters` with reference hosts        |
//! | `update-check`       | sets `time_range` to `past_year`                    |
//! | `exploratory-browse` | keeps at most 5 `must_keywords`                     |
//!
//! A turn builds exactly one query, from its primary action.

use crate::types::{ResearchAction, SearchQuery, TimeRange};

/// Product name token → documentation hostnames.
const PRODUCT_SITES: &[(&str, &[&str])] = &[
    ("azure", &["learn.microsoft.com"]),
    ("oracle", &["docs.oracle.com"]),
    ("elastic", &["elastic.co"]),
    ("elasticsearch", &["elastic.co"]),
    ("postgres", &["postgresql.org"]),
    ("postgresql", &["postgresql.org"]),
    ("pgvector", &["github.com", "postgresql.org"]),
    ("opensearch", &["opensearch.org"]),
];

/// Reference hosts used by `fact-check`.
const FACT_CHECK_SITES: &[&str] = &["wikipedia.org", "arxiv.org", "ieee.org"];

/// Maximum `must_keywords` kept for `exploratory-browse`.
const EXPLORATORY_KEYWORD_LIMIT: usize = 5;

/// Build the retrieval query for `action` from sanitised query text.
///
/// # Examples
///
/// ```
/// use scout_search::query_builder::build_query;
/// use scout_search::{ResearchAction, TimeRange};
///
/// let q = build_query("Latest Rust release rust", ResearchAction::UpdateCheck);
/// assert_eq!(q.must_keywords, vec!["latest", "rust", "release"]);
/// assert_eq!(q.time_range, Some(TimeRange::PastYear));
/// ```
pub fn build_query(sanitized_query: &str, action: ResearchAction) -> SearchQuery {
    let mut query = baseline(sanitized_query);

    match action {
        ResearchAction::FocusedSearch => {
            let hosts: Vec<&str> = query
                .must_keywords
                .iter()
                .flat_map(|token| product_sites(token))
                .copied()
                .collect();
            for host in hosts {
                push_unique(&mut query.site_filters, host);
            }
        }
        ResearchAction::FactCheck => {
            query.site_filters = FACT_CHECK_SITES.iter().map(|s| (*s).to_owned()).collect();
        }
        ResearchAction::UpdateCheck => {
            query.time_range = Some(TimeRange::PastYear);
        }
        ResearchAction::ExploratoryBrowse => {
            query.must_keywords.truncate(EXPLORATORY_KEYWORD_LIMIT);
        }
        ResearchAction::Plan
        | ResearchAction::Contrastive
        | ResearchAction::MultiHop
        | ResearchAction::HybridSearch
        | ResearchAction::SourceAudit => {}
    }

    query
}

fn baseline(sanitized_query: &str) -> SearchQuery {
    let mut query = SearchQuery {
        text: sanitized_query.to_owned(),
        ..Default::default()
    };
    for token in sanitized_query.to_lowercase().split_whitespace() {
        push_unique(&mut query.must_keywords, token);
    }
    query
}

fn product_sites(token: &str) -> &'static [&'static str] {
    PRODUCT_SITES
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, sites)| *sites)
        .unwrap_or_default()
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_owned());
    }
}
