//! Deterministic research-action planner.
//!
//! Maps a sanitised query to an ordered list of [`ResearchAction`]s by
//! testing the lower-cased text against a fixed sequence of rules. Rule
//! order is output order, and it decides which action downstream code
//! treats as primary, so the sequence below must not be reordered.
//!
//! ```text
//! plan
//! update-check        recency markers
//! contrastive         comparison markers
//! multi-hop           multi-step / implication markers
//! hybrid-search       always
//! focused-search      stack product names
//! fact-check          verification / security markers
//! source-audit        verification / security markers
//! exploratory-browse  always, last
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::types::ResearchAction;

macro_rules! rule_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

rule_pattern!(
    RE_RECENCY,
    r"\b(latest|recent|recently|newest|new|current|currently|today|this year|updates?|updated|changelog|release notes|20[0-9]{2})\b"
);
rule_pattern!(
    RE_COMPARISON,
    r"\b(vs|versus|compare|compared|comparing|comparison|difference between|better than)\b"
);
rule_pattern!(
    RE_MULTI_HOP,
    r"\b(why|implications?|impact of|consequences?|leads? to|step by step|step-by-step|then|therefore|root cause|downstream)\b"
);
rule_pattern!(
    RE_STACK_PRODUCT,
    r"\b(azure|oracle|elastic|elasticsearch|postgres|postgresql|pgvector|opensearch)\b"
);
rule_pattern!(
    RE_VERIFICATION,
    r"\b(verify|verified|verification|fact[- ]?check|is it true|true or false|claim|claims|debunk|evidence|citation|security|secure|vulnerabilit(y|ies)|cve|exploit|audit)\b"
);

fn matches(rule: &LazyLock<Option<Regex>>, text: &str) -> bool {
    LazyLock::force(rule)
        .as_ref()
        .is_some_and(|re| re.is_match(text))
}

/// Plan the research actions for a sanitised query.
///
/// Always starts with [`ResearchAction::Plan`], always contains
/// [`ResearchAction::HybridSearch`], always ends with
/// [`ResearchAction::ExploratoryBrowse`]. Each action appears at most once.
///
/// # Examples
///
/// ```
/// use scout_search::planner::plan;
/// use scout_search::ResearchAction;
///
/// let actions = plan("what is a b-tree");
/// assert_eq!(
///     actions,
///     vec![ResearchAction::Plan, ResearchAction::HybridSearch, ResearchAction::ExploratoryBrowse]
/// );
/// ```
pub fn plan(sanitized_query: &str) -> Vec<ResearchAction> {
    let q = sanitized_query.to_lowercase();
    let mut actions = vec![ResearchAction::Plan];

    if matches(&RE_RECENCY, &q) {
        actions.push(ResearchAction::UpdateCheck);
    }
    if matches(&RE_COMPARISON, &q) {
        actions.push(ResearchAction::Contrastive);
    }
    if matches(&RE_MULTI_HOP, &q) {
        actions.push(ResearchAction::MultiHop);
    }
    actions.push(ResearchAction::HybridSearch);
    if matches(&RE_STACK_PRODUCT, &q) {
        actions.push(ResearchAction::FocusedSearch);
    }
    if matches(&RE_VERIFICATION, &q) {
        actions.push(ResearchAction::FactCheck);
        actions.push(ResearchAction::SourceAudit);
    }
    actions.push(ResearchAction::ExploratoryBrowse);

    tracing::trace!(?actions, "planned research actions");
    actions
}

/// The action the retrieval query is built from: `hybrid-search` when
/// planned, otherwise the last planned action. `None` only for an empty
/// list.
pub fn primary_action(actions: &[ResearchAction]) -> Option<ResearchAction> {
    if actions.contains(&ResearchAction::HybridSearch) {
        Some(ResearchAction::HybridSearch)
    } else {
        actions.last().copied()
    }
}
