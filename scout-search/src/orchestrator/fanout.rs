//! Retrieval fan-out: concurrent keyword + dense calls, then ingestion.
//!
//! Both backends are awaited together with [`futures::future::try_join`].
//! The first failure fails the turn; there is no partial-result fallback.

use std::collections::HashMap;

use crate::backend::RetrievalBackend;
use crate::error::{BackendKind, ResearchError};
use crate::policy::hostname;
use crate::types::{MergedResult, RawBackendResult, SearchQuery};

/// The two raw result lists, each in its backend's native rank order.
#[derive(Debug, Clone, Default)]
pub struct RetrievedSets {
    pub keyword: Vec<RawBackendResult>,
    pub dense: Vec<RawBackendResult>,
}

/// Query both backends concurrently with the same query and limit.
///
/// # Errors
///
/// Returns [`ResearchError::Backend`] for whichever backend fails first.
pub async fn fan_out<K, D>(
    query: &SearchQuery,
    limit: usize,
    keyword: &K,
    dense: &D,
) -> Result<RetrievedSets, ResearchError>
where
    K: RetrievalBackend,
    D: RetrievalBackend,
{
    let keyword_call = async {
        keyword
            .search(query, limit)
            .await
            .map_err(|e| backend_failure(BackendKind::Keyword, e))
    };
    let dense_call = async {
        dense
            .search(query, limit)
            .await
            .map_err(|e| backend_failure(BackendKind::Dense, e))
    };

    let (keyword, dense) = futures::future::try_join(keyword_call, dense_call).await?;
    tracing::debug!(
        keyword = keyword.len(),
        dense = dense.len(),
        "backends returned results"
    );
    Ok(RetrievedSets { keyword, dense })
}

fn backend_failure(backend: BackendKind, err: ResearchError) -> ResearchError {
    tracing::warn!(%backend, error = %err, "retrieval backend failed");
    match err {
        ResearchError::Backend { reason, .. } => ResearchError::Backend { backend, reason },
        other => ResearchError::Backend {
            backend,
            reason: other.to_string(),
        },
    }
}

/// Merge both lists into one record per key, keyword results first.
///
/// The first occurrence of a key creates the record; later occurrences
/// only overwrite the score owned by their backend. A key seen by one
/// backend keeps `0.0` for the other score.
pub fn ingest(sets: &RetrievedSets) -> Vec<MergedResult> {
    let mut merged: Vec<MergedResult> = Vec::with_capacity(sets.keyword.len() + sets.dense.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    let sources = [
        (BackendKind::Keyword, &sets.keyword),
        (BackendKind::Dense, &sets.dense),
    ];
    for (backend, results) in sources {
        for raw in results {
            let key = raw.key();
            let slot = match index.get(key) {
                Some(&slot) => slot,
                None => {
                    merged.push(MergedResult::from_raw(raw, hostname(&raw.url)));
                    index.insert(key.to_owned(), merged.len() - 1);
                    merged.len() - 1
                }
            };
            let score = raw.score_for(backend);
            let record = &mut merged[slot];
            match backend {
                BackendKind::Keyword => record.sparse_score = score,
                BackendKind::Dense => record.dense_score = score,
            }
        }
    }

    merged
}
