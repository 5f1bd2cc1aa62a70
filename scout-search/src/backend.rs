//! Trait definition for injected retrieval backends.
//!
//! A turn is given two backends: a keyword (sparse) one and an embedding
//! (dense) one. Both implement [`RetrievalBackend`]. The core never talks
//! to a network or an index itself; transport, timeouts and retries are
//! the backend's business.

use std::future::Future;

use crate::error::ResearchError;
use crate::types::{RawBackendResult, SearchQuery};

/// A pluggable retrieval backend.
///
/// Implementors return results in their own rank order, best first. The
/// order matters: Reciprocal Rank Fusion uses it as-is.
///
/// All implementations must be `Send + Sync` so both backends can be
/// awaited concurrently.
pub trait RetrievalBackend: Send + Sync {
    /// Retrieve up to `limit` results for `query`.
    ///
    /// # Errors
    ///
    /// Any error fails the whole research turn.
    fn search(
        &self,
        query: &SearchQuery,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<RawBackendResult>, ResearchError>> + Send;
}

/// Adapter turning an async closure into a [`RetrievalBackend`].
///
/// The closure receives an owned copy of the query so the returned future
/// need not borrow from the turn.
///
/// # Examples
///
/// ```
/// use scout_search::backend::backend_fn;
/// use scout_search::RawBackendResult;
///
/// let dense = backend_fn(|_query, _limit| async { Ok(Vec::<RawBackendResult>::new()) });
/// # let _ = dense;
/// ```
pub fn backend_fn<F, Fut>(f: F) -> FnBackend<F>
where
    F: Fn(SearchQuery, usize) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<RawBackendResult>, ResearchError>> + Send,
{
    FnBackend(f)
}

/// See [`backend_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnBackend<F>(F);

impl<F, Fut> RetrievalBackend for FnBackend<F>
where
    F: Fn(SearchQuery, usize) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<RawBackendResult>, ResearchError>> + Send,
{
    fn search(
        &self,
        query: &SearchQuery,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<RawBackendResult>, ResearchError>> + Send {
        (self.0)(query.clone(), limit)
    }
}

/// A backend that replays a fixed result list, truncated to `limit`.
#[derive(Debug, Clone, Default)]
pub struct StaticBackend {
    results: Vec<RawBackendResult>,
}

impl StaticBackend {
    pub fn new(results: Vec<RawBackendResult>) -> Self {
        Self { results }
    }
}

impl RetrievalBackend for StaticBackend {
    async fn search(
        &self,
        _query: &SearchQuery,
        limit: usize,
    ) -> Result<Vec<RawBackendResult>, ResearchError> {
        Ok(self.results.iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(url: &str) -> RawBackendResult {
        RawBackendResult {
            url: url.into(),
            title: "Test".into(),
            sparse_score: Some(1.0),
            ..Default::default()
        }
    }

    #[test]
    fn backends_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StaticBackend>();
    }

    #[tokio::test]
    async fn static_backend_truncates_to_limit() {
        let backend = StaticBackend::new(vec![
            make_result("https://a.com"),
            make_result("https://b.com"),
            make_result("https://c.com"),
        ]);
        let results = backend
            .search(&SearchQuery::default(), 2)
            .await
            .expect("should succeed");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://a.com");
    }

    #[tokio::test]
    async fn closure_backend_sees_query_and_limit() {
        let backend = backend_fn(|query: SearchQuery, limit| async move {
            assert_eq!(limit, 7);
            Ok(vec![make_result(&format!("https://{}.com", query.text))])
        });
        let query = SearchQuery {
            text: "probe".into(),
            ..Default::default()
        };
        let results = backend.search(&query, 7).await.expect("should succeed");
        assert_eq!(results[0].url, "https://probe.com");
    }

    #[tokio::test]
    async fn closure_backend_propagates_errors() {
        let backend = backend_fn(|_q, _l| async {
            Err::<Vec<RawBackendResult>, _>(ResearchError::Http("index offline".into()))
        });
        let err = backend
            .search(&SearchQuery::default(), 1)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("index offline"));
    }
}
