//! # Mutation Executor
//!
//! Runs one create/update/delete operation and, only on success,
//! invalidates the cache keys the caller names. Pending state is exposed
//! for submit-button gating; preventing a double submit is the caller's
//! responsibility.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::client::cache::{QueryCache, QueryKey};
use crate::client::error::ApiError;

pub struct MutationExecutor {
    cache: Arc<QueryCache>,
    pending: AtomicBool,
}

impl MutationExecutor {
    pub fn new(cache: Arc<QueryCache>) -> Self {
        Self {
            cache,
            pending: AtomicBool::new(false),
        }
    }

    /// True while an operation started by [`run`](Self::run) has not
    /// settled.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Execute exactly one network operation. On success the listed
    /// keys are invalidated; on failure nothing is invalidated and the
    /// error comes back for display.
    pub async fn run<T, F, Fut>(
        &self,
        invalidates: &[QueryKey],
        op: F,
    ) -> Result<T, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T, ApiError>>,
    {
        self.pending.store(true, Ordering::SeqCst);
        let result = op().await;
        self.pending.store(false, Ordering::SeqCst);

        match &result {
            Ok(_) => {
                for key in invalidates {
                    self.cache.invalidate(key);
                }
            }
            Err(err) => {
                tracing::warn!(%err, "mutation failed, cache untouched");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    async fn seed_cars(cache: &QueryCache, calls: &Arc<AtomicUsize>) {
        let calls = Arc::clone(calls);
        cache
            .fetch(QueryKey::Cars, move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ApiError>(vec!["car".to_string()])
            })
            .await;
    }

    #[tokio::test]
    async fn successful_mutation_should_invalidate_listed_keys() {
        let cache = Arc::new(QueryCache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        seed_cars(&cache, &calls).await;

        let executor = MutationExecutor::new(Arc::clone(&cache));
        let outcome = executor
            .run(&[QueryKey::Cars], || async { Ok::<_, ApiError>(()) })
            .await;
        assert!(outcome.is_ok());

        seed_cars(&cache, &calls).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_mutation_should_leave_cache_untouched() {
        let cache = Arc::new(QueryCache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        seed_cars(&cache, &calls).await;

        let executor = MutationExecutor::new(Arc::clone(&cache));
        let outcome = executor
            .run(&[QueryKey::Cars], || async {
                Err::<(), _>(ApiError::Status {
                    status: 422,
                    message: "rejected".into(),
                })
            })
            .await;
        assert!(outcome.is_err());

        seed_cars(&cache, &calls).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn pending_flag_should_reset_after_completion() {
        let cache = Arc::new(QueryCache::new());
        let executor = MutationExecutor::new(cache);

        assert!(!executor.is_pending());
        let _ = executor
            .run(&[], || async { Ok::<_, ApiError>(()) })
            .await;
        assert!(!executor.is_pending());
    }

    #[tokio::test]
    async fn delete_for_missing_id_should_surface_handled_error() {
        let cache = Arc::new(QueryCache::new());
        let executor = MutationExecutor::new(cache);

        let outcome = executor
            .run(&[QueryKey::Cars], || async {
                Err::<(), _>(ApiError::Status {
                    status: 404,
                    message: "car not found".into(),
                })
            })
            .await;

        match outcome {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "car not found");
            }
            other => panic!("expected handled status error, got {other:?}"),
        }
    }
}
