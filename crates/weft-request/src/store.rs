//! Task-local request slot.

use std::future::Future;

use crate::context::RequestContext;

tokio::task_local! {
    /// Ambient slot holding the in-flight request for the current task tree.
    static CURRENT_REQUEST: RequestContext;
}

/// Handle to the ambient request slot.
///
/// Integrations that support request storage expose
/// [`RequestStore::global`] from their `request_storage()`; integrations
/// that do not expose `None`, and every ambient read degrades to absent.
pub struct RequestStore {
    _private: (),
}

static GLOBAL_STORE: RequestStore = RequestStore { _private: () };

impl RequestStore {
    /// The process-wide store handle.
    pub fn global() -> &'static RequestStore {
        &GLOBAL_STORE
    }

    /// Associate `context` with the current logical task for the duration
    /// of `fut`.
    ///
    /// The returned future is the token the caller holds for the request's
    /// duration: the association is visible from every call made below it
    /// (surviving suspension and resumption of the task) and is released
    /// when the future completes, whether it succeeds or fails. Nested
    /// scopes shadow the outer context for their extent.
    pub fn scope<F>(&self, context: RequestContext, fut: F) -> impl Future<Output = F::Output>
    where
        F: Future,
    {
        CURRENT_REQUEST.scope(context, fut)
    }

    /// Synchronous variant of [`scope`](Self::scope) for call trees that
    /// never cross an async boundary.
    pub fn sync_scope<R>(&self, context: RequestContext, f: impl FnOnce() -> R) -> R {
        CURRENT_REQUEST.sync_scope(context, f)
    }

    /// The in-flight request associated with the current task, or absent
    /// when no scope is active (not started, already completed, or read
    /// from an unrelated task).
    pub fn current(&self) -> Option<RequestContext> {
        CURRENT_REQUEST.try_with(RequestContext::clone).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_is_absent_outside_any_scope() {
        assert!(RequestStore::global().current().is_none());
    }

    #[test]
    fn test_sync_scope_associates_and_releases() {
        let store = RequestStore::global();
        let seen = store.sync_scope(RequestContext::new(7), || {
            store.current().map(|context| context.id())
        });
        assert_eq!(seen, Some(7));
        assert!(store.current().is_none());
    }

    #[test]
    fn test_nested_sync_scopes_shadow() {
        let store = RequestStore::global();
        store.sync_scope(RequestContext::new(1), || {
            let inner = store.sync_scope(RequestContext::new(2), || {
                store.current().map(|context| context.id())
            });
            assert_eq!(inner, Some(2));
            // Outer association is restored once the inner scope exits.
            assert_eq!(store.current().map(|context| context.id()), Some(1));
        });
    }

    #[tokio::test]
    async fn test_scope_survives_suspension() {
        let store = RequestStore::global();
        store
            .scope(RequestContext::new(3), async {
                assert_eq!(store.current().map(|context| context.id()), Some(3));
                tokio::task::yield_now().await;
                assert_eq!(store.current().map(|context| context.id()), Some(3));
            })
            .await;
        assert!(store.current().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_isolated() {
        let store = RequestStore::global();

        let observe = |expected: u64| async move {
            for _ in 0..8 {
                let seen = RequestStore::global()
                    .current()
                    .map(|context| context.id());
                assert_eq!(seen, Some(expected));
                tokio::task::yield_now().await;
            }
        };

        let left = store.scope(RequestContext::new(10), observe(10));
        let right = store.scope(RequestContext::new(11), observe(11));
        tokio::join!(left, right);

        assert!(store.current().is_none());
    }

    #[tokio::test]
    async fn test_spawned_task_does_not_inherit() {
        let store = RequestStore::global();
        store
            .scope(RequestContext::new(5), async {
                // A sibling task spawned without the scope sees nothing.
                let seen = tokio::spawn(async { RequestStore::global().current().is_none() })
                    .await
                    .expect("join");
                assert!(seen);
            })
            .await;
    }
}
