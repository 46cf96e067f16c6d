//! Per-request context value.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use weft_types::{HintModel, Hints};

/// The value associated with one in-flight request.
///
/// Cheap to clone; clones share the same hint accumulator, so a hint pushed
/// from deep inside the render tree is visible when the request's hints are
/// drained for flushing.
#[derive(Clone)]
pub struct RequestContext {
    inner: Arc<Inner>,
}

struct Inner {
    id: u64,
    hints: Mutex<Hints>,
}

impl RequestContext {
    /// Context for a new request with an empty hint accumulator.
    pub fn new(id: u64) -> Self {
        Self::with_hints(id, Hints::new())
    }

    /// Context seeded with an integration's `create_hints()` value.
    pub fn with_hints(id: u64, hints: Hints) -> Self {
        Self {
            inner: Arc::new(Inner {
                id,
                hints: Mutex::new(hints),
            }),
        }
    }

    /// Identity of the request this context belongs to.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Record a hint for this request. Returns `false` when an equivalent
    /// hint was already recorded.
    pub fn push_hint(&self, hint: HintModel) -> bool {
        self.inner.hints.lock().push(hint)
    }

    /// Number of distinct hints recorded so far.
    pub fn hint_count(&self) -> usize {
        self.inner.hints.lock().len()
    }

    /// Drain the accumulated hints for flushing into the out-of-band stream.
    pub fn take_hints(&self) -> Hints {
        std::mem::take(&mut *self.inner.hints.lock())
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("id", &self.inner.id)
            .field("hints", &self.hint_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_hint_accumulator() {
        let context = RequestContext::new(1);
        let clone = context.clone();

        assert!(clone.push_hint(HintModel::Preconnect {
            href: "https://cdn.example".to_string(),
        }));
        assert_eq!(context.hint_count(), 1);
    }

    #[test]
    fn test_take_hints_drains() {
        let context = RequestContext::new(2);
        context.push_hint(HintModel::Preload {
            href: "/chunks/a.js".to_string(),
            priority: None,
        });

        let drained = context.take_hints();
        assert_eq!(drained.len(), 1);
        assert_eq!(context.hint_count(), 0);
    }
}
