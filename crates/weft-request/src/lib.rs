//! Weft Request Storage
//!
//! Request-scoped ambient storage: the side channel that lets per-request
//! out-of-band signals ("hints") reach the bundler layer without threading
//! extra parameters through every call in the render tree.
//!
//! This crate provides:
//! - [`context`]: [`RequestContext`] - the per-request value (identity plus
//!   a shared hint accumulator)
//! - [`store`]: [`RequestStore`] - the task-local slot with scoped
//!   enter/exit and ambient reads
//!
//! # Lifecycle
//!
//! A request moves `NotStarted -> InFlight -> Completed`. Entering a scope
//! associates the context with the current logical task and every call made
//! below it; leaving the scope (success or failure) releases the
//! association. Concurrently in-flight requests each see only their own
//! value.
//!
//! ```ignore
//! use weft_request::{RequestContext, RequestStore};
//!
//! let store = RequestStore::global();
//! store
//!     .scope(RequestContext::new(1), async {
//!         // Anywhere below: RequestStore::global().current() sees request 1.
//!     })
//!     .await;
//! // Completed: current() is absent again.
//! ```

pub mod context;
pub mod store;

// Re-export the main types for convenience
pub use context::RequestContext;
pub use store::RequestStore;
