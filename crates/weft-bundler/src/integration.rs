//! The bundler integration contract.

use tracing::trace;

use weft_request::RequestStore;
use weft_types::{ClientReference, HintModel, Hints, ReferenceMetadata, Result};

/// Capability record a bundler integration exposes to the streaming server.
///
/// One immutable instance per process, selected at startup. The contract
/// has no fallible operations of its own besides reference resolution; it
/// is a static capability descriptor plus one idempotent setup call.
pub trait BundlerIntegration: Send + Sync {
    /// Integration name for logging/diagnostics.
    fn name(&self) -> &str;

    /// Whether this integration owns globally-shared renderer caches.
    ///
    /// When several integrations are linked into one process, exactly one
    /// must report `true`. Not enforced at this layer; a violation is a
    /// deployment error that surfaces as duplicate-registration symptoms.
    fn is_primary_renderer(&self) -> bool;

    /// Install any host-global state the dispatch layer needs before the
    /// first reference is resolved. Idempotent: calling again once prepared
    /// is a no-op.
    fn prepare_host_dispatcher(&self);

    /// Whether the ambient request channel is available.
    fn supports_request_storage(&self) -> bool {
        self.request_storage().is_some()
    }

    /// The ambient request slot, absent when unsupported. Callers must
    /// treat absence as "no hints available", never as an error.
    fn request_storage(&self) -> Option<&'static RequestStore>;

    /// The integration's empty hint value.
    fn create_hints(&self) -> Hints;

    /// Emit the wire-stable descriptor for a client reference.
    ///
    /// Consults the reference map this integration's bundler produced. A
    /// miss is fatal to the enclosing render and surfaces as
    /// [`weft_types::Error::UnresolvedReference`].
    fn resolve_client_reference(&self, reference: &ClientReference) -> Result<ReferenceMetadata>;
}

/// Attach a hint to the current request through `integration`'s channel.
///
/// Degrades gracefully: returns `false` without error when the integration
/// has no request storage, when no request is in flight, or when an
/// equivalent hint was already recorded for this request.
pub fn emit_hint(integration: &dyn BundlerIntegration, hint: HintModel) -> bool {
    let store = match integration.request_storage() {
        Some(store) => store,
        None => {
            trace!(
                integration = integration.name(),
                "hint dropped: request storage unsupported"
            );
            return false;
        }
    };
    let context = match store.current() {
        Some(context) => context,
        None => {
            trace!(
                integration = integration.name(),
                "hint dropped: no request in flight"
            );
            return false;
        }
    };
    context.push_hint(hint)
}
