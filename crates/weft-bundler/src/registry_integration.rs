//! Integration backed by the in-memory module registry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use weft_registry::ModuleRegistry;
use weft_request::RequestStore;
use weft_types::{ClientReference, Hints, ReferenceMetadata, Result};

use crate::host::{install_host_dispatcher, HostDispatcher};
use crate::integration::BundlerIntegration;

/// The simulated-bundler integration used by tests and local development.
///
/// Resolves references against the manifest the registry builds as modules
/// are registered. Primary, with hints and request storage enabled.
pub struct RegistryIntegration {
    registry: Arc<ModuleRegistry>,
    host_dispatcher: Option<Arc<dyn HostDispatcher>>,
    prepared: AtomicBool,
}

impl RegistryIntegration {
    /// Wrap a registry.
    pub fn new(registry: Arc<ModuleRegistry>) -> Self {
        Self {
            registry,
            host_dispatcher: None,
            prepared: AtomicBool::new(false),
        }
    }

    /// Attach the dispatcher to install into the process-wide slot when the
    /// integration is prepared.
    pub fn with_host_dispatcher(mut self, dispatcher: Arc<dyn HostDispatcher>) -> Self {
        self.host_dispatcher = Some(dispatcher);
        self
    }

    /// The backing registry.
    pub fn registry(&self) -> &Arc<ModuleRegistry> {
        &self.registry
    }

    /// Whether `prepare_host_dispatcher` has run.
    pub fn is_prepared(&self) -> bool {
        self.prepared.load(Ordering::SeqCst)
    }
}

impl BundlerIntegration for RegistryIntegration {
    fn name(&self) -> &str {
        "registry"
    }

    fn is_primary_renderer(&self) -> bool {
        true
    }

    fn prepare_host_dispatcher(&self) {
        if self.prepared.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(dispatcher) = &self.host_dispatcher {
            install_host_dispatcher(dispatcher.clone());
        }
        debug!(integration = self.name(), "host dispatcher prepared");
    }

    fn request_storage(&self) -> Option<&'static RequestStore> {
        Some(RequestStore::global())
    }

    fn create_hints(&self) -> Hints {
        Hints::new()
    }

    fn resolve_client_reference(&self, reference: &ClientReference) -> Result<ReferenceMetadata> {
        self.registry.resolve_reference(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_registry::ModuleExports;
    use weft_types::{Error, ExportName, ModuleId};

    #[test]
    fn test_resolves_through_registry_manifest() {
        let registry = Arc::new(ModuleRegistry::new());
        let loaded = registry
            .register(ModuleExports::new())
            .expect("register");

        let integration = RegistryIntegration::new(registry);
        let reference = ClientReference::new(loaded.specifier(), ExportName::Namespace);
        let metadata = integration
            .resolve_client_reference(&reference)
            .expect("resolve");
        assert_eq!(metadata.id, ModuleId::new(0));
        assert_eq!(metadata.name, "*");
    }

    #[test]
    fn test_resolution_miss_is_hard_error() {
        let integration = RegistryIntegration::new(Arc::new(ModuleRegistry::new()));
        let reference = ClientReference::new("file:///42", ExportName::Default);
        let err = integration
            .resolve_client_reference(&reference)
            .expect_err("miss");
        assert!(matches!(err, Error::UnresolvedReference { .. }));
    }

    #[test]
    fn test_capabilities() {
        let integration = RegistryIntegration::new(Arc::new(ModuleRegistry::new()));
        assert!(integration.is_primary_renderer());
        assert!(integration.supports_request_storage());
        assert!(integration.create_hints().is_empty());
    }

    // No dispatcher attached here, so repeat preparation is observable
    // without touching the process-wide slot.
    #[test]
    fn test_prepare_is_idempotent() {
        let integration = RegistryIntegration::new(Arc::new(ModuleRegistry::new()));
        assert!(!integration.is_prepared());
        integration.prepare_host_dispatcher();
        assert!(integration.is_prepared());
        integration.prepare_host_dispatcher();
        assert!(integration.is_prepared());
    }
}
