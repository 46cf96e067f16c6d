//! Integration backed by a build-time reference manifest.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use weft_request::RequestStore;
use weft_types::{ClientReference, Hints, ReferenceManifest, ReferenceMetadata, Result};

use crate::host::{install_host_dispatcher, HostDispatcher};
use crate::integration::BundlerIntegration;

/// Integration over the JSON manifest a real bundler emits at build time.
///
/// The manifest is loaded once at startup and read-only afterwards; the
/// render pass resolves every client reference against it.
pub struct ManifestIntegration {
    name: String,
    manifest: ReferenceManifest,
    primary: bool,
    host_dispatcher: Option<Arc<dyn HostDispatcher>>,
    prepared: AtomicBool,
}

impl ManifestIntegration {
    /// Wrap an already-parsed manifest.
    pub fn new(manifest: ReferenceManifest) -> Self {
        Self {
            name: "manifest".to_string(),
            manifest,
            primary: true,
            host_dispatcher: None,
            prepared: AtomicBool::new(false),
        }
    }

    /// Parse the build-time JSON manifest and wrap it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(ReferenceManifest::from_json_str(json)?))
    }

    /// Override the integration name used in logs.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Mark this integration as secondary when another integration in the
    /// process owns the shared renderer caches.
    pub fn with_primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }

    /// Attach the dispatcher to install into the process-wide slot when the
    /// integration is prepared.
    pub fn with_host_dispatcher(mut self, dispatcher: Arc<dyn HostDispatcher>) -> Self {
        self.host_dispatcher = Some(dispatcher);
        self
    }

    /// The backing manifest.
    pub fn manifest(&self) -> &ReferenceManifest {
        &self.manifest
    }
}

impl BundlerIntegration for ManifestIntegration {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_primary_renderer(&self) -> bool {
        self.primary
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
        self.manifest.resolve_reference(reference).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_types::{Error, ExportName, ModuleId};

    const MANIFEST_JSON: &str = r#"{
        "file:///0": {
            "": {"id": 0, "chunks": [], "name": ""},
            "*": {"id": 0, "chunks": [], "name": "*"}
        },
        "file:///1": {
            "chart": {"id": 1, "chunks": ["vendor", "chart"], "name": "chart"}
        }
    }"#;

    #[test]
    fn test_resolves_from_build_time_manifest() {
        let integration = ManifestIntegration::from_json_str(MANIFEST_JSON).expect("parse");
        assert_eq!(integration.manifest().len(), 2);

        let reference = ClientReference::new("file:///1", ExportName::named("chart"));
        let metadata = integration
            .resolve_client_reference(&reference)
            .expect("resolve");
        assert_eq!(metadata.id, ModuleId::new(1));
        assert_eq!(metadata.chunks, vec!["vendor", "chart"]);
    }

    #[test]
    fn test_miss_names_the_missing_pair() {
        let integration = ManifestIntegration::from_json_str(MANIFEST_JSON).expect("parse");
        let reference = ClientReference::new("file:///1", ExportName::Default);
        let err = integration
            .resolve_client_reference(&reference)
            .expect_err("miss");
        match err {
            Error::UnresolvedReference { specifier, export } => {
                assert_eq!(specifier, "file:///1");
                assert_eq!(export, "");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_malformed_manifest_is_rejected() {
        assert!(matches!(
            ManifestIntegration::from_json_str("[]").map(|_| ()),
            Err(Error::MalformedManifest(_))
        ));
    }

    #[test]
    fn test_builder_overrides() {
        let integration = ManifestIntegration::new(ReferenceManifest::new())
            .with_name("turbo")
            .with_primary(false);
        assert_eq!(integration.name(), "turbo");
        assert!(!integration.is_primary_renderer());
    }
}
