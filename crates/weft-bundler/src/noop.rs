//! Integration that carries no bundler at all.

use weft_request::RequestStore;
use weft_types::{ClientReference, Error, Hints, ReferenceMetadata, Result};

use crate::integration::BundlerIntegration;

/// The no-op integration: never primary, no hints, no request storage.
///
/// Used when the streaming server is linked without any module system.
/// Resolution always fails because there is no reference map to consult;
/// everything else degrades to its empty value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopIntegration;

impl BundlerIntegration for NoopIntegration {
    fn name(&self) -> &str {
        "noop"
    }

    fn is_primary_renderer(&self) -> bool {
        false
    }

    fn prepare_host_dispatcher(&self) {}

    fn request_storage(&self) -> Option<&'static RequestStore> {
        None
    }

    fn create_hints(&self) -> Hints {
        Hints::none()
    }

    fn resolve_client_reference(&self, reference: &ClientReference) -> Result<ReferenceMetadata> {
        Err(Error::UnresolvedReference {
            specifier: reference.specifier().to_string(),
            export: reference.export().as_wire().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_types::ExportName;

    #[test]
    fn test_capabilities_are_empty() {
        let integration = NoopIntegration;
        assert!(!integration.is_primary_renderer());
        assert!(!integration.supports_request_storage());
        assert!(integration.request_storage().is_none());
        assert!(integration.create_hints().is_empty());
    }

    #[test]
    fn test_resolution_always_fails() {
        let integration = NoopIntegration;
        let reference = ClientReference::new("file:///0", ExportName::Default);
        let err = integration
            .resolve_client_reference(&reference)
            .expect_err("no reference map");
        assert!(matches!(err, Error::UnresolvedReference { .. }));
    }

    #[test]
    fn test_prepare_is_repeatable() {
        let integration = NoopIntegration;
        integration.prepare_host_dispatcher();
        integration.prepare_host_dispatcher();
    }
}
