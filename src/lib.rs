//! Weft
//!
//! Bundler-neutral client-reference resolution for a server that renders a
//! component tree and streams the serialized result to a remote runtime.
//! Server-only values are resolved in place; values standing for
//! client-only code travel as opaque, wire-stable references that the
//! consumer's module loader turns back into loadable code.
//!
//! - **Registry and wire ids**: [`ModuleRegistry`] assigns stable integer
//!   ids to registered units and builds the [`ReferenceManifest`] a render
//!   pass resolves against.
//! - **Bundler contract**: [`BundlerIntegration`] is the pluggable
//!   capability record a module system implements; ships with
//!   [`NoopIntegration`], [`RegistryIntegration`], and
//!   [`ManifestIntegration`].
//! - **Request channel**: [`RequestStore`] carries per-request out-of-band
//!   hints to the bundler layer without parameter threading.
//!
//! See the member crates for the full per-component documentation.

// Shared protocol types
pub use weft_types::{
    ClientReference, Error, ExportName, HintModel, HintPriority, Hints, ModuleId,
    ReferenceManifest, ReferenceMetadata, Result,
};

// Module registry (test double for a real bundler's runtime loader)
pub use weft_registry::{
    ExportValue, ExtensionLoader, InMemoryLoader, LoadedModule, ModuleExports, ModuleRegistry,
};

// Request-scoped ambient storage
pub use weft_request::{RequestContext, RequestStore};

// Bundler integrations
pub use weft_bundler::{
    current_host_dispatcher, emit_hint, install_host_dispatcher, BundlerIntegration,
    HostDispatcher, InternalHandle, ManifestIntegration, NoopIntegration, PlatformNode,
    PublicInstance, RecordedCommand, RecordingDispatcher, RegistryIntegration,
};
