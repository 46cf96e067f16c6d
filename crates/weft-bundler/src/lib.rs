//! Weft Bundler Integrations
//!
//! The pluggable contract that decouples the generic streaming-render
//! engine from any specific module system. An integration is a static
//! capability record: whether it is the primary renderer, its hint
//! vocabulary, whether ambient request storage is available, one idempotent
//! host-dispatcher setup hook, and reference resolution against whatever
//! map its bundler produced.
//!
//! This crate provides:
//! - [`integration`]: The [`BundlerIntegration`] trait and
//!   [`emit_hint`] - hint propagation through the ambient channel
//! - [`noop`]: [`NoopIntegration`] - carries no bundler at all
//! - [`registry_integration`]: [`RegistryIntegration`] - backed by the
//!   in-memory module registry (tests and local development)
//! - [`manifest_integration`]: [`ManifestIntegration`] - backed by the
//!   build-time JSON manifest a real bundler emits
//! - [`host`]: The process-wide host dispatcher slot and the consumed-only
//!   platform collaborator interface
//!
//! # Choosing an integration
//!
//! One immutable integration instance is selected per process at startup.
//! When several renderer integrations are linked into one process, exactly
//! one must report `is_primary_renderer() == true`; this layer does not
//! enforce that, and a violation surfaces later as duplicate-registration
//! symptoms.

pub mod host;
pub mod integration;
pub mod manifest_integration;
pub mod noop;
pub mod registry_integration;

// Re-export the main types for convenience
pub use host::{
    current_host_dispatcher, install_host_dispatcher, HostDispatcher, InternalHandle,
    PlatformNode, PublicInstance, RecordedCommand, RecordingDispatcher,
};
pub use integration::{emit_hint, BundlerIntegration};
pub use manifest_integration::ManifestIntegration;
pub use noop::NoopIntegration;
pub use registry_integration::RegistryIntegration;
