//! Reference manifest: specifier -> export name -> wire metadata.
//!
//! Built incrementally while client modules are registered, then consumed
//! read-only by a render pass. Every specifier embedded in a serialized
//! payload must be resolvable in the manifest available to the consumer;
//! a miss is a protocol violation and resolves to a hard error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::reference::{ClientReference, ExportName, ModuleId, ReferenceMetadata};

/// Map from synthetic specifier to per-export reference metadata.
///
/// Serializes to the JSON object a real bundler emits at build time:
/// specifier keys, each mapping wire export names to `{id, chunks, name}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceManifest {
    entries: BTreeMap<String, BTreeMap<String, ReferenceMetadata>>,
}

impl ReferenceManifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a manifest from its build-time JSON form.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the manifest to its build-time JSON form.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Seed the well-known `""` (default) and `"*"` (namespace) entries for
    /// a freshly assigned module. Both share the module's id and carry no
    /// chunk requirements.
    pub fn seed_module(&mut self, specifier: &str, id: ModuleId) {
        let mut entry = BTreeMap::new();
        entry.insert(
            String::new(),
            ReferenceMetadata::new(id, &ExportName::Default),
        );
        entry.insert(
            "*".to_string(),
            ReferenceMetadata::new(id, &ExportName::Namespace),
        );
        self.entries.insert(specifier.to_string(), entry);
    }

    /// Record one own export of a module.
    ///
    /// Replaces the specifier's whole entry rather than merging: after a
    /// sequence of calls the manifest holds only the most recently recorded
    /// export for that specifier. Consumers registering multi-export units
    /// observe exactly this.
    pub fn record_export(&mut self, specifier: &str, id: ModuleId, name: &str) {
        let mut entry = BTreeMap::new();
        entry.insert(
            name.to_string(),
            ReferenceMetadata::new(id, &ExportName::from_wire(name)),
        );
        self.entries.insert(specifier.to_string(), entry);
    }

    /// Resolve a specifier/export pair to its wire descriptor.
    ///
    /// A miss means the serialized payload names code the consumer cannot
    /// load, so it surfaces as [`Error::UnresolvedReference`].
    pub fn resolve(&self, specifier: &str, export: &ExportName) -> Result<&ReferenceMetadata> {
        match self
            .entries
            .get(specifier)
            .and_then(|exports| exports.get(export.as_wire()))
        {
            Some(metadata) => Ok(metadata),
            None => {
                warn!(
                    specifier = specifier,
                    export = export.as_wire(),
                    "client reference missing from manifest"
                );
                Err(Error::UnresolvedReference {
                    specifier: specifier.to_string(),
                    export: export.as_wire().to_string(),
                })
            }
        }
    }

    /// Resolve a [`ClientReference`] placeholder.
    pub fn resolve_reference(&self, reference: &ClientReference) -> Result<&ReferenceMetadata> {
        self.resolve(reference.specifier(), reference.export())
    }

    /// Whether any exports are recorded for `specifier`.
    pub fn contains_specifier(&self, specifier: &str) -> bool {
        self.entries.contains_key(specifier)
    }

    /// The export table currently recorded for `specifier`.
    pub fn exports_for(&self, specifier: &str) -> Option<&BTreeMap<String, ReferenceMetadata>> {
        self.entries.get(specifier)
    }

    /// Number of specifiers with recorded exports.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
