//! Module registry: id assignment, specifier side table, manifest building.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use weft_types::{ClientReference, Error, ModuleId, ReferenceManifest, ReferenceMetadata, Result};

use crate::exports::{LoadedModule, ModuleExports};
use crate::loader::{ExtensionLoader, InMemoryLoader};

/// Process-local registry of client modules.
///
/// Backed by an append-only arena indexed by id, with a side table from
/// synthetic specifier to id and an incrementally built
/// [`ReferenceManifest`]. Registration is single-writer by construction
/// (module load time), reads are many-reader; the locks make the type
/// shareable across threads.
pub struct ModuleRegistry {
    inner: RwLock<RegistryInner>,
    loader: RwLock<Option<Arc<dyn ExtensionLoader>>>,
}

#[derive(Default)]
struct RegistryInner {
    /// Arena of registered units; a module's id is its index.
    modules: Vec<ModuleExports>,
    /// Side table from synthetic specifier to assigned id.
    by_specifier: HashMap<String, ModuleId>,
    manifest: ReferenceManifest,
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleRegistry {
    /// Create a registry with the [`InMemoryLoader`] installed.
    pub fn new() -> Self {
        Self::with_loader(Arc::new(InMemoryLoader))
    }

    /// Create a registry with a custom extension loader installed.
    pub fn with_loader(loader: Arc<dyn ExtensionLoader>) -> Self {
        Self {
            inner: RwLock::new(RegistryInner::default()),
            loader: RwLock::new(Some(loader)),
        }
    }

    /// Register a unit of exported values.
    ///
    /// Assigns the next unused id (monotonic from 0; an identical unit
    /// registered twice gets a fresh id each time), records the unit in the
    /// arena and the manifest, then hands the `(specifier, id)` pair to the
    /// installed extension loader and returns the materialized module.
    pub fn register(&self, unit: ModuleExports) -> Result<LoadedModule> {
        let (specifier, id) = {
            let mut guard = self.inner.write();
            let inner = &mut *guard;

            let id = ModuleId::new(inner.modules.len() as u32);
            let specifier = synthetic_specifier(id);
            inner.modules.push(unit);
            inner.by_specifier.insert(specifier.clone(), id);

            // Seed the well-known default/namespace entries first; each own
            // export name recorded afterwards replaces the specifier's whole
            // manifest entry (last write wins).
            inner.manifest.seed_module(&specifier, id);
            let registered = &inner.modules[id.as_u32() as usize];
            for name in registered.names() {
                inner.manifest.record_export(&specifier, id, name);
            }

            (specifier, id)
        };

        debug!(id = %id, specifier = %specifier, "registered client module");

        let loader = self
            .loader
            .read()
            .clone()
            .ok_or(Error::LoaderMissing)?;
        loader.load(&specifier, id, self)
    }

    /// Consumer-side lookup: the unit registered at `id`.
    ///
    /// This is what the real bundler runtime's loader global does with the
    /// id embedded in the payload. A miss is a programming error.
    pub fn require(&self, id: ModuleId) -> Result<ModuleExports> {
        self.inner
            .read()
            .modules
            .get(id.as_u32() as usize)
            .cloned()
            .ok_or(Error::UnknownModuleId(id))
    }

    /// The synthetic specifier for an assigned id, if it was assigned.
    pub fn specifier_for(&self, id: ModuleId) -> Option<String> {
        let inner = self.inner.read();
        ((id.as_u32() as usize) < inner.modules.len()).then(|| synthetic_specifier(id))
    }

    /// Reverse lookup through the side table.
    pub fn id_for_specifier(&self, specifier: &str) -> Option<ModuleId> {
        self.inner.read().by_specifier.get(specifier).copied()
    }

    /// Snapshot of the manifest built so far.
    pub fn manifest(&self) -> ReferenceManifest {
        self.inner.read().manifest.clone()
    }

    /// Resolve a client reference against the manifest built so far.
    pub fn resolve_reference(&self, reference: &ClientReference) -> Result<ReferenceMetadata> {
        self.inner
            .read()
            .manifest
            .resolve_reference(reference)
            .cloned()
    }

    /// Number of registered modules.
    pub fn module_count(&self) -> usize {
        self.inner.read().modules.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().modules.is_empty()
    }

    /// Install an extension loader, returning the previously installed one.
    pub fn install_loader(
        &self,
        loader: Arc<dyn ExtensionLoader>,
    ) -> Option<Arc<dyn ExtensionLoader>> {
        self.loader.write().replace(loader)
    }

    /// Remove the installed loader, returning it. Registration fails with
    /// [`Error::LoaderMissing`] until another loader is installed.
    pub fn uninstall_loader(&self) -> Option<Arc<dyn ExtensionLoader>> {
        self.loader.write().take()
    }
}

/// Synthetic file-URL-shaped specifier derived from the decimal id.
fn synthetic_specifier(id: ModuleId) -> String {
    format!("file:///{}", id)
}
