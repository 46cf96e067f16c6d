//! Extension-loader seam.
//!
//! In a real deployment the module loader reads compiled client code from
//! disk or the network; here the seam is a trait so the registry can hand a
//! freshly assigned `(specifier, id)` pair to whichever loader is installed.
//! The bundled [`InMemoryLoader`] materializes modules straight from the
//! registry's id table.

use weft_types::{ModuleId, Result};

use crate::exports::LoadedModule;
use crate::registry::ModuleRegistry;

/// Hook that materializes a module object for a freshly registered unit.
pub trait ExtensionLoader: Send + Sync {
    /// Materialize the module registered at `id` under `specifier`.
    ///
    /// An id absent from the registry's table is a programming error and
    /// must surface as [`weft_types::Error::UnknownModuleId`].
    fn load(&self, specifier: &str, id: ModuleId, registry: &ModuleRegistry)
        -> Result<LoadedModule>;

    /// Loader name for logging/diagnostics.
    fn name(&self) -> &str;
}

/// Loader that reads from the registry's in-memory table, simulating what a
/// real module loader does by reading from disk or network.
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryLoader;

impl ExtensionLoader for InMemoryLoader {
    fn load(
        &self,
        specifier: &str,
        id: ModuleId,
        registry: &ModuleRegistry,
    ) -> Result<LoadedModule> {
        let exports = registry.require(id)?;
        Ok(LoadedModule::new(specifier, id, exports))
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
