//! Wire-stable client reference types.
//!
//! A client reference is an opaque server-side placeholder standing in for
//! code that only exists on the consuming runtime. The server never loads
//! that code; it serializes a [`ReferenceMetadata`] descriptor that the
//! consumer's module loader turns back into a loadable unit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned to a registered module.
///
/// Assigned monotonically from 0 by the registry and stable for the process
/// lifetime. The same id is shared by every export of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(u32);

impl ModuleId {
    /// Wrap a raw id.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw numeric form.
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Export slot within a module.
///
/// The wire form is `""` for the default export, `"*"` for the module
/// namespace, and the literal name for a named export.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExportName {
    /// The default export (wire name `""`).
    Default,
    /// The whole-module namespace (wire name `"*"`).
    Namespace,
    /// A named export.
    Named(String),
}

impl ExportName {
    /// Construct a named export.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// The wire string form.
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Default => "",
            Self::Namespace => "*",
            Self::Named(name) => name,
        }
    }

    /// Parse the wire string form.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "" => Self::Default,
            "*" => Self::Namespace,
            other => Self::Named(other.to_string()),
        }
    }
}

impl fmt::Display for ExportName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Wire descriptor for one export of a client module.
///
/// This is the shape a real bundler writes into its build-time manifest and
/// the serialization layer embeds in the streamed payload: the module id,
/// the chunks the consumer must load before the export is usable, and the
/// wire export name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceMetadata {
    /// Registry/bundler-assigned module id.
    pub id: ModuleId,
    /// Ordered chunk identifiers required before the export is usable.
    /// Empty in the in-memory test double.
    pub chunks: Vec<String>,
    /// Wire export name (`""` default, `"*"` namespace, or the literal name).
    pub name: String,
}

impl ReferenceMetadata {
    /// Descriptor for an export with no chunk requirements.
    pub fn new(id: ModuleId, export: &ExportName) -> Self {
        Self {
            id,
            chunks: Vec::new(),
            name: export.as_wire().to_string(),
        }
    }

    /// Attach the chunks the consumer must load first.
    pub fn with_chunks(mut self, chunks: Vec<String>) -> Self {
        self.chunks = chunks;
        self
    }

    /// The typed export slot this descriptor names.
    pub fn export(&self) -> ExportName {
        ExportName::from_wire(&self.name)
    }
}

/// Opaque server-side placeholder for a client-only export.
///
/// Created once per exported unit at registration time and immutable
/// thereafter. Two references with the same `(id, export)` resolve to the
/// same runtime value on the consuming side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientReference {
    specifier: String,
    export: ExportName,
}

impl ClientReference {
    /// Reference a single export of the module registered under `specifier`.
    pub fn new(specifier: impl Into<String>, export: ExportName) -> Self {
        Self {
            specifier: specifier.into(),
            export,
        }
    }

    /// The synthetic specifier the module was registered under.
    pub fn specifier(&self) -> &str {
        &self.specifier
    }

    /// The export slot this reference names.
    pub fn export(&self) -> &ExportName {
        &self.export
    }

    /// Stable cache key: `specifier#wire_export_name`.
    pub fn key(&self) -> String {
        format!("{}#{}", self.specifier, self.export.as_wire())
    }
}
