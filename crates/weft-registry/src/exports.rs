//! Export values and module units.
//!
//! The registry never evaluates code; it stores already-loaded units of
//! exported values. Values are type-erased so tests can register anything
//! (closures included), and they share storage on clone so resolution
//! identity is observable.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use weft_types::ModuleId;

/// A single type-erased exported value.
///
/// Clones share storage: every materialization of the same registration
/// yields the same underlying value, which is what makes the
/// "same `(id, export)` resolves to the same runtime value" invariant
/// testable.
#[derive(Clone)]
pub struct ExportValue(Arc<dyn Any + Send + Sync>);

impl ExportValue {
    /// Wrap a value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the value as `T`, if that is its concrete type.
    pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    /// Whether the concrete type is `T`.
    pub fn is<T: Any + Send + Sync>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Identity comparison: `true` when both handles share storage.
    pub fn same_value(&self, other: &ExportValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ExportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExportValue(<opaque>)")
    }
}

/// One unit of exported values, keyed by export name in insertion order.
///
/// A `"default"` entry represents the default export. Insertion order is
/// preserved because registration iterates the unit's own export names in
/// order, and that order is observable in the resulting manifest.
#[derive(Debug, Clone, Default)]
pub struct ModuleExports {
    entries: IndexMap<String, ExportValue>,
}

impl ModuleExports {
    /// Create an empty unit (a side-effect-only module with no exports).
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit with a single default export.
    pub fn default_export<T: Any + Send + Sync>(value: T) -> Self {
        Self::new().with("default", ExportValue::new(value))
    }

    /// Add an export, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: ExportValue) {
        self.entries.insert(name.into(), value);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: ExportValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up an export by name.
    pub fn get(&self, name: &str) -> Option<&ExportValue> {
        self.entries.get(name)
    }

    /// Export names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExportValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of exports.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the unit has no exports.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Module object materialized by the extension loader.
#[derive(Debug, Clone)]
pub struct LoadedModule {
    specifier: String,
    id: ModuleId,
    exports: ModuleExports,
}

impl LoadedModule {
    /// Wrap the exports materialized for `specifier`/`id`.
    pub fn new(specifier: impl Into<String>, id: ModuleId, exports: ModuleExports) -> Self {
        Self {
            specifier: specifier.into(),
            id,
            exports,
        }
    }

    /// The synthetic specifier the module was registered under.
    pub fn specifier(&self) -> &str {
        &self.specifier
    }

    /// The registry-assigned id.
    pub fn id(&self) -> ModuleId {
        self.id
    }

    /// All exports of the module.
    pub fn exports(&self) -> &ModuleExports {
        &self.exports
    }

    /// Look up one export by name.
    pub fn export(&self, name: &str) -> Option<&ExportValue> {
        self.exports.get(name)
    }

    /// The default export, when present.
    pub fn default_export(&self) -> Option<&ExportValue> {
        self.exports.get("default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_value_downcast() {
        let value = ExportValue::new("chart".to_string());
        assert!(value.is::<String>());
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("chart"));
        assert!(value.downcast_ref::<u32>().is_none());
    }

    #[test]
    fn test_clones_share_storage() {
        let value = ExportValue::new(42u64);
        let clone = value.clone();
        assert!(value.same_value(&clone));

        let other = ExportValue::new(42u64);
        assert!(!value.same_value(&other));
    }

    #[test]
    fn test_names_preserve_insertion_order() {
        let unit = ModuleExports::new()
            .with("b", ExportValue::new(1u8))
            .with("a", ExportValue::new(2u8));
        let names: Vec<&str> = unit.names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_default_export_helper() {
        let unit = ModuleExports::default_export("component");
        assert_eq!(unit.len(), 1);
        assert!(unit.get("default").is_some());
    }
}
