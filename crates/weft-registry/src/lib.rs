//! Weft Module Registry
//!
//! Process-local module registry simulating what a real bundler's runtime
//! loader does on the consuming side: a table from small integer ids to
//! already-loaded units of exported values, plus the reference-map builder
//! that assigns wire-stable ids at registration time.
//!
//! This crate provides:
//! - [`exports`]: Type-erased export values and insertion-ordered units
//! - [`loader`]: The extension-loader seam and its in-memory implementation
//! - [`registry`]: [`ModuleRegistry`] - id assignment, specifier side table,
//!   and manifest building
//!
//! # Registration
//!
//! Registering a unit assigns the next integer id (monotonic from 0), seeds
//! the manifest entry for the unit's synthetic specifier with the well-known
//! `""`/`"*"` exports, records the unit's own exports, and hands the
//! `(specifier, id)` pair to the installed extension loader, which
//! materializes the module object from the in-memory table.
//!
//! ```ignore
//! use weft_registry::{ModuleExports, ModuleRegistry};
//!
//! let registry = ModuleRegistry::new();
//! let loaded = registry.register(ModuleExports::default_export("chart"))?;
//! assert_eq!(loaded.specifier(), "file:///0");
//! ```

pub mod exports;
pub mod loader;
pub mod registry;

// Re-export the main types for convenience
pub use exports::{ExportValue, LoadedModule, ModuleExports};
pub use loader::{ExtensionLoader, InMemoryLoader};
pub use registry::ModuleRegistry;
