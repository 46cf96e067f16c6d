//! Error types for weft protocol operations.
//!
//! Resolution misses and registry lookup failures are developer/toolchain
//! facing protocol violations: the messages carry the offending specifier,
//! export, or id so they can be surfaced in server logs as-is.

use thiserror::Error;

use crate::reference::ModuleId;

/// Result type alias for weft operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Protocol errors for reference resolution and module registration.
#[derive(Error, Debug)]
pub enum Error {
    /// A specifier/export pair was absent from the reference manifest at
    /// consumption time. The consumer cannot proceed without the referenced
    /// code, so this propagates as a hard failure.
    #[error("unresolved client reference: {specifier}#{export} is not present in the reference manifest")]
    UnresolvedReference {
        /// Synthetic specifier that failed to resolve.
        specifier: String,
        /// Wire export name (`""` for default, `"*"` for namespace).
        export: String,
    },

    /// An id was looked up against the module table without ever being
    /// assigned. Registration is the only path that assigns ids, so this is
    /// a programming error, not a recoverable condition.
    #[error("unknown module id {0} in the module table")]
    UnknownModuleId(ModuleId),

    /// A module was registered before any extension loader was installed.
    #[error("no extension loader installed; modules cannot be materialized")]
    LoaderMissing,

    /// A reference manifest could not be parsed or serialized.
    #[error("malformed reference manifest: {0}")]
    MalformedManifest(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_reference_message_names_specifier_and_export() {
        let err = Error::UnresolvedReference {
            specifier: "file:///7".to_string(),
            export: "*".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("file:///7"));
        assert!(message.contains('*'));
    }

    #[test]
    fn test_unknown_module_id_message() {
        let err = Error::UnknownModuleId(ModuleId::new(3));
        assert!(err.to_string().contains('3'));
    }
}
