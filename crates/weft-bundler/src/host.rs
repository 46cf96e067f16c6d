//! Host dispatcher slot and platform collaborator interface.
//!
//! The dispatch layer needs host-specific state installed before the first
//! reference is resolved; `prepare_host_dispatcher` implementations install
//! it here. The [`HostDispatcher`] trait itself is consumed only: real
//! implementations live in the host engine, and this crate ships a
//! recording double for tests.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

/// Opaque handle the host engine hands out for a mounted component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicInstance(pub u64);

/// Opaque internal instance handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InternalHandle(pub u64);

/// Tag of the underlying platform node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformNode(pub u64);

/// Platform collaborator surface, consumed only.
pub trait HostDispatcher: Send + Sync {
    /// Map a public component handle to its internal instance handle.
    fn internal_handle(&self, instance: PublicInstance) -> Option<InternalHandle>;

    /// Resolve an internal instance handle to its underlying platform node.
    fn platform_node(&self, handle: InternalHandle) -> Option<PlatformNode>;

    /// Dispatch a platform command by name with an argument list.
    fn dispatch_command(&self, node: PlatformNode, command: &str, args: &[serde_json::Value]);
}

static HOST_DISPATCHER: RwLock<Option<Arc<dyn HostDispatcher>>> = RwLock::new(None);

/// Install the process-wide host dispatcher.
///
/// Only the first installation wins; returns whether this call installed
/// it. Repeat installations are no-ops so that preparing an integration
/// twice (or preparing a second, non-primary integration) never replaces
/// the dispatcher already in use.
pub fn install_host_dispatcher(dispatcher: Arc<dyn HostDispatcher>) -> bool {
    let mut slot = HOST_DISPATCHER.write();
    if slot.is_some() {
        return false;
    }
    *slot = Some(dispatcher);
    debug!("host dispatcher installed");
    true
}

/// The currently installed host dispatcher, if any.
pub fn current_host_dispatcher() -> Option<Arc<dyn HostDispatcher>> {
    HOST_DISPATCHER.read().clone()
}

/// One command recorded by [`RecordingDispatcher`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCommand {
    pub node: PlatformNode,
    pub command: String,
    pub args: Vec<serde_json::Value>,
}

/// Dispatcher double that records dispatched commands for assertions.
///
/// Handle resolution is the identity mapping, so tests can mint instances
/// from raw tags without modeling the host engine.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    commands: Mutex<Vec<RecordedCommand>>,
}

impl RecordingDispatcher {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far, in dispatch order.
    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.commands.lock().clone()
    }
}

impl HostDispatcher for RecordingDispatcher {
    fn internal_handle(&self, instance: PublicInstance) -> Option<InternalHandle> {
        Some(InternalHandle(instance.0))
    }

    fn platform_node(&self, handle: InternalHandle) -> Option<PlatformNode> {
        Some(PlatformNode(handle.0))
    }

    fn dispatch_command(&self, node: PlatformNode, command: &str, args: &[serde_json::Value]) {
        self.commands.lock().push(RecordedCommand {
            node,
            command: command.to_string(),
            args: args.to_vec(),
        });
    }
}
