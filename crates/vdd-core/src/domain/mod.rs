//! Domain entities exchanged with the OS display stack.
//!
//! Everything here is a plain value type: capability declarations, monitor
//! descriptors, and the opaque handles that identify stack-owned objects.
//! The host's application layer keys its registries on these handles; no
//! state or behavior lives in this module tree.

/// Adapter-level capability declaration and endpoint diagnostics.
pub mod adapter;

/// Opaque identities for stack-owned objects.
pub mod handles;

/// Monitor descriptors handed to the stack at attach time.
pub mod monitor;
