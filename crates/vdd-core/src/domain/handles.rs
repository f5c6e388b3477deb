//! Opaque identities for objects the display stack owns.
//!
//! The stack allocates adapters, monitors, and swap-chain surfaces and refers
//! to them by handle value.  The host never dereferences a handle; it keys
//! its own context registries on them and hands them back on later calls.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to the display stack's adapter object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdapterHandle(pub u64);

impl fmt::Display for AdapterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "adapter#{}", self.0)
    }
}

/// Handle to one monitor object created on an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonitorHandle(pub u64);

impl fmt::Display for MonitorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "monitor#{}", self.0)
    }
}

/// Identity of one swap-chain surface, carried for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Locally-unique identifier of the GPU that should back a surface's render
/// device.  Same low/high split as a Win32 `LUID`; only equality matters to
/// the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GpuLuid {
    pub low: u32,
    pub high: i32,
}

impl GpuLuid {
    pub const fn new(low: u32, high: i32) -> Self {
        Self { low, high }
    }
}

impl fmt::Display for GpuLuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "luid:{:08x}:{:08x}", self.high, self.low)
    }
}

/// Zero-based index of the connector a monitor attaches at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectorIndex(pub u32);

impl fmt::Display for ConnectorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connector{}", self.0)
    }
}
