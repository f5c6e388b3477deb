//! The display-stack boundary.
//!
//! The OS display stack owns the adapter, monitor, and swap-chain objects.
//! Traffic crosses this boundary in both directions:
//!
//! - **Outbound** (the [`DisplayStack`] trait): the host requests adapter
//!   initialization, creates monitor objects, and announces their arrival.
//!
//! - **Inbound**: the stack calls the host's entry points on its own threads
//!   (init-finished, mode queries, surface assign/unassign).  Those land on
//!   [`crate::application::adapter::AdapterContext`]; nothing here blocks
//!   them.
//!
//! Swap-chain surfaces are compositor-owned; the host holds one through the
//! [`OutputSurface`] trait for exactly one assignment and gives it back by
//! invalidating it.
//!
//! The [`in_process`] sub-module carries an always-compiled simulation of
//! the stack so the host binary and the integration tests can run a full
//! lifecycle on any platform.

use thiserror::Error;
use vdd_core::{AdapterCaps, AdapterHandle, ConnectorIndex, MonitorDescriptor, MonitorHandle, SurfaceId};

pub mod in_process;

/// Error type for outbound display-stack operations.
#[derive(Debug, Error)]
pub enum DisplayStackError {
    /// The stack refused to begin adapter initialization.
    #[error("adapter init request rejected: {0}")]
    InitRejected(String),

    /// The stack could not create a monitor object.
    #[error("monitor creation failed on {connector}: {reason}")]
    MonitorCreation {
        connector: ConnectorIndex,
        reason: String,
    },

    /// The arrival announcement was not accepted.
    #[error("arrival announcement failed for {monitor}: {reason}")]
    Arrival {
        monitor: MonitorHandle,
        reason: String,
    },
}

/// One swap-chain surface the compositor handed to the host.
///
/// The host owns the object for exactly one assignment.  Invalidation
/// returns it to the compositor, which discards it and generates a fresh
/// surface for the next assignment attempt; that regeneration is the whole
/// retry mechanism after a failed bind.
pub trait OutputSurface: Send {
    fn id(&self) -> SurfaceId;

    /// Tells the compositor to discard this surface.  Idempotent.
    fn invalidate(&mut self);
}

/// Outbound calls the host makes into the OS display stack.
///
/// `init_adapter` is asynchronous on the stack side: it returns the adapter
/// handle right away, and the final status arrives later as an
/// init-finished call on the stack's own thread.
pub trait DisplayStack: Send + Sync {
    fn init_adapter(&self, caps: &AdapterCaps) -> Result<AdapterHandle, DisplayStackError>;

    fn create_monitor(
        &self,
        adapter: AdapterHandle,
        descriptor: &MonitorDescriptor,
    ) -> Result<MonitorHandle, DisplayStackError>;

    fn announce_arrival(&self, monitor: MonitorHandle) -> Result<(), DisplayStackError>;
}
