//! In-process simulation of the display stack.
//!
//! Always compiled (not `#[cfg(test)]`) so the host binary can run a full
//! lifecycle session on any platform and the integration tests can observe
//! the very same object from the outside.  Handles are allocated from one
//! monotonic counter; created monitors and the declared capability block are
//! recorded for inspection; individual operations can be configured to fail
//! for exercising the error paths.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, info};
use uuid::Uuid;
use vdd_core::{AdapterCaps, AdapterHandle, ConnectorIndex, MonitorDescriptor, MonitorHandle, SurfaceId};

use super::{DisplayStack, DisplayStackError, OutputSurface};

/// Record of one monitor the stack has created.
#[derive(Debug, Clone)]
pub struct CreatedMonitor {
    pub handle: MonitorHandle,
    pub connector: ConnectorIndex,
    pub container_id: Uuid,
    /// Set once the host announces the monitor's arrival.
    pub announced: bool,
}

#[derive(Default)]
struct StackState {
    declared_caps: Option<AdapterCaps>,
    monitors: Vec<CreatedMonitor>,
}

/// The simulated stack.  Shared across threads behind an `Arc`.
pub struct InProcessDisplayStack {
    next_handle: AtomicU64,
    reject_init: AtomicBool,
    reject_monitor_creation: AtomicBool,
    reject_arrival: AtomicBool,
    state: Mutex<StackState>,
}

impl InProcessDisplayStack {
    pub fn new() -> Self {
        Self {
            next_handle: AtomicU64::new(1),
            reject_init: AtomicBool::new(false),
            reject_monitor_creation: AtomicBool::new(false),
            reject_arrival: AtomicBool::new(false),
            state: Mutex::new(StackState::default()),
        }
    }

    /// Makes every subsequent adapter init request fail.
    pub fn reject_adapter_init(&self) {
        self.reject_init.store(true, Ordering::SeqCst);
    }

    /// Makes every subsequent monitor creation fail.
    pub fn reject_monitor_creation(&self) {
        self.reject_monitor_creation.store(true, Ordering::SeqCst);
    }

    /// Makes every subsequent arrival announcement fail.
    pub fn reject_arrival(&self) {
        self.reject_arrival.store(true, Ordering::SeqCst);
    }

    /// Snapshot of every monitor created so far.
    pub fn created_monitors(&self) -> Vec<CreatedMonitor> {
        self.state.lock().expect("stack lock poisoned").monitors.clone()
    }

    /// The capability block the host declared, if init was requested.
    pub fn declared_caps(&self) -> Option<AdapterCaps> {
        self.state
            .lock()
            .expect("stack lock poisoned")
            .declared_caps
            .clone()
    }

    /// Allocates a fresh swap-chain surface, as the compositor would on an
    /// assignment.  Keep the [`InProcessSurface::observer`] to watch for the
    /// host giving the surface back.
    pub fn new_surface(&self) -> InProcessSurface {
        InProcessSurface::new(SurfaceId(self.alloc()))
    }

    fn alloc(&self) -> u64 {
        self.next_handle.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for InProcessDisplayStack {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayStack for InProcessDisplayStack {
    fn init_adapter(&self, caps: &AdapterCaps) -> Result<AdapterHandle, DisplayStackError> {
        if self.reject_init.load(Ordering::SeqCst) {
            return Err(DisplayStackError::InitRejected(
                "stack configured to reject adapter init".to_string(),
            ));
        }
        let handle = AdapterHandle(self.alloc());
        self.state.lock().expect("stack lock poisoned").declared_caps = Some(caps.clone());
        info!(%handle, max_monitors = caps.max_monitors, "adapter object created");
        Ok(handle)
    }

    fn create_monitor(
        &self,
        adapter: AdapterHandle,
        descriptor: &MonitorDescriptor,
    ) -> Result<MonitorHandle, DisplayStackError> {
        if self.reject_monitor_creation.load(Ordering::SeqCst) {
            return Err(DisplayStackError::MonitorCreation {
                connector: descriptor.connector,
                reason: "stack configured to reject monitor creation".to_string(),
            });
        }
        let handle = MonitorHandle(self.alloc());
        self.state
            .lock()
            .expect("stack lock poisoned")
            .monitors
            .push(CreatedMonitor {
                handle,
                connector: descriptor.connector,
                container_id: descriptor.container_id,
                announced: false,
            });
        info!(%adapter, %handle, connector = %descriptor.connector, "monitor object created");
        Ok(handle)
    }

    fn announce_arrival(&self, monitor: MonitorHandle) -> Result<(), DisplayStackError> {
        if self.reject_arrival.load(Ordering::SeqCst) {
            return Err(DisplayStackError::Arrival {
                monitor,
                reason: "stack configured to reject arrival".to_string(),
            });
        }
        let mut state = self.state.lock().expect("stack lock poisoned");
        match state.monitors.iter_mut().find(|m| m.handle == monitor) {
            Some(record) => {
                record.announced = true;
                info!(%monitor, "monitor arrival announced");
                Ok(())
            }
            None => Err(DisplayStackError::Arrival {
                monitor,
                reason: "unknown monitor handle".to_string(),
            }),
        }
    }
}

/// Surface handed out by the in-process stack.
pub struct InProcessSurface {
    id: SurfaceId,
    invalidated: Arc<AtomicBool>,
}

impl InProcessSurface {
    pub fn new(id: SurfaceId) -> Self {
        Self {
            id,
            invalidated: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared observer for the invalidation flag; survives the surface
    /// being boxed and moved into a worker.
    pub fn observer(&self) -> SurfaceObserver {
        SurfaceObserver {
            id: self.id,
            invalidated: Arc::clone(&self.invalidated),
        }
    }
}

impl OutputSurface for InProcessSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn invalidate(&mut self) {
        if !self.invalidated.swap(true, Ordering::SeqCst) {
            debug!(surface = %self.id, "surface returned to the compositor");
        }
    }
}

/// Read side of an [`InProcessSurface`]'s invalidation flag.
#[derive(Clone)]
pub struct SurfaceObserver {
    id: SurfaceId,
    invalidated: Arc<AtomicBool>,
}

impl SurfaceObserver {
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated.load(Ordering::SeqCst)
    }
}
