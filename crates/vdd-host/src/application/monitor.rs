//! Per-monitor swap-chain ownership.
//!
//! A monitor holds 0 or 1 live swap-chain worker at any instant.  Every
//! assignment tears the previous worker down first, and teardown joins the
//! worker thread, so two workers for one monitor can never overlap.  When
//! the render device cannot be bound, the supplied surface is invalidated:
//! the compositor sees its surface die, regenerates a fresh one, and retries
//! the assignment.  That upward delegation is the only retry mechanism; the
//! monitor itself never loops.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use vdd_core::{ConnectorIndex, GpuLuid, MonitorHandle, SurfaceId};

use crate::infrastructure::display::OutputSurface;
use crate::infrastructure::gpu::{DeviceBindError, RenderDeviceBinder};
use crate::infrastructure::worker::signal::Signal;
use crate::infrastructure::worker::swapchain::SwapChainWorker;
use crate::infrastructure::worker::WorkerError;

/// Error type for swap-chain assignment.
#[derive(Debug, Error)]
pub enum AssignError {
    /// The render device could not be bound; the surface was invalidated so
    /// the compositor regenerates it and retries.
    #[error("render device binding failed: {0}")]
    Bind(#[from] DeviceBindError),

    /// The worker thread could not be started; the surface was invalidated
    /// on the way out and no worker was recorded.
    #[error("worker start failed: {0}")]
    Worker(#[from] WorkerError),
}

/// Context for one attached monitor.
pub struct MonitorContext {
    handle: MonitorHandle,
    connector: ConnectorIndex,
    binder: Arc<dyn RenderDeviceBinder>,
    worker: Option<SwapChainWorker>,
}

impl MonitorContext {
    pub fn new(
        handle: MonitorHandle,
        connector: ConnectorIndex,
        binder: Arc<dyn RenderDeviceBinder>,
    ) -> Self {
        Self {
            handle,
            connector,
            binder,
            worker: None,
        }
    }

    pub fn handle(&self) -> MonitorHandle {
        self.handle
    }

    pub fn connector(&self) -> ConnectorIndex {
        self.connector
    }

    /// True while a swap-chain worker is live on this monitor.
    pub fn has_active_worker(&self) -> bool {
        self.worker.is_some()
    }

    /// Identity of the currently assigned surface, if any.
    pub fn active_surface(&self) -> Option<SurfaceId> {
        self.worker.as_ref().map(SwapChainWorker::surface_id)
    }

    /// Assigns a new swap chain to this monitor.
    ///
    /// Any existing worker is stopped and joined before the new device is
    /// bound, so the old assignment is fully gone before the new one begins.
    /// A fresh render device is constructed on every call, even for a GPU
    /// the monitor was bound to a moment ago.
    ///
    /// # Errors
    ///
    /// [`AssignError::Bind`] if the GPU could not be resolved or its device
    /// constructed (the surface has been invalidated by then), and
    /// [`AssignError::Worker`] if the consumer thread would not start.  In
    /// both cases the monitor is left with no live worker.
    pub fn assign_swap_chain(
        &mut self,
        mut surface: Box<dyn OutputSurface>,
        gpu: GpuLuid,
        frame_available: Signal,
    ) -> Result<(), AssignError> {
        self.release_worker();

        let device = match self.binder.bind(gpu) {
            Ok(device) => device,
            Err(source) => {
                warn!(
                    monitor = %self.handle,
                    gpu = %gpu,
                    error = %source,
                    "render device bind failed; invalidating surface"
                );
                surface.invalidate();
                return Err(AssignError::Bind(source));
            }
        };

        let worker = SwapChainWorker::spawn(surface, device, frame_available)?;
        info!(
            monitor = %self.handle,
            surface = %worker.surface_id(),
            gpu = %gpu,
            "swap chain assigned"
        );
        self.worker = Some(worker);
        Ok(())
    }

    /// Stops and joins the current worker, if any.
    ///
    /// Returns whether a worker was actually released; calling with none
    /// live is a harmless no-op.
    pub fn unassign_swap_chain(&mut self) -> bool {
        let released = self.release_worker();
        if released {
            info!(monitor = %self.handle, "swap chain unassigned");
        }
        released
    }

    /// Closes the context, joining any live worker.  Consumes the value:
    /// a closed monitor cannot take another assignment.
    pub fn close(mut self) {
        self.release_worker();
    }

    fn release_worker(&mut self) -> bool {
        match self.worker.take() {
            Some(worker) => {
                worker.stop();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::display::in_process::InProcessSurface;
    use crate::infrastructure::gpu::headless::{HeadlessBinder, HeadlessRenderDevice};
    use crate::infrastructure::gpu::mock::ScriptedBinder;
    use crate::infrastructure::gpu::MockRenderDeviceBinder;

    fn context_with(binder: Arc<dyn RenderDeviceBinder>) -> MonitorContext {
        MonitorContext::new(MonitorHandle(1), ConnectorIndex(0), binder)
    }

    fn surface(id: u64) -> (Box<dyn OutputSurface>, crate::infrastructure::display::in_process::SurfaceObserver) {
        let surface = InProcessSurface::new(SurfaceId(id));
        let observer = surface.observer();
        (Box::new(surface), observer)
    }

    #[test]
    fn test_assignment_records_exactly_one_worker() {
        let mut monitor = context_with(Arc::new(HeadlessBinder::new()));
        let (boxed, _observer) = surface(1);
        monitor
            .assign_swap_chain(boxed, GpuLuid::new(1, 0), Signal::new())
            .expect("assign");
        assert!(monitor.has_active_worker());
        assert_eq!(monitor.active_surface(), Some(SurfaceId(1)));
    }

    #[test]
    fn test_bind_failure_invalidates_surface_and_records_no_worker() {
        let binder = Arc::new(ScriptedBinder::new());
        binder.push_failure(DeviceBindError::AdapterNotFound(GpuLuid::new(7, 0)));
        let mut monitor = context_with(binder);

        let (boxed, observer) = surface(2);
        let result = monitor.assign_swap_chain(boxed, GpuLuid::new(7, 0), Signal::new());

        assert!(matches!(result, Err(AssignError::Bind(_))));
        assert!(observer.is_invalidated());
        assert!(!monitor.has_active_worker());
    }

    #[test]
    fn test_reassignment_replaces_the_previous_worker() {
        let binder = Arc::new(ScriptedBinder::new());
        let mut monitor = context_with(Arc::clone(&binder) as Arc<dyn RenderDeviceBinder>);

        let (first, first_observer) = surface(1);
        let (second, _second_observer) = surface(2);
        monitor
            .assign_swap_chain(first, GpuLuid::new(1, 0), Signal::new())
            .expect("first assign");
        monitor
            .assign_swap_chain(second, GpuLuid::new(2, 0), Signal::new())
            .expect("second assign");

        // Exactly one live worker, bound to the second surface; the first
        // was joined (and its surface released) before the second bind ran.
        assert!(monitor.has_active_worker());
        assert_eq!(monitor.active_surface(), Some(SurfaceId(2)));
        assert!(first_observer.is_invalidated());
        assert_eq!(binder.calls(), vec![GpuLuid::new(1, 0), GpuLuid::new(2, 0)]);
    }

    #[test]
    fn test_unassign_is_idempotent() {
        let mut monitor = context_with(Arc::new(HeadlessBinder::new()));
        assert!(!monitor.unassign_swap_chain());
        assert!(!monitor.unassign_swap_chain());

        let (boxed, _observer) = surface(3);
        monitor
            .assign_swap_chain(boxed, GpuLuid::new(1, 0), Signal::new())
            .expect("assign");
        assert!(monitor.unassign_swap_chain());
        assert!(!monitor.unassign_swap_chain());
        assert!(!monitor.has_active_worker());
    }

    #[test]
    fn test_binder_sees_the_requested_gpu_identity() {
        // mockall variant of the scripted-binder checks: the expectation
        // pins the exact LUID the context must forward.
        let mut mock = MockRenderDeviceBinder::new();
        mock.expect_bind()
            .withf(|luid| *luid == GpuLuid::new(11, 3))
            .times(1)
            .returning(|luid| Ok(Box::new(HeadlessRenderDevice::new(luid))));

        let mut monitor = context_with(Arc::new(mock));
        let (boxed, _observer) = surface(4);
        monitor
            .assign_swap_chain(boxed, GpuLuid::new(11, 3), Signal::new())
            .expect("assign");
        assert!(monitor.has_active_worker());
    }

    #[test]
    fn test_close_joins_the_live_worker() {
        let mut monitor = context_with(Arc::new(HeadlessBinder::new()));
        let (boxed, observer) = surface(5);
        monitor
            .assign_swap_chain(boxed, GpuLuid::new(1, 0), Signal::new())
            .expect("assign");
        monitor.close();
        assert!(observer.is_invalidated());
    }
}
