//! The swap-chain worker: one thread owning one surface assignment.
//!
//! Lifecycle: constructed, running, terminating, joined.  Construction is
//! eager; the consumer thread exists and is running before `spawn` returns.
//! Stopping raises the termination signal and then joins, so by the time
//! teardown returns the thread is gone and its surface has been released.
//!
//! The virtual monitor presents no content.  The thread body therefore has
//! no frame loop: it applies the scheduling hint, hands the surface back to
//! the compositor, and exits.  The buffer-available signal supplied with the
//! assignment is retained for the worker's lifetime but never waited on.

use std::thread::{self, JoinHandle};

use tracing::{debug, warn};
use vdd_core::SurfaceId;

use crate::infrastructure::display::OutputSurface;
use crate::infrastructure::gpu::RenderDevice;
use crate::infrastructure::worker::signal::Signal;
use crate::infrastructure::worker::{ThreadPriorityGuard, WorkerError};

/// Name given to every consumer thread, visible in debuggers and profilers.
const WORKER_THREAD_NAME: &str = "vdd-swapchain";

/// Owns the surface across the spawn boundary and returns it to the
/// compositor exactly once, on drop.  A spawn that never starts drops the
/// un-run closure, so the surface is invalidated even then instead of being
/// leaked in an assigned-but-unowned state.
struct SurfaceRelease(Box<dyn OutputSurface>);

impl Drop for SurfaceRelease {
    fn drop(&mut self) {
        self.0.invalidate();
    }
}

/// Owns the consumer thread for one swap-chain assignment.
pub struct SwapChainWorker {
    surface_id: SurfaceId,
    terminate: Signal,
    thread: Option<JoinHandle<()>>,
}

impl SwapChainWorker {
    /// Spawns the consumer thread for one surface assignment.
    ///
    /// The worker creates its own termination signal; `frame_available`
    /// comes from the caller alongside the surface.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Spawn`] if the OS refuses to start the thread.
    /// The surface is invalidated on the way out (the compositor will
    /// regenerate it) and no worker state is retained.
    pub fn spawn(
        surface: Box<dyn OutputSurface>,
        device: Box<dyn RenderDevice>,
        frame_available: Signal,
    ) -> Result<Self, WorkerError> {
        let surface_id = surface.id();
        let surface = SurfaceRelease(surface);
        let terminate = Signal::new();
        let thread_terminate = terminate.clone();
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || consume(surface, device, frame_available, thread_terminate))
            .map_err(|source| WorkerError::Spawn { source })?;
        debug!(surface = %surface_id, "swap-chain worker running");
        Ok(Self {
            surface_id,
            terminate,
            thread: Some(handle),
        })
    }

    /// Identity of the surface this worker was constructed around.
    pub fn surface_id(&self) -> SurfaceId {
        self.surface_id
    }

    /// Signals termination and blocks until the thread has exited.
    ///
    /// Dropping an un-stopped worker performs the same raise-then-join, so
    /// the thread never outlives its owner either way.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(handle) = self.thread.take() {
            self.terminate.raise();
            if handle.join().is_err() {
                warn!(surface = %self.surface_id, "swap-chain worker thread panicked");
            }
            debug!(surface = %self.surface_id, "swap-chain worker joined");
        }
    }
}

impl Drop for SwapChainWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Thread body for one assignment.
///
/// The priority guard is declared first so it reverts after the release on
/// every exit path.  Dropping the surface hands the swap chain back to the
/// compositor immediately; the termination signal is raised by `stop`, but
/// with the surface already gone there is nothing left to wait for.
fn consume(
    surface: SurfaceRelease,
    device: Box<dyn RenderDevice>,
    _frame_available: Signal,
    _terminate: Signal,
) {
    let _priority = ThreadPriorityGuard::acquire();
    debug!(
        surface = %surface.0.id(),
        gpu = %device.adapter_luid(),
        "consumer thread entered"
    );
    drop(surface);
}
