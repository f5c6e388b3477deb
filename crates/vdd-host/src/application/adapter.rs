//! Adapter lifecycle: power-on, async init, and monitor attachment.
//!
//! The adapter progresses through these states:
//!
//! ```text
//! Uninitialized ──► InitPending ──► Ready ──► MonitorsAttaching ──► MonitorsAttached
//!                        │
//!                 (init failure)
//!                        ▼
//!                  Uninitialized   (permanent for this load)
//! ```
//!
//! - `Uninitialized`: nothing declared yet, or init failed for good.
//! - `InitPending`: capabilities declared, waiting for the stack's
//!   init-finished call.
//! - `Ready`: the stack confirmed the adapter; attachment is about to run.
//! - `MonitorsAttaching`: the sequential, synchronous attach loop is running
//!   on the init-finished caller's thread.
//! - `MonitorsAttached`: cold start complete; the adapter now answers mode
//!   queries and routes surface traffic until driver unload.
//!
//! Monitor contexts live in a registry keyed by the stack's monitor handle.
//! The stack tells us when it destroys a monitor object and the registry
//! entry is dropped on that call; nothing is cleaned up behind the stack's
//! back.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use vdd_core::{
    AdapterCaps, AdapterHandle, ConnectorIndex, DefaultModeReply, GpuLuid, MonitorDescriptor,
    MonitorHandle, TargetModeReply,
};

use crate::application::monitor::{AssignError, MonitorContext};
use crate::infrastructure::display::{DisplayStack, DisplayStackError, OutputSurface};
use crate::infrastructure::gpu::RenderDeviceBinder;
use crate::infrastructure::worker::signal::Signal;

/// Lifecycle state of the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterState {
    Uninitialized,
    InitPending,
    Ready,
    MonitorsAttaching,
    MonitorsAttached,
}

/// Advisory lifecycle events for the host UI and logs.
///
/// The engine never depends on anyone consuming these; a full channel drops
/// the event rather than blocking the stack's calling thread.
#[derive(Debug)]
pub enum AdapterEvent {
    InitCompleted { adapter: AdapterHandle },
    InitFailed,
    MonitorArrived {
        connector: ConnectorIndex,
        monitor: MonitorHandle,
    },
    MonitorAttachFailed { connector: ConnectorIndex },
    SwapChainAssigned {
        monitor: MonitorHandle,
        gpu: GpuLuid,
    },
    SwapChainReleased { monitor: MonitorHandle },
}

/// Error type for adapter lifecycle operations.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// `power_on` was called on an adapter that already started.
    #[error("adapter is already started")]
    AlreadyStarted,

    /// The display stack refused the init request itself.
    #[error("adapter init request rejected by the display stack: {0}")]
    InitRequestRejected(#[source] DisplayStackError),

    /// The stack's init-finished call reported failure.  The adapter stays
    /// uninitialized for the rest of this load; there is no retry.
    #[error("display stack reported adapter init failure")]
    InitFailed,

    /// An init-finished call arrived while the adapter was not waiting for
    /// one.
    #[error("init completion arrived in state {state:?}")]
    UnexpectedInitCompletion { state: AdapterState },

    /// No monitor is registered under the given handle.
    #[error("no monitor is registered under {0}")]
    UnknownMonitor(MonitorHandle),

    /// Swap-chain assignment failed on the targeted monitor.
    #[error(transparent)]
    Assign(#[from] AssignError),
}

/// The device context driving one adapter for one driver load.
pub struct AdapterContext {
    stack: Arc<dyn DisplayStack>,
    binder: Arc<dyn RenderDeviceBinder>,
    caps: AdapterCaps,
    state: AdapterState,
    adapter: Option<AdapterHandle>,
    monitors: HashMap<MonitorHandle, MonitorContext>,
    events: mpsc::Sender<AdapterEvent>,
}

impl AdapterContext {
    /// Creates the context together with the receiver for its advisory
    /// event stream.
    pub fn new(
        stack: Arc<dyn DisplayStack>,
        binder: Arc<dyn RenderDeviceBinder>,
        caps: AdapterCaps,
    ) -> (Self, mpsc::Receiver<AdapterEvent>) {
        let (events, rx) = mpsc::channel(64);
        let context = Self {
            stack,
            binder,
            caps,
            state: AdapterState::Uninitialized,
            adapter: None,
            monitors: HashMap::new(),
            events,
        };
        (context, rx)
    }

    pub fn state(&self) -> AdapterState {
        self.state
    }

    pub fn adapter_handle(&self) -> Option<AdapterHandle> {
        self.adapter
    }

    /// Handles of every attached monitor, in connector order.
    pub fn monitor_handles(&self) -> Vec<MonitorHandle> {
        let mut handles: Vec<_> = self.monitors.values().map(|m| (m.connector(), m.handle())).collect();
        handles.sort_by_key(|(connector, _)| connector.0);
        handles.into_iter().map(|(_, handle)| handle).collect()
    }

    /// The context registered for `handle`, if the monitor is attached.
    pub fn monitor(&self, handle: MonitorHandle) -> Option<&MonitorContext> {
        self.monitors.get(&handle)
    }

    // ── Cold start ────────────────────────────────────────────────────────────

    /// Power-on entry point: declares the capability block and requests
    /// asynchronous adapter initialization from the display stack.
    ///
    /// Completion arrives later through [`adapter_init_finished`] on the
    /// stack's own thread.
    ///
    /// [`adapter_init_finished`]: AdapterContext::adapter_init_finished
    ///
    /// # Errors
    ///
    /// [`AdapterError::AlreadyStarted`] outside `Uninitialized`, and
    /// [`AdapterError::InitRequestRejected`] when the stack refuses the
    /// request (the adapter stays uninitialized).
    pub fn power_on(&mut self) -> Result<(), AdapterError> {
        if self.state != AdapterState::Uninitialized {
            return Err(AdapterError::AlreadyStarted);
        }
        match self.stack.init_adapter(&self.caps) {
            Ok(handle) => {
                self.adapter = Some(handle);
                self.state = AdapterState::InitPending;
                info!(%handle, max_monitors = self.caps.max_monitors, "adapter init requested");
                Ok(())
            }
            Err(source) => {
                error!(error = %source, "adapter init request rejected");
                Err(AdapterError::InitRequestRejected(source))
            }
        }
    }

    /// Init-finished callback from the display stack.
    ///
    /// On success, attaches the fixed monitor set sequentially on the
    /// caller's thread.  A single monitor's failure is reported and skipped;
    /// its siblings attach normally and nothing is retried.  On failure the
    /// adapter returns to `Uninitialized` for the rest of this load.
    ///
    /// # Errors
    ///
    /// [`AdapterError::UnexpectedInitCompletion`] outside `InitPending`, and
    /// [`AdapterError::InitFailed`] when `success` is false.
    pub fn adapter_init_finished(&mut self, success: bool) -> Result<(), AdapterError> {
        if self.state != AdapterState::InitPending {
            warn!(state = ?self.state, "unexpected init completion");
            return Err(AdapterError::UnexpectedInitCompletion { state: self.state });
        }
        let Some(adapter) = self.adapter else {
            // InitPending is only entered after the handle is recorded.
            return Err(AdapterError::UnexpectedInitCompletion { state: self.state });
        };
        if !success {
            self.state = AdapterState::Uninitialized;
            self.adapter = None;
            self.send_event(AdapterEvent::InitFailed);
            error!("adapter init failed; no monitors will attach this load");
            return Err(AdapterError::InitFailed);
        }

        self.state = AdapterState::Ready;
        self.send_event(AdapterEvent::InitCompleted { adapter });
        info!(%adapter, "adapter ready; attaching monitors");

        self.state = AdapterState::MonitorsAttaching;
        for index in 0..self.caps.max_monitors {
            self.attach_monitor(adapter, ConnectorIndex(index));
        }
        self.state = AdapterState::MonitorsAttached;
        info!(attached = self.monitors.len(), "monitor attachment finished");
        Ok(())
    }

    /// Creates, registers, and announces one monitor.  Failures are
    /// confined to this connector.
    fn attach_monitor(&mut self, adapter: AdapterHandle, connector: ConnectorIndex) {
        let descriptor = MonitorDescriptor::edid_less(connector);
        let handle = match self.stack.create_monitor(adapter, &descriptor) {
            Ok(handle) => handle,
            Err(source) => {
                error!(%connector, error = %source, "monitor creation failed");
                self.send_event(AdapterEvent::MonitorAttachFailed { connector });
                return;
            }
        };

        self.monitors.insert(
            handle,
            MonitorContext::new(handle, connector, Arc::clone(&self.binder)),
        );
        if let Err(source) = self.stack.announce_arrival(handle) {
            // A monitor the OS never learned about is unreachable; treat the
            // whole connector as failed and forget the context.
            error!(%connector, %handle, error = %source, "arrival announcement failed");
            if let Some(context) = self.monitors.remove(&handle) {
                context.close();
            }
            self.send_event(AdapterEvent::MonitorAttachFailed { connector });
            return;
        }

        info!(%handle, %connector, container = %descriptor.container_id, "monitor attached");
        self.send_event(AdapterEvent::MonitorArrived {
            connector,
            monitor: handle,
        });
    }

    // ── Mode queries ──────────────────────────────────────────────────────────

    /// Default-description mode query.  The catalog is adapter-global, so no
    /// monitor handle is needed; the counts and ordering are identical for
    /// every attached monitor.
    pub fn default_modes(&self, capacity: usize) -> DefaultModeReply {
        let reply = vdd_core::default_modes(capacity);
        debug!(capacity, written = reply.modes.len(), "default mode query served");
        reply
    }

    /// Target mode query.
    pub fn target_modes(&self, capacity: usize) -> TargetModeReply {
        let reply = vdd_core::target_modes(capacity);
        debug!(capacity, written = reply.modes.len(), "target mode query served");
        reply
    }

    // ── Surface traffic ───────────────────────────────────────────────────────

    /// Routes a swap-chain assignment to the monitor registered under
    /// `monitor`.
    ///
    /// # Errors
    ///
    /// [`AdapterError::UnknownMonitor`] for an unregistered handle, or the
    /// forwarded [`AssignError`] from the monitor context.
    pub fn assign_swap_chain(
        &mut self,
        monitor: MonitorHandle,
        surface: Box<dyn OutputSurface>,
        gpu: GpuLuid,
        frame_available: Signal,
    ) -> Result<(), AdapterError> {
        let Some(context) = self.monitors.get_mut(&monitor) else {
            warn!(%monitor, "assignment for unknown monitor");
            return Err(AdapterError::UnknownMonitor(monitor));
        };
        context.assign_swap_chain(surface, gpu, frame_available)?;
        self.send_event(AdapterEvent::SwapChainAssigned { monitor, gpu });
        Ok(())
    }

    /// Routes a swap-chain unassignment.  A monitor with no live worker is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// [`AdapterError::UnknownMonitor`] for an unregistered handle.
    pub fn unassign_swap_chain(&mut self, monitor: MonitorHandle) -> Result<(), AdapterError> {
        let Some(context) = self.monitors.get_mut(&monitor) else {
            warn!(%monitor, "unassignment for unknown monitor");
            return Err(AdapterError::UnknownMonitor(monitor));
        };
        if context.unassign_swap_chain() {
            self.send_event(AdapterEvent::SwapChainReleased { monitor });
        }
        Ok(())
    }

    /// Stack notification that the monitor object has been destroyed.
    /// Drops the registered context, joining any live worker first.
    ///
    /// # Errors
    ///
    /// [`AdapterError::UnknownMonitor`] for an unregistered handle.
    pub fn monitor_destroyed(&mut self, monitor: MonitorHandle) -> Result<(), AdapterError> {
        match self.monitors.remove(&monitor) {
            Some(context) => {
                context.close();
                info!(%monitor, "monitor context dropped");
                Ok(())
            }
            None => Err(AdapterError::UnknownMonitor(monitor)),
        }
    }

    fn send_event(&self, event: AdapterEvent) {
        // Advisory stream: a full or closed channel drops the event rather
        // than blocking the stack's calling thread.
        if let Err(error) = self.events.try_send(event) {
            debug!(%error, "adapter event dropped");
        }
    }
}
