//! Virtual display host entry point.
//!
//! Wires the adapter context to the in-process display stack and the
//! platform render-device binder, then drives one full lifecycle session so
//! a headless run exercises every inbound path the real stack would hit:
//!
//! ```text
//! main()
//!  └─ config::load()           -- log level + adapter identity
//!  └─ AdapterContext::new()    -- engine + advisory event stream
//!       ├─ power_on            -- capability declaration, async init
//!       ├─ adapter_init_finished
//!       ├─ mode queries        -- probe, then fill
//!       └─ assign / unassign   -- one swap-chain cycle
//! ```

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vdd_core::{AdapterCaps, GpuLuid};
use vdd_host::application::adapter::AdapterContext;
use vdd_host::infrastructure::display::in_process::InProcessDisplayStack;
use vdd_host::infrastructure::display::DisplayStack;
use vdd_host::infrastructure::gpu::platform_binder;
use vdd_host::infrastructure::storage::config::{self, HostConfig};
use vdd_host::infrastructure::worker::signal::Signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load().unwrap_or_else(|error| {
        eprintln!("config load failed ({error}); using defaults");
        HostConfig::default()
    });

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.host.log_level.clone())),
        )
        .init();

    info!("virtual display host starting");

    let stack = Arc::new(InProcessDisplayStack::new());
    let binder = platform_binder();
    let caps = AdapterCaps::with_diagnostics(config.identity.diagnostics());
    let (mut adapter, mut events) =
        AdapterContext::new(Arc::clone(&stack) as Arc<dyn DisplayStack>, binder, caps);

    // ── Event pump ────────────────────────────────────────────────────────────
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            info!(?event, "adapter event");
        }
    });

    // ── Cold start: power-on, then the stack's completion callback ───────────
    adapter.power_on()?;
    adapter.adapter_init_finished(true)?;

    // ── Mode negotiation, exactly as the stack performs it ───────────────────
    let probe = adapter.default_modes(0);
    let filled = adapter.default_modes(probe.required);
    info!(
        count = filled.modes.len(),
        preferred = ?filled.preferred_index,
        "default modes served"
    );

    // ── One swap-chain cycle against the attached monitor ────────────────────
    if let Some(monitor) = adapter.monitor_handles().first().copied() {
        let surface = stack.new_surface();
        let observer = surface.observer();
        match adapter.assign_swap_chain(monitor, Box::new(surface), GpuLuid::new(1, 0), Signal::new())
        {
            Ok(()) => {
                adapter.unassign_swap_chain(monitor)?;
            }
            Err(error) => {
                // Expected on machines where LUID 1 resolves to nothing; the
                // surface has been invalidated so the compositor would retry
                // with a fresh one.
                warn!(
                    %error,
                    surface_invalidated = observer.is_invalidated(),
                    "demo assignment failed"
                );
            }
        }
    }

    info!("host ready; press Ctrl-C to exit");
    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    Ok(())
}
