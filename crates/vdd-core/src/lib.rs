//! # vdd-core
//!
//! Shared domain library for the virtual display host: the advertised mode
//! catalog with its signal-timing math, and the adapter/monitor capability
//! types exchanged with the OS display stack.
//!
//! This crate is used by the host application and its tests.  It has zero
//! dependencies on OS APIs, threads, or GPU runtimes, so everything here can
//! be compiled and unit-tested on any platform.
//!
//! # Architecture overview
//!
//! A virtual display driver advertises a monitor the machine does not
//! physically have.  The OS display stack treats that monitor exactly like a
//! real one: it asks which modes the monitor supports, picks one, and hands
//! the driver a swap-chain surface to present into.  This crate defines the
//! vocabulary of that conversation:
//!
//! - **`modes`** - The fixed resolution and refresh-rate tables, the
//!   signal-timing records derived from them, and the two-phase queries the
//!   display stack uses to enumerate them.
//!
//! - **`domain`** - The capability block declared when the adapter
//!   initializes, the EDID-less monitor descriptor, and the opaque handle
//!   newtypes that key the host's registries.

pub mod domain;
pub mod modes;

// Re-export the most-used types at the crate root so callers can write
// `vdd_core::Resolution` instead of `vdd_core::modes::catalog::Resolution`.
pub use domain::adapter::{
    AdapterCaps, EndpointDiagnostics, EndpointVersion, GammaSupport, TransmissionType,
    MONITOR_COUNT,
};
pub use domain::handles::{AdapterHandle, ConnectorIndex, GpuLuid, MonitorHandle, SurfaceId};
pub use domain::monitor::{MonitorDescriptor, OutputTechnology};
pub use modes::catalog::{Resolution, MODE_COUNT, RATE_COUNT, REFRESH_RATES, RESOLUTIONS};
pub use modes::query::{default_modes, target_modes, DefaultModeReply, TargetModeReply};
pub use modes::signal::{ModeOrigin, MonitorMode, ScanLineOrdering, TargetMode, VideoSignalInfo};
