//! Render-device binding.
//!
//! Every swap-chain assignment names the GPU (by LUID) that must back its
//! render device.  Binding is a three-step, short-circuiting sequence: open
//! the enumeration factory, resolve the adapter carrying that LUID, then
//! construct a device with alpha-capable (BGRA) composition support as a
//! hard requirement.
//!
//! A binder holds no state between calls and never retries.  A failed bind
//! is reported to the caller; recovery happens upstream by invalidating the
//! surface so the compositor regenerates it.  Devices are constructed fresh
//! per assignment and discarded with it, never pooled or reused, even for
//! the same GPU.
//!
//! # Implementations
//!
//! | Module     | Platform | Path                                          |
//! |------------|----------|-----------------------------------------------|
//! | `windows`  | Windows  | DXGI factory, `EnumAdapterByLuid`, D3D11+BGRA |
//! | `headless` | any      | in-process device, no GPU runtime             |
//! | `mock`     | tests    | scripted outcomes plus a call log             |

use std::sync::Arc;

use thiserror::Error;
use vdd_core::GpuLuid;

pub mod headless;
pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

/// Error type for render-device binding.
#[derive(Debug, Error)]
pub enum DeviceBindError {
    /// The enumeration factory could not be opened.
    #[error("device enumeration factory unavailable: {0}")]
    FactoryCreation(String),

    /// No GPU carries the requested identity.
    #[error("no GPU matches {0}")]
    AdapterNotFound(GpuLuid),

    /// The device could not be constructed: a transient driver fault, or the
    /// GPU was removed between enumeration and creation.
    #[error("render device construction failed on {luid}: {reason}")]
    DeviceCreation { luid: GpuLuid, reason: String },
}

/// A rendering-capable device bound to one GPU for one assignment.
pub trait RenderDevice: Send {
    /// Identity of the GPU backing this device.
    fn adapter_luid(&self) -> GpuLuid;
}

/// Locates a GPU by identity and constructs its render device.
#[cfg_attr(test, mockall::automock)]
pub trait RenderDeviceBinder: Send + Sync {
    /// # Errors
    ///
    /// Any step failing yields the matching [`DeviceBindError`] variant with
    /// no internal retry; retry policy belongs to the caller.
    fn bind(&self, adapter: GpuLuid) -> Result<Box<dyn RenderDevice>, DeviceBindError>;
}

/// The binder for the current platform: DXGI/D3D11 on Windows, the headless
/// device everywhere else.
pub fn platform_binder() -> Arc<dyn RenderDeviceBinder> {
    #[cfg(target_os = "windows")]
    {
        Arc::new(windows::DxgiBinder::new())
    }
    #[cfg(not(target_os = "windows"))]
    {
        Arc::new(headless::HeadlessBinder::new())
    }
}
