//! Headless render device for platforms without the native GPU path.
//!
//! Used by the host binary off Windows and by tests everywhere.  Binding
//! still honors the identity contract: the returned device remembers the
//! LUID it was bound to, and a binder can be restricted to a known GPU set
//! to reproduce a machine where the requested adapter is absent.

use tracing::debug;
use vdd_core::GpuLuid;

use super::{DeviceBindError, RenderDevice, RenderDeviceBinder};

/// In-process stand-in for a composition-capable device.
pub struct HeadlessRenderDevice {
    luid: GpuLuid,
}

impl HeadlessRenderDevice {
    pub fn new(luid: GpuLuid) -> Self {
        Self { luid }
    }
}

impl RenderDevice for HeadlessRenderDevice {
    fn adapter_luid(&self) -> GpuLuid {
        self.luid
    }
}

/// Binder that fabricates an in-process device for any requested GPU, or
/// only for an allow-listed set when one is given.
#[derive(Default)]
pub struct HeadlessBinder {
    known_gpus: Option<Vec<GpuLuid>>,
}

impl HeadlessBinder {
    /// A binder on which every GPU identity resolves.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts binding to `gpus`; any other LUID reports
    /// [`DeviceBindError::AdapterNotFound`].
    pub fn with_known_gpus(gpus: Vec<GpuLuid>) -> Self {
        Self {
            known_gpus: Some(gpus),
        }
    }
}

impl RenderDeviceBinder for HeadlessBinder {
    fn bind(&self, adapter: GpuLuid) -> Result<Box<dyn RenderDevice>, DeviceBindError> {
        if let Some(known) = &self.known_gpus {
            if !known.contains(&adapter) {
                return Err(DeviceBindError::AdapterNotFound(adapter));
            }
        }
        debug!(gpu = %adapter, "headless render device constructed");
        Ok(Box::new(HeadlessRenderDevice::new(adapter)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrestricted_binder_resolves_any_identity() {
        let binder = HeadlessBinder::new();
        let device = binder.bind(GpuLuid::new(42, 7)).expect("bind");
        assert_eq!(device.adapter_luid(), GpuLuid::new(42, 7));
    }

    #[test]
    fn test_restricted_binder_rejects_unknown_gpus() {
        let binder = HeadlessBinder::with_known_gpus(vec![GpuLuid::new(1, 0)]);
        assert!(binder.bind(GpuLuid::new(1, 0)).is_ok());
        assert!(matches!(
            binder.bind(GpuLuid::new(2, 0)),
            Err(DeviceBindError::AdapterNotFound(_))
        ));
    }

    #[test]
    fn test_every_bind_constructs_a_fresh_device() {
        // Two binds of the same LUID must both succeed independently; the
        // binder shares nothing between calls.
        let binder = HeadlessBinder::new();
        let first = binder.bind(GpuLuid::new(3, 0)).expect("first bind");
        let second = binder.bind(GpuLuid::new(3, 0)).expect("second bind");
        assert_eq!(first.adapter_luid(), second.adapter_luid());
    }
}
