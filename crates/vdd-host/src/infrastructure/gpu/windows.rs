//! DXGI/D3D11 render-device binder.
//!
//! Resolves the GPU carrying the requested LUID through a DXGI factory and
//! constructs a D3D11 device on it.  BGRA support is a hard feature
//! requirement: the compositor composes alpha-capable surfaces, and a device
//! that cannot do so is useless to an assignment.
//!
//! # Safety
//!
//! This module uses `unsafe` exclusively for Windows API FFI calls.  All
//! `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use tracing::debug;
use vdd_core::GpuLuid;
use windows::Win32::Foundation::LUID;
use windows::Win32::Graphics::Direct3D::D3D_DRIVER_TYPE_UNKNOWN;
use windows::Win32::Graphics::Direct3D11::{
    D3D11CreateDevice, ID3D11Device, ID3D11DeviceContext, D3D11_CREATE_DEVICE_BGRA_SUPPORT,
    D3D11_SDK_VERSION,
};
use windows::Win32::Graphics::Dxgi::{CreateDXGIFactory2, IDXGIAdapter1, IDXGIFactory5, DXGI_CREATE_FACTORY_FLAGS};

use super::{DeviceBindError, RenderDevice, RenderDeviceBinder};

/// D3D11 device plus its immediate context, bound to one GPU for one
/// assignment.  Both handles drop with the worker that owns them.
pub struct D3dRenderDevice {
    luid: GpuLuid,
    _device: ID3D11Device,
    _context: ID3D11DeviceContext,
}

impl RenderDevice for D3dRenderDevice {
    fn adapter_luid(&self) -> GpuLuid {
        self.luid
    }
}

/// Binder backed by the DXGI adapter enumeration.
#[derive(Default)]
pub struct DxgiBinder;

impl DxgiBinder {
    pub fn new() -> Self {
        Self
    }
}

impl RenderDeviceBinder for DxgiBinder {
    fn bind(&self, adapter: GpuLuid) -> Result<Box<dyn RenderDevice>, DeviceBindError> {
        // Step 1: the enumeration factory.
        // SAFETY: plain factory construction; no aliasing or lifetime
        // obligations beyond the returned COM pointer.
        let factory: IDXGIFactory5 = unsafe { CreateDXGIFactory2(DXGI_CREATE_FACTORY_FLAGS(0)) }
            .map_err(|e| DeviceBindError::FactoryCreation(e.message()))?;

        // Step 2: the GPU carrying this identity.
        let luid = LUID {
            LowPart: adapter.low,
            HighPart: adapter.high,
        };
        // SAFETY: EnumAdapterByLuid only reads the LUID value.
        let dxgi_adapter: IDXGIAdapter1 = unsafe { factory.EnumAdapterByLuid(luid) }
            .map_err(|_| DeviceBindError::AdapterNotFound(adapter))?;

        // Step 3: the device.  Failure here usually means the system is in a
        // transient state or the render GPU was lost; the caller recovers by
        // surface regeneration, not by retrying the bind.
        let mut device: Option<ID3D11Device> = None;
        let mut context: Option<ID3D11DeviceContext> = None;
        // SAFETY: out-pointers are valid for the duration of the call and
        // the adapter interface outlives it.
        unsafe {
            D3D11CreateDevice(
                &dxgi_adapter,
                D3D_DRIVER_TYPE_UNKNOWN,
                None,
                D3D11_CREATE_DEVICE_BGRA_SUPPORT,
                None,
                D3D11_SDK_VERSION,
                Some(&mut device),
                None,
                Some(&mut context),
            )
        }
        .map_err(|e| DeviceBindError::DeviceCreation {
            luid: adapter,
            reason: e.message(),
        })?;

        match (device, context) {
            (Some(device), Some(context)) => {
                debug!(gpu = %adapter, "d3d11 render device constructed");
                Ok(Box::new(D3dRenderDevice {
                    luid: adapter,
                    _device: device,
                    _context: context,
                }))
            }
            _ => Err(DeviceBindError::DeviceCreation {
                luid: adapter,
                reason: "device creation returned no interfaces".to_string(),
            }),
        }
    }
}
