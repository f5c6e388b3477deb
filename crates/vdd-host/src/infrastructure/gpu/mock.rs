//! Scripted render-device binder for tests.
//!
//! Lets a test queue bind outcomes ahead of time and inspect which GPU
//! identities were requested, without any platform GPU runtime.  An empty
//! script means every bind succeeds with a headless device.

use std::collections::VecDeque;
use std::sync::Mutex;

use vdd_core::GpuLuid;

use super::headless::HeadlessRenderDevice;
use super::{DeviceBindError, RenderDevice, RenderDeviceBinder};

/// A binder that replays scripted outcomes in order.
#[derive(Default)]
pub struct ScriptedBinder {
    outcomes: Mutex<VecDeque<Result<(), DeviceBindError>>>,
    calls: Mutex<Vec<GpuLuid>>,
}

impl ScriptedBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful bind.
    pub fn push_success(&self) {
        self.outcomes
            .lock()
            .expect("lock poisoned")
            .push_back(Ok(()));
    }

    /// Queues a failing bind with the given error.
    pub fn push_failure(&self, error: DeviceBindError) {
        self.outcomes
            .lock()
            .expect("lock poisoned")
            .push_back(Err(error));
    }

    /// Every GPU identity requested so far, in call order.
    pub fn calls(&self) -> Vec<GpuLuid> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

impl RenderDeviceBinder for ScriptedBinder {
    fn bind(&self, adapter: GpuLuid) -> Result<Box<dyn RenderDevice>, DeviceBindError> {
        self.calls.lock().expect("lock poisoned").push(adapter);
        match self.outcomes.lock().expect("lock poisoned").pop_front() {
            Some(Err(error)) => Err(error),
            // Scripted success or an exhausted/empty script both bind.
            Some(Ok(())) | None => Ok(Box::new(HeadlessRenderDevice::new(adapter))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_script_always_succeeds() {
        let binder = ScriptedBinder::new();
        assert!(binder.bind(GpuLuid::new(1, 0)).is_ok());
        assert!(binder.bind(GpuLuid::new(2, 0)).is_ok());
    }

    #[test]
    fn test_scripted_failure_is_replayed_then_consumed() {
        let binder = ScriptedBinder::new();
        binder.push_failure(DeviceBindError::AdapterNotFound(GpuLuid::new(9, 0)));
        assert!(binder.bind(GpuLuid::new(9, 0)).is_err());
        // The script is spent; the next bind succeeds.
        assert!(binder.bind(GpuLuid::new(9, 0)).is_ok());
    }

    #[test]
    fn test_call_log_records_requested_identities_in_order() {
        let binder = ScriptedBinder::new();
        let _ = binder.bind(GpuLuid::new(1, 0));
        let _ = binder.bind(GpuLuid::new(2, 0));
        assert_eq!(binder.calls(), vec![GpuLuid::new(1, 0), GpuLuid::new(2, 0)]);
    }
}
