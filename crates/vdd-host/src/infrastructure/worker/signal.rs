//! Manual-reset signal shared between a worker thread and its owner.

use std::sync::{Arc, Condvar, Mutex};

/// A one-way, manual-reset signal.
///
/// Once raised it stays raised: every current and future [`wait`] returns
/// immediately.  Clones share the same underlying state, so one side can
/// raise while the other waits.  There is no timeout variant; termination
/// waits are unconditional.
///
/// [`wait`]: Signal::wait
#[derive(Clone, Default)]
pub struct Signal {
    inner: Arc<SignalState>,
}

#[derive(Default)]
struct SignalState {
    raised: Mutex<bool>,
    cond: Condvar,
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the signal and wakes every waiter.
    pub fn raise(&self) {
        let mut raised = self.inner.raised.lock().expect("signal lock poisoned");
        *raised = true;
        self.inner.cond.notify_all();
    }

    pub fn is_raised(&self) -> bool {
        *self.inner.raised.lock().expect("signal lock poisoned")
    }

    /// Blocks until the signal has been raised.
    pub fn wait(&self) {
        let mut raised = self.inner.raised.lock().expect("signal lock poisoned");
        while !*raised {
            raised = self
                .inner
                .cond
                .wait(raised)
                .expect("signal lock poisoned");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_signal_starts_lowered() {
        assert!(!Signal::new().is_raised());
    }

    #[test]
    fn test_wait_returns_immediately_once_raised() {
        let signal = Signal::new();
        signal.raise();
        // Must not block.
        signal.wait();
        assert!(signal.is_raised());
    }

    #[test]
    fn test_clones_share_state_across_threads() {
        let signal = Signal::new();
        let waiter = signal.clone();
        let handle = thread::spawn(move || {
            waiter.wait();
            true
        });
        // Give the waiter a moment to actually block before raising.
        thread::sleep(Duration::from_millis(20));
        signal.raise();
        assert!(handle.join().expect("waiter thread panicked"));
    }

    #[test]
    fn test_raise_is_idempotent() {
        let signal = Signal::new();
        signal.raise();
        signal.raise();
        assert!(signal.is_raised());
    }
}
