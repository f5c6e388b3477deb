//! Swap-chain worker infrastructure.
//!
//! Every swap-chain assignment owns exactly one background thread for its
//! lifetime.  The worker abstraction here offers the three operations that
//! lifetime needs: spawn (eager, the thread runs before the constructor
//! returns), a cooperative stop signal, and a blocking join.
//!
//! # Why join instead of detach? (for beginners)
//!
//! The display stack serializes assign/unassign calls per monitor, but it
//! cannot see our threads.  If teardown merely *signaled* the old worker and
//! returned, the next assignment could start while the old thread still held
//! its surface, and two workers for one monitor would briefly coexist.
//! Joining inside teardown makes the overlap impossible: when an unassign or
//! reassign returns, the previous thread has fully exited.  Cancellation is
//! always cooperative (signal + join); a thread is never killed.

use std::io;

use thiserror::Error;
use tracing::debug;

pub mod signal;
pub mod swapchain;

/// Error type for worker operations.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The OS refused to start the consumer thread.  The assignment attempt
    /// fails as a whole; no partial worker state is retained.
    #[error("failed to spawn swap-chain worker thread: {source}")]
    Spawn {
        #[source]
        source: io::Error,
    },
}

/// Best-effort scheduling-priority hint scoped to the current thread.
///
/// Acquired at the top of the worker thread body and reverted when dropped,
/// which covers early returns as well as the normal exit path.  Failure to
/// apply the hint is not an error; the worker simply runs at normal priority.
pub struct ThreadPriorityGuard {
    applied: bool,
}

impl ThreadPriorityGuard {
    pub fn acquire() -> Self {
        let applied = platform::raise_current_thread_priority();
        if applied {
            debug!("worker thread priority hint applied");
        } else {
            debug!("priority hint unavailable; worker continues at normal priority");
        }
        Self { applied }
    }
}

impl Drop for ThreadPriorityGuard {
    fn drop(&mut self) {
        if self.applied {
            platform::restore_current_thread_priority();
        }
    }
}

#[cfg(target_os = "windows")]
mod platform {
    use windows::Win32::System::Threading::{
        GetCurrentThread, SetThreadPriority, THREAD_PRIORITY_NORMAL,
        THREAD_PRIORITY_TIME_CRITICAL,
    };

    pub(super) fn raise_current_thread_priority() -> bool {
        // SAFETY: GetCurrentThread returns a pseudo handle that does not
        // need to be closed; SetThreadPriority only reads it.
        unsafe { SetThreadPriority(GetCurrentThread(), THREAD_PRIORITY_TIME_CRITICAL).is_ok() }
    }

    pub(super) fn restore_current_thread_priority() {
        // SAFETY: same pseudo-handle contract as above.  The revert is
        // best-effort; there is nothing useful to do with a failure here.
        unsafe {
            let _ = SetThreadPriority(GetCurrentThread(), THREAD_PRIORITY_NORMAL);
        }
    }
}

#[cfg(not(target_os = "windows"))]
mod platform {
    // No portable priority API worth the dependency; the hint is advisory
    // and the worker contract does not rely on it.
    pub(super) fn raise_current_thread_priority() -> bool {
        false
    }

    pub(super) fn restore_current_thread_priority() {}
}
