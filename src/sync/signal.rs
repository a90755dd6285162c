//! # Sync Signal
//!
//! Process-wide observable boolean reporting whether a remote operation is in
//! flight. UI surfaces subscribe to drive a blocking overlay; the repository
//! raises the flag through a scoped [`SyncGuard`] so it is guaranteed to clear
//! on every exit path, success or failure.
//!
//! Any number of listeners may subscribe; all of them are notified on every
//! transition. Overlapping remote operations may make the flag flicker false
//! between them — a known, accepted limitation for the single-user target.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

type SyncListener = Box<dyn Fn(bool) + Send + Sync>;

/// Observable "is syncing" flag with a publish-subscribe listener registry.
///
/// Cheap to clone; all clones share the same flag and listeners.
#[derive(Clone, Default)]
pub struct SyncSignal {
    inner: Arc<SignalInner>,
}

#[derive(Default)]
struct SignalInner {
    syncing: AtomicBool,
    listeners: Mutex<Vec<SyncListener>>,
}

impl SyncSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener invoked on every transition of the flag.
    pub fn subscribe(&self, listener: impl Fn(bool) + Send + Sync + 'static) {
        let mut listeners = self
            .inner
            .listeners
            .lock()
            .expect("sync listener registry poisoned");
        listeners.push(Box::new(listener));
    }

    /// Current state of the flag.
    pub fn is_syncing(&self) -> bool {
        self.inner.syncing.load(Ordering::SeqCst)
    }

    /// Raise the flag for the duration of a remote operation.
    ///
    /// The returned guard lowers the flag when dropped, so holding it across a
    /// fallible call gives release-on-every-exit-path semantics.
    pub(crate) fn begin(&self) -> SyncGuard {
        self.set(true);
        SyncGuard {
            signal: self.clone(),
        }
    }

    fn set(&self, syncing: bool) {
        self.inner.syncing.store(syncing, Ordering::SeqCst);
        let listeners = self
            .inner
            .listeners
            .lock()
            .expect("sync listener registry poisoned");
        for listener in listeners.iter() {
            listener(syncing);
        }
    }
}

/// RAII guard returned by [`SyncSignal::begin`].
pub(crate) struct SyncGuard {
    signal: SyncSignal,
}

impl Drop for SyncGuard {
    fn drop(&mut self) {
        self.signal.set(false);
    }
}
