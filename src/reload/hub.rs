//! Content hub: the publish point for rendered artifacts.
//!
//! ```text
//!                           +--> slot (viewer 1) --> delivery thread --> browser
//! Pipeline --publish--> Hub +--> slot (viewer 2) --> delivery thread --> browser
//!                           +--> slot (viewer N) --> ...
//! ```
//!
//! Every viewer owns a single-slot queue. Publishing writes into every slot
//! under one short-held lock; a slot that still holds an unconsumed artifact
//! gets it replaced (latest wins). A slow viewer therefore never blocks the
//! others, and never reads a stale artifact after a newer one was published.

use std::sync::Arc;
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TrySendError};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::render::RenderedArtifact;

/// Outcome of [`ContentHub::publish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Publish {
    /// New artifact, handed to this many viewers
    Delivered(usize),
    /// Same content as the current artifact, nothing sent
    Unchanged,
}

/// Single-slot queue of one viewer.
struct Slot {
    tx: Sender<RenderedArtifact>,
    /// Kept by the hub to evict an unconsumed artifact
    rx: Receiver<RenderedArtifact>,
}

impl Slot {
    fn new() -> Self {
        let (tx, rx) = channel::bounded(1);
        Self { tx, rx }
    }

    /// Put `artifact` in the slot, evicting whatever the viewer did not take.
    ///
    /// Only called with the hub lock held, so there is a single producer.
    fn put(&self, artifact: RenderedArtifact) {
        if let Err(TrySendError::Full(artifact)) = self.tx.try_send(artifact) {
            let _ = self.rx.try_recv();
            let _ = self.tx.try_send(artifact);
        }
    }
}

#[derive(Default)]
struct HubState {
    current: Option<RenderedArtifact>,
    next_id: u64,
    viewers: FxHashMap<u64, Slot>,
}

/// Publish point with a fan-out registry of per-viewer slots.
///
/// Cloning yields another handle to the same hub.
#[derive(Clone, Default)]
pub struct ContentHub {
    state: Arc<Mutex<HubState>>,
}

impl ContentHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `artifact` current and hand it to every registered viewer.
    pub fn publish(&self, artifact: RenderedArtifact) -> Publish {
        let mut state = self.state.lock();

        if state.current.as_ref() == Some(&artifact) {
            return Publish::Unchanged;
        }

        for slot in state.viewers.values() {
            slot.put(artifact.clone());
        }
        let delivered = state.viewers.len();
        state.current = Some(artifact);

        Publish::Delivered(delivered)
    }

    /// Register a new viewer.
    ///
    /// The slot starts with the current artifact (if any), so the viewer
    /// shows content without waiting for the next change.
    pub fn subscribe(&self) -> Subscription {
        let mut state = self.state.lock();

        let id = state.next_id;
        state.next_id += 1;

        let slot = Slot::new();
        if let Some(current) = &state.current {
            slot.put(current.clone());
        }
        let rx = slot.rx.clone();
        state.viewers.insert(id, slot);

        Subscription {
            id,
            rx,
            state: Arc::clone(&self.state),
        }
    }

    /// The latest published artifact.
    #[cfg(test)]
    pub fn current(&self) -> Option<RenderedArtifact> {
        self.state.lock().current.clone()
    }

    pub fn viewer_count(&self) -> usize {
        self.state.lock().viewers.len()
    }
}

/// One viewer's view onto the hub. Dropping it de-registers the viewer.
pub struct Subscription {
    id: u64,
    rx: Receiver<RenderedArtifact>,
    state: Arc<Mutex<HubState>>,
}

impl Subscription {
    /// Wait up to `timeout` for the next artifact.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<RenderedArtifact, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    /// Take a pending artifact without waiting.
    #[cfg(test)]
    pub fn try_recv(&self) -> Option<RenderedArtifact> {
        self.rx.try_recv().ok()
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.state.lock().viewers.remove(&self.id);
    }
}
