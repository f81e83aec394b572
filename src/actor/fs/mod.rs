//! FileSystem Actor
//!
//! Watches the directory of the target file and asks the RenderActor for a
//! render whenever the target itself is created or written.
//!
//! Architecture:
//! ```text
//! notify (parent dir) → bridge thread → WatchEvent per path → target filter → RenderMsg
//! ```
//!
//! The parent directory is watched rather than the file, so the watch
//! survives editors that delete and recreate the file on save.

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::messages::{RenderMsg, Trigger};
use crate::config::WatchTarget;

// Event classification (notify kinds -> WatchEvent).
mod types;


use types::WatchEvent;

/// FileSystem Actor - watches the target file
pub struct FsActor {
    /// Channel to receive notify events (sync -> async bridge)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    watcher: RecommendedWatcher,
    target: WatchTarget,
    /// Channel to send messages to RenderActor
    render_tx: mpsc::Sender<RenderMsg>,
}

impl FsActor {
    /// Create the watcher and attach it to the target's directory.
    ///
    /// The watcher starts immediately: events buffer in `notify_rx` while
    /// the startup render runs, so no change is lost in between.
    pub fn new(target: WatchTarget, render_tx: mpsc::Sender<RenderMsg>) -> notify::Result<Self> {
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;
        watcher.watch(target.dir(), RecursiveMode::NonRecursive)?;

        Ok(Self {
            notify_rx,
            watcher,
            target,
            render_tx,
        })
    }

    /// Run the actor event loop
    pub async fn run(self) {
        let notify_rx = self.notify_rx;
        let render_tx = self.render_tx;
        let target = self.target;
        // Dropping the watcher would stop event delivery.
        let _watcher = self.watcher;

        let (async_tx, mut async_rx) = mpsc::channel::<notify::Event>(64);

        // Spawn a thread to poll notify events and send to async channel
        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {}", e),
                }
            }
        });

        crate::debug!("watch"; "watching {}", target.dir().display());

        while let Some(event) = async_rx.recv().await {
            for trigger in triggers_for(&event, &target) {
                if render_tx.send(RenderMsg::Render { trigger }).await.is_err() {
                    crate::debug!("watch"; "render actor gone, stopping");
                    return;
                }
            }
        }
    }
}

/// Render triggers for one notify event.
///
/// Paths other than the target are dropped, as are event kinds that do
/// not produce new content.
fn triggers_for(event: &notify::Event, target: &WatchTarget) -> Vec<Trigger> {
    WatchEvent::classify(event)
        .into_iter()
        .filter(|(path, _)| target.matches(path))
        .filter_map(|(path, kind)| {
            let trigger = kind.trigger();
            if trigger.is_none() {
                crate::debug!("watch"; "ignored {}: {}", kind.label(), path.display());
            }
            trigger
        })
        .collect()
}
