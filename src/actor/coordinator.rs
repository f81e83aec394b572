//! Actor Coordinator - Wires up the Preview Actor System
//!
//! A thin orchestrator: it creates the actors, runs them concurrently and
//! stops them on shutdown. Rendering lives in `render::Pipeline`.
//!
//! ```text
//! FsActor --RenderMsg--> RenderActor --> Pipeline --> ContentHub
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use super::fs::FsActor;
use super::messages::RenderMsg;
use super::render::RenderActor;
use crate::render::Pipeline;

/// Channel buffer size
pub const CHANNEL_BUFFER: usize = 32;

/// Coordinator - wires up and runs the actor system
pub struct Coordinator {
    fs: FsActor,
    render: RenderActor,
    render_tx: mpsc::Sender<RenderMsg>,
    /// Optional shutdown signal receiver
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    /// Create both actors.
    ///
    /// The watcher is attached here, before the server accepts viewers;
    /// failing to attach it is fatal.
    pub fn new(
        pipeline: Arc<Pipeline>,
        render_tx: mpsc::Sender<RenderMsg>,
        render_rx: mpsc::Receiver<RenderMsg>,
    ) -> Result<Self> {
        let target = pipeline.target().clone();
        let fs = FsActor::new(target.clone(), render_tx.clone())
            .with_context(|| format!("failed to watch {}", target.dir().display()))?;
        let render = RenderActor::new(render_rx, &render_tx, pipeline);

        Ok(Self {
            fs,
            render,
            render_tx,
            shutdown_rx: None,
        })
    }

    /// Set shutdown signal receiver
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run the actor system until shutdown
    pub async fn run(self) -> Result<()> {
        let Self {
            fs,
            render,
            render_tx,
            shutdown_rx,
        } = self;

        crate::debug!("actor"; "start");
        let render_handle = tokio::spawn(render.run());
        let fs_handle = tokio::spawn(fs.run());

        // Wait for shutdown signal (poll-based since crossbeam)
        if let Some(rx) = shutdown_rx {
            loop {
                if rx.try_recv().is_ok() || fs_handle.is_finished() {
                    crate::debug!("actor"; "shutdown signal received");
                    break;
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        } else {
            let _ = fs_handle.await;
        }

        let _ = render_tx.send(RenderMsg::Shutdown).await;
        let _ = tokio::time::timeout(Duration::from_millis(500), render_handle).await;

        crate::debug!("actor"; "stopped");
        Ok(())
    }
}
