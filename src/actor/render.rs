//! Render Actor - Serialized Render + Publish
//!
//! Receives render requests from the FsActor and the HTTP page handler and
//! runs each one through the [`Pipeline`] on the blocking pool. The pipeline
//! holds the render lock, so requests that pile up are handled one at a time.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::messages::{RenderMsg, Trigger};
use crate::logger::{status_error, status_success, status_unchanged};
use crate::reload::hub::Publish;
use crate::render::Pipeline;

pub struct RenderActor {
    rx: mpsc::Receiver<RenderMsg>,
    /// Used to re-enqueue delayed renders without keeping the channel open
    tx: mpsc::WeakSender<RenderMsg>,
    pipeline: Arc<Pipeline>,
}

impl RenderActor {
    pub fn new(
        rx: mpsc::Receiver<RenderMsg>,
        tx: &mpsc::Sender<RenderMsg>,
        pipeline: Arc<Pipeline>,
    ) -> Self {
        Self {
            rx,
            tx: tx.downgrade(),
            pipeline,
        }
    }

    /// Render once for startup, then serve requests until shutdown.
    pub async fn run(mut self) {
        self.render(Trigger::Startup).await;

        while let Some(msg) = self.rx.recv().await {
            match msg {
                RenderMsg::Render { trigger } => self.render(trigger).await,
                RenderMsg::RenderAfter { delay, trigger } => {
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        if let Some(tx) = tx.upgrade() {
                            let _ = tx.send(RenderMsg::Render { trigger }).await;
                        }
                    });
                }
                RenderMsg::Shutdown => {
                    crate::debug!("render"; "shutdown");
                    break;
                }
            }
        }
    }

    async fn render(&self, trigger: Trigger) {
        let pipeline = Arc::clone(&self.pipeline);
        let name = pipeline.target().name();

        let result = tokio::task::spawn_blocking(move || pipeline.refresh()).await;

        match result {
            Ok(Ok(Publish::Delivered(viewers))) => {
                status_success(&format!("rendered {name} ({trigger}, {viewers} viewers)"));
            }
            Ok(Ok(Publish::Unchanged)) => {
                status_unchanged(&format!("{name} unchanged ({trigger})"));
            }
            Ok(Err(e)) => {
                let detail = format!("{:#}", anyhow::Error::from(e));
                status_error(&format!("render failed: {name}"), &detail);
            }
            Err(e) => crate::log!("error"; "render task panicked: {}", e),
        }
    }
}
