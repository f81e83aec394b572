//! Server lifecycle management.

use std::net::SocketAddr;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Result, anyhow};
use crossbeam::channel::Receiver;
use tiny_http::Server;

use crate::actor::Coordinator;
use crate::log;

/// Bind to `addr`. A port in use is fatal; there is no retry.
pub fn bind(addr: SocketAddr) -> Result<Server> {
    Server::http(addr).map_err(|e| anyhow!("failed to bind {addr}: {e}"))
}

/// Run the actor system on its own thread with a dedicated runtime.
pub fn spawn_actors(coordinator: Coordinator, shutdown_rx: Receiver<()>) -> JoinHandle<()> {
    thread::spawn(move || {
        if let Err(e) = run_actor_system(coordinator, shutdown_rx) {
            log!("error"; "actor system: {:#}", e);
        }
    })
}

fn run_actor_system(coordinator: Coordinator, shutdown_rx: Receiver<()>) -> Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    rt.block_on(coordinator.with_shutdown_signal(shutdown_rx).run())
}

/// Wait for the actor system to stop (max 2 seconds).
pub fn wait_for_shutdown(handle: JoinHandle<()>) {
    for _ in 0..40 {
        if handle.is_finished() {
            let _ = handle.join();
            return;
        }
        thread::sleep(Duration::from_millis(50));
    }
}
