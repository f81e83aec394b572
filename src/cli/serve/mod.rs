//! Preview server: viewer page and event stream over one HTTP listener.
//!
//! ```text
//! GET /, /index.html  -> preview page (+ delayed render)
//! GET /events         -> event stream, dedicated delivery thread
//! anything else       -> 404 / 405
//! ```

mod lifecycle;
mod response;
mod stream;


use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossbeam::channel;
use tiny_http::{Method, Request, Server};
use tokio::sync::mpsc;

use crate::actor::Coordinator;
use crate::actor::messages::{RenderMsg, Trigger};
use crate::config::{PreviewConfig, ServerConfig};
use crate::embed::serve::{PREVIEW_HTML, PreviewVars};
use crate::reload::hub::ContentHub;
use crate::{debug, log};

/// Delay of the render scheduled by each page load.
pub const PAGE_LOAD_RENDER_DELAY: Duration = Duration::from_secs(2);

/// Worker threads for page requests. Event streams get their own threads.
const REQUEST_THREADS: usize = 4;

/// Shared state of the request handlers.
struct ServeContext {
    server: ServerConfig,
    title: String,
    hub: ContentHub,
    render_tx: mpsc::Sender<RenderMsg>,
}

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    ctx: Arc<ServeContext>,
    shutdown_rx: channel::Receiver<()>,
}

/// Bind the HTTP server and register it for Ctrl+C shutdown.
///
/// Binding happens before the actor system starts, so a port in use ends
/// the process before any watcher runs.
pub fn bind_server(
    config: &PreviewConfig,
    hub: ContentHub,
    render_tx: mpsc::Sender<RenderMsg>,
) -> Result<BoundServer> {
    let addr = config.server.socket_addr();
    let server = Arc::new(lifecycle::bind(addr)?);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    crate::core::register_server(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}:{}", config.server.address.host(), addr.port());

    let ctx = ServeContext {
        server: config.server,
        title: config.target.name(),
        hub,
        render_tx,
    };
    Ok(BoundServer::new(server, ctx, shutdown_rx))
}

impl BoundServer {
    fn new(server: Arc<Server>, ctx: ServeContext, shutdown_rx: channel::Receiver<()>) -> Self {
        Self {
            server,
            ctx: Arc::new(ctx),
            shutdown_rx,
        }
    }

    /// Start the actors, then run the request loop until shutdown (blocking).
    pub fn run(self, coordinator: Coordinator) -> Result<()> {
        let actor_handle = lifecycle::spawn_actors(coordinator, self.shutdown_rx);
        let result = run_request_loop(&self.server, &self.ctx);
        lifecycle::wait_for_shutdown(actor_handle);
        result
    }
}

fn run_request_loop(server: &Server, ctx: &Arc<ServeContext>) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(REQUEST_THREADS)
        .build()?;

    for request in server.incoming_requests() {
        if is_event_stream(&request) && !crate::core::is_shutdown() {
            let hub = ctx.hub.clone();
            thread::spawn(move || stream::serve_events(request, &hub));
            continue;
        }

        let ctx = Arc::clone(ctx);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &ctx) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Request path without query string.
fn path_of(request: &Request) -> &str {
    let url = request.url();
    url.split_once('?').map_or(url, |(path, _)| path)
}

fn is_event_stream(request: &Request) -> bool {
    request.method() == &Method::Get && Route::of(path_of(request)) == Route::Events
}

/// Routes served by this server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Page,
    Events,
    Unknown,
}

impl Route {
    fn of(path: &str) -> Self {
        match path {
            "/" | "/index.html" => Self::Page,
            "/events" => Self::Events,
            _ => Self::Unknown,
        }
    }
}

/// Handle a single non-streaming request
fn handle_request(request: Request, ctx: &ServeContext) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let route = Route::of(path_of(&request));
    let readable = matches!(request.method(), Method::Get | Method::Head);

    match route {
        // GET is streamed by the request loop
        Route::Events => response::respond_method_not_allowed(request, "GET"),
        _ if !readable => response::respond_method_not_allowed(request, "GET, HEAD"),
        Route::Page => respond_preview(request, ctx),
        Route::Unknown => response::respond_not_found(request),
    }
}

/// Serve the page. A GET also schedules a render shortly after.
fn respond_preview(request: Request, ctx: &ServeContext) -> Result<()> {
    let events_url = ctx.server.events_url(response::request_host(&request));
    let body = PREVIEW_HTML.render(&PreviewVars {
        events_url: &events_url,
        title: &ctx.title,
    });

    if !response::is_head_request(&request) {
        let msg = RenderMsg::RenderAfter {
            delay: PAGE_LOAD_RENDER_DELAY,
            trigger: Trigger::PageLoad,
        };
        if let Err(e) = ctx.render_tx.try_send(msg) {
            debug!("serve"; "page load render skipped: {}", e);
        }
    }

    response::respond_page(request, body)
}
