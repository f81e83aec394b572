//! MIME type constants for HTTP responses.

/// Content types served by the preview server.
pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const EVENT_STREAM: &str = "text/event-stream";
}
