//! Reload Module
//!
//! Server-push live reload for the previewed document.
//!
//! # Architecture
//!
//! ```text
//! Pipeline --publish--> ContentHub --slot per viewer--> EventStream --> Browser
//! ```
//!
//! # Modules
//!
//! - `hub` - publish point and per-viewer fan-out
//! - `frame` - server-sent-events framing over a raw connection

pub mod frame;
pub mod hub;
