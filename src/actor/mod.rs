//! Actor System for Live Reload
//!
//! Message-passing concurrency for watch mode:
//!
//! ```text
//! FsActor --RenderMsg--> RenderActor --publish--> ContentHub
//! (watch)                 (render)                (fan-out)
//!                            ^
//!  HTTP page handler --------+  (delayed render on page load)
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types for inter-actor communication
//! - `fs` - File system watcher for the target file
//! - `render` - Serialized render + publish
//! - `coordinator` - Wires up and runs actors

pub mod coordinator;
pub mod fs;
pub mod messages;
pub mod render;

pub use coordinator::Coordinator;
