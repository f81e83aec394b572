//! Utility modules shared across the preview server.

pub mod html;
pub mod mime;
pub mod path;
