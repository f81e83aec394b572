//! Actor Message Definitions
//!
//! ```text
//! FsActor / HTTP --Render--> RenderActor
//! ```

use std::fmt;
use std::time::Duration;

/// Why a render was requested (for status output).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// First render after startup
    Startup,
    /// Target file created (or moved into place)
    Created,
    /// Target file written
    Written,
    /// Viewer page requested
    PageLoad,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Startup => "startup",
            Self::Created => "created",
            Self::Written => "written",
            Self::PageLoad => "page load",
        })
    }
}

/// Messages to Render Actor
#[derive(Debug)]
pub enum RenderMsg {
    /// Render now
    Render { trigger: Trigger },
    /// Render once `delay` has elapsed
    RenderAfter { delay: Duration, trigger: Trigger },
    /// Shutdown
    Shutdown,
}
