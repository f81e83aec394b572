use std::path::PathBuf;

use notify::EventKind;
use notify::event::{ModifyKind, RenameMode};

use crate::actor::messages::Trigger;

/// What happened to a path, with platform quirks already resolved.
///
/// Only `Created` and `Written` lead to a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum WatchEvent {
    Created,
    Written,
    Removed,
    Renamed,
    Other,
}

impl WatchEvent {
    pub(super) fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Written => "written",
            Self::Removed => "removed",
            Self::Renamed => "renamed",
            Self::Other => "other",
        }
    }

    /// Render trigger for this event, if it warrants one.
    pub(super) fn trigger(self) -> Option<Trigger> {
        match self {
            Self::Created => Some(Trigger::Created),
            Self::Written => Some(Trigger::Written),
            Self::Removed | Self::Renamed | Self::Other => None,
        }
    }

    /// Classify a notify event per path.
    ///
    /// Renames are split by direction: the path a file was moved *to* now
    /// holds new content and counts as `Created` (atomic saves write a temp
    /// file and rename it over the target); the path it was moved *from*
    /// is `Renamed`. When the backend cannot tell the direction, existence
    /// decides.
    pub(super) fn classify(event: &notify::Event) -> Vec<(PathBuf, WatchEvent)> {
        let uniform = |kind: WatchEvent| -> Vec<(PathBuf, WatchEvent)> {
            event.paths.iter().map(|p| (p.clone(), kind)).collect()
        };

        match event.kind {
            EventKind::Create(_) => uniform(Self::Created),
            EventKind::Remove(_) => uniform(Self::Removed),
            EventKind::Modify(ModifyKind::Metadata(_)) => uniform(Self::Other),
            EventKind::Modify(ModifyKind::Name(mode)) => match mode {
                RenameMode::To => uniform(Self::Created),
                RenameMode::From => uniform(Self::Renamed),
                RenameMode::Both => event
                    .paths
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        let kind = if i == 0 { Self::Renamed } else { Self::Created };
                        (p.clone(), kind)
                    })
                    .collect(),
                RenameMode::Any | RenameMode::Other => event
                    .paths
                    .iter()
                    .map(|p| {
                        let kind = if p.is_file() { Self::Created } else { Self::Renamed };
                        (p.clone(), kind)
                    })
                    .collect(),
            },
            EventKind::Modify(_) => uniform(Self::Written),
            EventKind::Access(_) | EventKind::Any | EventKind::Other => uniform(Self::Other),
        }
    }
}
