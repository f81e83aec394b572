//! Render pipeline: read the watched file, render it, publish the result.

use std::fs;

use parking_lot::Mutex;

use super::{RenderError, Renderer};
use crate::config::WatchTarget;
use crate::reload::hub::{ContentHub, Publish};

/// Serialized read + render + publish for one watched file.
///
/// Every render (startup, file event, page load) goes through
/// [`Pipeline::refresh`], which holds the render lock from the first byte
/// read to the publish. An editor writing the file while a render is in
/// flight can therefore only cause a later render, never two interleaved
/// reads.
pub struct Pipeline {
    target: WatchTarget,
    renderer: Renderer,
    hub: ContentHub,
    lock: Mutex<()>,
}

impl Pipeline {
    pub fn new(target: WatchTarget, renderer: Renderer, hub: ContentHub) -> Self {
        Self {
            target,
            renderer,
            hub,
            lock: Mutex::new(()),
        }
    }

    pub fn target(&self) -> &WatchTarget {
        &self.target
    }

    #[cfg(test)]
    pub fn hub(&self) -> &ContentHub {
        &self.hub
    }

    /// Render the current file content and publish it.
    ///
    /// On error nothing is published and the previous artifact stays current.
    pub fn refresh(&self) -> Result<Publish, RenderError> {
        let _guard = self.lock.lock();

        let path = self.target.path();
        let source = fs::read(path).map_err(|e| RenderError::Read(path.to_path_buf(), e))?;
        let artifact = self.renderer.render_and_encode(&source)?;

        Ok(self.hub.publish(artifact))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;
    use crate::render::{Markdown, Render};

    fn setup(content: Option<&str>) -> (TempDir, WatchTarget) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.md");
        if let Some(content) = content {
            fs::write(&path, content).unwrap();
        }
        let target = WatchTarget::new(&path).unwrap();
        (temp, target)
    }

    /// Records how many renders run at the same time.
    #[derive(Default)]
    struct Overlap {
        active: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    struct Counted(Arc<Overlap>);

    impl Render for Counted {
        fn render(&self, source: &[u8]) -> Result<Vec<u8>, RenderError> {
            let now = self.0.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.0.peak.fetch_max(now, Ordering::SeqCst);
            self.0.calls.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            self.0.active.fetch_sub(1, Ordering::SeqCst);
            Markdown::new().render(source)
        }
    }

    #[test]
    fn test_initial_render_heading_and_paragraph() {
        let (_temp, target) = setup(Some("# Title\n\nBody"));
        let pipeline = Pipeline::new(target, Renderer::default(), ContentHub::new());

        assert_eq!(pipeline.refresh().unwrap(), Publish::Delivered(0));

        let html = String::from_utf8(pipeline.hub().current().unwrap().decode()).unwrap();
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>Body</p>"));
    }

    #[test]
    fn test_unchanged_file_not_republished() {
        let (_temp, target) = setup(Some("# Title"));
        let pipeline = Pipeline::new(target, Renderer::default(), ContentHub::new());

        pipeline.refresh().unwrap();
        assert_eq!(pipeline.refresh().unwrap(), Publish::Unchanged);
    }

    #[test]
    fn test_read_failure_keeps_previous_artifact() {
        let (_temp, target) = setup(Some("# Title"));
        let path = target.path().to_path_buf();
        let pipeline = Pipeline::new(target, Renderer::default(), ContentHub::new());

        pipeline.refresh().unwrap();
        let before = pipeline.hub().current();

        fs::remove_file(&path).unwrap();
        let err = pipeline.refresh().unwrap_err();
        assert!(matches!(err, RenderError::Read(ref p, _) if *p == path));
        assert_eq!(pipeline.hub().current(), before);
    }

    #[test]
    fn test_missing_file_publishes_nothing() {
        let (_temp, target) = setup(None);
        let pipeline = Pipeline::new(target, Renderer::default(), ContentHub::new());

        assert!(pipeline.refresh().is_err());
        assert!(pipeline.hub().current().is_none());
    }

    #[test]
    fn test_concurrent_refreshes_are_serialized() {
        let (_temp, target) = setup(Some("# Title"));
        let overlap = Arc::new(Overlap::default());
        let pipeline = Arc::new(Pipeline::new(
            target,
            Renderer::new(Counted(Arc::clone(&overlap))),
            ContentHub::new(),
        ));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pipeline = Arc::clone(&pipeline);
                std::thread::spawn(move || pipeline.refresh().unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(overlap.calls.load(Ordering::SeqCst), 4);
        assert_eq!(overlap.peak.load(Ordering::SeqCst), 1);
    }
}
