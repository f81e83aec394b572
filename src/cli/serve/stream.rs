//! Event-stream delivery, one thread per viewer.
//!
//! The thread owns the viewer's [`Subscription`] and the raw connection.
//! It exits when a write fails (viewer gone) or on shutdown; dropping the
//! subscription then removes the viewer from the hub.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossbeam::channel::RecvTimeoutError;
use tiny_http::Request;

use crate::reload::frame::EventStream;
use crate::reload::hub::{ContentHub, Subscription};

/// Idle time after which a comment frame checks the connection.
pub const HEARTBEAT: Duration = Duration::from_secs(15);

/// How often the loop wakes to check for shutdown.
const POLL: Duration = Duration::from_millis(500);

/// Serve `/events` until the viewer disconnects.
pub fn serve_events(request: Request, hub: &ContentHub) {
    let subscription = hub.subscribe();
    let id = subscription.id();
    crate::debug!("serve"; "viewer {} connected ({} open)", id, hub.viewer_count());

    match deliver(request.into_writer(), &subscription) {
        Ok(()) => crate::debug!("serve"; "viewer {} closed", id),
        Err(e) => crate::debug!("serve"; "viewer {} gone: {}", id, e),
    }
}

/// Write frames from `subscription` to `writer` until an error or shutdown.
fn deliver<W: Write>(writer: W, subscription: &Subscription) -> io::Result<()> {
    let mut stream = EventStream::open(writer)?;
    let mut last_write = Instant::now();

    loop {
        if crate::core::is_shutdown() {
            return stream.close();
        }

        match subscription.recv_timeout(POLL) {
            Ok(artifact) => {
                stream.send(&artifact)?;
                last_write = Instant::now();
            }
            Err(RecvTimeoutError::Timeout) if last_write.elapsed() >= HEARTBEAT => {
                stream.ping()?;
                last_write = Instant::now();
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return stream.close(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::reload::frame::data_frame;
    use crate::render::RenderedArtifact;

    /// Shared buffer that fails every write once `closed` is set.
    #[derive(Clone, Default)]
    struct Sink {
        data: Arc<Mutex<Vec<u8>>>,
        closed: Arc<Mutex<bool>>,
    }

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if *self.closed.lock().unwrap() {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.data.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Sink {
        fn text(&self) -> String {
            String::from_utf8(self.data.lock().unwrap().clone()).unwrap()
        }
    }

    fn wait_until(cond: impl Fn() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        false
    }

    #[test]
    fn test_delivers_seed_then_updates() {
        let hub = ContentHub::new();
        let first = RenderedArtifact::encode(b"<h1>One</h1>");
        let second = RenderedArtifact::encode(b"<h1>Two</h1>");
        hub.publish(first.clone());

        let sink = Sink::default();
        let subscription = hub.subscribe();
        let writer = sink.clone();
        let handle = std::thread::spawn(move || deliver(writer, &subscription));

        assert!(wait_until(|| sink.text().contains(&data_frame(&first))));
        hub.publish(second.clone());
        assert!(wait_until(|| sink.text().contains(&data_frame(&second))));

        *sink.closed.lock().unwrap() = true;
        hub.publish(RenderedArtifact::encode(b"<h1>Three</h1>"));
        assert!(handle.join().unwrap().is_err());
    }

    #[test]
    fn test_viewer_removed_after_write_failure() {
        let hub = ContentHub::new();
        let sink = Sink::default();
        let subscription = hub.subscribe();
        let writer = sink.clone();
        let handle = std::thread::spawn(move || {
            let result = deliver(writer, &subscription);
            drop(subscription);
            result
        });

        assert!(wait_until(|| sink.text().starts_with("HTTP/1.1 200 OK")));
        assert_eq!(hub.viewer_count(), 1);

        *sink.closed.lock().unwrap() = true;
        hub.publish(RenderedArtifact::encode(b"<p>x</p>"));
        assert!(handle.join().unwrap().is_err());
        assert_eq!(hub.viewer_count(), 0);
    }
}
