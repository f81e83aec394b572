//! Server-sent-events framing.
//!
//! The response is written by hand so every frame can be flushed on its own:
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/event-stream\r\n
//! ...\r\n
//! \r\n
//! <len hex>\r\n data: <base64>\n\n \r\n      one chunk per frame
//! ```

use std::io::{self, Write};

use crate::render::RenderedArtifact;
use crate::utils::mime::types::EVENT_STREAM;

/// Headers of the event-stream response.
///
/// CORS is open: the preview server is a local development tool.
pub const STREAM_HEADERS: &[(&str, &str)] = &[
    ("Content-Type", EVENT_STREAM),
    ("Cache-Control", "no-cache"),
    ("Connection", "keep-alive"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Expose-Headers", "Content-Type"),
    ("Transfer-Encoding", "chunked"),
];

/// Comment frame, ignored by `EventSource`.
pub const PING_FRAME: &str = ": ping\n\n";

/// `data: <base64>\n\n`
///
/// An empty document encodes to an empty payload. `EventSource` dispatches
/// no message for empty data, so a viewer keeps the previous content until
/// the file has text again.
pub fn data_frame(artifact: &RenderedArtifact) -> String {
    format!("data: {}\n\n", artifact.as_str())
}

/// Status line and headers, terminated by the blank line.
pub fn response_head() -> String {
    let mut head = String::from("HTTP/1.1 200 OK\r\n");
    for (name, value) in STREAM_HEADERS {
        head.push_str(name);
        head.push_str(": ");
        head.push_str(value);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");
    head
}

/// Chunked event-stream writer over a raw connection.
pub struct EventStream<W: Write> {
    writer: W,
}

impl<W: Write> EventStream<W> {
    /// Write the response head and flush it.
    pub fn open(mut writer: W) -> io::Result<Self> {
        writer.write_all(response_head().as_bytes())?;
        writer.flush()?;
        Ok(Self { writer })
    }

    /// Write one `data:` frame and flush.
    pub fn send(&mut self, artifact: &RenderedArtifact) -> io::Result<()> {
        self.write_chunk(data_frame(artifact).as_bytes())
    }

    /// Write a comment frame; fails once the viewer is gone.
    pub fn ping(&mut self) -> io::Result<()> {
        self.write_chunk(PING_FRAME.as_bytes())
    }

    /// Terminating zero-length chunk.
    pub fn close(mut self) -> io::Result<()> {
        self.writer.write_all(b"0\r\n\r\n")?;
        self.writer.flush()
    }

    fn write_chunk(&mut self, payload: &[u8]) -> io::Result<()> {
        write!(self.writer, "{:X}\r\n", payload.len())?;
        self.writer.write_all(payload)?;
        self.writer.write_all(b"\r\n")?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writer that fails every write, like a closed socket.
    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_data_frame_exact_form() {
        let artifact = RenderedArtifact::encode(b"<h1>Title</h1>");
        assert_eq!(data_frame(&artifact), "data: PGgxPlRpdGxlPC9oMT4=\n\n");
    }

    #[test]
    fn test_empty_document_frame() {
        let artifact = RenderedArtifact::encode(b"");
        assert_eq!(data_frame(&artifact), "data: \n\n");
    }

    #[test]
    fn test_response_head() {
        let head = response_head();
        assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(head.contains("Content-Type: text/event-stream\r\n"));
        assert!(head.contains("Cache-Control: no-cache\r\n"));
        assert!(head.contains("Connection: keep-alive\r\n"));
        assert!(head.contains("Access-Control-Allow-Origin: *\r\n"));
        assert!(head.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_frames_are_chunks() {
        let artifact = RenderedArtifact::encode(b"<p>Body</p>");
        let mut stream = EventStream::open(Vec::new()).unwrap();
        stream.send(&artifact).unwrap();
        stream.ping().unwrap();
        let out = String::from_utf8(stream.writer).unwrap();

        let body = out.split_once("\r\n\r\n").unwrap().1;
        let frame = data_frame(&artifact);
        let expected = format!(
            "{:X}\r\n{}\r\n{:X}\r\n{}\r\n",
            frame.len(),
            frame,
            PING_FRAME.len(),
            PING_FRAME
        );
        assert_eq!(body, expected);
    }

    #[test]
    fn test_close_writes_last_chunk() {
        let mut out = Vec::new();
        EventStream::open(&mut out).unwrap().close().unwrap();
        assert!(out.ends_with(b"\r\n\r\n0\r\n\r\n"));
    }

    #[test]
    fn test_write_failure_surfaces() {
        assert!(EventStream::open(Closed).is_err());
    }
}
