//! Renderer adapter: markdown bytes → transport-safe artifact.
//!
//! ```text
//! source bytes --Render--> html --shrink--> html --base64--> RenderedArtifact
//! ```
//!
//! - [`Render`] - the conversion seam ([`Markdown`] is the default)
//! - [`shrink`] - line-terminator postprocessing
//! - [`Pipeline`] - read + render + publish under the render lock

mod pipeline;
mod shrink;

pub use pipeline::Pipeline;
pub use shrink::shrink;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use pulldown_cmark::{Options, Parser, html};
use thiserror::Error;

// =============================================================================
// Errors
// =============================================================================

/// A single render attempt failed. The previous artifact stays current.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read `{}`", .0.display())]
    Read(PathBuf, #[source] std::io::Error),

    /// Markdown conversion cannot fail; only test renderers produce this.
    #[cfg(test)]
    #[error("conversion failed: {0}")]
    Convert(String),
}

// =============================================================================
// Conversion seam
// =============================================================================

/// Converts raw document bytes into HTML bytes.
pub trait Render: Send + Sync {
    fn render(&self, source: &[u8]) -> Result<Vec<u8>, RenderError>;
}

/// CommonMark + GFM-style extensions via pulldown-cmark.
pub struct Markdown {
    options: Options,
}

impl Markdown {
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_HEADING_ATTRIBUTES,
        }
    }
}

impl Default for Markdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for Markdown {
    fn render(&self, source: &[u8]) -> Result<Vec<u8>, RenderError> {
        let text = String::from_utf8_lossy(source);
        let parser = Parser::new_ext(&text, self.options);

        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, parser);
        Ok(out.into_bytes())
    }
}

// =============================================================================
// Artifact
// =============================================================================

/// Base64 text of the latest rendered HTML.
///
/// Shared (`Arc<str>`) so fan-out to many viewers clones a pointer.
#[derive(Clone, PartialEq, Eq)]
pub struct RenderedArtifact(Arc<str>);

impl RenderedArtifact {
    /// Encode HTML bytes (standard alphabet, padded, no line wrapping).
    pub fn encode(html: &[u8]) -> Self {
        Self(STANDARD.encode(html).into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back to HTML bytes.
    #[cfg(test)]
    pub fn decode(&self) -> Vec<u8> {
        STANDARD.decode(self.as_str()).unwrap()
    }
}

impl fmt::Debug for RenderedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RenderedArtifact({} bytes)", self.0.len())
    }
}

// =============================================================================
// Adapter
// =============================================================================

/// Wraps a [`Render`] implementation with postprocessing and encoding.
pub struct Renderer {
    format: Box<dyn Render>,
}

impl Renderer {
    pub fn new(format: impl Render + 'static) -> Self {
        Self {
            format: Box::new(format),
        }
    }

    /// Render, shrink, encode.
    ///
    /// The result contains no raw newline and fits one `data:` line.
    pub fn render_and_encode(&self, source: &[u8]) -> Result<RenderedArtifact, RenderError> {
        let html = self.format.render(source)?;
        Ok(RenderedArtifact::encode(&shrink(&html)))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Markdown::new())
    }
}
