//! Embedded static resources.
//!
//! - `template` - Template types for typed variable injection
//! - `serve` - Preview server page (preview.html)
//!
//! ```ignore
//! use embed::serve::{PREVIEW_HTML, PreviewVars};
//!
//! let html = PREVIEW_HTML.render(&PreviewVars {
//!     events_url: "http://localhost:8080/events",
//!     title: "notes.md",
//! });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod serve {
    use super::{Template, TemplateVars};
    use crate::utils::html::{escape, escape_js_string};

    /// Variables for preview.html.
    pub struct PreviewVars<'a> {
        /// Absolute URL of the event stream, placed in a script string
        pub events_url: &'a str,
        /// Watched file name, shown in the tab title
        pub title: &'a str,
    }

    impl TemplateVars for PreviewVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__EVENTS_URL__", &escape_js_string(self.events_url))
                .replace("__TITLE__", &escape(self.title))
        }
    }

    /// Viewer page: connects to the event stream and swaps in each artifact.
    pub const PREVIEW_HTML: Template<PreviewVars<'static>> =
        Template::new(include_str!("serve/preview.html"));

}
