//! Markdown to sanitized HTML preview.
//!
//! Source bytes are rendered with pulldown-cmark, cleaned with an ammonia
//! allowlist, wrapped in a fixed page template, written to a temporary file
//! and handed to the platform's default viewer.

pub mod document;
pub mod error;
pub mod launcher;
pub mod pipeline;
pub mod render;
pub mod sanitize;
pub mod store;

pub use document::{wrap, FOOTER, HEADER};
pub use error::{ExitCode, PreviewError, PreviewResult};
pub use launcher::{find_executable, OpenCommand, SystemViewer, Viewer, DEFAULT_GRACE};
pub use pipeline::{run, transform, PreviewOptions, PreviewOutcome, PreviewRequest, Stage};
pub use render::render;
pub use sanitize::sanitize;
pub use store::FileStore;
