use std::fmt;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::document::wrap;
use crate::error::{PreviewError, PreviewResult};
use crate::launcher::Viewer;
use crate::render::render;
use crate::sanitize::sanitize;
use crate::store::{FileStore, DEFAULT_PREFIX, DEFAULT_SUFFIX};

#[derive(Debug, Clone, Default)]
pub struct PreviewOptions {
    /// Leave the output file on disk instead of opening and deleting it.
    pub skip_preview: bool,
    /// Directory for the output file; the system temp dir when unset.
    pub temp_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct PreviewRequest {
    pub input: PathBuf,
    pub options: PreviewOptions,
}

impl PreviewRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            options: PreviewOptions::default(),
        }
    }

    pub fn skip_preview(mut self, skip: bool) -> Self {
        self.options.skip_preview = skip;
        self
    }

    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.temp_dir = Some(dir.into());
        self
    }
}

/// Progress of a single run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ReadInput,
    Rendered,
    Sanitized,
    Wrapped,
    Persisted,
    Previewed,
    SkipPreview,
    Cleaned,
    Left,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::ReadInput => "read-input",
            Stage::Rendered => "rendered",
            Stage::Sanitized => "sanitized",
            Stage::Wrapped => "wrapped",
            Stage::Persisted => "persisted",
            Stage::Previewed => "previewed",
            Stage::SkipPreview => "skip-preview",
            Stage::Cleaned => "cleaned",
            Stage::Left => "left",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOutcome {
    pub output: PathBuf,
    /// Either [`Stage::Left`] or [`Stage::Cleaned`].
    pub stage: Stage,
}

impl PreviewOutcome {
    pub fn left_on_disk(&self) -> bool {
        self.stage == Stage::Left
    }
}

/// Render markdown bytes into a complete, sanitized HTML page.
pub fn transform(source: &[u8]) -> String {
    let rendered = render(source);
    debug!(stage = %Stage::Rendered, bytes = rendered.len(), "markdown rendered");

    let sanitized = sanitize(&rendered);
    debug!(stage = %Stage::Sanitized, bytes = sanitized.len(), "html sanitized");

    let document = wrap(&sanitized);
    debug!(stage = %Stage::Wrapped, bytes = document.len(), "document wrapped");
    document
}

/// Convert `request.input` to HTML, persist it, and optionally preview it.
///
/// When the preview runs, the output file is removed afterwards even if the
/// viewer failed. A removal failure replaces any viewer error as the result.
pub fn run(request: PreviewRequest, viewer: &dyn Viewer) -> PreviewResult<PreviewOutcome> {
    let PreviewRequest { input, options } = request;

    let source = fs::read(&input).map_err(|source| PreviewError::InputRead {
        path: input.clone(),
        source,
    })?;
    debug!(
        stage = %Stage::ReadInput,
        path = %input.display(),
        bytes = source.len(),
        "input read"
    );

    let document = transform(&source);

    let store = options
        .temp_dir
        .map(FileStore::new)
        .unwrap_or_default();
    let output = store.create_unique(DEFAULT_PREFIX, DEFAULT_SUFFIX)?;
    store.write(&output, document.as_bytes())?;
    info!(stage = %Stage::Persisted, path = %output.display(), "document written");

    if options.skip_preview {
        debug!(stage = %Stage::SkipPreview, "preview skipped, leaving output");
        return Ok(PreviewOutcome {
            output,
            stage: Stage::Left,
        });
    }

    let previewed = viewer.open(&output);
    match &previewed {
        Ok(()) => debug!(stage = %Stage::Previewed, "viewer finished"),
        Err(err) => warn!(error = %err, "preview failed, removing output anyway"),
    }

    store.remove(&output)?;
    info!(stage = %Stage::Cleaned, path = %output.display(), "output removed");

    previewed.map(|()| PreviewOutcome {
        output,
        stage: Stage::Cleaned,
    })
}
