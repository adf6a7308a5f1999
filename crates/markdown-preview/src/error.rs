use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    Usage = 1,
    Input = 2,
    Output = 3,
    Viewer = 4,
    Cleanup = 5,
}

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("cannot read {}: {source}", path.display())]
    InputRead { path: PathBuf, source: io::Error },

    #[error("cannot create temporary file in {}: {source}", dir.display())]
    TempFileCreate { dir: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("preview is not supported on platform '{0}'")]
    UnsupportedPlatform(String),

    #[error("viewer command '{0}' not found in search path")]
    ViewerNotFound(String),

    #[error("failed to launch {}: {source}", program.display())]
    ViewerLaunch { program: PathBuf, source: io::Error },

    #[error("{} exited with {status}", program.display())]
    ViewerFailed { program: PathBuf, status: ExitStatus },

    #[error("cannot remove {}: {source}", path.display())]
    Cleanup { path: PathBuf, source: io::Error },
}

impl PreviewError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::InputRead { .. } => ExitCode::Input,
            Self::TempFileCreate { .. } | Self::Write { .. } => ExitCode::Output,
            Self::UnsupportedPlatform(_)
            | Self::ViewerNotFound(_)
            | Self::ViewerLaunch { .. }
            | Self::ViewerFailed { .. } => ExitCode::Viewer,
            Self::Cleanup { .. } => ExitCode::Cleanup,
        }
    }
}

pub type PreviewResult<T> = Result<T, PreviewError>;
