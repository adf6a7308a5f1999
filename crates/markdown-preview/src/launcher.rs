use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{PreviewError, PreviewResult};

/// How long the viewer gets to read the file before it may be deleted.
pub const DEFAULT_GRACE: Duration = Duration::from_secs(2);

/// Something that can display a rendered document.
pub trait Viewer {
    /// Open `path` and return once it is safe to delete the file.
    fn open(&self, path: &Path) -> PreviewResult<()>;
}

/// The platform's "open with default application" command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenCommand {
    pub os: &'static str,
    pub program: &'static str,
    pub leading_args: &'static [&'static str],
}

pub const OPEN_COMMANDS: &[OpenCommand] = &[
    OpenCommand {
        os: "linux",
        program: "xdg-open",
        leading_args: &[],
    },
    OpenCommand {
        os: "windows",
        program: "cmd.exe",
        leading_args: &["/C", "start"],
    },
    OpenCommand {
        os: "macos",
        program: "open",
        leading_args: &[],
    },
];

impl OpenCommand {
    pub fn for_os(os: &str) -> PreviewResult<&'static OpenCommand> {
        OPEN_COMMANDS
            .iter()
            .find(|command| command.os == os)
            .ok_or_else(|| PreviewError::UnsupportedPlatform(os.to_string()))
    }

    pub fn args(&self, path: &Path) -> Vec<OsString> {
        self.leading_args
            .iter()
            .map(|arg| OsString::from(*arg))
            .chain(std::iter::once(path.as_os_str().to_os_string()))
            .collect()
    }
}

/// Opens documents with the operating system's default viewer.
#[derive(Debug, Clone)]
pub struct SystemViewer {
    os: String,
    search_path: Option<OsString>,
    grace: Duration,
}

impl Default for SystemViewer {
    fn default() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            search_path: env::var_os("PATH"),
            grace: DEFAULT_GRACE,
        }
    }
}

impl SystemViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_os(mut self, os: impl Into<String>) -> Self {
        self.os = os.into();
        self
    }

    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }
}

impl Viewer for SystemViewer {
    fn open(&self, path: &Path) -> PreviewResult<()> {
        let command = OpenCommand::for_os(&self.os)?;
        let program = find_executable(command.program, self.search_path.as_deref())
            .ok_or_else(|| PreviewError::ViewerNotFound(command.program.to_string()))?;

        debug!(program = %program.display(), file = %path.display(), "launching viewer");
        let status = Command::new(&program).args(command.args(path)).status();

        // Open commands often hand off to the real viewer and return early.
        info!(grace_ms = self.grace.as_millis() as u64, "waiting for viewer to load file");
        thread::sleep(self.grace);

        match status {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(PreviewError::ViewerFailed { program, status }),
            Err(source) => Err(PreviewError::ViewerLaunch { program, source }),
        }
    }
}

/// Locate `program` in the directories of `search_path`.
pub fn find_executable(program: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let search_path = search_path?;
    env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
