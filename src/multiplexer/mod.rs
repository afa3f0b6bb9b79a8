//! Multiplexer backend detection and scrollback capture.
//!
//! Detection is a pure function of two environment markers: `$TMUX` (set by
//! tmux inside its panes) and `$STY` (set by GNU screen). Capture goes
//! through the [`Multiplexer`] trait so the rest of the tool never branches
//! on backend names, and subprocess execution goes through [`CommandRunner`]
//! so the adapters can be exercised with mock runners.

mod screen;
mod tmux;

use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

pub use screen::ScreenBackend;
pub use tmux::TmuxBackend;

#[derive(Debug, Error)]
pub enum MuxError {
    #[error("no supported multiplexer detected (neither $TMUX nor $STY is set)")]
    Unsupported,

    #[error("`{0}` is not installed or not on PATH")]
    NotFound(String),

    #[error("`{program}` failed: {detail}")]
    CommandFailed { program: String, detail: String },

    #[error("screen hardcopy dump never settled at {0}")]
    DumpTimeout(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Supported multiplexer backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Tmux,
    Screen,
}

/// How many scrollback lines the caller wants. Zero means the entire
/// history.
#[derive(Debug, Clone, Copy)]
pub struct CaptureRequest {
    pub lines: u32,
}

/// Raw captured text, before artifact trimming. May still carry trailing
/// blank lines and the backend's own dump artifacts.
#[derive(Debug)]
pub struct RawCapture {
    pub lines: Vec<String>,
    pub backend: Backend,
}

/// A capture-capable multiplexer backend.
pub trait Multiplexer {
    fn name(&self) -> &'static str;
    fn capture(&self, request: &CaptureRequest) -> Result<RawCapture, MuxError>;
}

/// Detect the active multiplexer from the process environment.
pub fn detect_backend() -> Option<Backend> {
    detect_backend_from(
        std::env::var("TMUX").ok().as_deref(),
        std::env::var("STY").ok().as_deref(),
    )
}

/// Pure core of [`detect_backend`]. tmux wins when both markers are present:
/// a tmux session nested inside screen captures through the innermost
/// multiplexer. Empty marker values count as absent.
pub fn detect_backend_from(tmux: Option<&str>, sty: Option<&str>) -> Option<Backend> {
    match (tmux, sty) {
        (Some(t), _) if !t.is_empty() => Some(Backend::Tmux),
        (_, Some(s)) if !s.is_empty() => Some(Backend::Screen),
        _ => None,
    }
}

/// Instantiate the capture adapter for a detected backend.
pub fn create_backend(backend: Backend) -> Box<dyn Multiplexer> {
    match backend {
        Backend::Tmux => Box::new(TmuxBackend::new()),
        Backend::Screen => Box::new(ScreenBackend::new()),
    }
}

/// Executes a backend binary and returns its stdout bytes. A trait so the
/// adapters can be driven by mock runners in tests.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<Vec<u8>, MuxError>;
}

/// Production runner over `std::process::Command`. Any non-zero exit is a
/// fatal [`MuxError::CommandFailed`]; nothing is retried.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<Vec<u8>, MuxError> {
        which::which(program).map_err(|_| MuxError::NotFound(program.to_string()))?;
        debug!(program, ?args, "running backend command");
        let output = Command::new(program).args(args).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MuxError::CommandFailed {
                program: program.to_string(),
                detail: format!(
                    "exit code {}: {}",
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            });
        }
        Ok(output.stdout)
    }
}

/// Decode captured bytes permissively and strip ANSI escape sequences.
/// Invalid UTF-8 is replaced, never an error.
pub(crate) fn decode_lines(bytes: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(bytes);
    let stripped = strip_ansi_escapes::strip_str(&*text);
    stripped.lines().map(String::from).collect()
}

/// Visible row count of the controlling terminal via `tput lines`, used to
/// size the default capture window. `None` when the query fails or its
/// output does not parse.
pub fn visible_rows() -> Option<u32> {
    let output = Command::new("tput").arg("lines").output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8_lossy(&output.stdout).trim().parse().ok()
}
