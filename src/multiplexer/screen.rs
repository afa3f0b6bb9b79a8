//! GNU screen capture adapter.
//!
//! screen has no "last N lines" primitive; it can only dump its whole
//! scrollback buffer. The adapter resizes the session's buffer to the
//! requested window (`-X scrollback`), asks screen to hardcopy buffer plus
//! screen into a temp file (`-X hardcopy -h`), waits for the asynchronous
//! dump to settle, and reads it back. The scrollback resize is session-wide
//! and persists after this process exits.

use std::fs;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use super::{
    Backend, CaptureRequest, CommandRunner, MuxError, Multiplexer, RawCapture, SystemRunner,
    decode_lines,
};

/// Stand-in for "entire history": screen has no unbounded scrollback
/// sentinel, so a request for everything pins the buffer to this size.
const SCREEN_UNLIMITED_SCROLLBACK: u32 = 100_000;

/// The hardcopy dump lands asynchronously relative to the `-X` command.
/// Poll until the file exists with a size that holds steady across two
/// consecutive reads; give up at the deadline. screen offers no completion
/// signal, so this narrows the race without closing it.
const DUMP_POLL_INTERVAL: Duration = Duration::from_millis(50);
const DUMP_SETTLE_TIMEOUT: Duration = Duration::from_secs(2);

pub struct ScreenBackend<R = SystemRunner> {
    runner: R,
}

impl ScreenBackend<SystemRunner> {
    pub fn new() -> Self {
        Self {
            runner: SystemRunner,
        }
    }
}

impl Default for ScreenBackend<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl<R: CommandRunner> ScreenBackend<R> {
    fn with_runner(runner: R) -> Self {
        Self { runner }
    }
}

/// Scrollback buffer size to configure before dumping.
fn scrollback_size(lines: u32) -> u32 {
    if lines == 0 {
        SCREEN_UNLIMITED_SCROLLBACK
    } else {
        lines
    }
}

impl<R: CommandRunner> Multiplexer for ScreenBackend<R> {
    fn name(&self) -> &'static str {
        "screen"
    }

    fn capture(&self, request: &CaptureRequest) -> Result<RawCapture, MuxError> {
        let size = scrollback_size(request.lines).to_string();
        self.runner.run("screen", &["-X", "scrollback", &size])?;

        // Unique path per invocation; the TempDir guard removes the dump on
        // every exit from this scope, including the error paths.
        let dir = tempfile::tempdir()?;
        let dump = dir.path().join("hardcopy.txt");
        let dump_arg = dump.to_string_lossy().into_owned();
        self.runner.run("screen", &["-X", "hardcopy", "-h", &dump_arg])?;

        wait_for_dump(&dump)?;
        let bytes = fs::read(&dump)?;
        debug!(bytes = bytes.len(), "read hardcopy dump");
        Ok(RawCapture {
            lines: decode_lines(&bytes),
            backend: Backend::Screen,
        })
    }
}

fn wait_for_dump(path: &Path) -> Result<(), MuxError> {
    let deadline = Instant::now() + DUMP_SETTLE_TIMEOUT;
    let mut last_len = None;
    loop {
        if let Ok(meta) = fs::metadata(path) {
            let len = meta.len();
            if last_len == Some(len) {
                return Ok(());
            }
            last_len = Some(len);
        }
        if Instant::now() >= deadline {
            return Err(MuxError::DumpTimeout(path.to_path_buf()));
        }
        thread::sleep(DUMP_POLL_INTERVAL);
    }
}
