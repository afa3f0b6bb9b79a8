//! tmux capture adapter.
//!
//! `capture-pane -p` prints the pane content straight to stdout. `-S` sets
//! the first line of the window: `-N` counts N lines back into scrollback
//! from the top of the visible screen, and `-` means the very start of the
//! history. This path injects no artifact lines of its own beyond what the
//! multiplexer itself prints.

use super::{
    Backend, CaptureRequest, CommandRunner, MuxError, Multiplexer, RawCapture, SystemRunner,
    decode_lines,
};

pub struct TmuxBackend<R = SystemRunner> {
    runner: R,
}

impl TmuxBackend<SystemRunner> {
    pub fn new() -> Self {
        Self {
            runner: SystemRunner,
        }
    }
}

impl Default for TmuxBackend<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl<R: CommandRunner> TmuxBackend<R> {
    fn with_runner(runner: R) -> Self {
        Self { runner }
    }
}

/// Start-line argument for `capture-pane -S`.
fn start_line(lines: u32) -> String {
    if lines == 0 {
        "-".to_string()
    } else {
        format!("-{lines}")
    }
}

impl<R: CommandRunner> Multiplexer for TmuxBackend<R> {
    fn name(&self) -> &'static str {
        "tmux"
    }

    fn capture(&self, request: &CaptureRequest) -> Result<RawCapture, MuxError> {
        let start = start_line(request.lines);
        let stdout = self.runner.run("tmux", &["capture-pane", "-p", "-S", &start])?;
        Ok(RawCapture {
            lines: decode_lines(&stdout),
            backend: Backend::Tmux,
        })
    }
}
