//! The capture operation: detect the multiplexer, pull its scrollback,
//! trim the window, and write the destination file.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::cli::Args;
use crate::multiplexer::{self, CaptureRequest, MuxError};
use crate::output;
use crate::trim;

pub fn run(file: &Path, args: &Args) -> Result<()> {
    let verbosity = args.verbosity();

    let backend = multiplexer::detect_backend().ok_or(MuxError::Unsupported)?;
    let mux = multiplexer::create_backend(backend);

    // Default window: the terminal's visible rows, or the entire history
    // when the row query fails.
    let lines = match args.length {
        Some(n) => n,
        None => multiplexer::visible_rows().unwrap_or(0),
    };
    let request = CaptureRequest { lines };

    // This notice lands inside the scrollback about to be captured; the
    // trimmer compensates via diagnostic_lines().
    if verbosity.is_verbose() {
        if lines == 0 {
            println!("Detected {}, capturing entire history...", mux.name());
        } else {
            println!("Detected {}, capturing {} lines...", mux.name(), lines);
        }
    }

    let raw = mux.capture(&request)?;
    info!(
        backend = ?raw.backend,
        captured = raw.lines.len(),
        "capture complete"
    );

    let content = if trim::is_blank(&raw.lines) {
        if verbosity.is_verbose() {
            eprintln!("warning: captured scrollback is empty");
        }
        Vec::new()
    } else {
        trim::trim(&raw.lines, request.lines, verbosity.diagnostic_lines())
    };

    let content = if args.number {
        output::number_lines(&content)
    } else {
        content
    };

    output::write_content(file, &content, args.append)
}
