//! Line numbering and single-pass file output.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Prefix every line with its 1-based number. N lines in, N lines out,
/// content otherwise untouched.
pub fn number_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{}: {}", i + 1, line))
        .collect()
}

/// Write the captured window in a single pass. The destination is not
/// opened until the full content string exists in memory, so a failure
/// never leaves a half-written file behind.
pub fn write_content(path: &Path, lines: &[String], append: bool) -> Result<()> {
    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    let mut file = options
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
