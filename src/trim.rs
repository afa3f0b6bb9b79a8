//! Window trimming: cut a raw capture down to the requested content lines.

/// Trailing non-content lines both backends append to a raw dump: one blank
/// separator and one prompt-echo artifact. A fixed property of the dump
/// formats, confirmed by observation; never measured at runtime.
pub const BACKEND_ARTIFACT_LINES: usize = 2;

/// Return the last `requested` content lines of `lines`.
///
/// `diagnostic_lines` is how many progress-notice lines the tool itself
/// printed just before capturing. Capturing a terminal captures its own
/// recent stdout, so those notices sit at the tail of the raw text and are
/// trimmed together with the fixed backend artifacts.
///
/// `requested == 0` means the entire history: the input comes back
/// unchanged. Inputs shorter than the adjusted window degrade to fewer
/// lines; this never panics.
pub fn trim(lines: &[String], requested: u32, diagnostic_lines: usize) -> Vec<String> {
    if requested == 0 {
        return lines.to_vec();
    }
    let artifacts = BACKEND_ARTIFACT_LINES + diagnostic_lines;
    let adjusted = requested as usize + artifacts;
    let window = &lines[lines.len().saturating_sub(adjusted)..];
    let keep = window.len().saturating_sub(artifacts);
    window[..keep].to_vec()
}

/// True when a capture holds no visible content at all.
pub fn is_blank(lines: &[String]) -> bool {
    lines.iter().all(|l| l.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn trims_fixed_artifacts_from_requested_window() {
        // 7 raw lines, last two are the dump artifacts (blank + prompt echo).
        let raw = lines(&["a", "b", "c", "d", "e", "", "PROMPT"]);
        assert_eq!(trim(&raw, 3, 0), lines(&["c", "d", "e"]));
    }

    #[test]
    fn zero_request_returns_input_unchanged() {
        let raw = lines(&["a", "b", "c", "d", "e", "", "PROMPT"]);
        assert_eq!(trim(&raw, 0, 0), raw);
        assert_eq!(trim(&raw, 0, 1), raw);
    }

    #[test]
    fn verbose_notice_counts_as_extra_artifact() {
        // Same dump with the tool's own notice landing before the artifacts.
        let raw = lines(&["a", "b", "c", "d", "e", "Detected tmux...", "", "PROMPT"]);
        assert_eq!(trim(&raw, 3, 1), lines(&["c", "d", "e"]));
    }

    #[test]
    fn exact_window_consumes_whole_input() {
        let raw = lines(&["a", "b", "c", "", "PROMPT"]);
        assert_eq!(trim(&raw, 3, 0), lines(&["a", "b", "c"]));
    }

    #[test]
    fn short_input_degrades_instead_of_panicking() {
        let raw = lines(&["a", "b", "", "PROMPT"]);
        // Wants 10 content lines, only 2 exist after artifact removal.
        assert_eq!(trim(&raw, 10, 0), lines(&["a", "b"]));
    }

    #[test]
    fn input_shorter_than_artifacts_yields_nothing() {
        let raw = lines(&["PROMPT"]);
        assert_eq!(trim(&raw, 5, 0), Vec::<String>::new());
        assert_eq!(trim(&raw, 5, 1), Vec::<String>::new());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(trim(&[], 5, 0), Vec::<String>::new());
        assert_eq!(trim(&[], 0, 0), Vec::<String>::new());
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(&[]));
        assert!(is_blank(&lines(&["", "   ", "\t"])));
        assert!(!is_blank(&lines(&["", "x"])));
    }
}
