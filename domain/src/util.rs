//! Shared utility functions.

/// Longest prefix of `s` of at most `max_bytes` that ends on a UTF-8 character
/// boundary.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Cap a diagnostic dump (e.g. the body of a failed tool response), noting
/// how much was cut.
pub fn truncate_diagnostic(s: &str, max_bytes: usize) -> String {
    let kept = truncate_str(s, max_bytes);
    if kept.len() == s.len() {
        return s.to_string();
    }
    format!("{}\n[... {} bytes truncated]", kept, s.len() - kept.len())
}
