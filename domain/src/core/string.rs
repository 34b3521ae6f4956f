//! String utilities for the domain layer.

/// Shorten free text to at most `max_chars` characters, appending an ellipsis
/// when anything was cut.
///
/// Counts characters rather than bytes, so multi-byte answers never split.
pub fn preview(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let mut out: String = s.chars().take(keep).collect();
    out.push('…');
    out
}
