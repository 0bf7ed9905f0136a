//! Small string helpers shared across modules.

/// Cut `s` to at most `max_len` bytes on a char boundary, appending
/// `marker` when anything was dropped.
pub(crate) fn truncate_with_marker(s: &str, max_len: usize, marker: &str) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{}", &s[..end], marker)
}
