//! Shared utility functions.

use std::borrow::Cow;

/// Single-line preview of `s` for log fields.
///
/// Newlines become spaces and the result is cut to at most `max_chars`
/// characters, with `…` appended when anything was dropped.
pub fn preview(s: &str, max_chars: usize) -> Cow<'_, str> {
    let fits = s.chars().count() <= max_chars;
    if fits && !s.contains('\n') {
        return Cow::Borrowed(s);
    }
    let mut out: String = s
        .chars()
        .take(max_chars)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    if !fits {
        out.push('…');
    }
    Cow::Owned(out)
}
