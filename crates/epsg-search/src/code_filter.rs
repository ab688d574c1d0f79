//! Keystroke filter for the EPSG code input.

use std::ops::Range;

/// Smallest value a typed code may take.
pub const MIN_CODE_VALUE: i32 = 1;

/// Largest value a typed code may take.
pub const MAX_CODE_VALUE: i32 = 32767;

/// Returns true if `text` parses as an integer in
/// [`MIN_CODE_VALUE`]..=[`MAX_CODE_VALUE`].
pub fn is_valid_code_text(text: &str) -> bool {
    text.parse::<i32>()
        .is_ok_and(|value| (MIN_CODE_VALUE..=MAX_CODE_VALUE).contains(&value))
}

/// Decides whether replacing the chars in `range` of `current` with
/// `inserted` may go through.
///
/// Multi-character insertions come from selection or paste and are always
/// accepted, even when the result is not a valid code. An empty insertion is
/// a deletion and is also accepted. A single keystroke is accepted only if
/// the whole resulting text is a valid code.
pub fn accepts_edit(current: &str, range: Range<usize>, inserted: &str) -> bool {
    match inserted.chars().count() {
        0 => true,
        1 => is_valid_code_text(&splice(current, range, inserted)),
        _ => true,
    }
}

/// Replaces the chars in `range` of `text` with `inserted`.
///
/// The range is clamped to the text.
pub fn splice(text: &str, range: Range<usize>, inserted: &str) -> String {
    let (start, end) = byte_range(text, range);
    let mut out = String::with_capacity(text.len() - (end - start) + inserted.len());
    out.push_str(&text[..start]);
    out.push_str(inserted);
    out.push_str(&text[end..]);
    out
}

/// Converts a char range into a byte range, clamped to `text`.
pub(crate) fn byte_range(text: &str, range: Range<usize>) -> (usize, usize) {
    let start = byte_offset(text, range.start);
    let end = byte_offset(text, range.end.max(range.start));
    (start, end)
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(idx, _)| idx)
}
