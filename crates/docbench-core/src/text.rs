//! Line helpers over byte offsets.
//!
//! Offsets are 0-indexed bytes and are clamped to the content length.

/// Byte offset of the first character of the line containing `offset`.
pub fn line_start(content: &str, offset: usize) -> usize {
    let offset = offset.min(content.len());
    content[..offset].rfind('\n').map_or(0, |i| i + 1)
}

/// Byte offset just past the line containing `offset`, including its `\n`.
///
/// For the last line without a trailing newline this is the content length.
pub fn line_end_inclusive(content: &str, offset: usize) -> usize {
    let offset = offset.min(content.len());
    content[offset..]
        .find('\n')
        .map_or(content.len(), |i| offset + i + 1)
}

/// True if `text` contains only spaces, tabs and form feeds.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\t' | '\x0c'))
}
