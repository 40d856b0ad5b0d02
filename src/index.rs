//! Index arithmetic shared by the structural opcodes (`i I y Y d D`).
//!
//! Indices count lines or characters. A negative index counts back from the
//! end, and anything out of range is clamped to the nearest boundary. None of
//! these functions can fail.

use std::ops::Range;

/// Resolve `index` against a sequence of `len` units to an insertion point in
/// `0..=len`.
pub fn resolve_insert(len: usize, index: i64) -> usize {
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let resolved = if index < 0 {
        len_i.saturating_add(index)
    } else {
        index
    };
    // Clamped into 0..=len, so the conversion back cannot truncate.
    resolved.clamp(0, len_i) as usize
}

/// Resolve a `(start, count)` pair to the half-open range of units it covers.
/// The start is resolved like an insertion point; the end never runs past
/// `len`. A non-positive `count` yields an empty range at `start`.
pub fn resolve_span(len: usize, start: i64, count: i64) -> Range<usize> {
    let start = resolve_insert(len, start);
    let count = usize::try_from(count).unwrap_or(0);
    let end = start.saturating_add(count).min(len);
    start..end
}
