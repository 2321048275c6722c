//! Text windowing: clipping, anchor windows, and truncation.
//!
//! All offsets and budgets are code points. Output is a plain slice of the
//! passage text: no ellipses, no markers, no normalization. The `complete`
//! flag accompanying every window is true iff the emitted text is the whole
//! passage.

use crate::anchor::find_nth_literal;

/// Context window (code points) on each side of a plain substring clip.
const PLAIN_CONTEXT: usize = 40;

/// Text-shaping query parameters, decoded leniently by the HTTP layer.
///
/// `clip` and `context` distinguish "absent" from an explicit value because
/// their defaults differ between plain filters (clip off, context 40) and
/// anchor windows (clip on, context 0).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFilters {
    pub substring: Option<String>,
    pub clip: Option<bool>,
    pub context: Option<usize>,
    pub max_chars: usize,
    pub tail: bool,
}

/// Apply the plain filters to a full passage text.
///
/// When `substring` is set and `clip` is on, the window covers the first
/// case-insensitive occurrence plus `context` code points on each side; a
/// needle that never occurs leaves the text whole. `max_chars` then
/// truncates. Returns the text and its completeness.
pub fn apply_text_filters(text: &str, filters: &TextFilters) -> (String, bool) {
    let mut out = text.to_string();
    let mut complete = true;

    let substring = filters
        .substring
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    if let Some(needle) = substring
        && filters.clip.unwrap_or(false)
    {
        let context = filters.context.unwrap_or(PLAIN_CONTEXT);
        let (clipped, whole) = clip_to_substring(text, needle, context);
        if !whole {
            complete = false;
        }
        out = clipped;
    }

    if truncate_chars(&mut out, filters.max_chars) {
        complete = false;
    }
    (out, complete)
}

/// Window a passage around anchor offsets (code points).
///
/// `tail` emits from the match start to the end of the passage. With
/// clipping disabled and no context the whole text is emitted. Otherwise
/// the window is the match plus `context` on each side, clamped to the
/// passage; anchors clip by default.
pub fn anchor_window(
    text: &str,
    start: usize,
    end: usize,
    filters: &TextFilters,
) -> (String, bool) {
    let clip = filters.clip.unwrap_or(true);

    if filters.tail {
        let (mut out, complete) = slice_from(text, start);
        if truncate_chars(&mut out, filters.max_chars) {
            return (out, false);
        }
        return (out, complete);
    }

    let context = filters.context.unwrap_or(0);
    if !clip && context == 0 {
        let mut out = text.to_string();
        if truncate_chars(&mut out, filters.max_chars) {
            return (out, false);
        }
        return (out, true);
    }

    let len = text.chars().count();
    let s = start.saturating_sub(context);
    let e = (end + context).min(len);
    let mut out = slice_between(text, s, e).0;
    let mut complete = s == 0 && e == len;
    if truncate_chars(&mut out, filters.max_chars) {
        complete = false;
    }
    (out, complete)
}

/// Clip to the first case-insensitive occurrence of `needle` with
/// `context` code points on each side. A needle with no occurrence leaves
/// the text whole and complete.
fn clip_to_substring(text: &str, needle: &str, context: usize) -> (String, bool) {
    let Some((start, end)) = find_nth_literal(text, needle, 1) else {
        return (text.to_string(), true);
    };
    let len = text.chars().count();
    let s = start.saturating_sub(context);
    let e = (end + context).min(len);
    let out: String = text.chars().skip(s).take(e - s).collect();
    (out, s == 0 && e == len)
}

/// Emit `[start, end-of-passage)`; complete iff the slice is the whole
/// text.
pub fn slice_from(text: &str, start: usize) -> (String, bool) {
    let out: String = text.chars().skip(start).collect();
    (out, start == 0)
}

/// Emit `[0, end)`; complete iff the slice is the whole text.
pub fn slice_until(text: &str, end: usize) -> (String, bool) {
    let len = text.chars().count();
    let end = end.min(len);
    let out: String = text.chars().take(end).collect();
    (out, end == len)
}

/// Emit `[start, end)` with clamping; complete iff the slice is the whole
/// text.
pub fn slice_between(text: &str, start: usize, end: usize) -> (String, bool) {
    let len = text.chars().count();
    let end = end.min(len);
    let start = start.min(end);
    let out: String = text.chars().skip(start).take(end - start).collect();
    (out, start == 0 && end == len)
}

/// Truncate to `max_chars` code points in place. Zero means unbounded.
/// Returns true when truncation happened.
fn truncate_chars(text: &mut String, max_chars: usize) -> bool {
    if max_chars == 0 || text.chars().count() <= max_chars {
        return false;
    }
    *text = text.chars().take(max_chars).collect();
    true
}
