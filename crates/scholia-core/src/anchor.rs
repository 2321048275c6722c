//! Case-insensitive anchor search.
//!
//! Anchors name the n-th occurrence of a needle inside a passage. Literal
//! needles are escaped and run through the same case-insensitive regex
//! machinery as `/…/` patterns, so both paths yield byte offsets into the
//! original string, converted here to code-point offsets for windowing.

use regex::RegexBuilder;

/// Find the n-th case-insensitive occurrence of a literal needle.
///
/// Matches do not overlap: the search resumes after each match, so
/// occurrence counting advances by the needle length. Returns code-point
/// `(start, end)` offsets, or `None` when there are fewer than `n`
/// occurrences.
pub fn find_nth_literal(haystack: &str, needle: &str, n: usize) -> Option<(usize, usize)> {
    if needle.is_empty() || n < 1 {
        return None;
    }
    let re = RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
        .ok()?;
    let m = re.find_iter(haystack).nth(n - 1)?;
    Some(char_span(haystack, m.start(), m.end()))
}

/// Find the n-th match of a caller-supplied pattern, case-insensitively.
///
/// Returns `Err` for an invalid pattern, `Ok(None)` when there are fewer
/// than `n` matches, and code-point offsets otherwise.
pub fn find_nth_regex(
    haystack: &str,
    pattern: &str,
    n: usize,
) -> Result<Option<(usize, usize)>, regex::Error> {
    let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
    if n < 1 {
        return Ok(None);
    }
    Ok(re
        .find_iter(haystack)
        .nth(n - 1)
        .map(|m| char_span(haystack, m.start(), m.end())))
}

/// Convert a byte range into code-point offsets in a single pass.
fn char_span(s: &str, byte_start: usize, byte_end: usize) -> (usize, usize) {
    let mut start = 0;
    let mut end = 0;
    for (i, (b, _)) in s.char_indices().enumerate() {
        if b < byte_start {
            start = i + 1;
        }
        if b < byte_end {
            end = i + 1;
        } else {
            break;
        }
    }
    (start, end)
}
