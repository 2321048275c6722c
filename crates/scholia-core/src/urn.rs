//! CTS URN grammar.
//!
//! A request URN is `urn:cts:<group>:<work>:<ref>` with at least five
//! colon segments. The first four segments plus a trailing colon form the
//! work stem; the fifth segment is the passage reference and may carry a
//! range (`ref1-ref2`) and `@needle[n]` anchor suffixes. These predicates
//! and parsers classify requests without touching the corpus.

/// The reference (fifth colon segment), if present.
fn reference(urn: &str) -> Option<&str> {
    urn.split(':').nth(4)
}

/// True for a structurally valid CTS URN that is not a range.
///
/// Requires the `urn:cts:` prefix, at least five colon segments, and
/// non-empty group and work segments. Anchors are not inspected here.
pub fn is_cts_urn(urn: &str) -> bool {
    let parts: Vec<&str> = urn.split(':').collect();
    parts.len() >= 5
        && parts[0] == "urn"
        && parts[1] == "cts"
        && !parts[2].is_empty()
        && !parts[3].is_empty()
        && !is_range(urn)
}

/// True when the fifth colon segment carries a `-` at an interior
/// position, i.e. the reference names a range of passages.
pub fn is_range(urn: &str) -> bool {
    let Some(r) = reference(urn) else {
        return false;
    };
    r.char_indices()
        .any(|(i, c)| c == '-' && i > 0 && i < r.len() - 1)
}

/// True when the request carries an `@` anchor anywhere.
pub fn wants_anchor(urn: &str) -> bool {
    urn.contains('@')
}

/// The work stem `urn:cts:<group>:<work>:` scoping navigation and ranges.
pub fn work_stem(urn: &str) -> Option<String> {
    let parts: Vec<&str> = urn.split(':').collect();
    if parts.len() < 4 {
        return None;
    }
    let mut stem = parts[..4].join(":");
    stem.push(':');
    Some(stem)
}

/// Split `base@needle[n]` at its last `@`.
///
/// The occurrence suffix `[n]` is optional and defaults to 1; values below
/// 1 or unparsable values keep the default. Returns `None` when there is
/// no `@` or the needle trims to nothing.
pub fn parse_anchored(urn: &str) -> Option<(String, String, usize)> {
    let at = urn.rfind('@')?;
    let base = &urn[..at];
    let (needle, occurrence) = split_occurrence(&urn[at + 1..]);
    let needle = needle.trim();
    if needle.is_empty() {
        return None;
    }
    Some((base.to_string(), needle.to_string(), occurrence))
}

/// One endpoint of a range reference, e.g. `1.1@wrath[2]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeToken {
    /// Passage reference relative to the work stem; may be empty when the
    /// endpoint is anchor-only and inherits the opposite reference.
    pub reference: String,
    pub needle: String,
    pub occurrence: usize,
    pub anchored: bool,
}

/// Parse a range endpoint token. Unlike [`parse_anchored`] the anchor is
/// optional, and the split happens at the token's first `@`.
pub fn parse_range_token(token: &str) -> RangeToken {
    let token = token.trim();
    let Some(at) = token.find('@') else {
        return RangeToken {
            reference: token.to_string(),
            needle: String::new(),
            occurrence: 1,
            anchored: false,
        };
    };
    let (needle, occurrence) = split_occurrence(token[at + 1..].trim());
    RangeToken {
        reference: token[..at].trim().to_string(),
        needle: needle.trim().to_string(),
        occurrence,
        anchored: true,
    }
}

/// Split a trailing `[n]` occurrence suffix off a needle.
fn split_occurrence(rest: &str) -> (&str, usize) {
    if let Some(lb) = rest.rfind('[')
        && rest.ends_with(']')
    {
        let needle = &rest[..lb];
        if let Ok(n) = rest[lb + 1..rest.len() - 1].trim().parse::<usize>()
            && n >= 1
        {
            return (needle, n);
        }
        return (needle, 1);
    }
    (rest, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_cts_urns() {
        assert!(is_cts_urn("urn:cts:greekLit:tlg0012.tlg001:1.1"));
        assert!(is_cts_urn("urn:cts:g:w:"));
        assert!(is_cts_urn("urn:cts:g:w:1.1.1"));
    }

    #[test]
    fn rejects_non_cts_urns() {
        assert!(!is_cts_urn("urn:cite2:g:w:1"));
        assert!(!is_cts_urn("urn:cts:g:w"));
        assert!(!is_cts_urn("not a urn"));
        assert!(!is_cts_urn("urn:cts::w:1"));
    }

    #[test]
    fn ranges_are_not_plain_urns() {
        assert!(!is_cts_urn("urn:cts:g:w:1-3"));
        assert!(is_range("urn:cts:g:w:1-3"));
        assert!(is_range("urn:cts:g:w:1.1-1.9"));
    }

    #[test]
    fn edge_dashes_are_not_ranges() {
        assert!(!is_range("urn:cts:g:w:-1"));
        assert!(!is_range("urn:cts:g:w:1-"));
        assert!(!is_range("urn:cts:g:w:1"));
        assert!(!is_range("urn:cts:g:w"));
    }

    #[test]
    fn anchor_detection() {
        assert!(wants_anchor("urn:cts:g:w:1@wrath"));
        assert!(!wants_anchor("urn:cts:g:w:1"));
    }

    #[test]
    fn work_stem_takes_first_four_segments() {
        assert_eq!(
            work_stem("urn:cts:greekLit:tlg0012.tlg001:1.1").as_deref(),
            Some("urn:cts:greekLit:tlg0012.tlg001:")
        );
        assert_eq!(work_stem("urn:cts:g:w").as_deref(), Some("urn:cts:g:w:"));
        assert!(work_stem("urn:cts:g").is_none());
    }

    #[test]
    fn parse_anchored_defaults_occurrence_to_one() {
        let (base, needle, occ) = parse_anchored("urn:cts:g:w:1@wrath").unwrap();
        assert_eq!(base, "urn:cts:g:w:1");
        assert_eq!(needle, "wrath");
        assert_eq!(occ, 1);
    }

    #[test]
    fn parse_anchored_reads_occurrence_suffix() {
        let (_, needle, occ) = parse_anchored("urn:cts:g:w:1@wrath[3]").unwrap();
        assert_eq!(needle, "wrath");
        assert_eq!(occ, 3);
    }

    #[test]
    fn parse_anchored_keeps_default_on_bad_occurrence() {
        let (_, needle, occ) = parse_anchored("urn:cts:g:w:1@wrath[x]").unwrap();
        assert_eq!(needle, "wrath");
        assert_eq!(occ, 1);
        let (_, _, occ) = parse_anchored("urn:cts:g:w:1@wrath[0]").unwrap();
        assert_eq!(occ, 1);
    }

    #[test]
    fn parse_anchored_splits_at_last_at_sign() {
        let (base, needle, occ) = parse_anchored("urn:cts:g:w:1@a@b[2]").unwrap();
        assert_eq!(base, "urn:cts:g:w:1@a");
        assert_eq!(needle, "b");
        assert_eq!(occ, 2);
    }

    #[test]
    fn parse_anchored_rejects_empty_needle() {
        assert!(parse_anchored("urn:cts:g:w:1@").is_none());
        assert!(parse_anchored("urn:cts:g:w:1@  ").is_none());
        assert!(parse_anchored("urn:cts:g:w:1").is_none());
    }

    #[test]
    fn range_token_without_anchor() {
        let tok = parse_range_token("1.4");
        assert_eq!(tok.reference, "1.4");
        assert!(!tok.anchored);
        assert_eq!(tok.occurrence, 1);
    }

    #[test]
    fn range_token_with_anchor_and_occurrence() {
        let tok = parse_range_token("1.4@arma[2]");
        assert_eq!(tok.reference, "1.4");
        assert_eq!(tok.needle, "arma");
        assert_eq!(tok.occurrence, 2);
        assert!(tok.anchored);
    }

    #[test]
    fn range_token_anchor_only_has_empty_reference() {
        let tok = parse_range_token("@arma");
        assert_eq!(tok.reference, "");
        assert_eq!(tok.needle, "arma");
        assert!(tok.anchored);
    }

    #[test]
    fn range_token_empty_is_inert() {
        let tok = parse_range_token("  ");
        assert_eq!(tok.reference, "");
        assert!(!tok.anchored);
    }
}
