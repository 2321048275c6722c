//! Error types for bundle parsing and URN resolution.

use thiserror::Error;

/// Result type alias using the crate's parse error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing a CEX bundle.
#[derive(Error, Debug)]
pub enum Error {
    /// The bundle has no `#!<section>` marker for the requested section.
    #[error("missing #!{0} section")]
    MissingSection(&'static str),
}

/// Outcomes of a failed URN resolution.
///
/// Every variant renders as the user-facing message the API emits inside an
/// `Exception` envelope. [`ResolveError::is_malformed`] separates request
/// errors (bad URN or regex, HTTP 400) from lookups that simply found
/// nothing (HTTP 200 with an `Exception` status).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// An `@` anchor with no usable needle.
    #[error("Malformed anchored URN.")]
    MalformedAnchor,

    /// The request is neither a CTS URN nor a range.
    #[error("{0} is not valid CTS.")]
    NotCts(String),

    /// A `/…/` anchor needle failed to compile as a regex.
    #[error("Invalid regex pattern.")]
    InvalidRegex,

    /// The base passage of an anchored request is not in the bundle.
    #[error("Could not find base passage {0}")]
    BaseNotFound(String),

    /// Neither an exact match nor any prefix match exists.
    #[error("Could not find node to {0} in source.")]
    NoMatches(String),

    /// No URN in the bundle satisfies an enumeration request.
    #[error("Couldn't find URN.")]
    UrnNotFound,

    /// The request has too few colon segments to carry a reference.
    #[error("Could not parse {0}")]
    UnparsableUrn(String),

    /// The range operator sits at the edge of the reference segment.
    #[error("Could not parse range {0}")]
    UnparsableRange(String),

    /// A regex anchor matched fewer times than the requested occurrence.
    #[error("Regex {pattern:?} (occurrence {occurrence}) not found in {urn}.")]
    RegexNotFound {
        pattern: String,
        occurrence: usize,
        urn: String,
    },

    /// A literal anchor matched fewer times than the requested occurrence.
    #[error("Substring {needle:?} (occurrence {occurrence}) not found in {urn}.")]
    SubstringNotFound {
        needle: String,
        occurrence: usize,
        urn: String,
    },

    /// The left anchor of a range was not found in its passage.
    #[error("Start anchor {needle:?} (occurrence {occurrence}) not found in {urn}.")]
    StartAnchorNotFound {
        needle: String,
        occurrence: usize,
        urn: String,
    },

    /// The right anchor of a range was not found in its passage.
    #[error("End anchor {needle:?} (occurrence {occurrence}) not found in {urn}.")]
    EndAnchorNotFound {
        needle: String,
        occurrence: usize,
        urn: String,
    },

    /// Both anchors sit in one passage but the right match starts before
    /// the left match ends.
    #[error("End anchor {needle:?} (occurrence {occurrence}) not found after start in {urn}.")]
    EndAnchorBeforeStart {
        needle: String,
        occurrence: usize,
        urn: String,
    },

    /// The left endpoint of a range resolved to no passage.
    #[error("Start of range not found.")]
    StartNotFound,

    /// The right endpoint of a range resolved to no passage.
    #[error("End of range not found.")]
    EndNotFound,

    /// The right side of a range has neither a reference nor an anchor.
    #[error("Right side of range missing.")]
    RightMissing,
}

impl ResolveError {
    /// True for errors caused by a malformed request rather than a lookup
    /// that found nothing. The HTTP surface maps these to 400.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MalformedAnchor | Self::NotCts(_) | Self::InvalidRegex
        )
    }
}
