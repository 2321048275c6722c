//! Passage resolution: exact matches, prefix expansion, anchored
//! sub-passage slicing, and range materialization.
//!
//! Requests are classified in order: an anchored non-range URN slices a
//! window out of one passage; an exact URN emits that passage; any other
//! non-range URN expands as a prefix; a range walks the work-scoped
//! sequence between its endpoints, slicing anchored endpoints from the
//! inside out. Singletons and prefix expansions take their sequence and
//! neighbors from the full bundle order; range nodes are scoped to the
//! work stem.

use crate::anchor::{find_nth_literal, find_nth_regex};
use crate::bundle::Corpus;
use crate::error::ResolveError;
use crate::node::Node;
use crate::urn;
use crate::window::{TextFilters, anchor_window, apply_text_filters, slice_between, slice_from, slice_until};

fn all_ids(corpus: &Corpus) -> Vec<String> {
    corpus.passages.iter().map(|p| p.urn.clone()).collect()
}

/// Resolve a request URN against the corpus.
pub fn resolve(
    request: &str,
    corpus: &Corpus,
    filters: &TextFilters,
) -> Result<Vec<Node>, ResolveError> {
    if urn::wants_anchor(request) && !urn::is_range(request) {
        return resolve_anchored(request, corpus, filters);
    }

    if !urn::is_cts_urn(request) && !urn::is_range(request) {
        return Err(ResolveError::NotCts(request.to_string()));
    }

    if let Some(idx) = corpus.index_of(request) {
        let p = &corpus.passages[idx];
        let (text, complete) = apply_text_filters(&p.text, filters);
        let node = Node::new(p.urn.clone(), text, idx + 1, complete)
            .with_neighbors(&all_ids(corpus), idx);
        return Ok(vec![node]);
    }

    if !urn::is_range(request) {
        return resolve_prefix(request, corpus, filters);
    }

    resolve_range(request, corpus, filters)
}

/// A single anchored passage: window around the n-th needle occurrence.
fn resolve_anchored(
    request: &str,
    corpus: &Corpus,
    filters: &TextFilters,
) -> Result<Vec<Node>, ResolveError> {
    let (base, needle, occurrence) =
        urn::parse_anchored(request).ok_or(ResolveError::MalformedAnchor)?;
    if !urn::is_cts_urn(&base) {
        return Err(ResolveError::NotCts(base));
    }
    let idx = corpus
        .index_of(&base)
        .ok_or_else(|| ResolveError::BaseNotFound(base.clone()))?;
    let full = &corpus.passages[idx].text;

    let span = if needle.len() >= 2 && needle.starts_with('/') && needle.ends_with('/') {
        let pattern = &needle[1..needle.len() - 1];
        match find_nth_regex(full, pattern, occurrence) {
            Err(_) => return Err(ResolveError::InvalidRegex),
            Ok(None) => {
                return Err(ResolveError::RegexNotFound {
                    pattern: pattern.to_string(),
                    occurrence,
                    urn: base,
                });
            }
            Ok(Some(span)) => span,
        }
    } else {
        find_nth_literal(full, &needle, occurrence).ok_or_else(|| {
            ResolveError::SubstringNotFound {
                needle: needle.clone(),
                occurrence,
                urn: base.clone(),
            }
        })?
    };

    let (text, complete) = anchor_window(full, span.0, span.1, filters);
    let node =
        Node::new(base, text, idx + 1, complete).with_neighbors(&all_ids(corpus), idx);
    Ok(vec![node])
}

/// Every passage whose URN starts with the request, in bundle order.
fn resolve_prefix(
    request: &str,
    corpus: &Corpus,
    filters: &TextFilters,
) -> Result<Vec<Node>, ResolveError> {
    let ids = all_ids(corpus);
    let mut nodes = Vec::new();
    for (i, p) in corpus.passages.iter().enumerate() {
        if p.urn.starts_with(request) {
            let (text, complete) = apply_text_filters(&p.text, filters);
            nodes.push(Node::new(p.urn.clone(), text, i + 1, complete).with_neighbors(&ids, i));
        }
    }
    if nodes.is_empty() {
        return Err(ResolveError::NoMatches(request.to_string()));
    }
    Ok(nodes)
}

/// Materialize a range request over the work-scoped passage sequence.
fn resolve_range(
    request: &str,
    corpus: &Corpus,
    filters: &TextFilters,
) -> Result<Vec<Node>, ResolveError> {
    let parts: Vec<&str> = request.split(':').collect();
    if parts.len() < 5 {
        return Err(ResolveError::UnparsableUrn(request.to_string()));
    }
    let stem = format!("{}:", parts[..4].join(":"));
    let range_ref = parts[4];
    let Some(dash) = range_ref.find('-') else {
        return Err(ResolveError::UnparsableRange(request.to_string()));
    };
    if dash == 0 || dash >= range_ref.len() - 1 {
        return Err(ResolveError::UnparsableRange(request.to_string()));
    }
    let mut left = urn::parse_range_token(&range_ref[..dash]);
    let mut right = urn::parse_range_token(&range_ref[dash + 1..]);
    if right.anchored && right.reference.is_empty() {
        right.reference = left.reference.clone();
    }

    let passages: Vec<_> = corpus
        .passages
        .iter()
        .filter(|p| p.urn.starts_with(&stem))
        .collect();
    if passages.is_empty() {
        return Err(ResolveError::NoMatches(request.to_string()));
    }
    let ids: Vec<String> = passages.iter().map(|p| p.urn.clone()).collect();

    let start_id = format!("{stem}{}", left.reference);
    let end_id = format!("{stem}{}", right.reference);
    let mut s_idx = ids.iter().position(|id| *id == start_id);
    if s_idx.is_none() && !left.reference.is_empty() {
        s_idx = ids.iter().position(|id| id.starts_with(&start_id));
    }
    let mut e_idx = ids.iter().position(|id| *id == end_id);
    if e_idx.is_none() && !right.reference.is_empty() {
        e_idx = ids.iter().position(|id| id.starts_with(&end_id));
    }

    // Both anchors in the same passage: one node sliced between them.
    if left.anchored && right.anchored && right.reference == left.reference {
        if let Some(si) = s_idx {
            let full = &passages[si].text;
            let (l_start, l_end) =
                find_nth_literal(full, &left.needle, left.occurrence).ok_or_else(|| {
                    ResolveError::StartAnchorNotFound {
                        needle: left.needle.clone(),
                        occurrence: left.occurrence,
                        urn: start_id.clone(),
                    }
                })?;
            let r_end = match find_nth_literal(full, &right.needle, right.occurrence) {
                Some((r_start, r_end)) if r_start >= l_end => r_end,
                _ => {
                    return Err(ResolveError::EndAnchorBeforeStart {
                        needle: right.needle.clone(),
                        occurrence: right.occurrence,
                        urn: start_id.clone(),
                    });
                }
            };
            let (text, complete) = slice_between(full, l_start, r_end);
            let node = Node::new(passages[si].urn.clone(), text, si + 1, complete)
                .with_neighbors(&ids, si);
            return Ok(vec![node]);
        }
    }

    let Some(mut si) = s_idx else {
        return Err(ResolveError::StartNotFound);
    };
    if !right.reference.is_empty() && e_idx.is_none() {
        return Err(ResolveError::EndNotFound);
    }
    if !right.anchored && right.reference.is_empty() {
        return Err(ResolveError::RightMissing);
    }
    if let Some(ei) = e_idx
        && si > ei
    {
        e_idx = Some(si);
        si = ei;
        std::mem::swap(&mut left, &mut right);
    }

    let mut nodes = Vec::new();

    // Start: tail-sliced when anchored, full (filtered) otherwise.
    let start_passage = passages[si];
    if left.anchored {
        let (l_start, _) =
            find_nth_literal(&start_passage.text, &left.needle, left.occurrence).ok_or_else(
                || ResolveError::StartAnchorNotFound {
                    needle: left.needle.clone(),
                    occurrence: left.occurrence,
                    urn: start_passage.urn.clone(),
                },
            )?;
        let (text, complete) = slice_from(&start_passage.text, l_start);
        nodes.push(
            Node::new(start_passage.urn.clone(), text, si + 1, complete).with_neighbors(&ids, si),
        );
    } else {
        let (text, complete) = apply_text_filters(&start_passage.text, filters);
        nodes.push(
            Node::new(start_passage.urn.clone(), text, si + 1, complete).with_neighbors(&ids, si),
        );
    }

    // Middles: full (filtered) passages strictly between the endpoints.
    if let Some(ei) = e_idx {
        for i in si + 1..ei {
            let (text, complete) = apply_text_filters(&passages[i].text, filters);
            nodes.push(Node::new(passages[i].urn.clone(), text, i + 1, complete).with_neighbors(&ids, i));
        }
    }

    // End: head-sliced when anchored; a plain end equal to the start was
    // already emitted above.
    if let Some(ei) = e_idx
        && ei >= si
    {
        let end_passage = passages[ei];
        if right.anchored {
            let (_, r_end) =
                find_nth_literal(&end_passage.text, &right.needle, right.occurrence).ok_or_else(
                    || ResolveError::EndAnchorNotFound {
                        needle: right.needle.clone(),
                        occurrence: right.occurrence,
                        urn: end_passage.urn.clone(),
                    },
                )?;
            let (text, complete) = slice_until(&end_passage.text, r_end);
            nodes.push(
                Node::new(end_passage.urn.clone(), text, ei + 1, complete)
                    .with_neighbors(&ids, ei),
            );
        } else if ei != si {
            let (text, complete) = apply_text_filters(&end_passage.text, filters);
            nodes.push(
                Node::new(end_passage.urn.clone(), text, ei + 1, complete)
                    .with_neighbors(&ids, ei),
            );
        }
    }

    Ok(nodes)
}

/// Enumerate the URNs a request names, without materializing text.
///
/// Exact requests return the single URN; ranges return the contiguous
/// bundle-order slice between the first passage matching the start
/// reference and the last passage matching the end reference; anything
/// else expands as a prefix.
pub fn enumerate_urns(request: &str, corpus: &Corpus) -> Result<Vec<String>, ResolveError> {
    if !urn::is_cts_urn(request) && !urn::is_range(request) {
        return Err(ResolveError::NotCts(request.to_string()));
    }

    if urn::is_range(request) {
        let parts: Vec<&str> = request.split(':').collect();
        let refs: Vec<&str> = parts[4].split('-').collect();
        let stem = format!("{}:", parts[..4].join(":"));
        let start_prefix = format!("{stem}{}", refs[0]);
        let end_prefix = format!("{stem}{}", refs[1]);

        let mut start_idx = None;
        let mut end_idx = None;
        for (i, p) in corpus.passages.iter().enumerate() {
            if start_idx.is_none() && p.urn.starts_with(&start_prefix) {
                start_idx = Some(i);
            }
            if p.urn.starts_with(&end_prefix) {
                end_idx = Some(i);
            }
        }
        return match (start_idx, end_idx) {
            (Some(s), Some(e)) if s <= e => Ok(corpus.passages[s..=e]
                .iter()
                .map(|p| p.urn.clone())
                .collect()),
            _ => Err(ResolveError::UrnNotFound),
        };
    }

    if corpus.index_of(request).is_some() {
        return Ok(vec![request.to_string()]);
    }
    let matches: Vec<String> = corpus
        .passages
        .iter()
        .filter(|p| p.urn.starts_with(request))
        .map(|p| p.urn.clone())
        .collect();
    if matches.is_empty() {
        return Err(ResolveError::UrnNotFound);
    }
    Ok(matches)
}
