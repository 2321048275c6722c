//! Navigation over the ordered passage sequence.
//!
//! First/last are scoped to a work stem and carry sequence numbers and
//! neighbors from that scope. Previous/next walk the full bundle order;
//! `None` means the request sits at a boundary (or names no passage), which
//! the API surfaces as a successful response with no nodes.

use crate::bundle::Corpus;
use crate::node::Node;

/// Passages of one work, in bundle order, with their scoped URN list.
fn scoped<'a>(corpus: &'a Corpus, stem: &str) -> (Vec<&'a crate::bundle::Passage>, Vec<String>) {
    let passages: Vec<_> = corpus
        .passages
        .iter()
        .filter(|p| p.urn.starts_with(stem))
        .collect();
    let ids = passages.iter().map(|p| p.urn.clone()).collect();
    (passages, ids)
}

/// The first passage of the work named by `stem`, or `None` when the work
/// has no passages.
pub fn first_in_work(corpus: &Corpus, stem: &str) -> Option<Node> {
    let (passages, ids) = scoped(corpus, stem);
    let first = passages.first()?;
    Some(Node::new(first.urn.clone(), first.text.clone(), 1, true).with_neighbors(&ids, 0))
}

/// The last passage of the work named by `stem`, or `None` when the work
/// has no passages.
pub fn last_in_work(corpus: &Corpus, stem: &str) -> Option<Node> {
    let (passages, ids) = scoped(corpus, stem);
    let last = passages.last()?;
    let idx = passages.len() - 1;
    Some(Node::new(last.urn.clone(), last.text.clone(), idx + 1, true).with_neighbors(&ids, idx))
}

/// The passage immediately before `urn` in bundle order.
pub fn previous_of(corpus: &Corpus, urn: &str) -> Option<Node> {
    let idx = corpus.index_of(urn)?;
    if idx == 0 {
        return None;
    }
    Some(node_at(corpus, idx - 1))
}

/// The passage immediately after `urn` in bundle order.
pub fn next_of(corpus: &Corpus, urn: &str) -> Option<Node> {
    let idx = corpus.index_of(urn)?;
    if idx + 1 >= corpus.len() {
        return None;
    }
    Some(node_at(corpus, idx + 1))
}

fn node_at(corpus: &Corpus, idx: usize) -> Node {
    let ids: Vec<String> = corpus.passages.iter().map(|p| p.urn.clone()).collect();
    let p = &corpus.passages[idx];
    Node::new(p.urn.clone(), p.text.clone(), idx + 1, true).with_neighbors(&ids, idx)
}
