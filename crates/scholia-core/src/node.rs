//! The node model emitted by navigation and resolution.

use serde::Serialize;

/// A passage as the API emits it: URN, text window, neighbors in the
/// scoped sequence, 1-based sequence number, and whether the text is the
/// whole passage. Empty slices are omitted from JSON, so boundary nodes
/// simply lack `previous` or `next`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Node {
    pub urn: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub previous: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub next: Vec<String>,
    pub sequence: usize,
    pub complete: bool,
}

impl Node {
    pub fn new(urn: String, text: String, sequence: usize, complete: bool) -> Self {
        Self {
            urn: vec![urn],
            text: vec![text],
            previous: Vec::new(),
            next: Vec::new(),
            sequence,
            complete,
        }
    }

    /// Attach neighbor URNs from the scoped id sequence around `idx`.
    pub fn with_neighbors(mut self, ids: &[String], idx: usize) -> Self {
        if idx > 0 {
            self.previous = vec![ids[idx - 1].clone()];
        }
        if idx + 1 < ids.len() {
            self.next = vec![ids[idx + 1].clone()];
        }
        self
    }
}
