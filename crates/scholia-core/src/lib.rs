//! Core resolution engine for the scholia CTS text service.
//!
//! This crate is the CPU-only half of the service:
//! - CEX bundle parsing (`#!ctsdata` passages, `#!ctscatalog` entries)
//! - The CTS URN grammar: plain, range, and `@needle[n]` anchored requests
//! - Navigation (first/last/previous/next) over the passage sequence
//! - Passage resolution with sub-passage anchor windows and ranges
//!
//! It performs no I/O and holds no state; the serve crate feeds it bundle
//! text fetched over HTTP and maps [`ResolveError`] values onto the API's
//! `Exception` envelopes.

mod anchor;
mod bundle;
mod error;
mod nav;
mod node;
mod resolve;
mod urn;
mod window;

pub use bundle::{CatalogEntry, Corpus, Passage, parse_catalog, parse_data};
pub use error::{Error, ResolveError, Result};
pub use nav::{first_in_work, last_in_work, next_of, previous_of};
pub use node::Node;
pub use resolve::{enumerate_urns, resolve};
pub use urn::{
    RangeToken, is_cts_urn, is_range, parse_anchored, parse_range_token, wants_anchor, work_stem,
};
pub use window::TextFilters;
