//! scholia-serve - HTTP CTS text service over CEX bundles.
//!
//! This crate provides the read-only HTTP API: catalog metadata, URN
//! enumeration, passage navigation, and anchored passage extraction,
//! resolved against a remote CEX bundle fetched per request and cached in
//! memory for a short TTL.
//!
//! # Architecture
//!
//! - **Config**: JSON configuration file plus source-selection rules
//! - **AppState**: shared reqwest client and moka bundle cache
//! - **Fetch**: read-through bundle fetch and the live health probe
//! - **Routes**: endpoint handlers over the `scholia-core` engine
//! - **Envelope**: the JSON response shapes

pub mod config;
pub mod envelope;
pub mod fetch;
mod routes;
mod state;

pub use self::config::Config;
pub use self::routes::router;
pub use self::state::AppState;
