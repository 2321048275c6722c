//! Response envelopes.
//!
//! Every response carries a `status` of `Success` or `Exception` and a
//! `service` tag naming the endpoint. Most exceptional conditions still
//! travel over HTTP 200 so clients can parse the envelope; the handlers
//! pick the status code separately. Empty slices and messages are omitted
//! from the JSON for compatibility with existing clients.

use scholia_core::{CatalogEntry, Node};
use serde::Serialize;

/// Version string reported by the version endpoints.
pub const SERVICE_VERSION: &str = "1.1.0";

pub const STATUS_SUCCESS: &str = "Success";
pub const STATUS_EXCEPTION: &str = "Exception";

/// Version slots of the `/cite` envelope. Only the texts service is
/// implemented; the other slots stay empty and drop out of the JSON.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Versions {
    pub texts: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub textcatalog: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub citedata: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub citecatalog: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub citerelations: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub citeextensions: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dse: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub orca: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CiteResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub versions: Versions,
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Envelope for endpoints returning passage nodes.
#[derive(Debug, Clone, Serialize)]
pub struct NodeResponse {
    #[serde(rename = "requestUrn")]
    pub request_urn: Vec<String>,
    pub status: &'static str,
    pub service: &'static str,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urns: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
}

impl NodeResponse {
    pub fn success(service: &'static str, request_urn: &str, nodes: Vec<Node>) -> Self {
        Self {
            request_urn: vec![request_urn.to_string()],
            status: STATUS_SUCCESS,
            service,
            message: String::new(),
            urns: Vec::new(),
            nodes,
        }
    }

    pub fn exception(service: &'static str, request_urn: &str, message: String) -> Self {
        Self {
            request_urn: vec![request_urn.to_string()],
            status: STATUS_EXCEPTION,
            service,
            message,
            urns: Vec::new(),
            nodes: Vec::new(),
        }
    }
}

/// Envelope for endpoints returning bare URN lists.
#[derive(Debug, Clone, Serialize)]
pub struct UrnListResponse {
    #[serde(rename = "requestUrn")]
    pub request_urn: Vec<String>,
    pub status: &'static str,
    pub service: &'static str,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urns: Vec<String>,
}

impl UrnListResponse {
    pub fn success(service: &'static str, request_urn: Vec<String>, urns: Vec<String>) -> Self {
        Self {
            request_urn,
            status: STATUS_SUCCESS,
            service,
            message: String::new(),
            urns,
        }
    }

    pub fn exception(service: &'static str, request_urn: Vec<String>, message: String) -> Self {
        Self {
            request_urn,
            status: STATUS_EXCEPTION,
            service,
            message,
            urns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub entries: Vec<CatalogEntry>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// `/healthz` body; unlike the API envelopes this reports plain
/// reachability.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
