//! solrnav Core Library
//!
//! Translation layer between an application's search intent and a Solr
//! core. Search parameters are serialized into Solr's query-string dialect,
//! responses are decoded into documents and facets, and every response
//! carries URLs to page through results and toggle facet filters.
//!
//! HTTP is left to a [`Transport`]; `solrnav-infra` provides one backed by
//! reqwest.

pub mod admin;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod facets;
pub mod filter_query;
pub mod navigation;
pub mod params;
pub mod query_string;
pub mod raw;
pub mod response;

// Re-export commonly used types
pub use admin::CoreSettings;
pub use client::{HttpRequest, HttpResponse, Method, SolrClient, Transport};
pub use config::{LoggingConfig, QueryDefaults, SolrConfig, DEFAULT_QUERY, DEFAULT_ROWS};
pub use document::{Document, DocumentData, FieldValue, CHILD_DOCUMENTS_FIELD, ID_FIELD};
pub use error::{ErrorCategory, Result, SolrError};
pub use facets::{FacetField, FacetValue, Facets};
pub use filter_query::{FilterQueries, FilterQuery};
pub use navigation::{facet_links, filter_token, FacetLinks};
pub use params::{parse_query_values, GetParams, Options, QueryValues, SearchParams};
pub use query_string::{query_escape, QueryString};
pub use response::SearchResponse;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version info as a formatted string
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
