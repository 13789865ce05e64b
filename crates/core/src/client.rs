//! Solr client
//!
//! [`SolrClient`] turns parameters into requests, hands them to a
//! [`Transport`], and decodes what comes back. Every call is a single
//! blocking request; failures are returned as they happen, never retried.

use serde::Serialize;
use std::fmt;

use crate::config::SolrConfig;
use crate::document::{Document, DocumentData};
use crate::params::{GetParams, Options, QueryValues, SearchParams};
use crate::raw::RawResponse;
use crate::response::SearchResponse;
use crate::{Result, SolrError};

/// Query string used for every update request
const UPDATE_PARAMS: &str = "wt=json&commit=true";

/// Default search handler
const SELECT_HANDLER: &str = "select";

/// Block-join faceting handler
const BJQ_FACET_HANDLER: &str = "bjqfacet";

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// An outbound HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub content_type: Option<String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get<S: Into<String>>(url: S) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            content_type: None,
            body: None,
        }
    }

    pub fn post<S: Into<String>>(url: S, content_type: &str, body: String) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            content_type: Some(content_type.to_string()),
            body: Some(body),
        }
    }
}

/// A fully read HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase, e.g. `Not Found`
    pub reason: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `404 Not Found`
    pub fn status_line(&self) -> String {
        if self.reason.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.reason)
        }
    }
}

/// Moves a request to Solr and brings the response back.
///
/// Implementations report connection and IO failures as
/// [`SolrError::Transport`]; status handling is left to the client.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request)
    }
}

/// The main type to drive interaction with a Solr core
#[derive(Debug, Clone)]
pub struct SolrClient<T> {
    config: SolrConfig,
    transport: T,
}

impl<T: Transport> SolrClient<T> {
    pub fn new(config: SolrConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &SolrConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Search parameters for a query text, using this client's defaults
    pub fn search_params<S, I, K, V>(&self, q: S, options: Options, facets: I) -> SearchParams
    where
        S: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        SearchParams::with_defaults(q, options, facets, self.config.defaults.clone())
    }

    /// Search parameters from an inbound query string, using this client's defaults
    pub fn search_params_from_query_string<I, K, V>(
        &self,
        query: &str,
        options: Options,
        facets: I,
    ) -> SearchParams
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        SearchParams::from_query_string(query, options, facets, self.config.defaults.clone())
    }

    /// Search parameters from already decoded query values
    pub fn search_params_from_query_values<I, K, V>(
        &self,
        qs: &QueryValues,
        options: Options,
        facets: I,
    ) -> SearchParams
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        SearchParams::from_query_values(qs, options, facets, self.config.defaults.clone())
    }

    /// Fetch a single document. `Ok(None)` when nothing matched.
    pub fn get(&self, params: &GetParams) -> Result<Option<Document>> {
        let url = self.select_url(&params.to_solr_query_string());
        let raw = self.http_get(&url)?;

        let count = raw.data.docs.len();
        if count > 1 {
            return Err(SolrError::multiple_documents(&params.q, count));
        }
        Ok(raw.data.docs.into_iter().next().map(Document::from))
    }

    /// Issue a search with the values in `params`
    pub fn search(&self, params: SearchParams) -> Result<SearchResponse> {
        let url = self.select_url(&params.to_solr_query_string());
        let raw = self.http_get(&url)?;
        let response = SearchResponse::new(params, raw);
        tracing::debug!(
            num_found = response.num_found,
            returned = response.documents.len(),
            qtime = response.qtime,
            "Search completed"
        );
        Ok(response)
    }

    /// Search for plain text with no facets or options
    pub fn search_text(&self, text: &str) -> Result<SearchResponse> {
        let params = self.search_params(text, Options::new(), Vec::<(String, String)>::new());
        self.search(params)
    }

    /// Number of documents in the core
    pub fn count(&self) -> Result<u64> {
        let mut params = self.search_params(
            self.config.defaults.query.clone(),
            Options::new(),
            Vec::<(String, String)>::new(),
        );
        params.rows = 0;
        Ok(self.search(params)?.num_found)
    }

    /// Add or replace documents from plain field maps
    pub fn post<D: Serialize>(&self, data: &[D]) -> Result<()> {
        let body = serde_json::to_string(data)?;
        let request = HttpRequest::post(self.update_url(), "application/json", body);
        self.http_post(request)
    }

    /// Add or replace a single document from a plain field map
    pub fn post_one(&self, datum: &DocumentData) -> Result<()> {
        self.post(std::slice::from_ref(datum))
    }

    /// Add or replace a single document
    pub fn post_doc(&self, doc: &Document) -> Result<()> {
        self.post_one(&doc.data)
    }

    /// Add or replace documents. Only the field data is sent, never highlights.
    pub fn post_docs(&self, docs: &[Document]) -> Result<()> {
        let data: Vec<&DocumentData> = docs.iter().map(|d| &d.data).collect();
        self.post(&data)
    }

    /// Delete the documents with the given ids
    pub fn delete<S: AsRef<str>>(&self, ids: &[S]) -> Result<()> {
        // the request body is XML, the response (wt) is JSON
        let mut payload = String::from("<delete>\r\n");
        for id in ids {
            payload.push_str("\t<id>");
            payload.push_str(&xml_escape(id.as_ref()));
            payload.push_str("</id>\r\n");
        }
        payload.push_str("</delete>");

        let request = HttpRequest::post(self.update_url(), "text/xml", payload);
        self.http_post(request)
    }

    fn select_url(&self, query_string: &str) -> String {
        let handler = if self.config.block_join_faceting {
            BJQ_FACET_HANDLER
        } else {
            SELECT_HANDLER
        };
        format!("{}/{}?{}", self.config.base_url(), handler, query_string)
    }

    fn update_url(&self) -> String {
        format!("{}/update?{}", self.config.base_url(), UPDATE_PARAMS)
    }

    pub(crate) fn log_request(&self, method: Method, url: &str) {
        if self.config.verbose {
            tracing::info!("Solr HTTP {}: {}", method, url);
        } else {
            tracing::debug!("Solr HTTP {}: {}", method, url);
        }
    }

    fn http_get(&self, url: &str) -> Result<RawResponse> {
        self.log_request(Method::Get, url);
        let response = self.transport.execute(HttpRequest::get(url))?;
        let raw = decode_checked(&response)?;
        // a 200 that carries an error block is still a failure
        if let Some(error) = raw.reported_error() {
            return Err(SolrError::solr_reported(error.code, error.describe()));
        }
        Ok(raw)
    }

    fn http_post(&self, request: HttpRequest) -> Result<()> {
        self.log_request(request.method, &request.url);
        let response = self.transport.execute(request)?;
        decode_checked(&response)?.check()
    }
}

/// Reject non-2xx responses, then decode the JSON envelope
fn decode_checked(response: &HttpResponse) -> Result<RawResponse> {
    if !response.is_success() {
        let err = SolrError::http_status(response.status_line(), &response.body);
        tracing::warn!("Solr request failed: {}", err);
        return Err(err);
    }
    RawResponse::decode(&response.body, response.content_type.as_deref())
}

fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
