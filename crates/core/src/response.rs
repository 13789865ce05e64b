//! Search responses
//!
//! [`SearchResponse`] is assembled from the parameters of a search and the raw
//! Solr response. Besides the documents and facets it carries URLs that can be
//! fed back into [`SearchParams::from_query_string`] to re-run the search
//! without the query text, or to fetch the previous/next page.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::facets::{FacetField, Facets};
use crate::navigation::{facet_links, filter_token, FacetLinks};
use crate::params::SearchParams;
use crate::query_string::QueryString;
use crate::raw::RawResponse;

/// The results of a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Parameters the search was issued with
    pub params: SearchParams,
    pub q: String,
    pub num_found: u64,
    /// Start as echoed by Solr
    pub start: u64,
    pub rows: usize,
    /// Time Solr spent on the query, in milliseconds
    pub qtime: i64,
    pub max_score: Option<f64>,
    /// Documents, including highlight information
    pub documents: Vec<Document>,
    /// Facets in the order they were requested
    pub facets: Facets,
    /// URL to execute this search
    pub url: String,
    /// URL to execute this search without the query text
    pub url_no_q: String,
    pub next_page_url: String,
    /// May point before the first page; see [`SearchResponse::has_prev_page`]
    pub prev_page_url: String,
    /// The undecoded response body
    #[serde(skip)]
    pub raw: String,
}

impl SearchResponse {
    pub fn new(params: SearchParams, raw: RawResponse) -> Self {
        let RawResponse {
            header,
            data,
            facet_counts,
            mut highlighting,
            raw,
            ..
        } = raw;

        let documents = data
            .docs
            .into_iter()
            .map(|fields| {
                let mut doc = Document::from(fields);
                if let Some(hl) = highlighting.remove(&doc.id()) {
                    doc.attach_highlights(hl);
                }
                doc
            })
            .collect();

        // Keep only the facets that were requested, in request order
        let facets = params
            .facets
            .iter()
            .filter_map(|def| {
                let tokens = facet_counts.facet_fields.get(&def.field)?;
                let mut facet = FacetField {
                    values: Vec::new(),
                    ..def.clone()
                };
                facet.decode_counts(tokens, &params.filter_queries);
                Some(facet)
            })
            .collect();

        let mut response = Self {
            q: params.q.clone(),
            num_found: data.num_found,
            start: data.start,
            rows: params.rows,
            qtime: header.qtime,
            max_score: data.max_score,
            documents,
            facets,
            url: String::new(),
            url_no_q: String::new(),
            next_page_url: String::new(),
            prev_page_url: String::new(),
            raw,
            params,
        };

        let start = response.start as i64;
        let rows = response.rows as i64;
        response.url = response.navigation_url(&response.q, start);
        response.url_no_q = response.navigation_url("", start);
        response.next_page_url = response.navigation_url(&response.q, start + rows);
        response.prev_page_url = response.navigation_url(&response.q, start - rows);
        response
    }

    /// Query string for this search with a different query text and start.
    /// The sort clause is carried over. Active facet values become
    /// `fq=field|value&`; `start` is only written when positive and `rows`
    /// only when it differs from the default.
    fn navigation_url(&self, q: &str, start: i64) -> String {
        let mut qs = QueryString::new();

        if !q.is_empty() {
            qs.add("q", q);
        }

        if let Some(sort) = &self.params.sort {
            qs.add("sort", sort);
        }

        for facet in &self.facets {
            for value in facet.active_values() {
                qs.extend(&filter_token(&facet.field, &value.text));
            }
        }

        if start > 0 {
            qs.add_int("start", start);
        }

        if self.rows != self.params.defaults.rows {
            qs.add_int("rows", self.rows as i64);
        }
        qs.into_string()
    }

    /// True when another page follows this one
    pub fn has_next_page(&self) -> bool {
        self.start + (self.rows as u64) < self.num_found
    }

    /// True when this is not the first page. Callers should check this rather
    /// than trusting `prev_page_url`, which is built with an unclamped start.
    pub fn has_prev_page(&self) -> bool {
        self.start > 0
    }

    /// Add/remove links for a facet value relative to [`SearchResponse::url`]
    pub fn facet_links(&self, field: &str, value: &str) -> FacetLinks {
        facet_links(field, value, &self.url)
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
