//! Solr's JSON response envelope, as it comes off the wire
//!
//! These structs only describe the shape; turning them into the public model
//! happens in [`crate::response`]. Every block is optional because Solr omits
//! whatever the request did not ask for.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::document::DocumentData;
use crate::{Result, SolrError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawHeader {
    pub status: i64,
    #[serde(rename = "QTime")]
    pub qtime: i64,
    /// Echoed request parameters; values are strings or arrays (e.g. `fq`)
    pub params: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawData {
    #[serde(rename = "numFound")]
    pub num_found: u64,
    pub start: u64,
    #[serde(rename = "maxScore")]
    pub max_score: Option<f64>,
    pub docs: Vec<DocumentData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawError {
    pub msg: Option<String>,
    pub trace: Option<String>,
    pub code: i64,
}

impl RawError {
    /// Solr only fills in the error block when something went wrong
    pub fn is_present(&self) -> bool {
        self.trace.as_deref().is_some_and(|t| !t.is_empty())
            || self.msg.as_deref().is_some_and(|m| !m.is_empty())
    }

    /// Human-readable description, preferring the short message over the trace
    pub fn describe(&self) -> String {
        match (&self.msg, &self.trace) {
            (Some(msg), _) if !msg.is_empty() => msg.clone(),
            (_, Some(trace)) => trace.lines().next().unwrap_or_default().to_string(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFacetCounts {
    pub facet_queries: Option<Value>,
    /// field name -> `[value1, count1, value2, count2, ...]`
    pub facet_fields: IndexMap<String, Vec<Value>>,
}

/// field name -> highlighted fragments
pub type RawHighlightRow = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawResponse {
    #[serde(rename = "responseHeader")]
    pub header: RawHeader,
    #[serde(rename = "response")]
    pub data: RawData,
    pub error: Option<RawError>,
    pub facet_counts: RawFacetCounts,
    /// document id -> highlights for that document
    pub highlighting: HashMap<String, RawHighlightRow>,
    /// The undecoded body
    #[serde(skip)]
    pub raw: String,
}

impl RawResponse {
    /// Decode a response body. `content_type` only feeds the error message.
    pub fn decode(body: &[u8], content_type: Option<&str>) -> Result<Self> {
        let mut response: RawResponse = serde_json::from_slice(body)
            .map_err(|e| SolrError::decode(e.to_string(), content_type.map(str::to_string)))?;
        response.raw = String::from_utf8_lossy(body).into_owned();
        Ok(response)
    }

    /// The error block, if Solr reported one
    pub fn reported_error(&self) -> Option<&RawError> {
        self.error.as_ref().filter(|e| e.is_present())
    }

    /// Turn a reported error or a non-zero header status into an error
    pub fn check(&self) -> Result<()> {
        check_envelope(&self.header, self.error.as_ref())
    }
}

/// Shared by every JSON endpoint: an error block wins over the header status
pub(crate) fn check_envelope(header: &RawHeader, error: Option<&RawError>) -> Result<()> {
    if let Some(error) = error.filter(|e| e.is_present()) {
        return Err(SolrError::solr_reported(error.code, error.describe()));
    }
    if header.status != 0 {
        return Err(SolrError::solr_reported(
            header.status,
            format!("Solr returned status {}", header.status),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_BODY: &str = r#"{
        "responseHeader": {"status": 0, "QTime": 3, "params": {"q": "george", "fq": ["a", "b"]}},
        "response": {"numFound": 2, "start": 0, "maxScore": 1.25, "docs": [
            {"id": "1", "title": "George One"},
            {"id": "2", "title": ["George", "Two"]}
        ]},
        "facet_counts": {
            "facet_queries": {},
            "facet_fields": {"subject": ["history", 2, "art", 1]}
        },
        "highlighting": {"1": {"title": ["<em>George</em> One"]}}
    }"#;

    #[test]
    fn test_decode_full_envelope() {
        let raw = RawResponse::decode(SEARCH_BODY.as_bytes(), None).unwrap();
        assert_eq!(raw.header.qtime, 3);
        assert_eq!(raw.data.num_found, 2);
        assert_eq!(raw.data.max_score, Some(1.25));
        assert_eq!(raw.data.docs.len(), 2);
        assert_eq!(raw.facet_counts.facet_fields["subject"].len(), 4);
        assert_eq!(raw.highlighting["1"]["title"], vec!["<em>George</em> One"]);
        assert!(raw.raw.contains("George One"));
        assert!(raw.check().is_ok());
    }

    #[test]
    fn test_decode_minimal_body() {
        let raw = RawResponse::decode(br#"{"responseHeader": {"status": 0, "QTime": 1}}"#, None)
            .unwrap();
        assert_eq!(raw.data.num_found, 0);
        assert!(raw.data.docs.is_empty());
        assert!(raw.facet_counts.facet_fields.is_empty());
        assert!(raw.reported_error().is_none());
    }

    #[test]
    fn test_decode_non_json_mentions_content_type() {
        let err = RawResponse::decode(b"<response/>", Some("application/xml")).unwrap_err();
        assert!(matches!(err, SolrError::Decode { .. }));
        assert!(err.to_string().contains("application/xml"));
    }

    #[test]
    fn test_reported_error() {
        let body = r#"{
            "responseHeader": {"status": 400, "QTime": 0},
            "error": {"msg": "undefined field foo", "trace": "org.apache.solr...\n\tat ...", "code": 400}
        }"#;
        let raw = RawResponse::decode(body.as_bytes(), None).unwrap();
        match raw.check().unwrap_err() {
            SolrError::SolrReported { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "undefined field foo");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_trace_only_error() {
        let error = RawError {
            msg: None,
            trace: Some("java.lang.NullPointerException\n\tat x".to_string()),
            code: 500,
        };
        assert!(error.is_present());
        assert_eq!(error.describe(), "java.lang.NullPointerException");
    }

    #[test]
    fn test_non_zero_status_without_error_block() {
        let raw = RawResponse::decode(br#"{"responseHeader": {"status": 1, "QTime": 0}}"#, None)
            .unwrap();
        assert!(matches!(
            raw.check(),
            Err(SolrError::SolrReported { code: 1, .. })
        ));
    }
}
