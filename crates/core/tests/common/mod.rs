//! Common test helpers for client integration tests

#![allow(dead_code)]

use solrnav_core::{
    HttpRequest, HttpResponse, Result, SolrClient, SolrConfig, SolrError, Transport,
};
use std::collections::VecDeque;
use std::sync::Mutex;

pub const CORE_URL: &str = "http://localhost:8983/solr/bibdata";

/// In-memory transport that replays queued responses and records every request
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and JSON body
    pub fn respond(self, status: u16, body: &str) -> Self {
        self.respond_with(status, Some("application/json; charset=UTF-8"), body)
    }

    pub fn respond_with(self, status: u16, content_type: Option<&str>, body: &str) -> Self {
        let reason = match status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            500 => "Server Error",
            _ => "",
        };
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            reason: reason.to_string(),
            content_type: content_type.map(str::to_string),
            body: body.as_bytes().to_vec(),
        }));
        self
    }

    /// Queue a connection failure
    pub fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(SolrError::transport(message)));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SolrError::transport("no response queued")))
    }
}

/// A client over `transport` pointed at [`CORE_URL`]
pub fn client(transport: RecordingTransport) -> SolrClient<RecordingTransport> {
    SolrClient::new(SolrConfig::new(CORE_URL), transport)
}

/// A typical faceted, highlighted search response
pub const SEARCH_BODY: &str = r#"{
    "responseHeader": {"status": 0, "QTime": 12, "params": {"q": "george", "fq": "subject:\"history\""}},
    "response": {"numFound": 3, "start": 0, "maxScore": 2.5, "docs": [
        {"id": "00009565", "title": "George Washington", "authorsAll": ["Smith, Jane", "Doe, John"], "score": 2.5},
        {"id": "00009566", "title": "George Eliot", "year": 1871, "score": 1.75},
        {"id": "00009567", "title": "Curious George", "score": 1.0}
    ]},
    "facet_counts": {
        "facet_queries": {},
        "facet_fields": {
            "format": ["Book", 2, "Map", 1],
            "subject": ["history", 3, "biography", 1]
        }
    },
    "highlighting": {
        "00009565": {"title": ["<em>George</em> Washington"]},
        "00009567": {"title": ["Curious <em>George</em>"]}
    }
}"#;
