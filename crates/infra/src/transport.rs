//! HTTP transport backed by reqwest's blocking client

use reqwest::header::CONTENT_TYPE;
use solrnav_core::{HttpRequest, HttpResponse, Method, Result, SolrClient, SolrConfig, SolrError};
use std::time::Duration;

/// Transport configuration
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Whole-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl TransportConfig {
    pub fn from_solr_config(config: &SolrConfig) -> Self {
        Self {
            timeout: config.timeout_seconds.map(Duration::from_secs),
        }
    }
}

/// [`solrnav_core::Transport`] over `reqwest::blocking::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Create a new transport
    pub fn new(config: TransportConfig) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SolrError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl solrnav_core::Transport for ReqwestTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        if let Some(content_type) = &request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().map_err(|e| {
            SolrError::transport(format!(
                "Failed to send {} request to {}: {}",
                request.method, request.url, e
            ))
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .map_err(|e| SolrError::transport(format!("Failed to read Solr response: {}", e)))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            content_type,
            body: body.to_vec(),
        })
    }
}

/// A client that talks to Solr over HTTP
pub type HttpSolrClient = SolrClient<ReqwestTransport>;

/// Build a client for `config`, applying its timeout to the transport
pub fn connect(config: SolrConfig) -> Result<HttpSolrClient> {
    config.validate()?;
    let transport = ReqwestTransport::new(TransportConfig::from_solr_config(&config))?;
    tracing::debug!("Connecting to Solr core at {}", config.base_url());
    Ok(SolrClient::new(config, transport))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_config_from_solr_config() {
        let mut config = SolrConfig::new("http://localhost:8983/solr/bibdata");
        assert_eq!(TransportConfig::from_solr_config(&config).timeout, None);

        config.timeout_seconds = Some(30);
        assert_eq!(
            TransportConfig::from_solr_config(&config).timeout,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_connect_rejects_invalid_url() {
        let err = connect(SolrConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, SolrError::Validation { .. } | SolrError::Url(_)));
    }

    #[test]
    fn test_connect() {
        let client = connect(SolrConfig::new("http://localhost:8983/solr/bibdata/")).unwrap();
        assert_eq!(client.config().base_url(), "http://localhost:8983/solr/bibdata");
    }
}
