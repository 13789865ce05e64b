//! Core and collection administration
//!
//! Standalone Solr manages cores through `/admin/cores`; SolrCloud manages
//! collections through `/admin/collections`. Both sit under the Solr root
//! ([`SolrConfig::solr_url`](crate::SolrConfig::solr_url)), not under the
//! core URL. Every action is a GET whose JSON answer is checked the same way
//! as an update response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{HttpRequest, HttpResponse, Method, SolrClient, Transport};
use crate::params::Options;
use crate::query_string::QueryString;
use crate::raw::{check_envelope, RawError, RawHeader};
use crate::{Result, SolrError};

/// Settings for a new standalone core. Unset paths are left to Solr's
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreSettings {
    pub name: String,
    pub instance_dir: Option<String>,
    /// solrconfig.xml, relative to the instance dir
    pub config: Option<String>,
    pub schema: Option<String>,
    pub data_dir: Option<String>,
}

impl CoreSettings {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    fn add_to(&self, qs: &mut QueryString) {
        qs.add("name", &self.name);
        let optional = [
            ("instanceDir", &self.instance_dir),
            ("config", &self.config),
            ("schema", &self.schema),
            ("dataDir", &self.data_dir),
        ];
        for (key, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                qs.add(key, value);
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AdminResponse {
    #[serde(rename = "responseHeader")]
    header: RawHeader,
    error: Option<RawError>,
    /// core name -> status block (cores API, STATUS action)
    status: Option<Value>,
    /// collection names (collections API, LIST action)
    collections: Vec<String>,
}

impl AdminResponse {
    fn check(&self) -> Result<()> {
        check_envelope(&self.header, self.error.as_ref())
    }

    fn core_names(&self) -> Vec<String> {
        let Some(Value::Object(cores)) = &self.status else {
            return Vec::new();
        };
        cores
            .iter()
            .map(|(key, core)| {
                core.get("name")
                    .and_then(Value::as_str)
                    .unwrap_or(key.as_str())
                    .to_string()
            })
            .collect()
    }
}

impl<T: Transport> SolrClient<T> {
    /// Names of the cores on a standalone Solr server
    pub fn list_cores(&self) -> Result<Vec<String>> {
        let response = self.admin("cores", "STATUS", |_| {})?;
        Ok(response.core_names())
    }

    /// Create a standalone core
    pub fn create_core(&self, settings: &CoreSettings) -> Result<()> {
        if settings.name.is_empty() {
            return Err(SolrError::validation("Core name cannot be empty"));
        }
        self.admin("cores", "CREATE", |qs| settings.add_to(qs))?;
        tracing::info!("Created core {}", settings.name);
        Ok(())
    }

    /// Unload a standalone core, optionally removing its instance directory
    pub fn unload_core(&self, name: &str, delete_instance_dir: bool) -> Result<()> {
        self.admin("cores", "UNLOAD", |qs| {
            qs.add("core", name);
            if delete_instance_dir {
                qs.add("deleteInstanceDir", "true");
            }
        })?;
        tracing::info!("Unloaded core {}", name);
        Ok(())
    }

    /// Names of the collections in a SolrCloud cluster
    pub fn list_collections(&self) -> Result<Vec<String>> {
        let response = self.admin("collections", "LIST", |_| {})?;
        Ok(response.collections)
    }

    /// Create a SolrCloud collection; `params` carries e.g. `numShards`
    pub fn create_collection(&self, name: &str, params: &Options) -> Result<()> {
        if name.is_empty() {
            return Err(SolrError::validation("Collection name cannot be empty"));
        }
        self.admin("collections", "CREATE", |qs| {
            qs.add("name", name);
            for (key, value) in params {
                qs.add(key, value);
            }
        })?;
        tracing::info!("Created collection {}", name);
        Ok(())
    }

    /// Delete a SolrCloud collection
    pub fn delete_collection(&self, name: &str) -> Result<()> {
        self.admin("collections", "DELETE", |qs| {
            qs.add("name", name);
        })?;
        tracing::info!("Deleted collection {}", name);
        Ok(())
    }

    fn admin<F>(&self, api: &str, action: &str, params: F) -> Result<AdminResponse>
    where
        F: FnOnce(&mut QueryString),
    {
        let mut qs = QueryString::new();
        qs.add("action", action);
        params(&mut qs);
        qs.add("wt", "json");

        let url = format!("{}/admin/{}?{}", self.config().solr_url(), api, qs.as_str());
        self.log_request(Method::Get, &url);
        let response = self.transport().execute(HttpRequest::get(url))?;
        decode_admin(&response)
    }
}

/// Solr answers a failed admin action with a 4xx/5xx and a JSON error
/// block; the block is the more useful message when it is there.
fn decode_admin(response: &HttpResponse) -> Result<AdminResponse> {
    let decoded = serde_json::from_slice::<AdminResponse>(&response.body);

    if !response.is_success() {
        if let Ok(admin) = &decoded {
            admin.check()?;
        }
        return Err(SolrError::http_status(response.status_line(), &response.body));
    }

    let admin = decoded
        .map_err(|e| SolrError::decode(e.to_string(), response.content_type.clone()))?;
    admin.check()?;
    Ok(admin)
}
