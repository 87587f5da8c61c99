//! Cloud API client
//!
//! Combines the HTTP layer with the configured service endpoints and builds
//! URLs per service family. A client is either admin-wide or scoped to one
//! tenant; scoped clients drive the per-tenant sweep.

use super::http::HttpClient;
use crate::config::Endpoints;
use anyhow::Result;
use serde_json::Value;

/// Main cloud API client
#[derive(Clone)]
pub struct ApiClient {
    pub http: HttpClient,
    endpoints: Endpoints,
    token: String,
    /// Tenant this client acts for; `None` for identity bootstrap calls.
    project_scope: Option<String>,
}

impl ApiClient {
    /// Create a new unscoped client
    pub fn new(endpoints: Endpoints, token: String) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new()?,
            endpoints,
            token,
            project_scope: None,
        })
    }

    /// Derive a client scoped to a tenant
    pub fn scoped_to(&self, project_id: &str) -> Self {
        Self {
            http: self.http.clone(),
            endpoints: self.endpoints.clone(),
            token: self.token.clone(),
            project_scope: Some(project_id.to_string()),
        }
    }

    /// The tenant this client acts for, if any
    pub fn scope(&self) -> Option<&str> {
        self.project_scope.as_deref()
    }

    /// Make a GET request
    pub async fn get(&self, url: &str) -> Result<Value> {
        self.http.get(url, &self.token).await
    }

    /// Make a GET request, mapping 404 to `None`
    pub async fn get_opt(&self, url: &str) -> Result<Option<Value>> {
        self.http.get_opt(url, &self.token).await
    }

    /// Make a PUT request
    pub async fn put(&self, url: &str, body: Option<&Value>) -> Result<Value> {
        self.http.put(url, &self.token, body).await
    }

    /// Make a PATCH request
    pub async fn patch(&self, url: &str, body: &Value) -> Result<Value> {
        self.http.patch(url, &self.token, body).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str) -> Result<Value> {
        self.http.delete(url, &self.token).await
    }

    /// Make a HEAD request (existence/assignment checks)
    pub async fn head(&self, url: &str) -> Result<bool> {
        self.http.head(url, &self.token).await
    }

    // =========================================================================
    // Per-service URL builders
    // =========================================================================

    /// Build a compute API URL
    pub fn compute_url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoints.compute, path)
    }

    /// Build a network API URL
    pub fn network_url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoints.network, path)
    }

    /// Build a block-storage API URL (project-prefixed paths)
    pub fn volume_url(&self, project_id: &str, path: &str) -> String {
        format!("{}/{}/{}", self.endpoints.volume, project_id, path)
    }

    /// Build an image API URL
    pub fn image_url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoints.image, path)
    }

    /// Build an identity API URL
    pub fn identity_url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoints.identity, path)
    }

    /// Append a `tenant_id` query parameter when this client is scoped.
    /// List endpoints accept it as a server-side ownership filter.
    pub fn with_tenant_filter(&self, url: &str) -> String {
        match self.scope() {
            Some(tenant) => {
                let sep = if url.contains('?') { '&' } else { '?' };
                format!("{}{}tenant_id={}", url, sep, urlencoding::encode(tenant))
            }
            None => url.to_string(),
        }
    }
}
