//! FHIR registry HTTP client (reqwest-based).

use crate::error::{RegistryClientError, RegistryClientResult};
use healthflow_core::ResourceKind;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const FHIR_JSON: &str = "application/fhir+json";

/// HTTP client for the upstream FHIR registry.
///
/// Holds a shared `reqwest::Client` constructed once at startup; never
/// reconfigured per request.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// Base URL of the registry (e.g. `http://hapi-fhir:8080/fhir`).
    base_url: String,
    http_client: Client,
}

impl RegistryClient {
    /// Create a new registry client with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RegistryClientResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent("healthflow-fhir-proxy/0.1")
            .build()
            .map_err(|e| {
                RegistryClientError::InvalidConfig(format!("Failed to build HTTP client: {e}"))
            })?;
        Ok(Self::with_http_client(base_url, http_client))
    }

    /// Create a client with a pre-built `reqwest::Client` (for testing).
    #[must_use]
    pub fn with_http_client(base_url: impl Into<String>, http_client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http_client,
        }
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Sync path ─────────────────────────────────────────────────────

    /// Fetch the registry's collection for one resource kind and return the
    /// bundle's `entry[].resource` payloads in order.
    ///
    /// A bundle without an `entry` array yields an empty list; entries
    /// without a `resource` object are skipped.
    pub async fn fetch_bundle(&self, kind: ResourceKind) -> RegistryClientResult<Vec<Value>> {
        let url = format!("{}/{}", self.base_url, kind);
        debug!(kind = %kind, url = %url, "Fetching registry collection");

        let response = self.http_client.get(&url).send().await?;
        let bundle: Value = Self::check_status(response, &url).await?.json().await?;

        let resources = match bundle.get("entry") {
            None => Vec::new(),
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(|entry| entry.get("resource").cloned())
                .collect(),
            Some(_) => {
                return Err(RegistryClientError::InvalidResponse(format!(
                    "{kind} bundle `entry` is not an array"
                )))
            }
        };
        debug!(kind = %kind, count = resources.len(), "Fetched registry collection");
        Ok(resources)
    }

    // ── Forward-proxy pass-throughs ───────────────────────────────────

    /// Read a single resource, or the whole collection when `id` is `None`.
    pub async fn get_remote(
        &self,
        kind: ResourceKind,
        id: Option<&str>,
    ) -> RegistryClientResult<Value> {
        let url = match id {
            Some(id) => format!("{}/{}/{}", self.base_url, kind, id),
            None => format!("{}/{}", self.base_url, kind),
        };
        let response = self
            .http_client
            .get(&url)
            .header(reqwest::header::CONTENT_TYPE, FHIR_JSON)
            .send()
            .await?;
        Ok(Self::check_status(response, &url).await?.json().await?)
    }

    /// Create a resource on the registry.
    pub async fn create_remote(
        &self,
        kind: ResourceKind,
        body: &Value,
    ) -> RegistryClientResult<Value> {
        let url = format!("{}/{}", self.base_url, kind);
        let response = self
            .http_client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, FHIR_JSON)
            .json(body)
            .send()
            .await?;
        Ok(Self::check_status(response, &url).await?.json().await?)
    }

    /// Replace a resource on the registry.
    pub async fn update_remote(
        &self,
        kind: ResourceKind,
        id: &str,
        body: &Value,
    ) -> RegistryClientResult<Value> {
        let url = format!("{}/{}/{}", self.base_url, kind, id);
        let response = self
            .http_client
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, FHIR_JSON)
            .json(body)
            .send()
            .await?;
        Ok(Self::check_status(response, &url).await?.json().await?)
    }

    /// Delete a resource on the registry.
    pub async fn delete_remote(&self, kind: ResourceKind, id: &str) -> RegistryClientResult<()> {
        let url = format!("{}/{}/{}", self.base_url, kind, id);
        let response = self.http_client.delete(&url).send().await?;
        Self::check_status(response, &url).await?;
        Ok(())
    }

    /// Map non-success statuses to [`RegistryClientError::Status`].
    async fn check_status(response: Response, url: &str) -> RegistryClientResult<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(RegistryClientError::Status {
                status: response.status(),
                url: url.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client =
            RegistryClient::with_http_client("http://registry:8080/fhir/", Client::new());
        assert_eq!(client.base_url(), "http://registry:8080/fhir");
    }
}
