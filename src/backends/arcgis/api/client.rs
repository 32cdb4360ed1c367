use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::errors::ArcGisApiError;
use super::types::PortalErrorBody;

pub const CLIENT_USER_AGENT: &str = concat!("webmap-browser/", env!("CARGO_PKG_VERSION"));

/// Root of the portal REST API relative to the portal URL.
const REST_ROOT: &str = "/sharing/rest";

fn standard_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Thin JSON client for the portal's `sharing/rest` endpoints.
#[derive(Clone, Debug)]
pub struct ArcGisApi {
    client: reqwest::Client,
    base_url: String,
}

impl ArcGisApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ArcGisApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(CLIENT_USER_AGENT)
            .default_headers(standard_headers())
            .build()
            .map_err(ArcGisApiError::from_reqwest)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ArcGisApiError> {
        let mut url = Url::parse(&format!("{}{}{}", self.base_url, REST_ROOT, path))
            .map_err(|e| ArcGisApiError::Other(format!("Invalid portal URL: {}", e)))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("f", "json");
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// GET a REST resource and decode it, treating the portal's error envelope as a failure.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ArcGisApiError> {
        let url = self.build_url(path, params)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ArcGisApiError::from_reqwest)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(ArcGisApiError::from_reqwest)?;

        if !status.is_success() {
            warn!("Portal request {} failed with status {}", path, status);
            return Err(ArcGisApiError::from_status(status.as_u16(), body));
        }

        let value: Value =
            serde_json::from_str(&body).map_err(|e| ArcGisApiError::ParseError(e.to_string()))?;

        if let Some(error) = value.get("error") {
            let error: PortalErrorBody = serde_json::from_value(error.clone())
                .map_err(|e| ArcGisApiError::ParseError(e.to_string()))?;
            warn!(
                "Portal request {} returned error {}: {}",
                path, error.code, error.message
            );
            return Err(ArcGisApiError::Portal {
                code: error.code,
                message: error.message,
            });
        }

        serde_json::from_value(value).map_err(|e| ArcGisApiError::ParseError(e.to_string()))
    }
}
