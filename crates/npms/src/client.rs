//! Client construction and request plumbing for the npms.io v2 API.

use reqwest::header;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Error;

/// Default base URL for the npms.io v2 API.
pub const DEFAULT_BASE_URL: &str = "https://api.npms.io/v2";

/// Client for the npms.io v2 API.
///
/// Cloning is cheap; the underlying connection pool is shared. Endpoint
/// calls live next to their request/response types in
/// [`search`](crate::search) and [`package`](crate::package).
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::Client,
}

impl Client {
    /// Create a client against the public npms.io API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (e.g. a local mock server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// The base URL requests are issued against, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// GET `path` and decode the JSON response body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.endpoint(path);
        debug!(%url, "GET");

        let resp = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, crate::USER_AGENT)
            .send()
            .await?
            .error_for_status()?;

        Ok(resp.json().await?)
    }

    /// GET `path` with `params` encoded into the query string, decoding the
    /// JSON response body.
    pub(crate) async fn get_json_query<P, T>(&self, path: &str, params: &P) -> Result<T, Error>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(%url, "GET");

        let resp = self
            .http
            .get(&url)
            .query(params)
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, crate::USER_AGENT)
            .send()
            .await?
            .error_for_status()?;

        Ok(resp.json().await?)
    }

    /// POST a JSON `body` to `path` and decode the JSON response body.
    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(%url, "POST");

        let resp = self
            .http
            .post(&url)
            .json(body)
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, crate::USER_AGENT)
            .send()
            .await?
            .error_for_status()?;

        Ok(resp.json().await?)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
