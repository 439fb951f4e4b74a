use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;

use crate::core::error::RelayError;

/// How a provider expects its credential attached to a request.
#[derive(Debug, Clone, Copy)]
pub enum AuthStyle {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// A dedicated header, e.g. `x-api-key`.
    Header(&'static str),
    /// A query-string parameter, e.g. `?key=<key>`.
    QueryParam(&'static str),
}

/// The upstream calls have no user-facing abort, so cap them here instead of
/// letting a stalled provider hold the connection open indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct BaseApiClient {
    endpoint: String,
    auth: AuthStyle,
    extra_headers: Vec<(&'static str, &'static str)>,
}

impl BaseApiClient {
    pub fn new(
        endpoint: String,
        auth: AuthStyle,
        extra_headers: Vec<(&'static str, &'static str)>,
    ) -> Self {
        Self {
            endpoint,
            auth,
            extra_headers,
        }
    }

    /// POST a JSON payload to `{endpoint}/{path}` with the provider's
    /// credential attached. No retries; one failure is surfaced once.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        api_key: &str,
        payload: &T,
    ) -> Result<Response, RelayError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let url = format!("{}/{}", self.endpoint, path);

        let mut request = client.post(&url).header("Content-Type", "application/json");
        match self.auth {
            AuthStyle::Bearer => {
                request = request.header("Authorization", format!("Bearer {}", api_key));
            }
            AuthStyle::Header(name) => {
                request = request.header(name, api_key);
            }
            AuthStyle::QueryParam(name) => {
                request = request.query(&[(name, api_key)]);
            }
        }
        for (key, value) in &self.extra_headers {
            request = request.header(*key, *value);
        }

        let response = request.json(payload).send().await?;
        Ok(response)
    }
}
