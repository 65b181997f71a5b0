use crate::fetch::error::FetchError;
use log::{debug, warn};
use reqwest::{Client, Request};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Query parameter name the optional API key is sent under.
const API_KEY_PARAM: &str = "apikey";

/// The HTTP collaborator: takes a URL plus query parameters and returns the
/// parsed JSON body, or a [`FetchError`] on network failure, non-success
/// status or malformed body.
pub trait JsonFetcher {
    fn get(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// [`JsonFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    api_key: Option<String>,
}

impl HttpFetcher {
    /// Builds a fetcher whose requests time out after `timeout`.
    ///
    /// When `api_key` is set it is attached to every request; providers that
    /// don't need one ignore it.
    pub fn new(timeout: Duration, api_key: Option<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_key })
    }

    fn build_request(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<Request, reqwest::Error> {
        let mut request = self.client.get(url).query(params);
        if let Some(key) = &self.api_key {
            if !params.iter().any(|(name, _)| name == API_KEY_PARAM) {
                request = request.query(&[(API_KEY_PARAM, key)]);
            }
        }
        request.build()
    }
}

impl JsonFetcher for HttpFetcher {
    async fn get(&self, url: &str, params: &[(String, String)]) -> Result<Value, FetchError> {
        let request = self
            .build_request(url, params)
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;
        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(url.to_string(), e))?;
        serde_json::from_str(&body).map_err(|e| FetchError::JsonParse {
            url: url.to_string(),
            source: e,
        })
    }
}
