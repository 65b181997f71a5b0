//! Canned-response [`JsonFetcher`] for unit tests.

use crate::fetch::error::FetchError;
use crate::fetch::fetcher::JsonFetcher;
use serde_json::Value;
use std::sync::Mutex;

/// Serves fixed documents keyed by URL and `hourly` variable list.
///
/// Unrouted requests and routes registered with [`StaticFetcher::failing`]
/// fail with a JSON parse error, standing in for any transport failure.
#[derive(Debug, Default)]
pub(crate) struct StaticFetcher {
    routes: Vec<(String, String, Option<Value>)>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl StaticFetcher {
    pub(crate) fn route(mut self, url: &str, hourly: &str, document: Value) -> Self {
        self.routes
            .push((url.to_string(), hourly.to_string(), Some(document)));
        self
    }

    pub(crate) fn failing(mut self, url: &str, hourly: &str) -> Self {
        self.routes.push((url.to_string(), hourly.to_string(), None));
        self
    }

    /// Every request made so far, as `(url, params)`.
    pub(crate) fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl JsonFetcher for StaticFetcher {
    async fn get(&self, url: &str, params: &[(String, String)]) -> Result<Value, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), params.to_vec()));

        let hourly = params
            .iter()
            .find(|(key, _)| key == "hourly")
            .map(|(_, value)| value.as_str())
            .unwrap_or_default();

        self.routes
            .iter()
            .find(|(route_url, route_hourly, _)| route_url == url && route_hourly == hourly)
            .and_then(|(_, _, document)| document.clone())
            .ok_or_else(|| FetchError::JsonParse {
                url: url.to_string(),
                source: serde_json::from_str::<Value>("<html>503</html>").unwrap_err(),
            })
    }
}
