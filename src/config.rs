//! Immutable client configuration.

use crate::extract::extractor::{ExtractorConfig, CURRENT, WAVE, WIND};
use crate::types::data_source::Source;
use crate::types::observation::Units;
use bon::Builder;
use std::time::Duration;

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const MARINE_URL: &str = "https://marine-api.open-meteo.com/v1/marine";
pub const OCEAN_URL: &str = "https://ocean-api.open-meteo.com/v1/ocean";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Base URL of each source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub forecast: String,
    pub marine: String,
    pub ocean: String,
}

impl Endpoints {
    pub fn url(&self, source: Source) -> &str {
        match source {
            Source::Forecast => self.forecast.as_str(),
            Source::Marine => self.marine.as_str(),
            Source::Ocean => self.ocean.as_str(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast: FORECAST_URL.to_string(),
            marine: MARINE_URL.to_string(),
            ocean: OCEAN_URL.to_string(),
        }
    }
}

/// Settings for a [`crate::SeaState`] client.
///
/// # Examples
///
/// ```
/// use seastate::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::builder()
///     .api_key("secret")
///     .timeout(Duration::from_secs(5))
///     .build();
/// assert_eq!(config.api_key.as_deref(), Some("secret"));
/// assert_eq!(config.units.wind, "kn");
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ClientConfig {
    /// Sent as the `apikey` query parameter when set.
    #[builder(into)]
    pub api_key: Option<String>,
    /// Per-request timeout.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
    #[builder(default)]
    pub endpoints: Endpoints,
    /// Unit labels attached to every record. Wind is always requested in knots.
    #[builder(default)]
    pub units: Units,
    /// Field tables per source family.
    #[builder(default = [WIND, WAVE, CURRENT])]
    pub extractors: [ExtractorConfig; 3],
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
