//! This module provides the main entry point: a client that queries the wind,
//! wave and current sources for one point and merges them into a single
//! [`ObservationRecord`].

use crate::config::ClientConfig;
use crate::error::SeaStateError;
use crate::extract::extractor::{ExtractorConfig, SourceExtractor};
use crate::fetch::fetcher::{HttpFetcher, JsonFetcher};
use crate::fetch::query::SourceQuery;
use crate::types::any_datetime::AnyDateTime;
use crate::types::data_source::Source;
use crate::types::hourly_series::HourlySeries;
use crate::types::into_utc_trait::{normalize_to_hour, IntoUtcDateTime};
use crate::types::observation::{ObservationRecord, Units};
use bon::bon;
use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use serde_json::Value;

/// Wind speed unit requested from the forecast source.
const FORECAST_WIND_SPEED_UNIT: &str = "kn";

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use seastate::LatLon;
///
/// let biscay = LatLon::new(45.0, -5.0).unwrap();
/// assert_eq!(biscay.0, 45.0); // Latitude
/// assert!(LatLon::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    /// Creates a coordinate, rejecting NaN and out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, SeaStateError> {
        let location = Self(lat, lon);
        location.validate()?;
        Ok(location)
    }

    fn validate(&self) -> Result<(), SeaStateError> {
        if (-90.0..=90.0).contains(&self.0) && (-180.0..=180.0).contains(&self.1) {
            Ok(())
        } else {
            Err(SeaStateError::InvalidCoordinate {
                lat: self.0,
                lon: self.1,
            })
        }
    }
}

/// The raw document one source returned for a point, with the config used
/// to request and extract it.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    pub config: ExtractorConfig,
    /// Parsed JSON body; an empty object when the source was unavailable.
    pub document: Value,
}

/// Unmerged result of querying all sources for one point and hour.
///
/// Obtained from [`SeaState::fetch_point`]. Call [`PointPayload::extract`] to
/// reduce it to an [`ObservationRecord`], optionally for a different hour.
#[derive(Debug, Clone, PartialEq)]
pub struct PointPayload {
    /// Requested hour in RFC 3339, e.g. `2024-01-01T06:00:00+00:00`.
    pub requested_iso: String,
    pub sources: Vec<SourceDocument>,
    pub units: Units,
}

impl PointPayload {
    pub fn document(&self, source: Source) -> Option<&Value> {
        self.sources
            .iter()
            .find(|s| s.config.source == source)
            .map(|s| &s.document)
    }

    /// Extracts and merges every source's values at the hour nearest
    /// `requested_iso`, or at the payload's own requested hour when `None`.
    ///
    /// An unparsable `requested_iso` falls back to each source's first hour.
    /// Sources are merged in [`Source::PRIORITY`] order, so `iso_time` comes
    /// from the first source that has a time axis.
    pub fn extract(&self, requested_iso: Option<&str>) -> ObservationRecord {
        let requested = requested_iso.unwrap_or(&self.requested_iso);
        let target = requested.parse_utc();
        if target.is_none() {
            warn!("Unparsable requested time '{}', using first hour of each source", requested);
        }

        let mut record = ObservationRecord::empty();
        for source in Source::PRIORITY {
            for doc in self.sources.iter().filter(|s| s.config.source == source) {
                let partial = SourceExtractor::new(doc.config).extract(&doc.document, target);
                record.merge_from(&partial);
            }
        }
        record.units = self.units.clone();
        record
    }
}

/// The main client: aggregates marine conditions for a point and hour.
///
/// Each call queries the forecast (wind), marine (waves) and ocean (current)
/// sources once, except that the ocean source is re-queried with u/v
/// components when its preferred speed/direction variables are unavailable.
/// A failing source never fails the call; its fields are simply `None`.
///
/// # Examples
///
/// ```no_run
/// # use seastate::{LatLon, SeaState, SeaStateError};
/// # use chrono::{TimeZone, Utc};
/// # #[tokio::main]
/// # async fn main() -> Result<(), SeaStateError> {
/// let client = SeaState::new()?;
/// let record = client
///     .fetch_observation(LatLon(43.37, -8.4), Utc.with_ymd_and_hms(2024, 6, 1, 9, 40, 0).unwrap())
///     .await?;
/// println!("{}", serde_json::to_string_pretty(&record).unwrap());
/// # Ok(())
/// # }
/// ```
pub struct SeaState<F = HttpFetcher> {
    fetcher: F,
    config: ClientConfig,
}

impl SeaState<HttpFetcher> {
    /// Creates a client with the default [`ClientConfig`].
    pub fn new() -> Result<Self, SeaStateError> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client over HTTP with the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`SeaStateError::ClientBuild`] if the HTTP client cannot be initialised.
    pub fn with_config(config: ClientConfig) -> Result<Self, SeaStateError> {
        let fetcher = HttpFetcher::new(config.timeout, config.api_key.clone())
            .map_err(SeaStateError::ClientBuild)?;
        Ok(Self::with_fetcher(fetcher, config))
    }
}

#[bon]
impl<F: JsonFetcher> SeaState<F> {
    /// Creates a client over any [`JsonFetcher`].
    pub fn with_fetcher(fetcher: F, config: ClientConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches and merges one observation for `location` at the hour
    /// containing `datetime`.
    ///
    /// # Errors
    ///
    /// Returns [`SeaStateError::InvalidCoordinate`] if `location` is out of
    /// range. Source failures are not errors.
    pub async fn fetch_observation(
        &self,
        location: LatLon,
        datetime: impl IntoUtcDateTime,
    ) -> Result<ObservationRecord, SeaStateError> {
        Ok(self.fetch_point(location, datetime).await?.extract(None))
    }

    /// Builder form of [`SeaState::fetch_observation`].
    ///
    /// ```no_run
    /// # use seastate::{LatLon, SeaState, SeaStateError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), SeaStateError> {
    /// let client = SeaState::new()?;
    /// let record = client
    ///     .observation()
    ///     .location(LatLon(36.5, -6.3))
    ///     .datetime(chrono::Utc::now())
    ///     .call()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn observation(
        &self,
        location: LatLon,
        datetime: DateTime<Utc>,
    ) -> Result<ObservationRecord, SeaStateError> {
        self.fetch_observation(location, datetime).await
    }

    /// Queries every source for the UTC day containing `datetime` and returns
    /// the raw documents without extracting.
    pub async fn fetch_point(
        &self,
        location: LatLon,
        datetime: impl IntoUtcDateTime,
    ) -> Result<PointPayload, SeaStateError> {
        location.validate()?;
        let target = normalize_to_hour(datetime);
        let day = target.date_naive();

        let [first, second, third] = &self.config.extractors;
        let (first, second, third) = tokio::join!(
            self.fetch_source(first, location, day),
            self.fetch_source(second, location, day),
            self.fetch_source(third, location, day),
        );

        Ok(PointPayload {
            requested_iso: target.to_rfc3339(),
            sources: vec![first, second, third],
            units: self.config.units.clone(),
        })
    }

    fn query(
        &self,
        config: &ExtractorConfig,
        location: LatLon,
        day: NaiveDate,
        variables: &[&str],
    ) -> SourceQuery {
        let query = SourceQuery::new(
            self.config.endpoints.url(config.source),
            location,
            day,
            variables,
        );
        match config.source {
            Source::Forecast => query.with_param("windspeed_unit", FORECAST_WIND_SPEED_UNIT),
            Source::Marine | Source::Ocean => query,
        }
    }

    async fn get(&self, config: &ExtractorConfig, query: &SourceQuery) -> Option<Value> {
        match self.fetcher.get(&query.url, &query.params).await {
            Ok(document) => Some(document),
            Err(e) => {
                warn!("{} fetch failed: {}", config.source, e);
                None
            }
        }
    }

    /// Fetches one source, retrying once with the fallback variable set when
    /// the preferred request fails or carries none of the preferred variables.
    async fn fetch_source(
        &self,
        config: &ExtractorConfig,
        location: LatLon,
        day: NaiveDate,
    ) -> SourceDocument {
        let preferred = self.query(config, location, day, &config.variables());
        let document = self.get(config, &preferred).await;

        let document = match config.fallback.variables() {
            Some(fallback_variables) if !Self::has_preferred(config, document.as_ref()) => {
                info!(
                    "{} response lacks {}; retrying with {}",
                    config.source,
                    config.variables().join("/"),
                    fallback_variables.join("/")
                );
                let fallback = self.query(config, location, day, &fallback_variables);
                self.get(config, &fallback).await
            }
            _ => document,
        };

        SourceDocument {
            config: *config,
            document: document.unwrap_or_else(|| Value::Object(Default::default())),
        }
    }

    fn has_preferred(config: &ExtractorConfig, document: Option<&Value>) -> bool {
        // Legacy aliases belong to the fallback encoding and do not count here.
        document.is_some_and(|document| config.has_any_variable(&HourlySeries::from_document(document)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FORECAST_URL, MARINE_URL, OCEAN_URL};
    use crate::test_support::StaticFetcher;
    use chrono::{FixedOffset, TimeZone};
    use serde_json::json;

    const WIND_VARS: &str = "windspeed_10m,winddirection_10m";
    const WAVE_VARS: &str = "wave_height,wave_direction,swell_wave_height,swell_wave_direction,wind_wave_height,wind_wave_direction";
    const CURRENT_VARS: &str = "current_speed,current_direction";
    const UV_VARS: &str = "current_u,current_v";

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
    }

    fn hours(n: u32) -> Vec<String> {
        (0..n).map(|h| format!("2024-01-01T{h:02}:00")).collect()
    }

    fn client(fetcher: StaticFetcher) -> SeaState<StaticFetcher> {
        SeaState::with_fetcher(fetcher, ClientConfig::default())
    }

    fn location() -> LatLon {
        LatLon(43.37, -8.4)
    }

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[tokio::test]
    async fn merges_all_three_sources() -> Result<(), SeaStateError> {
        let fetcher = StaticFetcher::default()
            .route(FORECAST_URL, WIND_VARS, json!({
                "hourly": { "time": hours(3), "windspeed_10m": [10, 11, 12], "winddirection_10m": [250, 260, 270] }
            }))
            .route(MARINE_URL, WAVE_VARS, json!({
                "hourly": {
                    "time": hours(3),
                    "wave_height": [1.0, 1.1, 1.2],
                    "wave_direction": [300, 301, 302],
                    "swell_wave_height": [0.8, 0.9, 1.0],
                    "swell_wave_direction": [310, 311, 312],
                    "wind_wave_height": [0.2, 0.3, 0.4],
                    "wind_wave_direction": [260, 261, 262],
                }
            }))
            .route(OCEAN_URL, CURRENT_VARS, json!({
                "hourly": { "time": hours(3), "current_speed": [0.1, 0.2, 0.3], "current_direction": [90, 95, 100] }
            }));
        let sea = client(fetcher);

        let record = sea.fetch_observation(location(), at(2, 10)).await?;
        assert_eq!(record.iso_time.as_deref(), Some("2024-01-01T02:00"));
        assert_eq!(record.wind_speed, Some(12.0));
        assert_eq!(record.wind_direction, Some(270.0));
        assert_eq!(record.wave_height, Some(1.2));
        assert_eq!(record.swell_direction, Some(312.0));
        assert_eq!(record.wind_wave_height, Some(0.4));
        assert_eq!(record.current_speed, Some(0.3));
        assert_eq!(record.current_direction, Some(100.0));
        assert_eq!(record.units, Units::default());
        // No fallback request when the preferred current variables are present.
        assert_eq!(sea.fetcher.calls().len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn builds_expected_queries() -> Result<(), SeaStateError> {
        let sea = client(StaticFetcher::default());
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        // 01:30 local on Jan 2nd is 23:30 UTC on Jan 1st.
        let datetime = tz.with_ymd_and_hms(2024, 1, 2, 1, 30, 0).unwrap();
        let payload = sea.fetch_point(location(), datetime).await?;
        assert_eq!(payload.requested_iso, "2024-01-01T23:00:00+00:00");

        let calls = sea.fetcher.calls();
        let forecast = calls.iter().find(|(url, _)| url == FORECAST_URL).unwrap();
        assert_eq!(param(&forecast.1, "windspeed_unit"), Some("kn"));
        assert_eq!(param(&forecast.1, "hourly"), Some(WIND_VARS));
        assert_eq!(param(&forecast.1, "start_date"), Some("2024-01-01"));
        assert_eq!(param(&forecast.1, "end_date"), Some("2024-01-01"));
        assert_eq!(param(&forecast.1, "timezone"), Some("UTC"));
        assert_eq!(param(&forecast.1, "timeformat"), Some("iso8601"));

        for (url, params) in calls.iter().filter(|(url, _)| url != FORECAST_URL) {
            assert_eq!(param(params, "windspeed_unit"), None, "{url}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn ocean_falls_back_to_vector_components() -> Result<(), SeaStateError> {
        let fetcher = StaticFetcher::default()
            .route(OCEAN_URL, CURRENT_VARS, json!({ "hourly": { "time": hours(1) } }))
            .route(OCEAN_URL, UV_VARS, json!({
                "hourly": { "time": hours(1), "current_u": [3.0], "current_v": [4.0] }
            }));
        let sea = client(fetcher);

        let record = sea.fetch_observation(location(), at(0, 0)).await?;
        assert_eq!(record.current_speed, Some(5.0));
        let bearing = record.current_direction.unwrap();
        assert!((bearing - 3f64.atan2(4.0).to_degrees()).abs() < 1e-9);
        // Ocean was the only source with a time axis.
        assert_eq!(record.iso_time.as_deref(), Some("2024-01-01T00:00"));

        let ocean_calls: Vec<_> = sea
            .fetcher
            .calls()
            .into_iter()
            .filter(|(url, _)| url == OCEAN_URL)
            .collect();
        assert_eq!(ocean_calls.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn ocean_transport_failure_also_triggers_fallback() -> Result<(), SeaStateError> {
        let fetcher = StaticFetcher::default()
            .failing(OCEAN_URL, CURRENT_VARS)
            .route(OCEAN_URL, UV_VARS, json!({
                "hourly": { "time": hours(1), "current_u": [0.0], "current_v": [-2.0] }
            }));
        let record = client(fetcher).fetch_observation(location(), at(0, 0)).await?;
        assert_eq!(record.current_speed, Some(2.0));
        assert_eq!(record.current_direction, Some(180.0));
        Ok(())
    }

    #[tokio::test]
    async fn legacy_current_only_response_triggers_vector_retry() -> Result<(), SeaStateError> {
        let fetcher = StaticFetcher::default()
            .route(OCEAN_URL, CURRENT_VARS, json!({
                "hourly": { "time": hours(1), "current": [0.7] }
            }))
            .route(OCEAN_URL, UV_VARS, json!({
                "hourly": { "time": hours(1), "current_u": [3.0], "current_v": [4.0] }
            }));
        let sea = client(fetcher);
        let record = sea.fetch_observation(location(), at(0, 0)).await?;

        let ocean_calls = sea
            .fetcher
            .calls()
            .into_iter()
            .filter(|(url, _)| url == OCEAN_URL)
            .count();
        assert_eq!(ocean_calls, 2);
        assert_eq!(record.current_speed, Some(5.0));
        let bearing = record.current_direction.unwrap();
        assert!((bearing - 3f64.atan2(4.0).to_degrees()).abs() < 1e-9);
        Ok(())
    }

    #[tokio::test]
    async fn empty_hourly_block_triggers_vector_retry() -> Result<(), SeaStateError> {
        let fetcher = StaticFetcher::default()
            .route(OCEAN_URL, CURRENT_VARS, json!({ "hourly": {} }))
            .route(OCEAN_URL, UV_VARS, json!({
                "hourly": { "time": hours(1), "current_u": [1.0], "current_v": [0.0] }
            }));
        let sea = client(fetcher);
        let record = sea.fetch_observation(location(), at(0, 0)).await?;

        let ocean_hourly: Vec<String> = sea
            .fetcher
            .calls()
            .iter()
            .filter(|(url, _)| url == OCEAN_URL)
            .filter_map(|(_, params)| param(params, "hourly").map(str::to_string))
            .collect();
        assert_eq!(ocean_hourly, vec![CURRENT_VARS.to_string(), UV_VARS.to_string()]);
        assert_eq!(record.current_speed, Some(1.0));
        assert!((record.current_direction.unwrap() - 90.0).abs() < 1e-9);
        Ok(())
    }

    #[tokio::test]
    async fn wind_unit_label_does_not_change_request_unit() -> Result<(), SeaStateError> {
        let config = ClientConfig::builder()
            .units(Units {
                wind: "m/s".to_string(),
                current: "mps".to_string(),
            })
            .build();
        let sea = SeaState::with_fetcher(StaticFetcher::default(), config);
        let record = sea.fetch_observation(location(), at(0, 0)).await?;
        assert_eq!(record.units.wind, "m/s");

        let calls = sea.fetcher.calls();
        let forecast = calls.iter().find(|(url, _)| url == FORECAST_URL).unwrap();
        assert_eq!(param(&forecast.1, "windspeed_unit"), Some("kn"));
        Ok(())
    }

    #[tokio::test]
    async fn partial_preferred_current_is_kept_without_retry() -> Result<(), SeaStateError> {
        let fetcher = StaticFetcher::default()
            .route(OCEAN_URL, CURRENT_VARS, json!({
                "hourly": { "time": hours(1), "current_speed": [2.0] }
            }))
            .route(OCEAN_URL, UV_VARS, json!({
                "hourly": { "time": hours(1), "current_u": [3.0], "current_v": [4.0] }
            }));
        let sea = client(fetcher);
        let record = sea.fetch_observation(location(), at(0, 0)).await?;
        assert_eq!(record.current_speed, Some(2.0));
        assert_eq!(record.current_direction, None);
        assert_eq!(sea.fetcher.calls().len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn all_sources_failing_yields_blank_record() -> Result<(), SeaStateError> {
        let record = client(StaticFetcher::default())
            .fetch_observation(location(), at(5, 0))
            .await?;
        assert_eq!(record.iso_time, None);
        assert!(record.is_blank());

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.as_object().unwrap().values().all(Value::is_null));
        Ok(())
    }

    #[tokio::test]
    async fn iso_time_priority_is_wind_then_wave_then_current() -> Result<(), SeaStateError> {
        let wave_doc = json!({ "hourly": { "time": ["2024-01-01T04:00"], "wave_height": [2.0] } });
        let current_doc = json!({ "hourly": { "time": ["2024-01-01T05:00"], "current_speed": [0.5] } });

        let fetcher = StaticFetcher::default()
            .route(FORECAST_URL, WIND_VARS, json!({ "hourly": { "windspeed_10m": [1.0] } }))
            .route(MARINE_URL, WAVE_VARS, wave_doc)
            .route(OCEAN_URL, CURRENT_VARS, current_doc.clone());
        let record = client(fetcher).fetch_observation(location(), at(5, 0)).await?;
        assert_eq!(record.iso_time.as_deref(), Some("2024-01-01T04:00"));
        assert_eq!(record.wind_speed, None);

        let fetcher = StaticFetcher::default()
            .route(MARINE_URL, WAVE_VARS, json!({ "hourly": { "time": [] } }))
            .route(OCEAN_URL, CURRENT_VARS, current_doc);
        let record = client(fetcher).fetch_observation(location(), at(4, 0)).await?;
        assert_eq!(record.iso_time.as_deref(), Some("2024-01-01T05:00"));
        assert_eq!(record.current_speed, Some(0.5));
        Ok(())
    }

    #[tokio::test]
    async fn payload_can_be_re_extracted_for_another_hour() -> Result<(), SeaStateError> {
        let speeds: Vec<u32> = (0..24).collect();
        let fetcher = StaticFetcher::default().route(FORECAST_URL, WIND_VARS, json!({
            "hourly": { "time": hours(24), "windspeed_10m": speeds }
        }));
        let payload = client(fetcher).fetch_point(location(), at(6, 0)).await?;

        assert_eq!(payload.extract(None).wind_speed, Some(6.0));
        assert_eq!(payload.extract(Some("2024-01-01T17:20:00Z")).wind_speed, Some(17.0));
        assert_eq!(payload.extract(Some("garbage")).wind_speed, Some(0.0));
        assert_eq!(payload.document(Source::Marine), Some(&json!({})));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_coordinate_is_rejected() {
        let sea = client(StaticFetcher::default());
        let result = sea.fetch_observation(LatLon(120.0, 0.0), at(0, 0)).await;
        assert!(matches!(result, Err(SeaStateError::InvalidCoordinate { .. })));
        let result = sea.fetch_observation(LatLon(0.0, f64::NAN), at(0, 0)).await;
        assert!(matches!(result, Err(SeaStateError::InvalidCoordinate { .. })));
        assert!(sea.fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn builder_call_matches_direct_call() -> Result<(), SeaStateError> {
        let fetcher = StaticFetcher::default().route(FORECAST_URL, WIND_VARS, json!({
            "hourly": { "time": hours(2), "windspeed_10m": [3.0, 4.0] }
        }));
        let sea = client(fetcher);
        let record = sea
            .observation()
            .location(location())
            .datetime(at(1, 0))
            .call()
            .await?;
        assert_eq!(record.wind_speed, Some(4.0));
        Ok(())
    }

    #[test]
    fn latlon_bounds_are_inclusive() {
        assert!(LatLon::new(90.0, 180.0).is_ok());
        assert!(LatLon::new(-90.0, -180.0).is_ok());
        assert!(LatLon::new(-90.1, 0.0).is_err());
        assert!(LatLon::new(0.0, 180.5).is_err());
    }
}
