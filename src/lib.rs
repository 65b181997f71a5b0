mod alignment;
mod config;
mod error;
mod extract;
mod fetch;
mod sea_state;
mod types;

#[cfg(test)]
mod test_support;

pub use config::{ClientConfig, Endpoints, FORECAST_URL, MARINE_URL, OCEAN_URL};
pub use error::SeaStateError;
pub use sea_state::*;

pub use alignment::nearest::{pick_index, pick_index_str};
pub use alignment::polar::{to_speed_bearing, uv_to_speed_bearing};

pub use extract::extractor::{ExtractorConfig, Fallback, SourceExtractor, CURRENT, WAVE, WIND};
pub use extract::normalize::apply_aliases;

pub use fetch::error::FetchError;
pub use fetch::fetcher::{HttpFetcher, JsonFetcher};
pub use fetch::query::SourceQuery;

pub use types::any_datetime::AnyDateTime;
pub use types::data_source::Source;
pub use types::hourly_series::HourlySeries;
pub use types::into_utc_trait::{normalize_to_hour, IntoUtcDateTime};
pub use types::observation::{Field, ObservationRecord, Units};
