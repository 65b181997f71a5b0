pub mod any_datetime;
pub mod data_source;
pub mod hourly_series;
pub mod into_utc_trait;
pub mod observation;
