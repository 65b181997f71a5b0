use crate::sea_state::LatLon;
use chrono::NaiveDate;

/// URL and query parameters for one day of hourly data from one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceQuery {
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl SourceQuery {
    /// Query for `variables` over the UTC calendar day `day`, with ISO-8601
    /// timestamps on the returned time axis.
    pub fn new(url: &str, location: LatLon, day: NaiveDate, variables: &[&str]) -> Self {
        let day = day.format("%Y-%m-%d").to_string();
        let params = vec![
            ("latitude", location.0.to_string()),
            ("longitude", location.1.to_string()),
            ("hourly", variables.join(",")),
            ("start_date", day.clone()),
            ("end_date", day),
            ("timezone", "UTC".to_string()),
            ("timeformat", "iso8601".to_string()),
        ];
        Self {
            url: url.to_string(),
            params: params
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        }
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}
