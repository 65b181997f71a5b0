//! Lenient view over the `hourly` block of an upstream JSON document.

use crate::alignment::polar::as_number;
use serde_json::Value;
use std::collections::HashMap;

/// One source's hourly time series: a `time` axis plus one index-aligned
/// value array per variable.
///
/// Absence is an expected state. A document with no `hourly` object, a
/// non-array `time`, or missing variables still yields a series; it simply
/// has no time axis or fewer variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySeries {
    times: Vec<String>,
    variables: HashMap<String, Vec<Value>>,
}

impl HourlySeries {
    /// Reads the `hourly` block of `document`.
    ///
    /// Non-string entries on the time axis are kept as empty strings so that
    /// indices stay aligned with the value arrays; they never parse and are
    /// skipped by nearest-hour selection.
    pub fn from_document(document: &Value) -> Self {
        let Some(hourly) = document.get("hourly").and_then(Value::as_object) else {
            return Self::default();
        };

        let times = hourly
            .get("time")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .map(|t| t.as_str().unwrap_or_default().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let variables = hourly
            .iter()
            .filter(|(key, _)| key.as_str() != "time")
            .filter_map(|(key, values)| Some((key.clone(), values.as_array()?.clone())))
            .collect();

        Self { times, variables }
    }

    pub fn times(&self) -> &[String] {
        &self.times
    }

    pub fn has_time_axis(&self) -> bool {
        !self.times.is_empty()
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Time-axis entry at `index`, if present and a string.
    pub fn time_at(&self, index: usize) -> Option<&str> {
        self.times
            .get(index)
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }

    /// Raw value of `name` at `index`. Missing variables, out-of-range
    /// indices and JSON nulls all read as `None`.
    pub fn value(&self, name: &str, index: usize) -> Option<&Value> {
        self.variables
            .get(name)
            .and_then(|values| values.get(index))
            .filter(|v| !v.is_null())
    }

    /// Numeric value of `name` at `index`. Numeric strings are accepted.
    pub fn number(&self, name: &str, index: usize) -> Option<f64> {
        self.value(name, index).and_then(as_number)
    }

    /// Exposes `legacy` under the name `canonical` when `canonical` is absent.
    pub fn with_alias(mut self, legacy: &str, canonical: &str) -> Self {
        if !self.variables.contains_key(canonical) {
            if let Some(values) = self.variables.get(legacy).cloned() {
                self.variables.insert(canonical.to_string(), values);
            }
        }
        self
    }
}
