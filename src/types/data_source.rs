//! Defines the three upstream data families a point observation is assembled from.

use std::fmt;

/// One of the independent upstream providers queried for a point.
///
/// Each source reports its own hourly grid, so the hour selected for one
/// source is not guaranteed to be the hour selected for another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Atmospheric forecast model. Supplies wind speed and direction at 10 m.
    Forecast,
    /// Marine wave model. Supplies combined sea, swell and wind-wave parameters.
    Marine,
    /// Ocean circulation model. Supplies surface current, either as
    /// speed/direction or as u/v components.
    Ocean,
}

impl Source {
    /// Fixed order in which sources contribute to a merged record.
    ///
    /// The first source with a time axis decides the record's `iso_time`.
    pub const PRIORITY: [Source; 3] = [Source::Forecast, Source::Marine, Source::Ocean];

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Source::Forecast => "forecast",
            Source::Marine => "marine",
            Source::Ocean => "ocean",
        }
    }
}

/// Allows formatting a `Source` by its short name.
///
/// # Examples
///
/// ```
/// use seastate::Source;
///
/// assert_eq!(Source::Marine.to_string(), "marine");
/// ```
impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
