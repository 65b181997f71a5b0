use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeaStateError {
    #[error("Coordinate ({lat}, {lon}) is outside [-90, 90] x [-180, 180]")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}
