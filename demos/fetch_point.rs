use chrono::{TimeZone, Utc};
use seastate::{ClientConfig, LatLon, SeaState, SeaStateError};
use std::env;

#[tokio::main]
async fn main() -> Result<(), SeaStateError> {
    let config = ClientConfig::builder()
        .maybe_api_key(env::var("OPEN_METEO_API_KEY").ok())
        .build();
    let client = SeaState::with_config(config)?;
    let datetime = Utc.with_ymd_and_hms(2025, 1, 10, 14, 15, 0).unwrap();

    // Off A Coruña
    let record = client
        .observation()
        .location(LatLon::new(43.45, -8.5)?)
        .datetime(datetime)
        .call()
        .await?;

    println!("{:#?}", record);
    println!(
        "wind in {}, current in {}",
        record.units.wind, record.units.current
    );

    Ok(())
}
