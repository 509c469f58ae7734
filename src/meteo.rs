// SPDX-License-Identifier: MPL-2.0
//! Current-weather client for the Open-Meteo forecast API (free, no key).
//!
//! The request asks for `temperature_2m`, `wind_speed_10m` and
//! `weather_code`; every field in the response is treated as optional so a
//! partial payload degrades to dashes in the UI instead of an error.

use crate::error::{Error, Result};
use serde::Deserialize;

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const USER_AGENT: &str = "IcedDeck/0.1.0";

/// Current conditions as shown by the weather tool. Absent readings stay
/// `None` and render as placeholders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurrentWeather {
    /// Air temperature at 2 m, in degrees Celsius.
    pub temperature_c: Option<f64>,
    /// Wind speed at 10 m, in km/h (the API default).
    pub wind_speed: Option<f64>,
    /// WMO weather interpretation code.
    pub weather_code: Option<i64>,
    /// ISO-8601 timestamp of the reading.
    pub time_iso: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct CurrentBlock {
    temperature_2m: Option<f64>,
    wind_speed_10m: Option<f64>,
    weather_code: Option<i64>,
    time: Option<String>,
}

impl From<CurrentBlock> for CurrentWeather {
    fn from(block: CurrentBlock) -> Self {
        Self {
            temperature_c: block.temperature_2m,
            wind_speed: block.wind_speed_10m,
            weather_code: block.weather_code,
            time_iso: block.time,
        }
    }
}

/// Fetches current conditions for the given coordinates.
pub async fn fetch_current(latitude: f64, longitude: f64) -> Result<CurrentWeather> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(USER_AGENT)
        .build()?;

    let url = format!(
        "{FORECAST_URL}?latitude={latitude}&longitude={longitude}\
         &current=temperature_2m,wind_speed_10m,weather_code"
    );

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(Error::Http(format!(
            "weather fetch failed: HTTP status {}",
            response.status()
        )));
    }

    let payload: ForecastResponse = response.json().await?;
    Ok(payload.current.unwrap_or_default().into())
}

/// Localization key for a WMO weather interpretation code.
pub fn condition_key(code: Option<i64>) -> &'static str {
    let Some(code) = code else {
        return "weather-condition-unknown";
    };
    match code {
        0 => "weather-condition-clear",
        1..=3 => "weather-condition-mainly-clear",
        45 | 48 => "weather-condition-fog",
        51 | 53 | 55 | 56 | 57 => "weather-condition-drizzle",
        61 | 63 | 65 => "weather-condition-rain",
        66 | 67 => "weather-condition-freezing-rain",
        71 | 73 | 75 => "weather-condition-snow",
        77 => "weather-condition-snow-grains",
        80 | 81 | 82 => "weather-condition-rain-showers",
        85 | 86 => "weather-condition-snow-showers",
        95 => "weather-condition-thunderstorm",
        96 | 99 => "weather-condition-thunderstorm-hail",
        _ => "weather-condition-generic",
    }
}

/// Celsius to Fahrenheit, for the display-unit preference.
pub fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}
