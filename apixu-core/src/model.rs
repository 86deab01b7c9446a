//! Response types returned by the facade.
//!
//! Field names follow the remote JSON so serde needs no renames. Values the API
//! omits for some locations or plans are `Option`.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

mod conditions;
mod forecast;

pub use conditions::{ConditionCode, ConditionTranslation, Conditions};
pub use forecast::{Astro, Day, Forecast, ForecastDay, ForecastDays, History, Hour};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub tz_id: Option<String>,
    pub localtime_epoch: Option<i64>,
    pub localtime: Option<String>,
}

impl Location {
    /// "London, City of London, Greater London, United Kingdom", skipping empty parts.
    pub fn display_name(&self) -> String {
        [&self.name, &self.region, &self.country]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    pub code: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Current {
    pub last_updated_epoch: Option<i64>,
    pub last_updated: Option<String>,
    pub temp_c: f64,
    pub temp_f: f64,
    pub is_day: u8,
    pub condition: Condition,
    pub wind_mph: f64,
    pub wind_kph: f64,
    pub wind_degree: u16,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub pressure_in: f64,
    pub precip_mm: f64,
    pub precip_in: f64,
    pub humidity: u8,
    pub cloud: u8,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub vis_km: Option<f64>,
    pub vis_miles: Option<f64>,
    pub uv: Option<f64>,
    pub gust_mph: Option<f64>,
    pub gust_kph: Option<f64>,
}

impl Current {
    pub fn is_day(&self) -> bool {
        self.is_day == 1
    }

    pub fn wind_speed_mps(&self) -> f64 {
        self.wind_kph / 3.6
    }
}

/// Payload of the `current` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location: Location,
    pub current: Current,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchLocation {
    pub id: Option<i64>,
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub url: Option<String>,
}

/// Payload of the `search` endpoint: matching locations, possibly none.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Search(pub Vec<SearchLocation>);

impl Deref for Search {
    type Target = [SearchLocation];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for Search {
    type Item = SearchLocation;
    type IntoIter = std::vec::IntoIter<SearchLocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const LOCATION: &str = r#"{
        "name": "London", "region": "City of London, Greater London", "country": "United Kingdom",
        "lat": 51.52, "lon": -0.11, "tz_id": "Europe/London",
        "localtime_epoch": 1672576200, "localtime": "2023-01-01 12:30"
    }"#;

    pub fn current_weather() -> String {
        format!(
            r#"{{"location": {LOCATION}, "current": {{
                "last_updated_epoch": 1672575300, "last_updated": "2023-01-01 12:15",
                "temp_c": 11.0, "temp_f": 51.8, "is_day": 1,
                "condition": {{"text": "Light rain", "icon": "//cdn.weatherapi.com/weather/64x64/day/296.png", "code": 1183}},
                "wind_mph": 15.0, "wind_kph": 24.1, "wind_degree": 220, "wind_dir": "SW",
                "pressure_mb": 1002.0, "pressure_in": 29.59, "precip_mm": 0.4, "precip_in": 0.02,
                "humidity": 82, "cloud": 75, "feelslike_c": 8.6, "feelslike_f": 47.5,
                "vis_km": 10.0, "vis_miles": 6.0, "uv": 3.0, "gust_mph": 20.8, "gust_kph": 33.5
            }}}}"#
        )
    }
}
