use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Condition, Current, Location};

/// Payload of the `forecast` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub location: Location,
    pub current: Option<Current>,
    pub forecast: ForecastDays,
}

/// Payload of the `history` endpoint. Same day layout as a forecast, no `current` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub location: Location,
    pub forecast: ForecastDays,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastDays {
    #[serde(default)]
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub date_epoch: Option<i64>,
    pub day: Day,
    pub astro: Option<Astro>,
    #[serde(default)]
    pub hour: Vec<Hour>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub maxtemp_c: f64,
    pub maxtemp_f: f64,
    pub mintemp_c: f64,
    pub mintemp_f: f64,
    pub avgtemp_c: f64,
    pub avgtemp_f: f64,
    pub maxwind_mph: f64,
    pub maxwind_kph: f64,
    pub totalprecip_mm: f64,
    pub totalprecip_in: f64,
    pub avgvis_km: Option<f64>,
    pub avgvis_miles: Option<f64>,
    pub avghumidity: f64,
    pub condition: Condition,
    pub uv: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
    pub moonrise: String,
    pub moonset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hour {
    pub time_epoch: i64,
    pub time: String,
    pub temp_c: f64,
    pub temp_f: f64,
    pub is_day: Option<u8>,
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
    pub windchill_c: Option<f64>,
    pub heatindex_c: Option<f64>,
    pub dewpoint_c: Option<f64>,
    pub vis_km: Option<f64>,
    pub gust_kph: Option<f64>,
    pub uv: Option<f64>,
}

impl ForecastDays {
    pub fn day(&self, date: NaiveDate) -> Option<&ForecastDay> {
        self.forecastday.iter().find(|d| d.date == date)
    }
}
