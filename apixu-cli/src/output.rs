//! Human-readable rendering of API responses.

use apixu_core::model::{Conditions, CurrentWeather, Forecast, ForecastDay, History, Search};
use std::fmt::Write;

pub fn current(weather: &CurrentWeather) -> String {
    let c = &weather.current;
    let mut out = String::new();

    let _ = writeln!(out, "{}", weather.location.display_name());
    if let Some(updated) = &c.last_updated {
        let _ = writeln!(out, "  updated      {updated}");
    }
    let _ = writeln!(out, "  condition    {}", c.condition.text);
    let _ = writeln!(out, "  temperature  {:.1}°C (feels like {:.1}°C)", c.temp_c, c.feelslike_c);
    let _ = writeln!(out, "  humidity     {}%", c.humidity);
    let _ = writeln!(out, "  wind         {:.1} m/s {}", c.wind_speed_mps(), c.wind_dir);
    let _ = writeln!(out, "  pressure     {:.0} mb", c.pressure_mb);
    out
}

pub fn search(results: &Search) -> String {
    if results.is_empty() {
        return "No matching locations.\n".to_string();
    }

    let mut out = String::new();
    for loc in results.iter() {
        let _ = writeln!(out, "{:<40} {:>8.2} {:>8.2}", loc.name, loc.lat, loc.lon);
        let _ = writeln!(out, "  {}, {}", loc.region, loc.country);
    }
    out
}

pub fn forecast(forecast: &Forecast) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", forecast.location.display_name());
    for day in &forecast.forecast.forecastday {
        write_day(&mut out, day);
    }
    out
}

pub fn history(history: &History) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", history.location.display_name());
    for day in &history.forecast.forecastday {
        write_day(&mut out, day);
    }
    out
}

pub fn conditions(conditions: &Conditions, lang: &str) -> String {
    let mut out = String::new();
    for code in conditions.iter() {
        let _ = writeln!(
            out,
            "{:>5}  icon {:>3}  {} / {}",
            code.code,
            code.icon,
            code.text(lang, true),
            code.text(lang, false)
        );
    }
    out
}

fn write_day(out: &mut String, day: &ForecastDay) {
    let d = &day.day;
    let _ = writeln!(
        out,
        "  {}  {:>5.1}°C / {:>5.1}°C  {:>5.1} mm  {}",
        day.date, d.mintemp_c, d.maxtemp_c, d.totalprecip_mm, d.condition.text
    );

    for hour in &day.hour {
        let _ = writeln!(
            out,
            "      {}  {:>5.1}°C  {:>4.1} m/s {:<3}  {}",
            hour.time,
            hour.temp_c,
            hour.wind_kph / 3.6,
            hour.wind_dir,
            hour.condition.text
        );
    }
}
