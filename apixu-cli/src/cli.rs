use anyhow::{Context, Result};
use apixu_core::{Apixu, Config, SUPPORTED_LANGUAGES};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use inquire::{Password, Select};
use serde::Serialize;
use tracing::debug;

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "apixu", version, about = "Weather from the command line")]
pub struct Cli {
    /// API key; overrides the configured one.
    #[arg(long, global = true, env = "APIXU_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Print the raw response as pretty JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store API key and default language.
    Configure,

    /// List weather condition codes and icons.
    Conditions,

    /// Show current weather.
    Current {
        /// City name, postcode, "lat,lon", IP address...
        query: String,

        #[arg(long)]
        lang: Option<String>,
    },

    /// Look up locations matching a query.
    Search { query: String },

    /// Show a multi-day forecast.
    Forecast {
        query: String,

        #[arg(long, default_value_t = 3)]
        days: u32,

        /// Restrict output to a single hour (0-23).
        #[arg(long)]
        hour: Option<u8>,

        #[arg(long)]
        lang: Option<String>,
    },

    /// Show observed weather for past dates.
    History {
        query: String,

        /// First day, YYYY-MM-DD.
        #[arg(long, value_parser = parse_date)]
        since: NaiveDate,

        /// Last day, YYYY-MM-DD.
        #[arg(long, value_parser = parse_date)]
        until: Option<NaiveDate>,

        #[arg(long)]
        lang: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut config = Config::load()?;
        let default_lang = config.default_lang().to_owned();

        match self.command {
            Command::Configure => configure(&mut config),
            Command::Conditions => {
                let conditions = self.client(&config)?.conditions().await?;
                self.emit(&conditions, || output::conditions(&conditions, &default_lang))
            }
            Command::Current { ref query, ref lang } => {
                let lang = lang.as_deref().unwrap_or(&default_lang);
                let weather = self.client(&config)?.current(query, Some(lang)).await?;
                self.emit(&weather, || output::current(&weather))
            }
            Command::Search { ref query } => {
                let results = self.client(&config)?.search(query).await?;
                self.emit(&results, || output::search(&results))
            }
            Command::Forecast { ref query, days, hour, ref lang } => {
                let lang = lang.as_deref().unwrap_or(&default_lang);
                let forecast =
                    self.client(&config)?.forecast(query, days, hour, Some(lang)).await?;
                self.emit(&forecast, || output::forecast(&forecast))
            }
            Command::History { ref query, since, until, ref lang } => {
                let lang = lang.as_deref().unwrap_or(&default_lang);
                let history =
                    self.client(&config)?.history(query, since, until, Some(lang)).await?;
                self.emit(&history, || output::history(&history))
            }
        }
    }

    fn client(&self, config: &Config) -> Result<Apixu> {
        match self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty()) {
            Some(key) => {
                debug!("using API key from command line / environment");
                Ok(Apixu::with_api_key(key.to_owned(), config.base_url()))
            }
            None => Apixu::from_config(config),
        }
    }

    fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            let json = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
            println!("{json}");
        } else {
            print!("{}", human());
        }
        Ok(())
    }
}

fn configure(config: &mut Config) -> Result<()> {
    let api_key = Password::new("weatherapi.com API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let current = config.default_lang().to_string();
    let start = SUPPORTED_LANGUAGES.iter().position(|l| *l == current).unwrap_or(0);
    let lang = Select::new("Default language:", SUPPORTED_LANGUAGES.to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read default language")?;
    config.set_default_lang(lang)?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected a date like 2023-01-31: {e}"))
}
