use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt::Debug};

use crate::{Config, model::Coordinates, model::WeatherModel};

pub mod openweather;

pub use openweather::OpenWeatherService;

/// Measurement system requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown units '{value}'. Supported units: metric, imperial."
            )),
        }
    }
}

#[async_trait]
pub trait ExternalWeatherService: Send + Sync + Debug {
    async fn get_weather(&self, coordinates: Coordinates) -> anyhow::Result<WeatherModel>;
}

/// Construct the OpenWeather service from config.
pub fn service_from_config(config: &Config) -> anyhow::Result<Box<dyn ExternalWeatherService>> {
    let api_key = config.require_api_key()?;

    Ok(Box::new(OpenWeatherService::new(
        api_key.to_owned(),
        config.units,
        config.lang.clone(),
    )))
}
