use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::drawable::Temperature;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn rounded(self, decimals: u32) -> Self {
        let factor = 10_f64.powi(decimals as i32);
        Self {
            latitude: (self.latitude * factor).round() / factor,
            longitude: (self.longitude * factor).round() / factor,
        }
    }
}

/// Weather category and free-text detail, verbatim from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherDescription {
    pub main: String,
    pub description: String,
}

impl WeatherDescription {
    pub fn new(main: impl Into<String>, description: impl Into<String>) -> Self {
        Self { main: main.into(), description: description.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherModel {
    pub temperature: Temperature,
    pub description: WeatherDescription,
    pub sunrise: DateTime<Local>,
    pub sunset: DateTime<Local>,
    pub city: String,
}

/// Report-ready weather. `temperature` holds the composed temperature and
/// icon text, escape codes included.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedWeather {
    pub city: String,
    pub temperature: String,
    pub description: String,
    pub sunrise: DateTime<Local>,
    pub sunset: DateTime<Local>,
}
