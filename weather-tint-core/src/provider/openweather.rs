use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    drawable::{CelsiusTemperature, Drawable, FahrenheitTemperature, Temperature},
    model::{Coordinates, WeatherDescription, WeatherModel},
    value::WeatherValue,
};

use super::{ExternalWeatherService, Units};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherService {
    api_key: String,
    units: Units,
    lang: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherService {
    pub fn new(api_key: String, units: Units, lang: String) -> Self {
        Self {
            api_key,
            units,
            lang,
            base_url: DEFAULT_BASE_URL.to_owned(),
            http: Client::new(),
        }
    }

    /// Point the service at another host, e.g. a local mock.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    async fn fetch_current(&self, coordinates: Coordinates) -> Result<String> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("lang", self.lang.clone()),
                ("units", self.units.as_str().to_owned()),
            ])
            .send()
            .await
            .context("Failed to send request to OpenWeather (current weather)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather current response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather current request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }

    fn parse(&self, body: &str) -> Result<WeatherModel> {
        let parsed: OwCurrentResponse =
            serde_json::from_str(body).context("Failed to parse OpenWeather current JSON")?;

        let weather = parsed
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("OpenWeather response contained no weather conditions"))?;

        // Half-degree readings round to even, so 0.5 and -0.5 both read 0.
        let raw = WeatherValue::from(parsed.main.temp.round_ties_even());
        let temperature: Temperature = match self.units {
            Units::Metric => CelsiusTemperature::rebuild(&raw)?.into(),
            Units::Imperial => FahrenheitTemperature::rebuild(&raw)?.into(),
        };

        Ok(WeatherModel {
            temperature,
            description: WeatherDescription::new(weather.main, weather.description),
            sunrise: unix_to_local(parsed.sys.sunrise)?,
            sunset: unix_to_local(parsed.sys.sunset)?,
            city: parsed.name,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    sys: OwSys,
}

#[async_trait]
impl ExternalWeatherService for OpenWeatherService {
    async fn get_weather(&self, coordinates: Coordinates) -> Result<WeatherModel> {
        info!(
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            units = %self.units,
            "fetching current weather"
        );

        let body = self.fetch_current(coordinates).await?;
        let weather = self.parse(&body)?;
        debug!(?weather, "parsed OpenWeather response");

        Ok(weather)
    }
}

fn unix_to_local(ts: i64) -> Result<DateTime<Local>> {
    DateTime::from_timestamp(ts, 0)
        .map(|utc| utc.with_timezone(&Local))
        .ok_or_else(|| anyhow!("OpenWeather returned an out-of-range timestamp: {ts}"))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
