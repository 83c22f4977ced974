//! Append-only weather history.

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::model::WeatherModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFormat {
    #[default]
    None,
    Plain,
    Json,
}

impl TryFrom<&str> for HistoryFormat {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "none" => Ok(HistoryFormat::None),
            "plain" => Ok(HistoryFormat::Plain),
            "json" => Ok(HistoryFormat::Json),
            _ => Err(anyhow::anyhow!(
                "Unknown history format '{value}'. Supported formats: none, plain, json."
            )),
        }
    }
}

pub trait WeatherStorage {
    fn save(&self, weather: &WeatherModel) -> Result<()>;
}

/// One-paragraph plain summary of a weather record.
pub fn summary(weather: &WeatherModel) -> String {
    format!(
        "{}, temperature {}, {}\nSunrise: {}\nSunset: {}\n",
        weather.city,
        weather.temperature.draw(),
        weather.description.description,
        weather.sunrise.format("%H:%M"),
        weather.sunset.format("%H:%M"),
    )
}

fn open_append(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create history directory: {}", parent.display())
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open history file: {}", path.display()))
}

/// Appends a timestamp line followed by the summary.
#[derive(Debug, Clone)]
pub struct PlainFileStorage {
    path: PathBuf,
}

impl PlainFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WeatherStorage for PlainFileStorage {
    fn save(&self, weather: &WeatherModel) -> Result<()> {
        let mut file = open_append(&self.path)?;
        writeln!(file, "{}\n{}", Local::now(), summary(weather))
            .with_context(|| format!("Failed to write history file: {}", self.path.display()))?;

        debug!(path = %self.path.display(), "saved plain history record");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: String,
    pub weather: String,
}

/// Appends one JSON object per line.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn read_all(&self) -> Result<Vec<HistoryRecord>> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read history file: {}", self.path.display()))?;

        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(i, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("Invalid history record on line {}", i + 1))
            })
            .collect()
    }
}

impl WeatherStorage for JsonFileStorage {
    fn save(&self, weather: &WeatherModel) -> Result<()> {
        let record = HistoryRecord {
            date: Local::now().to_string(),
            weather: summary(weather),
        };
        let line = serde_json::to_string(&record).context("Failed to serialize history record")?;

        let mut file = open_append(&self.path)?;
        writeln!(file, "{line}")
            .with_context(|| format!("Failed to write history file: {}", self.path.display()))?;

        debug!(path = %self.path.display(), "saved JSON history record");
        Ok(())
    }
}

/// Storage for the configured format, `None` when history is off.
pub fn storage_for(format: HistoryFormat, path: PathBuf) -> Option<Box<dyn WeatherStorage>> {
    match format {
        HistoryFormat::None => None,
        HistoryFormat::Plain => Some(Box::new(PlainFileStorage::new(path))),
        HistoryFormat::Json => Some(Box::new(JsonFileStorage::new(path))),
    }
}
