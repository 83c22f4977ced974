//! Core library for the `weather-tint` CLI.
//!
//! This crate defines:
//! - Drawable weather items and the raw value they are rebuilt from
//! - Color palettes, colorizers and the registry that dispatches on item kind
//! - The formatter and printer that turn a weather model into a report
//! - Collaborators: configuration, coordinates, the OpenWeather service and history
//!
//! It is used by `weather-tint-cli`, but can also be reused by other binaries.

pub mod colorizer;
pub mod config;
pub mod coordinates;
pub mod drawable;
pub mod error;
pub mod formatter;
pub mod history;
pub mod icons;
pub mod model;
pub mod palette;
pub mod printer;
pub mod provider;
pub mod value;

pub use colorizer::{Colorizer, ColorizerRegistry, IconPainter, Painter, TemperaturePainter};
pub use config::Config;
pub use drawable::{
    CelsiusTemperature, Drawable, DrawableItem, FahrenheitTemperature, IconKind, ItemKind,
    Temperature, WeatherIcon,
};
pub use formatter::{DrawMode, WeatherFormatter};
pub use model::{Coordinates, FormattedWeather, WeatherDescription, WeatherModel};
pub use printer::ReportPrinter;
pub use provider::{ExternalWeatherService, OpenWeatherService, Units};
pub use value::WeatherValue;
