use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    colorizer::ColorizerRegistry,
    drawable::{Drawable, DrawableItem, ItemKind, WeatherIcon},
    error::FormatError,
    icons::icon_for,
    model::{FormattedWeather, WeatherModel},
};

pub const RESET: &str = "\u{1b}[0m";

/// Rendering mode, chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawMode {
    #[default]
    #[serde(rename = "FULLCOLOR", alias = "fullcolor")]
    FullColor,
    #[serde(rename = "NOCOLOR", alias = "nocolor")]
    NoColor,
}

impl DrawMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawMode::FullColor => "FULLCOLOR",
            DrawMode::NoColor => "NOCOLOR",
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrawMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FULLCOLOR" => Ok(DrawMode::FullColor),
            "NOCOLOR" => Ok(DrawMode::NoColor),
            _ => Err(anyhow::anyhow!(
                "Unknown draw mode '{s}'. Supported modes: FULLCOLOR, NOCOLOR."
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherFormatter {
    registry: ColorizerRegistry,
    mode: DrawMode,
}

impl WeatherFormatter {
    pub fn new(registry: ColorizerRegistry, mode: DrawMode) -> Self {
        Self { registry, mode }
    }

    /// Fails only when the registry lacks a colorizer for one of the items,
    /// or a palette rejects the temperature.
    pub fn format(&self, weather: WeatherModel) -> Result<FormattedWeather, FormatError> {
        let icon = icon_for(&weather.description);
        debug!(
            main = %weather.description.main,
            description = %weather.description.description,
            icon = icon.value(),
            "resolved weather icon"
        );

        let temperature = DrawableItem::from(weather.temperature);
        let parts = match self.mode {
            DrawMode::FullColor => [self.colorize(&temperature)?, self.colorize_icon(icon)?],
            DrawMode::NoColor => [self.monochrome(&temperature)?, icon.draw()],
        };

        Ok(FormattedWeather {
            city: weather.city,
            temperature: compose(parts),
            description: weather.description.description,
            sunrise: weather.sunrise,
            sunset: weather.sunset,
        })
    }

    fn colorize(&self, item: &DrawableItem) -> Result<String, FormatError> {
        let colorizer = self.registry.lookup(item)?;
        Ok(colorizer.paint_colored(item)?)
    }

    // The "no icon" sentinel has no color of its own, but the icon colorizer
    // must still be subscribed.
    fn colorize_icon(&self, icon: WeatherIcon) -> Result<String, FormatError> {
        let colorizer = self.registry.lookup_kind(ItemKind::of::<WeatherIcon>())?;
        if icon.is_none() {
            return Ok(icon.draw());
        }
        Ok(colorizer.paint_colored(&DrawableItem::from(icon))?)
    }

    fn monochrome(&self, item: &DrawableItem) -> Result<String, FormatError> {
        let colorizer = self.registry.lookup(item)?;
        Ok(colorizer.paint_plain(item))
    }
}

fn compose(parts: [String; 2]) -> String {
    let [temperature, icon] = parts;
    [temperature.as_str(), icon.as_str(), RESET].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        colorizer::TemperaturePainter,
        drawable::{CelsiusTemperature, FahrenheitTemperature, Temperature},
        error::RegistryError,
        model::WeatherDescription,
        palette::TemperaturePalette,
    };
    use chrono::{Local, TimeZone};
    use std::sync::Arc;

    fn weather(celsius: f64, main: &str, detail: &str) -> WeatherModel {
        weather_with(CelsiusTemperature::new(celsius).unwrap().into(), main, detail)
    }

    fn weather_with(temperature: Temperature, main: &str, detail: &str) -> WeatherModel {
        WeatherModel {
            temperature,
            description: WeatherDescription::new(main, detail),
            sunrise: Local.with_ymd_and_hms(2024, 5, 3, 4, 0, 0).unwrap(),
            sunset: Local.with_ymd_and_hms(2024, 5, 3, 20, 25, 0).unwrap(),
            city: "Moscow".into(),
        }
    }

    fn formatter(mode: DrawMode) -> WeatherFormatter {
        WeatherFormatter::new(ColorizerRegistry::standard(), mode)
    }

    #[test]
    fn full_color_clear_sky() {
        let out = formatter(DrawMode::FullColor).format(weather(25.0, "Clear", "")).unwrap();

        let warm = TemperaturePalette::WARM - 12;
        let expected = format!(
            "\u{1b}[1;38;5;{warm}m25\u{2103} \u{1b}[1;38;5;220m\u{1f31e} {RESET}"
        );
        assert_eq!(out.temperature, expected);
    }

    #[test]
    fn few_clouds_use_partly_cloudy_icon() {
        let out = formatter(DrawMode::NoColor)
            .format(weather(12.0, "Clouds", "few clouds"))
            .unwrap();
        assert_eq!(out.temperature, format!("12\u{2103} \u{1f324} {RESET}"));
        assert_eq!(out.description, "few clouds");
    }

    #[test]
    fn unknown_category_renders_without_icon() {
        let out = formatter(DrawMode::FullColor).format(weather(-3.0, "Fog", "mist")).unwrap();
        assert_eq!(out.temperature, format!("\u{1b}[1;38;5;51m-3\u{2103}  {RESET}"));

        let out = formatter(DrawMode::NoColor).format(weather(-3.0, "Fog", "mist")).unwrap();
        assert_eq!(out.temperature, format!("-3\u{2103}  {RESET}"));
    }

    #[test]
    fn no_color_has_only_trailing_reset() {
        let out = formatter(DrawMode::NoColor).format(weather(25.0, "Clear", "")).unwrap();
        assert_eq!(out.temperature, format!("25\u{2103} \u{1f31e} {RESET}"));
        assert_eq!(out.temperature.matches('\u{1b}').count(), 1);
        assert!(out.temperature.ends_with(RESET));
    }

    #[test]
    fn other_fields_pass_through() {
        let model = weather(1.0, "Rain", "light rain");
        let out = formatter(DrawMode::NoColor).format(model.clone()).unwrap();
        assert_eq!(out.city, model.city);
        assert_eq!(out.description, "light rain");
        assert_eq!(out.sunrise, model.sunrise);
        assert_eq!(out.sunset, model.sunset);
    }

    #[test]
    fn fahrenheit_colored_by_celsius_drawn_in_fahrenheit() {
        let temperature = FahrenheitTemperature::new(77.0).unwrap().into();
        let out = formatter(DrawMode::FullColor)
            .format(weather_with(temperature, "Snow", ""))
            .unwrap();
        assert!(out.temperature.starts_with("\u{1b}[1;38;5;208m77\u{2109} "));
    }

    #[test]
    fn missing_subscription_is_an_error_in_both_modes() {
        let registry = ColorizerRegistry::builder().build();
        for mode in [DrawMode::FullColor, DrawMode::NoColor] {
            let err = WeatherFormatter::new(registry.clone(), mode)
                .format(weather(5.0, "Clear", ""))
                .unwrap_err();
            assert_eq!(
                err,
                FormatError::Registry(RegistryError::Unregistered(ItemKind::CelsiusTemperature))
            );
        }
    }

    #[test]
    fn missing_icon_subscription_fails_whatever_the_weather() {
        let registry = ColorizerRegistry::builder()
            .subscribe::<CelsiusTemperature>(Arc::new(TemperaturePainter::default()))
            .build();
        let formatter = WeatherFormatter::new(registry, DrawMode::FullColor);

        for main in ["Fog", "Clear"] {
            let err = formatter.format(weather(5.0, main, "")).unwrap_err();
            assert_eq!(
                err,
                FormatError::Registry(RegistryError::Unregistered(ItemKind::WeatherIcon)),
                "main = {main}"
            );
        }
    }

    #[test]
    fn draw_mode_parses_case_insensitively() {
        assert_eq!("fullcolor".parse::<DrawMode>().unwrap(), DrawMode::FullColor);
        assert_eq!(" NOCOLOR ".parse::<DrawMode>().unwrap(), DrawMode::NoColor);
        assert!("sepia".parse::<DrawMode>().is_err());
    }
}
