use std::{io, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, Select, Text};
use tracing::info;
use weather_tint_core::{
    ColorizerRegistry, Config, Coordinates, DrawMode, ReportPrinter, Units, WeatherFormatter,
    config::DEFAULT_ENV_FILE,
    coordinates::{CoordinatesSource, FixedCoordinates, WhereamiLocator},
    history::{HistoryFormat, storage_for},
    provider::service_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-tint", version, about = "Current weather, colored for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and display defaults.
    Configure {
        /// API key; prompted for when omitted.
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Show current weather for the given or detected location.
    Show {
        /// Latitude; detected with `whereami` when omitted.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude; detected with `whereami` when omitted.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Round detected coordinates to three decimals.
        #[arg(long)]
        round_coords: bool,

        /// Print without colors.
        #[arg(long)]
        no_color: bool,

        /// Append the report to history: none, plain or json.
        #[arg(long, value_parser = parse_history)]
        history: Option<HistoryFormat>,

        /// Dotenv file overriding the stored configuration.
        #[arg(long, default_value = DEFAULT_ENV_FILE)]
        env_file: PathBuf,
    },
}

fn parse_history(value: &str) -> anyhow::Result<HistoryFormat> {
    HistoryFormat::try_from(value)
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { api_key } => configure(api_key),
            Command::Show { lat, lon, round_coords, no_color, history, env_file } => {
                let mut config = Config::load()?;
                config.apply_env_file(&env_file)?;

                if no_color {
                    config.draw_mode = DrawMode::NoColor;
                }
                if let Some(history) = history {
                    config.history = history;
                }

                let source: Box<dyn CoordinatesSource> = match (lat, lon) {
                    (Some(latitude), Some(longitude)) => {
                        Box::new(FixedCoordinates(Coordinates { latitude, longitude }))
                    }
                    _ => Box::new(WhereamiLocator::new(round_coords)),
                };

                show(&config, source.as_ref()).await
            }
        }
    }
}

async fn show(config: &Config, source: &dyn CoordinatesSource) -> anyhow::Result<()> {
    // Wiring is checked before anything goes over the network.
    let formatter = WeatherFormatter::new(ColorizerRegistry::standard(), config.draw_mode);
    let printer = ReportPrinter::new(config.datetime_fmt.as_str())?;
    let service = service_from_config(config)?;

    let coordinates = source.coordinates().context("Failed to determine coordinates")?;
    let weather = service.get_weather(coordinates).await?;

    if let Some(storage) = storage_for(config.history, config.history_file_path()?) {
        storage.save(&weather)?;
    }

    let formatted = formatter.format(weather)?;
    printer
        .print(&formatted, io::stdout().lock())
        .context("Failed to write weather report")?;

    Ok(())
}

fn configure(api_key: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = match api_key {
        Some(key) => key,
        None => Password::new("OpenWeather API key:")
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?,
    };
    config.set_api_key(api_key.trim().to_string());

    let units = Select::new("Units:", Units::all().to_vec())
        .with_starting_cursor(Units::all().iter().position(|u| *u == config.units).unwrap_or(0))
        .prompt()
        .context("Failed to read units")?;
    config.units = units;

    let lang = Text::new("Description language:")
        .with_default(&config.lang)
        .prompt()
        .context("Failed to read language")?;
    config.lang = lang;

    let colored = Confirm::new("Use colors?")
        .with_default(config.draw_mode == DrawMode::FullColor)
        .prompt()
        .context("Failed to read color preference")?;
    config.draw_mode = if colored { DrawMode::FullColor } else { DrawMode::NoColor };

    config.save()?;
    info!(path = %Config::config_file_path()?.display(), "configuration saved");
    println!("Configuration saved to {}", Config::config_file_path()?.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "weather-tint", "show", "--lat", "-33.87", "--lon", "151.21", "--no-color",
        ])
        .unwrap();

        match cli.command {
            Command::Show { lat, lon, no_color, history, .. } => {
                assert_eq!(lat, Some(-33.87));
                assert_eq!(lon, Some(151.21));
                assert!(no_color);
                assert_eq!(history, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_requires_both_coordinates() {
        assert!(Cli::try_parse_from(["weather-tint", "show", "--lat", "10.5"]).is_err());
    }

    #[test]
    fn history_format_is_validated() {
        let cli = Cli::try_parse_from(["weather-tint", "show", "--history", "json"]).unwrap();
        assert!(matches!(cli.command, Command::Show { history: Some(HistoryFormat::Json), .. }));

        assert!(Cli::try_parse_from(["weather-tint", "show", "--history", "xml"]).is_err());
    }
}
