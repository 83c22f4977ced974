//! Where the report is for.

use std::{process::Command, sync::LazyLock};

use regex::Regex;
use tracing::debug;

use crate::{error::CoordinatesError, model::Coordinates};

pub trait CoordinatesSource {
    fn coordinates(&self) -> Result<Coordinates, CoordinatesError>;
}

/// Coordinates given up front, e.g. on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedCoordinates(pub Coordinates);

impl CoordinatesSource for FixedCoordinates {
    fn coordinates(&self) -> Result<Coordinates, CoordinatesError> {
        Ok(self.0)
    }
}

/// Asks the `whereami` tool for the current position.
#[derive(Debug, Clone)]
pub struct WhereamiLocator {
    program: String,
    round: bool,
}

impl WhereamiLocator {
    pub const PROGRAM: &'static str = "whereami";
    const ROUND_DECIMALS: u32 = 3;

    pub fn new(round: bool) -> Self {
        Self { program: Self::PROGRAM.to_owned(), round }
    }

    pub fn with_program(program: impl Into<String>, round: bool) -> Self {
        Self { program: program.into(), round }
    }

    fn run(&self) -> Result<Vec<u8>, CoordinatesError> {
        let output = Command::new(&self.program).arg("-r").output().map_err(|source| {
            CoordinatesError::Spawn { command: self.program.clone(), source }
        })?;

        if !output.status.success() {
            return Err(CoordinatesError::ExitStatus {
                command: self.program.clone(),
                status: output.status,
            });
        }

        Ok(output.stdout)
    }
}

impl CoordinatesSource for WhereamiLocator {
    fn coordinates(&self) -> Result<Coordinates, CoordinatesError> {
        let output = String::from_utf8(self.run()?)?;
        let coordinates = parse_coordinates(&output)?;
        debug!(?coordinates, "located");

        Ok(if self.round { coordinates.rounded(Self::ROUND_DECIMALS) } else { coordinates })
    }
}

static LATITUDE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| axis_pattern("latitude"));
static LONGITUDE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| axis_pattern("longitude"));

/// Axis name followed, later on the same line, by a number with at least two decimals.
fn axis_pattern(axis: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"{axis}.*?(?P<value>-?[0-9]{{1,3}}\.[0-9]{{2,}})"))
}

/// Reads `latitude` and `longitude` out of free-form tool output. For each
/// axis the first line naming it and carrying a decimal number wins.
pub fn parse_coordinates(output: &str) -> Result<Coordinates, CoordinatesError> {
    let output = output.trim().to_lowercase();
    let lines: Vec<&str> = output.lines().collect();

    Ok(Coordinates {
        latitude: parse_axis(&lines, "latitude", &LATITUDE)?,
        longitude: parse_axis(&lines, "longitude", &LONGITUDE)?,
    })
}

fn parse_axis(
    lines: &[&str],
    axis: &'static str,
    pattern: &Result<Regex, regex::Error>,
) -> Result<f64, CoordinatesError> {
    let pattern = pattern
        .as_ref()
        .map_err(|source| CoordinatesError::Pattern { axis, source: source.clone() })?;

    let value = lines
        .iter()
        .find_map(|line| pattern.captures(line))
        .and_then(|caps| caps.name("value"))
        .ok_or(CoordinatesError::Missing(axis))?
        .as_str();

    value.parse::<f64>().map_err(|_| CoordinatesError::Invalid {
        axis,
        value: value.to_owned(),
    })
}
