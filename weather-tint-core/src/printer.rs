use std::{fmt::Write as _, io};

use anyhow::{Result, bail};
use chrono::{
    DateTime, Local,
    format::{Item, StrftimeItems},
};

use crate::model::FormattedWeather;

const LABEL_WIDTH: usize = 16;

/// Turns a formatted record into the multi-line terminal report.
#[derive(Debug, Clone)]
pub struct ReportPrinter {
    datetime_fmt: String,
}

impl ReportPrinter {
    /// Fails if `datetime_fmt` is not a valid strftime pattern.
    pub fn new(datetime_fmt: impl Into<String>) -> Result<Self> {
        let datetime_fmt = datetime_fmt.into();
        if StrftimeItems::new(&datetime_fmt).any(|item| matches!(item, Item::Error)) {
            bail!("Invalid datetime format '{datetime_fmt}'");
        }
        Ok(Self { datetime_fmt })
    }

    pub fn render(&self, weather: &FormattedWeather) -> String {
        let rows = [
            ("City:", weather.city.clone()),
            ("Weather:", weather.temperature.clone()),
            ("Description:", weather.description.clone()),
            ("Sunrise:", self.timestamp(&weather.sunrise)),
            ("Sunset:", self.timestamp(&weather.sunset)),
        ];

        let mut report = String::new();
        for (label, value) in rows {
            // Writing into a String cannot fail.
            let _ = writeln!(report, "{label:<width$}{value}", width = LABEL_WIDTH);
        }
        report
    }

    pub fn print(&self, weather: &FormattedWeather, mut out: impl io::Write) -> io::Result<()> {
        out.write_all(self.render(weather).as_bytes())?;
        out.flush()
    }

    fn timestamp(&self, at: &DateTime<Local>) -> String {
        at.format(&self.datetime_fmt).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn formatted() -> FormattedWeather {
        FormattedWeather {
            city: "Moscow".into(),
            temperature: "25\u{2103} \u{1f31e} \u{1b}[0m".into(),
            description: "clear sky".into(),
            sunrise: Local.with_ymd_and_hms(2024, 5, 3, 4, 0, 0).unwrap(),
            sunset: Local.with_ymd_and_hms(2024, 5, 3, 20, 25, 0).unwrap(),
        }
    }

    #[test]
    fn report_has_padded_labels() {
        let report = ReportPrinter::new("%H:%M").unwrap().render(&formatted());
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "City:           Moscow");
        assert_eq!(lines[2], "Description:    clear sky");
        assert_eq!(lines[3], "Sunrise:        04:00");
        assert_eq!(lines[4], "Sunset:         20:25");
        assert!(lines[1].starts_with("Weather:        25\u{2103}"));
    }

    #[test]
    fn print_uses_configured_datetime_format() {
        let mut out = Vec::new();
        ReportPrinter::new("%Y-%m-%d %H:%M").unwrap().print(&formatted(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Sunrise:        2024-05-03 04:00\n"));
    }

    #[test]
    fn invalid_datetime_format_is_rejected() {
        let err = ReportPrinter::new("%H:%Q").unwrap_err();
        assert!(err.to_string().contains("Invalid datetime format"));
    }
}
