//! OpenWeather condition -> icon table.

use crate::{
    drawable::{IconKind, WeatherIcon},
    model::WeatherDescription,
};

const ICONS: &[((&str, &str), IconKind)] = &[
    (("Thunderstorm", ""), IconKind::Thunderstorm),
    (("Drizzle", ""), IconKind::Rainy),
    (("Rain", ""), IconKind::Rainy),
    (("Snow", ""), IconKind::Snowy),
    (("Clear", ""), IconKind::Sunny),
    (("Clouds", "few clouds"), IconKind::PartlyCloudy),
    (("Clouds", ""), IconKind::Cloudy),
];

fn find(main: &str, detail: &str) -> Option<IconKind> {
    ICONS
        .iter()
        .find(|((m, d), _)| *m == main && *d == detail)
        .map(|(_, kind)| *kind)
}

/// Icon for a description: exact `(main, description)` match first, then the
/// category alone, else [`WeatherIcon::NONE`].
pub fn icon_for(description: &WeatherDescription) -> WeatherIcon {
    find(&description.main, &description.description)
        .or_else(|| find(&description.main, ""))
        .map_or(WeatherIcon::NONE, WeatherIcon::new)
}
