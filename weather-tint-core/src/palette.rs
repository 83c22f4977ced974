//! Terminal 256-color palettes for temperatures and weather icons.

use std::fmt;

use crate::{
    drawable::{DrawableItem, IconKind},
    error::PaletteError,
};

/// A code of the 256-color terminal palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u8);

impl Color {
    pub fn code(&self) -> u8 {
        self.0
    }

    /// Bold foreground escape sequence for this color.
    pub fn escape(&self) -> String {
        format!("\u{1b}[1;38;5;{}m", self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub trait Palette: Send + Sync + fmt::Debug {
    fn color_for(&self, item: &DrawableItem) -> Result<Color, PaletteError>;
}

/// Maps a Celsius temperature to a four-step ramp per sign.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemperaturePalette;

impl TemperaturePalette {
    pub const ZERO: u8 = 15;
    pub const COLD: u8 = 51;
    pub const WARM: u8 = 220;

    const STEP: u8 = 6;
    const MAX_SHIFT: u8 = 3;

    /// Number of ramp steps away from the base code, 0..=3.
    pub fn shift(celsius: f64) -> u8 {
        let steps = (celsius.abs() / 10.0).floor();
        if steps >= f64::from(Self::MAX_SHIFT) {
            Self::MAX_SHIFT
        } else {
            steps as u8
        }
    }

    pub fn color_for_celsius(&self, celsius: f64) -> Result<Color, PaletteError> {
        if !celsius.is_finite() {
            return Err(PaletteError::NonFinite(celsius));
        }

        let base = if celsius == 0.0 {
            Self::ZERO
        } else if celsius < 0.0 {
            Self::COLD
        } else {
            Self::WARM
        };

        Ok(Color(base - Self::STEP * Self::shift(celsius)))
    }
}

impl Palette for TemperaturePalette {
    fn color_for(&self, item: &DrawableItem) -> Result<Color, PaletteError> {
        match item {
            DrawableItem::Celsius(t) => self.color_for_celsius(t.value()),
            DrawableItem::Fahrenheit(t) => self.color_for_celsius(t.value()),
            DrawableItem::Icon(_) => Err(PaletteError::Unsupported(item.kind())),
        }
    }
}

/// Fixed color per known icon glyph.
#[derive(Debug, Clone, Copy, Default)]
pub struct IconPalette;

impl IconPalette {
    pub fn color_for_kind(&self, kind: IconKind) -> Color {
        match kind {
            IconKind::Sunny => Color(220),
            IconKind::Cloudy => Color(251),
            IconKind::PartlyCloudy => Color(254),
            IconKind::Rainy => Color(45),
            IconKind::Thunderstorm => Color(246),
            IconKind::Snowy => Color(255),
        }
    }

    pub fn color_for_glyph(&self, glyph: &str) -> Result<Color, PaletteError> {
        IconKind::from_glyph(glyph)
            .map(|kind| self.color_for_kind(kind))
            .ok_or_else(|| PaletteError::UnknownIcon(glyph.to_owned()))
    }
}

impl Palette for IconPalette {
    fn color_for(&self, item: &DrawableItem) -> Result<Color, PaletteError> {
        match item {
            DrawableItem::Icon(icon) => self.color_for_glyph(icon.value()),
            _ => Err(PaletteError::Unsupported(item.kind())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::{CelsiusTemperature, FahrenheitTemperature, WeatherIcon};

    fn code(t: f64) -> u8 {
        TemperaturePalette.color_for_celsius(t).unwrap().code()
    }

    #[test]
    fn zero_is_neutral_base() {
        assert_eq!(code(0.0), TemperaturePalette::ZERO);
        assert_eq!(code(-0.0), TemperaturePalette::ZERO);
    }

    #[test]
    fn shift_grows_per_ten_degrees() {
        assert_eq!(code(5.0), 220);
        assert_eq!(code(10.0), 214);
        assert_eq!(code(25.0), 208);
        assert_eq!(code(-5.0), 51);
        assert_eq!(code(-19.0), 45);
        assert_eq!(code(-29.0), 39);
    }

    #[test]
    fn shift_is_clamped_from_thirty_degrees() {
        for t in [30.0, 31.0, 45.0, 60.0, 1000.0] {
            assert_eq!(TemperaturePalette::shift(t), 3);
            assert_eq!(code(t), code(30.0));
            assert_eq!(code(-t), code(-30.0));
        }
        assert_eq!(code(30.0), 202);
        assert_eq!(code(-30.0), 33);
    }

    #[test]
    fn warm_and_cold_never_collide() {
        let mut t = 0.5;
        while t < 80.0 {
            assert_ne!(code(t), code(-t), "t = {t}");
            t += 0.5;
        }
    }

    #[test]
    fn non_finite_temperature_is_rejected() {
        assert_eq!(
            TemperaturePalette.color_for_celsius(f64::NAN).unwrap_err().to_string(),
            PaletteError::NonFinite(f64::NAN).to_string()
        );
        assert!(TemperaturePalette.color_for_celsius(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn fahrenheit_items_are_colored_by_celsius_value() {
        let item = DrawableItem::from(FahrenheitTemperature::new(77.0).unwrap());
        let celsius = DrawableItem::from(CelsiusTemperature::new(25.0).unwrap());
        assert_eq!(
            TemperaturePalette.color_for(&item).unwrap(),
            TemperaturePalette.color_for(&celsius).unwrap()
        );
    }

    #[test]
    fn icon_palette_is_total_over_known_glyphs() {
        for kind in IconKind::all() {
            assert!(IconPalette.color_for_glyph(kind.glyph()).is_ok());
        }
        assert_eq!(IconPalette.color_for_glyph("\u{1f31e}").unwrap(), Color(220));
        assert_eq!(IconPalette.color_for_glyph("\u{2744}").unwrap(), Color(255));
    }

    #[test]
    fn icon_palette_rejects_unknown_glyphs() {
        assert_eq!(
            IconPalette.color_for_glyph("x").unwrap_err(),
            PaletteError::UnknownIcon("x".into())
        );
        let none = DrawableItem::from(WeatherIcon::NONE);
        assert!(IconPalette.color_for(&none).is_err());
    }

    #[test]
    fn palettes_refuse_foreign_items() {
        let icon = DrawableItem::from(WeatherIcon::new(IconKind::Sunny));
        assert!(matches!(
            TemperaturePalette.color_for(&icon),
            Err(PaletteError::Unsupported(_))
        ));
    }

    #[test]
    fn escape_sequence_format() {
        assert_eq!(Color(208).escape(), "\u{1b}[1;38;5;208m");
    }
}
