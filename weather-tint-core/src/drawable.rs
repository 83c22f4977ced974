//! Weather facts that know how to render themselves.
//!
//! Every drawable type carries an [`ItemKind`], which is the key the
//! colorizer registry dispatches on. The key is the same whether it is taken
//! from the type (`ItemKind::of::<CelsiusTemperature>()`) or from a value
//! (`DrawableItem::kind`).

use std::fmt;

use crate::{error::ValueError, value::WeatherValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    CelsiusTemperature,
    FahrenheitTemperature,
    WeatherIcon,
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::CelsiusTemperature => "CelsiusTemperature",
            ItemKind::FahrenheitTemperature => "FahrenheitTemperature",
            ItemKind::WeatherIcon => "WeatherIcon",
        }
    }

    /// Dispatch key of a drawable type.
    pub const fn of<T: Drawable>() -> ItemKind {
        T::KIND
    }

    pub const fn all() -> &'static [ItemKind] {
        &[
            ItemKind::CelsiusTemperature,
            ItemKind::FahrenheitTemperature,
            ItemKind::WeatherIcon,
        ]
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait Drawable: Sized {
    const KIND: ItemKind;

    fn draw(&self) -> String;

    /// Build a fresh item of this type from a raw provider value.
    fn rebuild(value: &WeatherValue) -> Result<Self, ValueError>;
}

const CELSIUS_SIGN: &str = "\u{2103}";
const FAHRENHEIT_SIGN: &str = "\u{2109}";

fn finite_number(kind: ItemKind, value: &WeatherValue) -> Result<f64, ValueError> {
    let v = value.as_numeric().ok_or_else(|| ValueError::NotNumeric {
        kind,
        got: value.to_string(),
    })?;

    if !v.is_finite() {
        return Err(ValueError::NonFinite { kind, got: v });
    }

    // -0 would otherwise render as "-0".
    Ok(if v == 0.0 { 0.0 } else { v })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelsiusTemperature(f64);

impl CelsiusTemperature {
    pub fn new(celsius: f64) -> Result<Self, ValueError> {
        Self::rebuild(&WeatherValue::from(celsius))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Drawable for CelsiusTemperature {
    const KIND: ItemKind = ItemKind::CelsiusTemperature;

    fn draw(&self) -> String {
        format!("{}{CELSIUS_SIGN}", self.0)
    }

    fn rebuild(value: &WeatherValue) -> Result<Self, ValueError> {
        finite_number(Self::KIND, value).map(Self)
    }
}

/// Holds the Fahrenheit figure as fetched. `value` converts to Celsius for
/// color selection; `draw` keeps showing the original figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FahrenheitTemperature(f64);

impl FahrenheitTemperature {
    pub fn new(fahrenheit: f64) -> Result<Self, ValueError> {
        Self::rebuild(&WeatherValue::from(fahrenheit))
    }

    pub fn fahrenheit(&self) -> f64 {
        self.0
    }

    /// Temperature in Celsius.
    pub fn value(&self) -> f64 {
        (self.0 - 32.0) * 5.0 / 9.0
    }
}

impl Drawable for FahrenheitTemperature {
    const KIND: ItemKind = ItemKind::FahrenheitTemperature;

    fn draw(&self) -> String {
        format!("{}{FAHRENHEIT_SIGN}", self.0)
    }

    fn rebuild(value: &WeatherValue) -> Result<Self, ValueError> {
        finite_number(Self::KIND, value).map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
    Thunderstorm,
    Snowy,
}

impl IconKind {
    pub fn glyph(&self) -> &'static str {
        match self {
            IconKind::Sunny => "\u{1f31e}",
            IconKind::PartlyCloudy => "\u{1f324}",
            IconKind::Cloudy => "\u{1f325}",
            IconKind::Rainy => "\u{1f327}",
            IconKind::Thunderstorm => "\u{26c8}",
            IconKind::Snowy => "\u{2744}",
        }
    }

    pub fn from_glyph(glyph: &str) -> Option<IconKind> {
        Self::all().iter().copied().find(|kind| kind.glyph() == glyph)
    }

    pub const fn all() -> &'static [IconKind] {
        &[
            IconKind::Sunny,
            IconKind::PartlyCloudy,
            IconKind::Cloudy,
            IconKind::Rainy,
            IconKind::Thunderstorm,
            IconKind::Snowy,
        ]
    }
}

/// Weather kind glyph. `WeatherIcon::NONE` stands for "no icon" and draws as
/// an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherIcon(Option<IconKind>);

impl WeatherIcon {
    pub const NONE: WeatherIcon = WeatherIcon(None);

    pub fn new(kind: IconKind) -> Self {
        Self(Some(kind))
    }

    pub fn kind(&self) -> Option<IconKind> {
        self.0
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub fn value(&self) -> &'static str {
        self.0.map_or("", |kind| kind.glyph())
    }
}

impl From<IconKind> for WeatherIcon {
    fn from(kind: IconKind) -> Self {
        Self::new(kind)
    }
}

impl Drawable for WeatherIcon {
    const KIND: ItemKind = ItemKind::WeatherIcon;

    fn draw(&self) -> String {
        self.value().to_owned()
    }

    fn rebuild(value: &WeatherValue) -> Result<Self, ValueError> {
        let glyph = value.as_literal().ok_or_else(|| ValueError::NotLiteral {
            kind: Self::KIND,
            got: value.as_numeric().unwrap_or(f64::NAN),
        })?;

        if glyph.is_empty() {
            return Ok(Self::NONE);
        }

        IconKind::from_glyph(glyph)
            .map(Self::new)
            .ok_or_else(|| ValueError::UnknownIcon(glyph.to_owned()))
    }
}

/// Temperature as carried by the weather model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Temperature {
    Celsius(CelsiusTemperature),
    Fahrenheit(FahrenheitTemperature),
}

impl Temperature {
    pub fn celsius(&self) -> f64 {
        match self {
            Temperature::Celsius(t) => t.value(),
            Temperature::Fahrenheit(t) => t.value(),
        }
    }

    pub fn draw(&self) -> String {
        match self {
            Temperature::Celsius(t) => t.draw(),
            Temperature::Fahrenheit(t) => t.draw(),
        }
    }
}

impl From<CelsiusTemperature> for Temperature {
    fn from(t: CelsiusTemperature) -> Self {
        Temperature::Celsius(t)
    }
}

impl From<FahrenheitTemperature> for Temperature {
    fn from(t: FahrenheitTemperature) -> Self {
        Temperature::Fahrenheit(t)
    }
}

/// Anything a colorizer can paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawableItem {
    Celsius(CelsiusTemperature),
    Fahrenheit(FahrenheitTemperature),
    Icon(WeatherIcon),
}

impl DrawableItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            DrawableItem::Celsius(_) => CelsiusTemperature::KIND,
            DrawableItem::Fahrenheit(_) => FahrenheitTemperature::KIND,
            DrawableItem::Icon(_) => WeatherIcon::KIND,
        }
    }

    pub fn draw(&self) -> String {
        match self {
            DrawableItem::Celsius(t) => t.draw(),
            DrawableItem::Fahrenheit(t) => t.draw(),
            DrawableItem::Icon(icon) => icon.draw(),
        }
    }
}

impl From<Temperature> for DrawableItem {
    fn from(t: Temperature) -> Self {
        match t {
            Temperature::Celsius(t) => DrawableItem::Celsius(t),
            Temperature::Fahrenheit(t) => DrawableItem::Fahrenheit(t),
        }
    }
}

impl From<CelsiusTemperature> for DrawableItem {
    fn from(t: CelsiusTemperature) -> Self {
        DrawableItem::Celsius(t)
    }
}

impl From<FahrenheitTemperature> for DrawableItem {
    fn from(t: FahrenheitTemperature) -> Self {
        DrawableItem::Fahrenheit(t)
    }
}

impl From<WeatherIcon> for DrawableItem {
    fn from(icon: WeatherIcon) -> Self {
        DrawableItem::Icon(icon)
    }
}
