use std::fmt;

/// Raw payload parsed out of a provider response, before it becomes a typed
/// drawable item.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherValue {
    Numeric(f64),
    Literal(String),
}

impl WeatherValue {
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            WeatherValue::Numeric(v) => Some(*v),
            WeatherValue::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            WeatherValue::Numeric(_) => None,
            WeatherValue::Literal(s) => Some(s.as_str()),
        }
    }
}

impl fmt::Display for WeatherValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherValue::Numeric(v) => write!(f, "{v}"),
            WeatherValue::Literal(s) => f.write_str(s),
        }
    }
}

impl From<f64> for WeatherValue {
    fn from(value: f64) -> Self {
        WeatherValue::Numeric(value)
    }
}

impl From<i64> for WeatherValue {
    fn from(value: i64) -> Self {
        WeatherValue::Numeric(value as f64)
    }
}

impl From<&str> for WeatherValue {
    fn from(value: &str) -> Self {
        WeatherValue::Literal(value.to_owned())
    }
}

impl From<String> for WeatherValue {
    fn from(value: String) -> Self {
        WeatherValue::Literal(value)
    }
}

/// Byte payloads are decoded lossily; invalid sequences become U+FFFD.
impl From<&[u8]> for WeatherValue {
    fn from(value: &[u8]) -> Self {
        WeatherValue::Literal(String::from_utf8_lossy(value).into_owned())
    }
}

impl From<Vec<u8>> for WeatherValue {
    fn from(value: Vec<u8>) -> Self {
        WeatherValue::from(value.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_view_only_for_numbers() {
        let v = WeatherValue::from(12.5);
        assert_eq!(v.as_numeric(), Some(12.5));
        assert_eq!(v.as_literal(), None);

        let v = WeatherValue::from(-3_i64);
        assert_eq!(v.as_numeric(), Some(-3.0));
    }

    #[test]
    fn literal_view_from_text_and_bytes() {
        let v = WeatherValue::from("\u{2744}");
        assert_eq!(v.as_literal(), Some("\u{2744}"));
        assert_eq!(v.as_numeric(), None);

        let v = WeatherValue::from("cloud".as_bytes().to_vec());
        assert_eq!(v.as_literal(), Some("cloud"));
    }

    #[test]
    fn display_renders_payload() {
        assert_eq!(WeatherValue::from(7.0).to_string(), "7");
        assert_eq!(WeatherValue::from("rain").to_string(), "rain");
    }
}
