//! Value cell: raw text with typed views parsed on demand.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{IniError, Result};

/// A single stored value.
///
/// The raw text is the only state. Typed accessors parse the trimmed text on
/// every call and never write back, so `to_i64` followed by `as_str` always
/// returns what was stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IniValue {
    raw: String,
}

impl IniValue {
    /// Wrap `raw` as a value. Fails if it contains a line break.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.contains(['\r', '\n']) {
            return Err(IniError::invalid_argument(
                "value",
                format!("{raw:?} contains a line break"),
            ));
        }
        Ok(Self { raw })
    }

    /// Stored text, untrimmed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Stored text with surrounding whitespace removed (the rendered form).
    pub fn trimmed(&self) -> &str {
        self.raw.trim()
    }

    pub fn is_empty(&self) -> bool {
        self.trimmed().is_empty()
    }

    pub fn into_string(self) -> String {
        self.raw
    }

    /// Parse the trimmed text as any `FromStr` type.
    pub fn parse<T: FromStr>(&self) -> Result<T> {
        self.parse_as(std::any::type_name::<T>())
    }

    pub fn to_i64(&self) -> Result<i64> {
        self.parse_as("integer")
    }

    pub fn to_i32(&self) -> Result<i32> {
        self.parse_as("32-bit integer")
    }

    pub fn to_u64(&self) -> Result<u64> {
        self.parse_as("unsigned integer")
    }

    pub fn to_f64(&self) -> Result<f64> {
        self.parse_as("float")
    }

    /// `true`/`false` in any ASCII case, or `1`/`0`.
    pub fn to_bool(&self) -> Result<bool> {
        let text = self.trimmed();
        if text.eq_ignore_ascii_case("true") || text == "1" {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") || text == "0" {
            Ok(false)
        } else {
            Err(self.invalid("boolean"))
        }
    }

    /// Exactly one character after trimming.
    pub fn to_char(&self) -> Result<char> {
        let mut chars = self.trimmed().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(self.invalid("character")),
        }
    }

    fn parse_as<T: FromStr>(&self, target: &'static str) -> Result<T> {
        self.trimmed().parse().map_err(|_| self.invalid(target))
    }

    fn invalid(&self, target: &'static str) -> IniError {
        IniError::InvalidValue {
            raw: self.raw.clone(),
            target,
        }
    }
}

impl fmt::Display for IniValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for IniValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl TryFrom<&str> for IniValue {
    type Error = IniError;

    fn try_from(raw: &str) -> Result<Self> {
        Self::new(raw)
    }
}

impl TryFrom<String> for IniValue {
    type Error = IniError;

    fn try_from(raw: String) -> Result<Self> {
        Self::new(raw)
    }
}

macro_rules! value_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for IniValue {
                fn from(value: $ty) -> Self {
                    // Display output of these types never contains a line break.
                    Self { raw: value.to_string() }
                }
            }
        )*
    };
}

value_from_display!(i32, i64, u32, u64, f64, bool, char);

#[cfg(test)]
mod tests {
    use super::*;

    fn value(raw: &str) -> IniValue {
        IniValue::new(raw).expect("value")
    }

    #[test]
    fn rejects_line_breaks() {
        assert!(IniValue::new("a\nb").is_err());
        assert!(IniValue::new("a\r").is_err());
    }

    #[test]
    fn keeps_raw_whitespace() {
        let v = value("  42 ");
        assert_eq!(v.as_str(), "  42 ");
        assert_eq!(v.trimmed(), "42");
        assert_eq!(v.to_i64().expect("int"), 42);
        assert_eq!(v.as_str(), "  42 ");
    }

    #[test]
    fn typed_views_fail_independently() {
        let v = value("3.5");
        assert!(v.to_i64().is_err());
        assert_eq!(v.to_f64().expect("float"), 3.5);
        assert!(v.to_bool().is_err());
    }

    #[test]
    fn bool_accepts_words_and_digits() {
        assert!(value("TRUE").to_bool().expect("bool"));
        assert!(value("1").to_bool().expect("bool"));
        assert!(!value(" false ").to_bool().expect("bool"));
        assert!(!value("0").to_bool().expect("bool"));
        assert!(value("yes").to_bool().is_err());
    }

    #[test]
    fn invalid_value_reports_target() {
        let err = value("abc").to_u64().expect_err("not a number");
        assert!(matches!(err, IniError::InvalidValue { target: "unsigned integer", .. }));
    }

    #[test]
    fn char_requires_single_character() {
        assert_eq!(value(" x ").to_char().expect("char"), 'x');
        assert!(value("xy").to_char().is_err());
        assert!(value("").to_char().is_err());
    }

    #[test]
    fn generic_parse() {
        let port: u16 = value("8080").parse().expect("port");
        assert_eq!(port, 8080);
    }

    #[test]
    fn typed_writes_render_as_text() {
        assert_eq!(IniValue::from(-7i64).as_str(), "-7");
        assert_eq!(IniValue::from(true).as_str(), "true");
        assert_eq!(IniValue::from(1.5f64).as_str(), "1.5");
    }
}
