use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number as JsonNumber;

use crate::InputError;

/// A JSON number held as an exact decimal.
///
/// The source text is kept for rendering, so `1.50` prints as `1.50`.
/// Equality is by decimal value: `1`, `1.0` and `10e-1` are equal, while
/// `9007199254740993` and `9007199254740992` are not.
#[derive(Clone, Debug)]
pub struct Number {
    text: JsonNumber,
    value: BigDecimal,
}

impl Number {
    /// Creates a [`Number`] from a parsed `serde_json` number.
    ///
    /// ```
    /// # use jassert_core::Number;
    /// let big: serde_json::Number = serde_json::from_str("1234567890123456789")?;
    /// let num = Number::from_json_number(big)?;
    /// assert_eq!(num.to_string(), "1234567890123456789");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_json_number(number: JsonNumber) -> Result<Self, InputError> {
        let text = number.to_string();
        let value =
            BigDecimal::from_str(&text).map_err(|_| InputError::InvalidNumber { value: text })?;
        Ok(Self { text: number, value })
    }

    /// Creates a [`Number`] from a float after validating finiteness.
    ///
    /// ```
    /// # use jassert_core::Number;
    /// assert_eq!(Number::from_f64(1.5)?.to_string(), "1.5");
    /// assert!(Number::from_f64(f64::NAN).is_err());
    /// # Ok::<(), jassert_core::InputError>(())
    /// ```
    pub fn from_f64(value: f64) -> Result<Self, InputError> {
        let number = JsonNumber::from_f64(value).ok_or(InputError::NotFinite { value })?;
        Self::from_json_number(number)
    }

    /// Returns the exact decimal value.
    #[must_use]
    pub fn as_decimal(&self) -> &BigDecimal {
        &self.value
    }

    /// Returns the number as written in the source document.
    #[must_use]
    pub fn as_json_number(&self) -> &JsonNumber {
        &self.text
    }

    /// Compares two numbers using the provided absolute tolerance. A zero
    /// tolerance compares exact decimal values.
    ///
    /// ```
    /// # use jassert_core::Number;
    /// let a = Number::from(1);
    /// let b = Number::from_f64(1.05)?;
    /// assert!(!a.equals_with_precision(&b, 0.0));
    /// assert!(a.equals_with_precision(&b, 0.1));
    /// # Ok::<(), jassert_core::InputError>(())
    /// ```
    #[must_use]
    pub fn equals_with_precision(&self, other: &Self, precision: f64) -> bool {
        if self.value == other.value {
            return true;
        }
        if precision == 0.0 {
            return false;
        }
        match tolerance(precision) {
            Some(tolerance) => (&self.value - &other.value).abs() <= tolerance,
            None => false,
        }
    }
}

/// Converts a validated precision into a decimal through its shortest
/// round-trip text, so `0.01` tolerates exactly `0.01`.
fn tolerance(precision: f64) -> Option<BigDecimal> {
    BigDecimal::from_str(&precision.to_string()).ok()
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self { text: JsonNumber::from(value), value: BigDecimal::from(value) }
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Self { text: JsonNumber::from(value), value: BigDecimal::from(value) }
    }
}

impl TryFrom<f64> for Number {
    type Error = InputError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

impl FromStr for Number {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: JsonNumber = serde_json::from_str(s)?;
        Self::from_json_number(number)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.text, f)
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.text.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = JsonNumber::deserialize(deserializer)?;
        Self::from_json_number(number).map_err(serde::de::Error::custom)
    }
}
