use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::OptionsError;

/// Controls how two arrays are aligned before their elements are compared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayDiff {
    /// Elements are compared index by index; the longer side contributes
    /// trailing additions or removals (default).
    #[default]
    Indexed,
    /// Elements are aligned on their longest common subsequence, so an
    /// inserted or dropped element is reported at its own index instead of
    /// cascading into every following position.
    Lcs,
}

impl fmt::Display for ArrayDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayDiff::Indexed => f.write_str("indexed"),
            ArrayDiff::Lcs => f.write_str("lcs"),
        }
    }
}

impl FromStr for ArrayDiff {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "indexed" | "index" => Ok(Self::Indexed),
            "lcs" => Ok(Self::Lcs),
            other => Err(format!("unknown array diff strategy: {other}")),
        }
    }
}

/// Configuration knobs passed to equality, diff, and assertion operations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffOptions {
    #[serde(default)]
    array_diff: ArrayDiff,
    #[serde(default)]
    precision: f64,
}

impl DiffOptions {
    /// Returns the configured array alignment strategy.
    ///
    /// ```
    /// # use jassert_core::{ArrayDiff, DiffOptions};
    /// let opts = DiffOptions::default().with_array_diff(ArrayDiff::Lcs);
    /// assert_eq!(opts.array_diff(), ArrayDiff::Lcs);
    /// ```
    #[must_use]
    pub fn array_diff(&self) -> ArrayDiff {
        self.array_diff
    }

    /// Returns the numeric equality tolerance.
    ///
    /// ```
    /// # use jassert_core::DiffOptions;
    /// let opts = DiffOptions::default()
    ///     .with_precision(0.1)
    ///     .expect("set precision");
    /// assert!((opts.precision() - 0.1).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Sets the array alignment strategy.
    #[must_use]
    pub fn with_array_diff(mut self, strategy: ArrayDiff) -> Self {
        self.array_diff = strategy;
        self
    }

    /// Sets the numeric precision tolerance.
    ///
    /// ```
    /// # use jassert_core::DiffOptions;
    /// assert!(DiffOptions::default().with_precision(-1.0).is_err());
    /// ```
    pub fn with_precision(mut self, precision: f64) -> Result<Self, OptionsError> {
        self.precision = precision;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), OptionsError> {
        if !self.precision.is_finite() || self.precision < 0.0 {
            return Err(OptionsError::InvalidPrecision { value: self.precision });
        }
        Ok(())
    }
}
