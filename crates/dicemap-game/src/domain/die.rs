//! Die faces.

use std::fmt;

use dicemap_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A finished die outcome, always in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieFace(u8);

impl DieFace {
    /// Lowest face.
    pub const MIN: u8 = 1;
    /// Highest face.
    pub const MAX: u8 = 6;

    /// The face value.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for DieFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn out_of_range(value: impl fmt::Display) -> DomainError {
    DomainError::InvalidOutcome(format!(
        "{value} is outside {}..={}",
        DieFace::MIN,
        DieFace::MAX
    ))
}

impl TryFrom<u8> for DieFace {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(out_of_range(value))
        }
    }
}

impl TryFrom<i64> for DieFace {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| out_of_range(value))
            .and_then(Self::try_from)
    }
}

impl TryFrom<f64> for DieFace {
    type Error = DomainError;

    /// Accepts only whole numbers; `3.5` or `NaN` are rejected.
    #[allow(clippy::cast_possible_truncation)]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(DomainError::InvalidOutcome(format!(
                "{value} is not a whole number"
            )));
        }
        if value < f64::from(Self::MIN) || value > f64::from(Self::MAX) {
            return Err(out_of_range(value));
        }
        Self::try_from(value as i64)
    }
}

impl From<DieFace> for u8 {
    fn from(face: DieFace) -> Self {
        face.0
    }
}
