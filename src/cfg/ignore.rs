use crate::prelude::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default ignore threshold, in degrees per second.
/// The apparent rate of altitude change caused by Earth rotation
/// peaks at about 0.0042°/s. The margin covers refraction, parallax
/// (mostly for the Moon) and observer height.
const fn default_threshold() -> f64 {
    0.005
}

/// [Operator] names the condition under which a slope is ignored.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operator {
    /// Slopes steeper than the threshold ('>') are ignored
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = ">"))]
    Above,
    /// Slopes flatter than the threshold ('<') are ignored
    #[cfg_attr(feature = "serde", serde(alias = "<"))]
    Below,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Above => write!(f, ">"),
            Self::Below => write!(f, "<"),
        }
    }
}

/// [IgnoreSlope] band: absolute slope limit (°/s) applied to every slope,
/// whatever the statistical spread of the batch.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IgnoreSlope {
    /// [Operator] that triggers rejection
    pub operator: Operator,
    /// Threshold, in degrees per second
    pub threshold: f64,
}

impl Default for IgnoreSlope {
    fn default() -> Self {
        Self::above(default_threshold())
    }
}

impl IgnoreSlope {
    /// Ignore slopes whose magnitude is larger than threshold (°/s)
    pub fn above(threshold: f64) -> Self {
        Self {
            threshold,
            operator: Operator::Above,
        }
    }

    /// Ignore slopes whose magnitude is smaller than threshold (°/s)
    pub fn below(threshold: f64) -> Self {
        Self {
            threshold,
            operator: Operator::Below,
        }
    }

    /// Returns true when this slope (°/s) is plausible,
    /// that is, does not satisfy the ignore condition.
    pub fn passes(&self, slope: f64) -> bool {
        match self.operator {
            Operator::Above => slope.abs() <= self.threshold,
            Operator::Below => slope.abs() >= self.threshold,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            Err(Error::InvalidIgnoreSlope(self.to_string()))
        } else {
            Ok(())
        }
    }
}

impl std::fmt::Display for IgnoreSlope {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.operator, self.threshold)
    }
}

impl std::str::FromStr for IgnoreSlope {
    type Err = Error;
    /// Parses '>value' or '<value'
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let (operator, threshold) = if let Some(threshold) = trimmed.strip_prefix('>') {
            (Operator::Above, threshold)
        } else if let Some(threshold) = trimmed.strip_prefix('<') {
            (Operator::Below, threshold)
        } else {
            return Err(Error::InvalidIgnoreSlope(s.to_string()));
        };

        let threshold = threshold
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::InvalidIgnoreSlope(s.to_string()))?;

        let ignore = Self {
            operator,
            threshold,
        };

        ignore
            .validate()
            .map_err(|_| Error::InvalidIgnoreSlope(s.to_string()))?;

        Ok(ignore)
    }
}
