//! Sexagesimal angle notation
use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Angle expressed as whole degrees and decimal minutes.
/// The sign applies to the whole angle.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sexagesimal {
    /// True when angle is negative
    pub negative: bool,
    /// Whole degrees
    pub degrees: u32,
    /// Decimal minutes, within [0, 60[
    pub minutes: f64,
}

impl Sexagesimal {
    /// Converts decimal degrees to [Sexagesimal], without loss of precision.
    pub fn from_decimal_degrees(value: f64) -> Self {
        let magnitude = value.abs();
        let degrees = magnitude.trunc();
        Self {
            negative: value.is_sign_negative() && value != 0.0,
            degrees: degrees as u32,
            minutes: (magnitude - degrees) * 60.0,
        }
    }

    /// Converts this [Sexagesimal] angle to decimal degrees
    pub fn to_decimal_degrees(&self) -> f64 {
        let magnitude = self.degrees as f64 + self.minutes / 60.0;
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl From<f64> for Sexagesimal {
    fn from(value: f64) -> Self {
        Self::from_decimal_degrees(value)
    }
}

impl From<Sexagesimal> for f64 {
    fn from(angle: Sexagesimal) -> f64 {
        angle.to_decimal_degrees()
    }
}

impl std::fmt::Display for Sexagesimal {
    /// Formats as D°MM.mmm'
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut degrees = self.degrees;
        let mut minutes = (self.minutes * 1000.0).round() / 1000.0;
        if minutes >= 60.0 {
            degrees += 1;
            minutes -= 60.0;
        }
        let sign = if self.negative && (degrees > 0 || minutes > 0.0) {
            "-"
        } else {
            ""
        };
        write!(f, "{}{}°{:06.3}'", sign, degrees, minutes)
    }
}

impl std::str::FromStr for Sexagesimal {
    type Err = Error;
    /// Parses D°MM.m' (trailing apostrophe is optional)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_suffix('\'').unwrap_or(trimmed);

        let (degrees, minutes) = trimmed
            .split_once('°')
            .ok_or(Error::InvalidAngle(s.to_string()))?;

        let degrees = degrees.trim();
        let (negative, degrees) = match degrees.strip_prefix('-') {
            Some(magnitude) => (true, magnitude),
            None => (false, degrees),
        };

        let degrees = degrees
            .parse::<f64>()
            .map_err(|_| Error::InvalidAngle(s.to_string()))?;

        let minutes = minutes
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::InvalidAngle(s.to_string()))?;

        if !degrees.is_finite() || degrees < 0.0 || !(0.0..60.0).contains(&minutes) {
            return Err(Error::InvalidAngle(s.to_string()));
        }

        let magnitude = degrees + minutes / 60.0;
        let value = if negative { -magnitude } else { magnitude };
        Ok(Self::from_decimal_degrees(value))
    }
}
