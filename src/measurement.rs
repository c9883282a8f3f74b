//! Angular measurement
use crate::{
    angle::Sexagesimal,
    error::Error,
    prelude::TimeOfDay,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Single angular [Measurement], sampled at a given [TimeOfDay].
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    /// Sampling [TimeOfDay]
    pub time: TimeOfDay,
    /// Angle in decimal degrees
    pub degrees: f64,
}

impl Measurement {
    /// Builds a new [Measurement] from decimal degrees
    pub fn new(time: TimeOfDay, degrees: f64) -> Self {
        Self { time, degrees }
    }

    /// Builds a new [Measurement] from a [Sexagesimal] angle
    pub fn from_sexagesimal(time: TimeOfDay, angle: Sexagesimal) -> Self {
        Self::new(time, angle.to_decimal_degrees())
    }

    /// Returns this angle in [Sexagesimal] notation
    pub fn sexagesimal(&self) -> Sexagesimal {
        Sexagesimal::from_decimal_degrees(self.degrees)
    }
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}@{}", self.time, self.sexagesimal())
    }
}

impl std::str::FromStr for Measurement {
    type Err = Error;
    /// Parses HH:MM:SS@D°MM.m'
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (time, angle) = s
            .trim()
            .split_once('@')
            .ok_or(Error::InvalidMeasurement(s.to_string()))?;

        let time =
            TimeOfDay::from_str(time).map_err(|_| Error::InvalidMeasurement(s.to_string()))?;

        let angle =
            Sexagesimal::from_str(angle).map_err(|_| Error::InvalidMeasurement(s.to_string()))?;

        Ok(Self::from_sexagesimal(time, angle))
    }
}

#[cfg(test)]
mod test {
    use super::Measurement;
    use crate::{error::Error, prelude::TimeOfDay};
    use rstest::*;
    use std::str::FromStr;

    #[test]
    fn measurement_parsing() {
        let m = Measurement::from_str("10:00:05@45°00.5'").unwrap();
        assert_eq!(m.time, TimeOfDay::from_hms(10, 0, 5).unwrap());
        assert!((m.degrees - (45.0 + 0.5 / 60.0)).abs() < 1.0E-12);
        assert_eq!(m.to_string(), "10:00:05@45°00.500'");
    }

    #[rstest]
    #[case("10:00:05")]
    #[case("10:00:05 45°00.5'")]
    #[case("10:00@45°00.5'")]
    #[case("10:00:05@45.5")]
    #[case("@")]
    fn invalid_measurement(#[case] desc: &str) {
        let e = Measurement::from_str(desc).unwrap_err();
        assert_eq!(e, Error::InvalidMeasurement(desc.to_string()));
        assert!(e.to_string().contains("HH:MM:SS@00°00.0'"));
    }
}
