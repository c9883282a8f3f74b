//! Time of day
use crate::error::Error;

use hifitime::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: u64 = 86_400;

/// [TimeOfDay] is an instant within a day, without date component.
/// It is stored as the [Duration] elapsed since midnight, with one second precision.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeOfDay(Duration);

impl TimeOfDay {
    /// Midnight
    pub const MIDNIGHT: Self = Self(Duration::ZERO);

    /// Builds a [TimeOfDay] from hours, minutes and seconds.
    /// Returns None when any field is out of range.
    pub fn from_hms(hours: u8, minutes: u8, seconds: u8) -> Option<Self> {
        if hours > 23 || minutes > 59 || seconds > 59 {
            return None;
        }
        let total = hours as u64 * 3600 + minutes as u64 * 60 + seconds as u64;
        Some(Self(Duration::from_seconds(total as f64)))
    }

    /// Returns total seconds elapsed since midnight
    pub fn seconds(&self) -> u64 {
        self.0.to_seconds().round() as u64
    }

    /// Returns (hours, minutes, seconds)
    pub fn hms(&self) -> (u8, u8, u8) {
        let total = self.seconds();
        (
            (total / 3600) as u8,
            ((total % 3600) / 60) as u8,
            (total % 60) as u8,
        )
    }

    /// Offsets this [TimeOfDay] by given [Duration], wrapping around midnight,
    /// and truncating to the second.
    pub fn offset(&self, dt: Duration) -> Self {
        let total = (self.0 + dt).to_seconds().floor() as i64;
        let wrapped = total.rem_euclid(SECONDS_PER_DAY as i64);
        Self(Duration::from_seconds(wrapped as f64))
    }
}

impl std::ops::Sub for TimeOfDay {
    type Output = Duration;
    fn sub(self, rhs: Self) -> Duration {
        self.0 - rhs.0
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (h, m, s) = self.hms();
        write!(f, "{:02}:{:02}:{:02}", h, m, s)
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let fields = trimmed.split(':').collect::<Vec<_>>();
        if fields.len() != 3 {
            return Err(Error::InvalidTime(s.to_string()));
        }

        let mut hms = [0_u8; 3];
        for (field, value) in fields.iter().zip(hms.iter_mut()) {
            if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidTime(s.to_string()));
            }
            *value = field
                .parse::<u8>()
                .map_err(|_| Error::InvalidTime(s.to_string()))?;
        }

        Self::from_hms(hms[0], hms[1], hms[2]).ok_or(Error::InvalidTime(s.to_string()))
    }
}
