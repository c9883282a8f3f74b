#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

mod combinator;
mod ignore;

pub use combinator::Combinator;
pub use ignore::{IgnoreSlope, Operator};

fn default_ignore_slope() -> IgnoreSlope {
    IgnoreSlope::default()
}

fn default_tolerance() -> f64 {
    10.0
}

fn default_sigma_factor() -> f64 {
    2.0
}

fn default_slope_combinator() -> Combinator {
    Combinator::Or
}

fn default_tolerance_combinator() -> Combinator {
    Combinator::Or
}

/// [Config] of the slope filter. It is passed to each pipeline invocation,
/// there is no shared default state.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// [IgnoreSlope] band, used to reject physically implausible slopes,
    /// whatever the statistical spread of the batch.
    #[cfg_attr(feature = "serde", serde(default = "default_ignore_slope"))]
    pub ignore_slope: IgnoreSlope,

    /// Tolerance (in percent of the accepted mean slope) used
    /// by the refinement pass.
    #[cfg_attr(feature = "serde", serde(default = "default_tolerance"))]
    pub tolerance_percent: f64,

    /// Half width of the statistical acceptance band, in standard deviations.
    #[cfg_attr(feature = "serde", serde(default = "default_sigma_factor"))]
    pub sigma_factor: f64,

    /// How the two slope sides of a measurement are combined
    /// when flagging it as slope OK.
    #[cfg_attr(feature = "serde", serde(default = "default_slope_combinator"))]
    pub slope_combinator: Combinator,

    /// How the two slope sides of a measurement are combined
    /// when flagging it as tolerance OK.
    #[cfg_attr(feature = "serde", serde(default = "default_tolerance_combinator"))]
    pub tolerance_combinator: Combinator,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_slope: default_ignore_slope(),
            tolerance_percent: default_tolerance(),
            sigma_factor: default_sigma_factor(),
            slope_combinator: default_slope_combinator(),
            tolerance_combinator: default_tolerance_combinator(),
        }
    }
}

impl Config {
    /// Copies and returns [Config] with updated [IgnoreSlope] band
    pub fn with_ignore_slope(&self, ignore_slope: IgnoreSlope) -> Self {
        let mut s = *self;
        s.ignore_slope = ignore_slope;
        s
    }

    /// Copies and returns [Config] with updated tolerance (in percent)
    pub fn with_tolerance_percent(&self, tolerance: f64) -> Self {
        let mut s = *self;
        s.tolerance_percent = tolerance;
        s
    }

    /// Copies and returns [Config] with updated statistical band half width
    pub fn with_sigma_factor(&self, sigma_factor: f64) -> Self {
        let mut s = *self;
        s.sigma_factor = sigma_factor;
        s
    }

    /// Copies and returns [Config] with updated slope [Combinator]
    pub fn with_slope_combinator(&self, combinator: Combinator) -> Self {
        let mut s = *self;
        s.slope_combinator = combinator;
        s
    }

    /// Copies and returns [Config] with updated tolerance [Combinator]
    pub fn with_tolerance_combinator(&self, combinator: Combinator) -> Self {
        let mut s = *self;
        s.tolerance_combinator = combinator;
        s
    }

    /// Verifies this [Config] is physically meaningful.
    pub fn validate(&self) -> Result<(), Error> {
        self.ignore_slope.validate()?;

        if !self.tolerance_percent.is_finite() || self.tolerance_percent < 0.0 {
            return Err(Error::InvalidTolerance);
        }

        if !self.sigma_factor.is_finite() || self.sigma_factor <= 0.0 {
            return Err(Error::InvalidSigmaFactor);
        }

        Ok(())
    }
}
