use thiserror::Error;

use crate::prelude::TimeOfDay;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Measurement token could not be split into time and angle,
    /// or one of its components is not a valid number.
    #[error("invalid format: '{0}'. Expected format is HH:MM:SS@00°00.0'")]
    InvalidMeasurement(String),

    #[error("invalid time of day: '{0}'. Expected format is HH:MM:SS")]
    InvalidTime(String),

    #[error("invalid angle: '{0}'. Expected format is 00°00.0'")]
    InvalidAngle(String),

    /// Ignore slope band must be described as '<value' or '>value',
    /// with a non negative threshold.
    #[error("invalid ignore slope: '{0}'. Expected format is '<0.001' or '>0.001'")]
    InvalidIgnoreSlope(String),

    #[error("tolerance must be a finite, non negative percentage")]
    InvalidTolerance,

    #[error("sigma factor must be a finite, positive number")]
    InvalidSigmaFactor,

    #[error("invalid combinator: '{0}'. Expected 'and' or 'or'")]
    InvalidCombinator(String),

    /// Empty measurement batch.
    #[error("not enough measurements ({0})")]
    NotEnoughMeasurements(usize),

    /// Slope statistics require at least two slope samples.
    /// This happens when a single measurement was proposed.
    #[error("not enough slopes to form statistics ({0}, need at least 2)")]
    NotEnoughSlopes(usize),

    /// Two time adjacent measurements were sampled at the same instant:
    /// the rate of change in between is undefined.
    #[error("null time interval: duplicate measurement at {0}")]
    NullInterval(TimeOfDay),
}
