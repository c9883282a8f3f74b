//! Slope calculator
use itertools::Itertools;
use log::trace;

use crate::{
    error::Error,
    prelude::{Measurement, Sequence},
};

/// [Measurement] with its adjacent slopes (°/s)
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SlopedMeasurement {
    pub measurement: Measurement,
    /// Rate of change toward the next measurement.
    /// None for the latest measurement.
    pub slope_to: Option<f64>,
    /// Rate of change from the previous measurement.
    /// None for the earliest measurement.
    pub slope_from: Option<f64>,
}

impl SlopedMeasurement {
    /// Iterates over existing slopes
    pub fn slopes(&self) -> impl Iterator<Item = f64> {
        self.slope_to.into_iter().chain(self.slope_from)
    }
}

/// Rate of angular change (°/s) between two time adjacent [Measurement]s.
/// The elapsed time must be strictly positive.
pub fn slope(lhs: &Measurement, rhs: &Measurement) -> Result<f64, Error> {
    let dt = (rhs.time - lhs.time).to_seconds();
    if dt <= 0.0 {
        return Err(Error::NullInterval(rhs.time));
    }
    Ok((rhs.degrees - lhs.degrees) / dt)
}

/// Computes slopes between every adjacent pair of the [Sequence].
/// The forward slope of measurement i and the backward slope
/// of measurement i+1 are the same value.
pub fn slopes(sequence: &Sequence) -> Result<Vec<SlopedMeasurement>, Error> {
    let forward = sequence
        .iter()
        .tuple_windows()
        .map(|(lhs, rhs)| slope(lhs, rhs))
        .collect::<Result<Vec<_>, _>>()?;

    let sloped = sequence
        .iter()
        .enumerate()
        .map(|(index, measurement)| {
            let slope_to = forward.get(index).copied();
            let slope_from = index
                .checked_sub(1)
                .and_then(|prev| forward.get(prev))
                .copied();

            trace!(
                "{} ({:.4}°): to={:?} from={:?}",
                measurement.time,
                measurement.degrees,
                slope_to,
                slope_from
            );

            SlopedMeasurement {
                measurement: *measurement,
                slope_to,
                slope_from,
            }
        })
        .collect();

    Ok(sloped)
}
