//! Time ordered measurement sequence
use hifitime::Duration;

use crate::{error::Error, prelude::Measurement};

/// [Sequence] of [Measurement]s sorted by time of day.
/// Neighbors are resolved by position within the sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    inner: Vec<Measurement>,
}

impl Sequence {
    /// Sorts this batch of [Measurement]s in chronological order.
    /// Sorting is stable: measurements sharing a timestamp keep their input order.
    pub fn new(mut measurements: Vec<Measurement>) -> Result<Self, Error> {
        if measurements.is_empty() {
            return Err(Error::NotEnoughMeasurements(0));
        }
        measurements.sort_by(|a, b| a.time.cmp(&b.time));
        Ok(Self {
            inner: measurements,
        })
    }

    /// Never zero: [Sequence::new] refuses empty batches
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Measurement> {
        self.inner.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Measurement> {
        self.inner.get(index)
    }

    /// Returns the [Measurement] preceding index
    pub fn previous(&self, index: usize) -> Option<&Measurement> {
        index.checked_sub(1).and_then(|prev| self.inner.get(prev))
    }

    /// Returns the [Measurement] following index
    pub fn next(&self, index: usize) -> Option<&Measurement> {
        self.inner.get(index + 1)
    }

    /// Earliest [Measurement]
    pub fn first(&self) -> &Measurement {
        &self.inner[0]
    }

    /// Latest [Measurement]
    pub fn last(&self) -> &Measurement {
        &self.inner[self.inner.len() - 1]
    }

    /// Time span between first and last [Measurement]
    pub fn span(&self) -> Duration {
        self.last().time - self.first().time
    }
}
