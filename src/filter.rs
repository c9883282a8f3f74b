//! Slope filter pipeline
use log::debug;

use crate::{
    classifier::{OutlierClassifier, SlopeStatistics},
    error::Error,
    prelude::{Config, Measurement, Sequence},
    slope::slopes,
    summary::Summary,
    tolerance::{refine, Record, ToleranceBand},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [Report] produced by the [SlopeFilter], for a presentation layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Report {
    /// Time ordered classification [Record]s
    pub records: Vec<Record>,
    /// Whole sequence [SlopeStatistics]
    pub statistics: SlopeStatistics,
    /// [ToleranceBand], None when no slope was accepted
    pub tolerance: Option<ToleranceBand>,
    /// Aggregated [Summary]
    pub summary: Summary,
}

/// [SlopeFilter] computes the slope filtered mean of a batch of measurements.
/// Each [SlopeFilter::resolve] invocation is independent.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct SlopeFilter {
    cfg: Config,
}

impl SlopeFilter {
    /// Builds a new [SlopeFilter], verifying the [Config] beforehand.
    pub fn new(cfg: Config) -> Result<Self, Error> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Sorts, classifies and reduces this batch of [Measurement]s.
    /// Slope classification sees the statistics of the entire batch
    /// before any measurement is flagged. Tolerance refinement only
    /// starts once every measurement has been classified.
    pub fn resolve(&self, measurements: Vec<Measurement>) -> Result<Report, Error> {
        let sequence = Sequence::new(measurements)?;
        debug!(
            "{} measurements from {} to {}",
            sequence.len(),
            sequence.first().time,
            sequence.last().time
        );

        let sloped = slopes(&sequence)?;

        let classifier = OutlierClassifier::new(&sloped, &self.cfg)?;
        let classified = classifier.classify(&sloped);

        let (tolerance, records) = refine(&classified, &self.cfg);

        let summary = Summary::new(&records, tolerance.as_ref(), &self.cfg);

        Ok(Report {
            statistics: *classifier.statistics(),
            tolerance,
            summary,
            records,
        })
    }
}
