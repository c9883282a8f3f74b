//! Mean aggregator
use hifitime::Duration;
use log::debug;

use crate::{
    averager::Averager,
    cfg::IgnoreSlope,
    prelude::{Config, TimeOfDay},
    tolerance::{Record, ToleranceBand},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [Summary] of a classified sequence.
/// Every statistic is None when no data contributed to it.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Summary {
    /// Mean angle (decimal degrees) of slope OK measurements
    pub final_mean: Option<f64>,
    /// Mean angle (decimal degrees) of tolerance OK measurements
    pub tolerance_mean: Option<f64>,
    /// Mean of the slopes connecting two slope OK measurements (°/s)
    pub mean_accepted_slope: Option<f64>,
    /// Mean of the forward slopes that passed classification (°/s)
    pub mean_slope_to: Option<f64>,
    /// Mean of the backward slopes that passed classification (°/s)
    pub mean_slope_from: Option<f64>,
    /// Mean of every slope lying within the tolerance band (°/s),
    /// whatever the verdict of the measurement it belongs to
    pub mean_tolerance_slope: Option<f64>,
    /// Average time interval between consecutive measurements (s)
    pub average_interval_seconds: Option<f64>,
    /// First time of day + half the total span
    pub midpoint_time: Option<TimeOfDay>,
    /// Number of slope OK measurements
    pub accepted: usize,
    /// Number of tolerance OK measurements
    pub tolerance_accepted: usize,
    /// [IgnoreSlope] band that was used
    pub ignore_slope_used: IgnoreSlope,
    /// Tolerance that was used, in percent
    pub tolerance_used: f64,
}

impl Summary {
    /// Reduces classified, time ordered [Record]s.
    pub fn new(records: &[Record], tolerance: Option<&ToleranceBand>, cfg: &Config) -> Self {
        let final_mean = records
            .iter()
            .filter(|r| r.slope_ok)
            .map(|r| r.degrees)
            .collect::<Averager>();

        let tolerance_mean = records
            .iter()
            .filter(|r| r.tolerance_ok)
            .map(|r| r.degrees)
            .collect::<Averager>();

        let mean_slope_to = records
            .iter()
            .filter(|r| r.slope_to_ok == Some(true))
            .filter_map(|r| r.slope_to)
            .collect::<Averager>();

        let mean_slope_from = records
            .iter()
            .filter(|r| r.slope_from_ok == Some(true))
            .filter_map(|r| r.slope_from)
            .collect::<Averager>();

        let mean_tolerance_slope = match tolerance {
            Some(band) => records
                .iter()
                .flat_map(|r| r.slope_to.into_iter().chain(r.slope_from))
                .filter(|s| band.contains(*s))
                .collect::<Averager>(),
            None => Averager::new(),
        };

        let (average_interval_seconds, midpoint_time) = match (records.first(), records.last()) {
            (Some(first), Some(last)) => {
                let span = last.time - first.time;
                let interval = if records.len() > 1 {
                    Some(span.to_seconds() / (records.len() - 1) as f64)
                } else {
                    None
                };
                let midpoint = first
                    .time
                    .offset(Duration::from_seconds(span.to_seconds() / 2.0));
                (interval, Some(midpoint))
            },
            _ => (None, None),
        };

        let summary = Self {
            final_mean: final_mean.mean(),
            tolerance_mean: tolerance_mean.mean(),
            mean_accepted_slope: tolerance.map(|band| band.mean),
            mean_slope_to: mean_slope_to.mean(),
            mean_slope_from: mean_slope_from.mean(),
            mean_tolerance_slope: mean_tolerance_slope.mean(),
            average_interval_seconds,
            midpoint_time,
            accepted: final_mean.count(),
            tolerance_accepted: tolerance_mean.count(),
            ignore_slope_used: cfg.ignore_slope,
            tolerance_used: cfg.tolerance_percent,
        };

        debug!(
            "accepted {}/{} (tolerance: {}) final mean: {:?}",
            summary.accepted,
            records.len(),
            summary.tolerance_accepted,
            summary.final_mean
        );

        summary
    }
}
