//! Tolerance refinement
use log::{debug, trace, warn};

use crate::{
    averager::Averager,
    classifier::ClassifiedMeasurement,
    prelude::{Config, TimeOfDay},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance band, centered on the mean of the accepted slopes.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ToleranceBand {
    /// Number of accepted slopes
    pub count: usize,
    /// Mean accepted slope (°/s)
    pub mean: f64,
    /// Tolerance, in percent
    pub percent: f64,
    /// Half width of the band (°/s)
    pub band: f64,
}

impl ToleranceBand {
    /// Forms the [ToleranceBand] from the forward slopes that connect two
    /// slope OK measurements. Returns None when no such slope exists.
    /// The half width scales with the magnitude of the mean, so that
    /// descending series are refined the same way as ascending ones.
    pub fn new(classified: &[ClassifiedMeasurement], percent: f64) -> Option<Self> {
        let avg = classified
            .iter()
            .enumerate()
            .filter_map(|(index, m)| {
                let next = classified.get(index + 1)?;
                if m.slope_ok && next.slope_ok {
                    m.slope_to
                } else {
                    None
                }
            })
            .collect::<Averager>();

        let mean = avg.mean()?;

        Some(Self {
            mean,
            percent,
            count: avg.count(),
            band: mean.abs() * percent / 100.0,
        })
    }

    /// Returns true when this slope lies within the band
    pub fn contains(&self, slope: f64) -> bool {
        (slope - self.mean).abs() <= self.band
    }
}

/// Classification [Record], final output of the pipeline.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Record {
    /// Sampling [TimeOfDay]
    pub time: TimeOfDay,
    /// Angle in decimal degrees
    pub degrees: f64,
    /// Slope toward the next measurement (°/s)
    pub slope_to: Option<f64>,
    /// Slope from the previous measurement (°/s)
    pub slope_from: Option<f64>,
    /// Forward slope passed outlier classification
    pub slope_to_ok: Option<bool>,
    /// Backward slope passed outlier classification
    pub slope_from_ok: Option<bool>,
    /// Measurement passed outlier classification
    pub slope_ok: bool,
    /// Measurement is slope OK and lies within the tolerance band.
    pub tolerance_ok: bool,
}

/// Refines the classified sequence against the [ToleranceBand].
/// Only slope OK measurements may be tolerance OK.
pub fn refine(
    classified: &[ClassifiedMeasurement],
    cfg: &Config,
) -> (Option<ToleranceBand>, Vec<Record>) {
    let tolerance = ToleranceBand::new(classified, cfg.tolerance_percent);

    match &tolerance {
        Some(band) => debug!(
            "tolerance band: n={} mean={:.6}°/s band={:.6}°/s ({}%)",
            band.count, band.mean, band.band, band.percent
        ),
        None => warn!("no accepted slope: tolerance refinement is not feasible"),
    }

    let records = classified
        .iter()
        .map(|m| {
            let tolerance_ok = match &tolerance {
                Some(band) if m.slope_ok => cfg.tolerance_combinator.combine(
                    m.slope_to.map(|s| band.contains(s)),
                    m.slope_from.map(|s| band.contains(s)),
                ),
                _ => false,
            };

            trace!("{}: tolerance_ok={}", m.measurement.time, tolerance_ok);

            Record {
                time: m.measurement.time,
                degrees: m.measurement.degrees,
                slope_to: m.slope_to,
                slope_from: m.slope_from,
                slope_to_ok: m.slope_to_ok,
                slope_from_ok: m.slope_from_ok,
                slope_ok: m.slope_ok,
                tolerance_ok,
            }
        })
        .collect();

    (tolerance, records)
}

#[cfg(test)]
mod test {
    use super::{refine, ToleranceBand};
    use crate::{
        cfg::Combinator,
        classifier::ClassifiedMeasurement,
        prelude::{Config, Measurement, TimeOfDay},
    };

    fn classified(
        slope_to: Option<f64>,
        slope_from: Option<f64>,
        slope_ok: bool,
    ) -> ClassifiedMeasurement {
        ClassifiedMeasurement {
            measurement: Measurement::new(TimeOfDay::MIDNIGHT, 0.0),
            slope_to,
            slope_from,
            slope_to_ok: slope_to.map(|_| slope_ok),
            slope_from_ok: slope_from.map(|_| slope_ok),
            slope_ok,
        }
    }

    /// Builds slope chain from forward slopes and slope OK flags
    fn chain(forward: &[f64], slope_ok: &[bool]) -> Vec<ClassifiedMeasurement> {
        assert_eq!(forward.len() + 1, slope_ok.len());
        slope_ok
            .iter()
            .enumerate()
            .map(|(i, ok)| {
                classified(
                    forward.get(i).copied(),
                    i.checked_sub(1).map(|prev| forward[prev]),
                    *ok,
                )
            })
            .collect()
    }

    #[test]
    fn chained_acceptance() {
        // only the first slope connects two accepted endpoints
        let sequence = chain(&[0.001, 0.002, 0.003], &[true, true, false, true]);
        let band = ToleranceBand::new(&sequence, 10.0).unwrap();
        assert_eq!(band.count, 1);
        assert_eq!(band.mean, 0.001);
        assert!((band.band - 0.0001).abs() < 1.0E-15);
    }

    #[test]
    fn no_accepted_slope() {
        let sequence = chain(&[0.001, 0.002], &[true, false, true]);
        assert!(ToleranceBand::new(&sequence, 10.0).is_none());

        let (band, records) = refine(&sequence, &Config::default());
        assert!(band.is_none());
        assert!(records.iter().all(|r| !r.tolerance_ok));
        assert_eq!(
            records.iter().map(|r| r.slope_ok).collect::<Vec<_>>(),
            vec![true, false, true]
        );
    }

    #[test]
    fn descending_band() {
        let sequence = chain(&[-0.001, -0.001], &[true, true, true]);
        let band = ToleranceBand::new(&sequence, 10.0).unwrap();
        assert!(band.band > 0.0);
        assert!(band.contains(-0.00105));
        assert!(!band.contains(-0.0012));

        let (_, records) = refine(&sequence, &Config::default());
        assert!(records.iter().all(|r| r.tolerance_ok));
    }

    #[test]
    fn tolerance_implies_slope_ok() {
        let sequence = chain(&[0.001, 0.001, 0.001], &[true, false, true, true]);
        let (_, records) = refine(&sequence, &Config::default());
        for record in records {
            assert!(!record.tolerance_ok || record.slope_ok);
        }
    }

    #[test]
    fn tolerance_combinators() {
        // mean accepted slope is 0.001: 0.0012 lies outside 10%
        let sequence = chain(
            &[0.001, 0.001, 0.0012, 0.0008, 0.001, 0.001],
            &[true; 7],
        );

        let (band, records) = refine(&sequence, &Config::default());
        let band = band.unwrap();
        assert!((band.mean - 0.001).abs() < 1.0E-12);

        let or_flags = records.iter().map(|r| r.tolerance_ok).collect::<Vec<_>>();
        assert_eq!(or_flags, vec![true, true, true, false, true, true, true]);

        let cfg = Config::default().with_tolerance_combinator(Combinator::And);
        let (_, records) = refine(&sequence, &cfg);
        let and_flags = records.iter().map(|r| r.tolerance_ok).collect::<Vec<_>>();
        assert_eq!(and_flags, vec![true, true, false, false, false, true, true]);
    }

    #[test]
    fn null_tolerance() {
        let sequence = chain(&[0.001, 0.001, 0.001], &[true; 4]);
        let cfg = Config::default().with_tolerance_percent(0.0);
        let (band, records) = refine(&sequence, &cfg);
        assert_eq!(band.unwrap().band, 0.0);
        assert!(records.iter().all(|r| r.tolerance_ok));
    }
}
