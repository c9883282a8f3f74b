//! Outlier classifier
use itertools::Itertools;
use log::{debug, trace, warn};

use crate::{
    averager::Averager,
    cfg::{Combinator, IgnoreSlope},
    error::Error,
    prelude::{Config, Measurement},
    slope::SlopedMeasurement,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whole sequence slope statistics.
/// Every slope enters twice: once as the forward slope of its
/// first endpoint, once as the backward slope of its second endpoint.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlopeStatistics {
    /// Number of slope samples
    pub count: usize,
    /// Mean slope (°/s)
    pub mean: f64,
    /// Sample standard deviation (°/s)
    pub stddev: f64,
    /// Statistical acceptance half width (°/s),
    /// never narrower than the rounding floor of the readings.
    pub band: f64,
}

/// Smallest meaningful half width (°/s): slopes of a perfect line still
/// differ by the rounding of the readings they were formed from.
fn rounding_floor(sloped: &[SlopedMeasurement], mean: f64) -> f64 {
    let magnitude = sloped
        .iter()
        .map(|m| m.measurement.degrees.abs())
        .fold(0.0_f64, f64::max);

    let min_dt = sloped
        .iter()
        .tuple_windows()
        .map(|(lhs, rhs)| (rhs.measurement.time - lhs.measurement.time).to_seconds())
        .filter(|dt| *dt > 0.0)
        .fold(f64::INFINITY, f64::min);

    let readings = if min_dt.is_finite() {
        8.0 * f64::EPSILON * magnitude / min_dt
    } else {
        0.0
    };

    readings.max(8.0 * f64::EPSILON * mean.abs())
}

impl SlopeStatistics {
    /// Forms [SlopeStatistics] over all existing slopes.
    /// Requires at least two slope samples.
    pub fn new(sloped: &[SlopedMeasurement], sigma_factor: f64) -> Result<Self, Error> {
        let avg = sloped
            .iter()
            .flat_map(|m| m.slopes())
            .collect::<Averager>();

        let count = avg.count();

        match (avg.mean(), avg.stddev()) {
            (Some(mean), Some(stddev)) => Ok(Self {
                count,
                mean,
                stddev,
                band: (sigma_factor * stddev).max(rounding_floor(sloped, mean)),
            }),
            _ => Err(Error::NotEnoughSlopes(count)),
        }
    }

    /// Returns true when this slope lies within the statistical band
    pub fn contains(&self, slope: f64) -> bool {
        (slope - self.mean).abs() <= self.band
    }
}

/// [Measurement] after outlier classification.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClassifiedMeasurement {
    pub measurement: Measurement,
    pub slope_to: Option<f64>,
    pub slope_from: Option<f64>,
    /// Forward slope verdict, None when there is no forward slope
    pub slope_to_ok: Option<bool>,
    /// Backward slope verdict, None when there is no backward slope
    pub slope_from_ok: Option<bool>,
    /// Combined verdict
    pub slope_ok: bool,
}

/// [OutlierClassifier] flags each measurement's slopes against the
/// statistical band of the whole sequence and the [IgnoreSlope] band.
#[derive(Debug, Clone, Copy)]
pub struct OutlierClassifier {
    statistics: SlopeStatistics,
    ignore_slope: IgnoreSlope,
    combinator: Combinator,
}

impl OutlierClassifier {
    /// Builds the [OutlierClassifier] from the whole sequence.
    pub fn new(sloped: &[SlopedMeasurement], cfg: &Config) -> Result<Self, Error> {
        let statistics = SlopeStatistics::new(sloped, cfg.sigma_factor)?;

        debug!(
            "slope statistics: n={} mean={:.6}°/s stddev={:.6}°/s band={:.6}°/s",
            statistics.count, statistics.mean, statistics.stddev, statistics.band
        );

        Ok(Self {
            statistics,
            ignore_slope: cfg.ignore_slope,
            combinator: cfg.slope_combinator,
        })
    }

    pub fn statistics(&self) -> &SlopeStatistics {
        &self.statistics
    }

    /// Returns true when this slope is both statistically consistent
    /// and physically plausible.
    pub fn within_threshold(&self, slope: f64) -> bool {
        self.statistics.contains(slope) && self.ignore_slope.passes(slope)
    }

    /// Classifies every measurement.
    pub fn classify(&self, sloped: &[SlopedMeasurement]) -> Vec<ClassifiedMeasurement> {
        let classified = sloped
            .iter()
            .map(|m| {
                let slope_to_ok = m.slope_to.map(|s| self.within_threshold(s));
                let slope_from_ok = m.slope_from.map(|s| self.within_threshold(s));
                let slope_ok = self.combinator.combine(slope_to_ok, slope_from_ok);

                trace!(
                    "{}: to={:?} from={:?} slope_ok={}",
                    m.measurement.time,
                    slope_to_ok,
                    slope_from_ok,
                    slope_ok
                );

                ClassifiedMeasurement {
                    measurement: m.measurement,
                    slope_to: m.slope_to,
                    slope_from: m.slope_from,
                    slope_to_ok,
                    slope_from_ok,
                    slope_ok,
                }
            })
            .collect::<Vec<_>>();

        if !classified.iter().any(|m| m.slope_ok) {
            warn!("no measurement passed slope classification");
        }

        classified
    }
}

#[cfg(test)]
mod test {
    use super::{OutlierClassifier, SlopeStatistics};
    use crate::{
        cfg::{Combinator, IgnoreSlope},
        error::Error,
        prelude::{Config, Measurement, TimeOfDay},
        slope::SlopedMeasurement,
    };

    fn sloped(slope_to: Option<f64>, slope_from: Option<f64>) -> SlopedMeasurement {
        SlopedMeasurement {
            measurement: Measurement::new(TimeOfDay::MIDNIGHT, 0.0),
            slope_to,
            slope_from,
        }
    }

    /// Builds slope chain from forward slopes
    fn chain(forward: &[f64]) -> Vec<SlopedMeasurement> {
        (0..=forward.len())
            .map(|i| {
                sloped(
                    forward.get(i).copied(),
                    i.checked_sub(1).map(|prev| forward[prev]),
                )
            })
            .collect()
    }

    #[test]
    fn not_enough_slopes() {
        let single = vec![sloped(None, None)];
        assert_eq!(
            SlopeStatistics::new(&single, 2.0),
            Err(Error::NotEnoughSlopes(0))
        );
        assert!(OutlierClassifier::new(&single, &Config::default()).is_err());
    }

    #[test]
    fn statistics() {
        let stats = SlopeStatistics::new(&chain(&[0.001, 0.003]), 2.0).unwrap();
        assert_eq!(stats.count, 4);
        assert!((stats.mean - 0.002).abs() < 1.0E-12);

        // [1, 1, 3, 3] 1E-3: sample variance 4/3 1E-6
        let expected = (4.0_f64 / 3.0).sqrt() * 1.0E-3;
        assert!((stats.stddev - expected).abs() < 1.0E-12);
        assert!((stats.band - 2.0 * expected).abs() < 1.0E-12);
    }

    #[test]
    fn two_measurements() {
        let sloped = chain(&[0.001]);
        let classifier = OutlierClassifier::new(&sloped, &Config::default()).unwrap();
        assert_eq!(classifier.statistics().stddev, 0.0);

        let classified = classifier.classify(&sloped);
        assert!(classified.iter().all(|m| m.slope_ok));
    }

    #[test]
    fn ignore_band_rejection() {
        // plausible rates, one gross error
        let sloped = chain(&[0.0003, 0.0003, 0.02, -0.02, 0.0003, 0.0003]);
        let classifier = OutlierClassifier::new(&sloped, &Config::default()).unwrap();
        let classified = classifier.classify(&sloped);

        let flags = classified.iter().map(|m| m.slope_ok).collect::<Vec<_>>();
        assert_eq!(flags, vec![true, true, true, false, true, true, true]);

        assert_eq!(classified[2].slope_to_ok, Some(false));
        assert_eq!(classified[2].slope_from_ok, Some(true));
        assert_eq!(classified[0].slope_from_ok, None);
    }

    #[test]
    fn and_combinator_rejects_neighbors() {
        let sloped = chain(&[0.0003, 0.0003, 0.02, -0.02, 0.0003, 0.0003]);
        let cfg = Config::default().with_slope_combinator(Combinator::And);
        let classifier = OutlierClassifier::new(&sloped, &cfg).unwrap();
        let classified = classifier.classify(&sloped);

        let flags = classified.iter().map(|m| m.slope_ok).collect::<Vec<_>>();
        assert_eq!(flags, vec![true, true, false, false, false, true, true]);
    }

    #[test]
    fn below_operator() {
        // flat slopes are ignored
        let sloped = chain(&[0.0001, 0.0001, 0.0001]);
        let cfg = Config::default().with_ignore_slope(IgnoreSlope::below(0.001));
        let classifier = OutlierClassifier::new(&sloped, &cfg).unwrap();
        assert!(classifier.classify(&sloped).iter().all(|m| !m.slope_ok));

        let cfg = Config::default().with_ignore_slope(IgnoreSlope::below(0.00005));
        let classifier = OutlierClassifier::new(&sloped, &cfg).unwrap();
        assert!(classifier.classify(&sloped).iter().all(|m| m.slope_ok));
    }

    #[test]
    fn statistical_rejection() {
        // within ignore band, but statistically inconsistent
        let mut forward = vec![0.001; 20];
        forward[10] = 0.004;
        let sloped = chain(&forward);

        let classifier = OutlierClassifier::new(&sloped, &Config::default()).unwrap();
        assert!(!classifier.within_threshold(0.004));
        assert!(classifier.within_threshold(0.001));

        let classified = classifier.classify(&sloped);
        assert_eq!(classified[10].slope_to_ok, Some(false));
        assert_eq!(classified[11].slope_from_ok, Some(false));
        assert!(classified[10].slope_ok);
        assert!(classified[11].slope_ok);
    }

    #[test]
    fn sigma_factor() {
        // [1, 1, 1, 1, 3, 3] 1E-3: 3E-3 deviates by 1.29σ
        let sloped = chain(&[0.001, 0.001, 0.003]);

        let classifier = OutlierClassifier::new(&sloped, &Config::default()).unwrap();
        assert!(classifier.within_threshold(0.003));
        assert!(classifier.classify(&sloped).iter().all(|m| m.slope_ok));

        let cfg = Config::default().with_sigma_factor(1.0);
        let classifier = OutlierClassifier::new(&sloped, &cfg).unwrap();
        assert!(!classifier.within_threshold(0.003));
        assert!(classifier.within_threshold(0.001));

        let classified = classifier.classify(&sloped);
        assert_eq!(classified[2].slope_to_ok, Some(false));
        assert_eq!(classified[3].slope_from_ok, Some(false));

        let flags = classified.iter().map(|m| m.slope_ok).collect::<Vec<_>>();
        assert_eq!(flags, vec![true, true, true, false]);
    }

    #[test]
    fn constant_slope_floor() {
        // identical slopes: null deviation, the band falls back to the rounding floor
        let stats = SlopeStatistics::new(&chain(&[0.001; 5]), 2.0).unwrap();
        assert_eq!(stats.stddev, 0.0);
        assert!(stats.band > 0.0);
        assert!(stats.band < 1.0E-15);
        assert!(stats.contains(0.001 + 1.0E-18));
    }
}
