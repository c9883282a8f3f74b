/// Running mean and spread estimator
#[derive(Debug, Clone, Default)]
pub(crate) struct Averager {
    count: usize,
    mean: f64,
    m2: f64,
}

impl Averager {
    /// Builds new Averager
    pub fn new() -> Self {
        Self::default()
    }

    /// Push new value into [Averager]
    pub fn add(&mut self, x: f64) {
        self.count += 1;
        let k = self.count as f64;
        let delta = x - self.mean;
        self.mean += delta / k;
        self.m2 += delta * (x - self.mean);
    }

    /// Number of samples
    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean value, None when no sample was pushed
    pub fn mean(&self) -> Option<f64> {
        if self.count > 0 {
            Some(self.mean)
        } else {
            None
        }
    }

    /// Sample (n-1) standard deviation, requires two samples
    pub fn stddev(&self) -> Option<f64> {
        if self.count > 1 {
            Some((self.m2 / (self.count - 1) as f64).sqrt())
        } else {
            None
        }
    }
}

impl FromIterator<f64> for Averager {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut avg = Self::new();
        for x in iter {
            avg.add(x);
        }
        avg
    }
}
