#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

// private modules
mod angle;
mod averager;
mod cfg;
mod classifier;
mod error;
mod filter;
mod measurement;
mod sequence;
mod slope;
mod summary;
mod time;
mod tolerance;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::angle::Sexagesimal;
    pub use crate::cfg::{Combinator, Config, IgnoreSlope, Operator};
    pub use crate::classifier::{ClassifiedMeasurement, OutlierClassifier, SlopeStatistics};
    pub use crate::error::Error;
    pub use crate::filter::{Report, SlopeFilter};
    pub use crate::measurement::Measurement;
    pub use crate::sequence::Sequence;
    pub use crate::slope::{slope, slopes, SlopedMeasurement};
    pub use crate::summary::Summary;
    pub use crate::time::TimeOfDay;
    pub use crate::tolerance::{refine, Record, ToleranceBand};
    // re-export
    pub use hifitime::Duration;
}

// pub export
pub use error::Error;
