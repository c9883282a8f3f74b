use crate::prelude::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [Combinator] defines how the two slope sides of a measurement
/// (toward its successor, from its predecessor) are merged into
/// a single acceptance flag. Measurements at either end of the sequence
/// only have one side and are always judged on that side alone.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Combinator {
    /// Both existing sides must pass.
    /// A single outlier rejects both of its neighbors.
    #[cfg_attr(feature = "serde", serde(alias = "and", alias = "AND"))]
    And,

    /// One passing side suffices.
    /// A single outlier only rejects itself: its neighbors
    /// are still connected to the rest of the sequence.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "or", alias = "OR"))]
    Or,
}

impl Combinator {
    /// Combines both sides. A side is None when the measurement
    /// has no neighbor in that direction. Returns false when
    /// neither side exists.
    pub fn combine(&self, to: Option<bool>, from: Option<bool>) -> bool {
        match (to, from) {
            (Some(to), Some(from)) => match self {
                Self::And => to && from,
                Self::Or => to || from,
            },
            (Some(side), None) | (None, Some(side)) => side,
            (None, None) => false,
        }
    }
}

impl std::fmt::Display for Combinator {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::And => write!(fmt, "and"),
            Self::Or => write!(fmt, "or"),
        }
    }
}

impl std::str::FromStr for Combinator {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "and" | "&&" => Ok(Self::And),
            "or" | "||" => Ok(Self::Or),
            _ => Err(Error::InvalidCombinator(s.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Combinator;
    use rstest::*;
    use std::str::FromStr;

    #[rstest]
    #[case(Combinator::And, Some(true), Some(true), true)]
    #[case(Combinator::And, Some(true), Some(false), false)]
    #[case(Combinator::And, Some(false), Some(true), false)]
    #[case(Combinator::Or, Some(true), Some(false), true)]
    #[case(Combinator::Or, Some(false), Some(true), true)]
    #[case(Combinator::Or, Some(false), Some(false), false)]
    #[case(Combinator::And, None, Some(true), true)]
    #[case(Combinator::And, Some(false), None, false)]
    #[case(Combinator::Or, None, Some(false), false)]
    #[case(Combinator::Or, None, None, false)]
    #[case(Combinator::And, None, None, false)]
    fn combination(
        #[case] combinator: Combinator,
        #[case] to: Option<bool>,
        #[case] from: Option<bool>,
        #[case] expected: bool,
    ) {
        assert_eq!(combinator.combine(to, from), expected);
    }

    #[test]
    fn combinator_parsing() {
        for (desc, expected) in [
            ("and", Combinator::And),
            ("AND", Combinator::And),
            (" or ", Combinator::Or),
            ("||", Combinator::Or),
        ] {
            assert_eq!(Combinator::from_str(desc).unwrap(), expected);
        }
        assert!(Combinator::from_str("xor").is_err());
        assert_eq!(Combinator::And.to_string(), "and");
    }
}
