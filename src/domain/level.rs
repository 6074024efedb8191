//! Language proficiency levels and their ordering.
//!
//! Levels are compared on the CEFR scale `A1 < A2 < B1 < B2 < C1 < C2`.
//! Level strings that are not CEFR bands fall back to a raw numeric
//! interpretation, which supports scales such as IELTS ("6.5").

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A CEFR proficiency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Cefr {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl Cefr {
    /// Position of the band on the CEFR scale, starting at 0 for `A1`.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::A1 => 0,
            Self::A2 => 1,
            Self::B1 => 2,
            Self::B2 => 3,
            Self::C1 => 4,
            Self::C2 => 5,
        }
    }

    /// The band as a static string, e.g. `"B2"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
            Self::C2 => "C2",
        }
    }
}

impl fmt::Display for Cefr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cefr {
    type Err = UnknownLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Ok(Self::A1),
            "A2" => Ok(Self::A2),
            "B1" => Ok(Self::B1),
            "B2" => Ok(Self::B2),
            "C1" => Ok(Self::C1),
            "C2" => Ok(Self::C2),
            _ => Err(UnknownLevelError(s.to_string())),
        }
    }
}

/// Error returned when a level string is neither a CEFR band nor a number.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown language level '{0}': expected a CEFR band (A1-C2) or a numeric score")]
pub struct UnknownLevelError(String);

/// A parsed language proficiency level.
///
/// Either a CEFR band or a raw numeric score. Mixed comparisons use the CEFR
/// band's scale position against the raw number, matching the behaviour of
/// the upstream profile data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LanguageLevel {
    /// A CEFR band (`A1`..`C2`).
    Cefr(Cefr),
    /// A raw numeric score, e.g. an IELTS band.
    Score(f64),
}

impl LanguageLevel {
    /// Parses a level string.
    ///
    /// CEFR bands are matched case-insensitively; anything else is parsed as
    /// a finite number.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownLevelError`] if the string is neither a CEFR band nor
    /// a finite number.
    pub fn parse(s: &str) -> Result<Self, UnknownLevelError> {
        if let Ok(band) = s.parse::<Cefr>() {
            return Ok(Self::Cefr(band));
        }

        match s.trim().parse::<f64>() {
            Ok(score) if score.is_finite() => Ok(Self::Score(score)),
            _ => Err(UnknownLevelError(s.to_string())),
        }
    }

    /// The level's position on the shared comparison scale.
    #[must_use]
    pub fn rank(self) -> f64 {
        match self {
            Self::Cefr(band) => f64::from(band.rank()),
            Self::Score(score) => score,
        }
    }

    /// Whether a holder of this level meets the `required` level.
    #[must_use]
    pub fn satisfies(self, required: Self) -> bool {
        self.rank() >= required.rank()
    }
}

impl PartialOrd for LanguageLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.rank().partial_cmp(&other.rank())
    }
}

impl FromStr for LanguageLevel {
    type Err = UnknownLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
