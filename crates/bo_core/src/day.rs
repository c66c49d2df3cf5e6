//! Reporting checkpoints.
//!
//! The comparison view offers `DAY1..DAY4, WEEKEND, WEEK1, CLOSING`; the ranking
//! view offers `DAY1..DAY5, WEEK1`. `DayCode` is the union of both. Any other
//! syntactically valid code parses to `Unrecognized` and means "no data for this
//! checkpoint"; only malformed codes are rejected.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

const DAY_CODE_MAX_LEN: usize = 32;

#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum DayCode {
    #[default]
    Day1,
    Day2,
    Day3,
    Day4,
    Day5,
    Weekend,
    Week1,
    Closing,
    /// Well-formed but outside both vocabularies (stored upper-cased).
    Unrecognized(String),
}

/// Checkpoints offered by the comparison view, in display order.
pub const COMPARISON_DAYS: [DayCode; 7] = [
    DayCode::Day1,
    DayCode::Day2,
    DayCode::Day3,
    DayCode::Day4,
    DayCode::Weekend,
    DayCode::Week1,
    DayCode::Closing,
];

/// Checkpoints offered by the ranking view, in display order.
pub const RANKING_DAYS: [DayCode; 6] = [
    DayCode::Day1,
    DayCode::Day2,
    DayCode::Day3,
    DayCode::Day4,
    DayCode::Day5,
    DayCode::Week1,
];

impl DayCode {
    pub fn as_str(&self) -> &str {
        match self {
            DayCode::Day1 => "DAY1",
            DayCode::Day2 => "DAY2",
            DayCode::Day3 => "DAY3",
            DayCode::Day4 => "DAY4",
            DayCode::Day5 => "DAY5",
            DayCode::Weekend => "WEEKEND",
            DayCode::Week1 => "WEEK1",
            DayCode::Closing => "CLOSING",
            DayCode::Unrecognized(s) => s,
        }
    }

    /// False only for `Unrecognized`.
    #[inline]
    pub fn is_known(&self) -> bool {
        !matches!(self, DayCode::Unrecognized(_))
    }

    /// Button label: `DAY3` → `Day 3`, `WEEK1` → `Week 1`; other codes are shown as-is.
    pub fn label(&self) -> String {
        let code = self.as_str();
        let numbered = |n: &&str| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit());
        if let Some(n) = code.strip_prefix("WEEK").filter(numbered) {
            return format!("Week {n}");
        }
        match code.strip_prefix("DAY") {
            Some(n) if !n.is_empty() => format!("Day {n}"),
            _ => code.to_string(),
        }
    }
}

impl fmt::Display for DayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let well_formed = !t.is_empty()
            && t.len() <= DAY_CODE_MAX_LEN
            && t.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
        if !well_formed {
            return Err(ValidationError::BadDayCode(s.to_string()));
        }
        let up = t.to_ascii_uppercase();
        Ok(match up.as_str() {
            "DAY1" => DayCode::Day1,
            "DAY2" => DayCode::Day2,
            "DAY3" => DayCode::Day3,
            "DAY4" => DayCode::Day4,
            "DAY5" => DayCode::Day5,
            "WEEKEND" => DayCode::Weekend,
            "WEEK1" => DayCode::Week1,
            "CLOSING" => DayCode::Closing,
            _ => DayCode::Unrecognized(up),
        })
    }
}

impl TryFrom<String> for DayCode {
    type Error = ValidationError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayCode> for String {
    fn from(value: DayCode) -> String {
        match value {
            DayCode::Unrecognized(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_vocabularies_parse() {
        for d in COMPARISON_DAYS.iter().chain(RANKING_DAYS.iter()) {
            assert_eq!(&d.as_str().parse::<DayCode>().unwrap(), d);
            assert!(d.is_known());
        }
        assert_eq!("week1".parse::<DayCode>().unwrap(), DayCode::Week1);
    }

    #[test]
    fn unknown_but_well_formed_is_not_an_error() {
        let d: DayCode = "day9".parse().unwrap();
        assert_eq!(d, DayCode::Unrecognized("DAY9".into()));
        assert!(!d.is_known());
        assert_eq!(d.to_string(), "DAY9");
    }

    #[test]
    fn malformed_codes_are_rejected() {
        for bad in ["", "  ", "DAY 1", "DAY-1", "x".repeat(33).as_str()] {
            assert!(matches!(bad.parse::<DayCode>(), Err(ValidationError::BadDayCode(_))));
        }
    }

    #[test]
    fn labels() {
        assert_eq!(DayCode::Day3.label(), "Day 3");
        assert_eq!(DayCode::Weekend.label(), "WEEKEND");
        assert_eq!(DayCode::Week1.label(), "Week 1");
        assert_eq!(DayCode::Closing.label(), "CLOSING");
    }
}
