//! Calendar month identifiers
//!
//! The ledger and budget table are keyed by month name only (no year). The
//! declaration order of [`Month`] is the calendar order used for every
//! time series.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the twelve calendar months
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in calendar order
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Lowercase key used on the wire and by the tracker server
    pub const fn key(&self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
            Month::July => "july",
            Month::August => "august",
            Month::September => "september",
            Month::October => "october",
            Month::November => "november",
            Month::December => "december",
        }
    }

    /// Capitalized name for display
    pub const fn display_name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Zero-based position in the calendar
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Month number (1-12)
    pub const fn number(&self) -> u32 {
        self.index() as u32 + 1
    }

    /// Get a month from its number (1-12)
    pub fn from_number(number: u32) -> Option<Self> {
        if (1..=12).contains(&number) {
            Some(Self::ALL[number as usize - 1])
        } else {
            None
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error returned when a string is not a month name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthParseError(pub String);

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid month: '{}'", self.0)
    }
}

impl std::error::Error for MonthParseError {}

impl FromStr for Month {
    type Err = MonthParseError;

    /// Accepts full names and three-letter abbreviations in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|month| {
                let key = month.key();
                key == needle || (needle.len() == 3 && key.starts_with(needle.as_str()))
            })
            .ok_or_else(|| MonthParseError(s.to_string()))
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("january".parse::<Month>().unwrap(), Month::January);
        assert_eq!("JANUARY".parse::<Month>().unwrap(), Month::January);
        assert_eq!(" March ".parse::<Month>().unwrap(), Month::March);
        assert_eq!("sep".parse::<Month>().unwrap(), Month::September);
        assert_eq!("Dec".parse::<Month>().unwrap(), Month::December);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("smarch".parse::<Month>().is_err());
        assert!("".parse::<Month>().is_err());
        assert!("ju".parse::<Month>().is_err());
    }

    #[test]
    fn test_calendar_order() {
        assert!(Month::January < Month::December);
        assert_eq!(Month::ALL[0], Month::January);
        assert_eq!(Month::ALL[11], Month::December);
        assert_eq!(Month::May.number(), 5);
        assert_eq!(Month::from_number(12), Some(Month::December));
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(Month::February.to_string(), "February");
        assert_eq!(serde_json::to_string(&Month::February).unwrap(), "\"february\"");
        let parsed: Month = serde_json::from_str("\"February\"").unwrap();
        assert_eq!(parsed, Month::February);
    }
}
