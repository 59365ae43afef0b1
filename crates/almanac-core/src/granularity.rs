//! Time bucket units used for axis labeling and padding.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The scale unit a timeline axis is divided into.
///
/// The names match external configuration strings: the adverbial form
/// (`"monthly"`) is canonical and the bare noun (`"month"`) is accepted as
/// an alias.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Granularity {
    #[serde(rename = "hourly", alias = "hour")]
    Hour,
    #[serde(rename = "daily", alias = "day")]
    Day,
    #[serde(rename = "weekly", alias = "week")]
    Week,
    /// Month granularity (default)
    #[default]
    #[serde(rename = "monthly", alias = "month")]
    Month,
    #[serde(rename = "quarterly", alias = "quarter")]
    Quarter,
    #[serde(rename = "yearly", alias = "year")]
    Year,
}

impl Granularity {
    /// All granularities from finest to coarsest
    pub const ALL: [Granularity; 6] = [
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Quarter,
        Self::Year,
    ];

    /// Returns true for units whose length varies with the calendar
    pub fn is_calendar_based(self) -> bool {
        matches!(self, Self::Month | Self::Quarter | Self::Year)
    }

    /// Number of calendar months in one unit, for calendar-based units
    pub fn months(self) -> Option<u32> {
        match self {
            Self::Month => Some(1),
            Self::Quarter => Some(3),
            Self::Year => Some(12),
            Self::Hour | Self::Day | Self::Week => None,
        }
    }
}

impl FromStr for Granularity {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" | "hourly" => Ok(Self::Hour),
            "day" | "daily" => Ok(Self::Day),
            "week" | "weekly" => Ok(Self::Week),
            "month" | "monthly" => Ok(Self::Month),
            "quarter" | "quarterly" => Ok(Self::Quarter),
            "year" | "yearly" => Ok(Self::Year),
            _ => Err("Unsupported time scale"),
        }
    }
}

impl From<Granularity> for &'static str {
    fn from(val: Granularity) -> Self {
        match val {
            Granularity::Hour => "hourly",
            Granularity::Day => "daily",
            Granularity::Week => "weekly",
            Granularity::Month => "monthly",
            Granularity::Quarter => "quarterly",
            Granularity::Year => "yearly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_both_forms() {
        assert_eq!("daily".parse(), Ok(Granularity::Day));
        assert_eq!("day".parse(), Ok(Granularity::Day));
        assert_eq!("Quarterly".parse(), Ok(Granularity::Quarter));
        assert_eq!(" year ".parse(), Ok(Granularity::Year));
        assert!("fortnightly".parse::<Granularity>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for granularity in Granularity::ALL {
            assert_eq!(granularity.to_string().parse(), Ok(granularity));
        }
    }

    #[test]
    fn test_months() {
        assert_eq!(Granularity::Quarter.months(), Some(3));
        assert_eq!(Granularity::Week.months(), None);
        assert!(Granularity::Year.is_calendar_based());
        assert!(!Granularity::Hour.is_calendar_based());
    }

    #[test]
    fn test_default_is_month() {
        assert_eq!(Granularity::default(), Granularity::Month);
    }
}
