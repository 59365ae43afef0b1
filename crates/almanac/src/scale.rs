//! Time-scale normalization.
//!
//! [`calculate_scale`] snaps a date range to whole units of a
//! [`Granularity`], pads it, and produces the labels and tick dates an axis
//! needs. The resulting [`ScaleInfo`] is computed once per layout pass and
//! never modified.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use log::{debug, warn};
use serde::Serialize;

use almanac_core::granularity::Granularity;

/// A normalized, padded time range with its axis annotations.
///
/// `unit_labels` and `major_ticks` always have the same length: one entry
/// per unit boundary from `start` to `end` inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleInfo {
    granularity: Granularity,
    start: NaiveDateTime,
    end: NaiveDateTime,
    total_units: u32,
    unit_labels: Vec<String>,
    major_ticks: Vec<NaiveDateTime>,
    minor_ticks: Vec<NaiveDateTime>,
}

impl ScaleInfo {
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Padded start of the range, on a unit boundary
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Padded end of the range, on a unit boundary
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Calendar-aware number of whole units between `start` and `end`
    pub fn total_units(&self) -> u32 {
        self.total_units
    }

    pub fn unit_labels(&self) -> &[String] {
        &self.unit_labels
    }

    pub fn major_ticks(&self) -> &[NaiveDateTime] {
        &self.major_ticks
    }

    pub fn minor_ticks(&self) -> &[NaiveDateTime] {
        &self.minor_ticks
    }

    /// Major ticks paired with their labels
    pub fn labeled_ticks(&self) -> impl Iterator<Item = (NaiveDateTime, &str)> {
        self.major_ticks
            .iter()
            .copied()
            .zip(self.unit_labels.iter().map(String::as_str))
    }
}

/// Computes the scale for a date range.
///
/// Reversed input is swapped. Both ends are snapped down to unit
/// boundaries and padded by `padding_units` on each side. The result always
/// spans at least one unit and always contains the input range.
///
/// # Examples
///
/// ```
/// # use almanac::scale::calculate_scale;
/// # use almanac::Granularity;
/// use chrono::NaiveDate;
///
/// let day = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let scale = calculate_scale(day(1, 1), day(12, 1), Granularity::Month, 1);
///
/// assert_eq!(scale.start(), NaiveDate::from_ymd_opt(2023, 12, 1).unwrap().and_hms_opt(0, 0, 0).unwrap());
/// assert_eq!(scale.end(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap());
/// assert_eq!(scale.total_units(), 13);
/// assert_eq!(scale.unit_labels().first().map(String::as_str), Some("Dec 2023"));
/// ```
pub fn calculate_scale(
    start: NaiveDateTime,
    end: NaiveDateTime,
    granularity: Granularity,
    padding_units: u32,
) -> ScaleInfo {
    let (start, end) = if end < start { (end, start) } else { (start, end) };
    let padding = i64::from(padding_units);

    let floor_start = floor(start, granularity);
    let floor_end = floor(end, granularity);

    let padded_start = add_units(floor_start, granularity, -padding).unwrap_or(floor_start);
    let mut padded_end = add_units(floor_end, granularity, padding).unwrap_or(end);

    if padded_end < end || padded_end <= padded_start {
        padded_end = add_units(padded_end, granularity, 1).unwrap_or(end);
    }
    if padded_end < end {
        warn!(granularity:%; "Scale range saturated at the calendar limit");
        padded_end = end;
    }

    let total_units = unit_count(padded_start, padded_end, granularity);

    let mut unit_labels = Vec::new();
    let mut major_ticks = Vec::new();
    let mut minor_ticks = Vec::new();
    let mut current = padded_start;
    for _ in 0..=total_units {
        unit_labels.push(label(current, granularity));
        major_ticks.push(current);
        minor_ticks.extend(
            minor_offsets(current, granularity)
                .into_iter()
                .filter(|tick| (padded_start..=padded_end).contains(tick)),
        );
        match add_units(current, granularity, 1) {
            Some(next) => current = next,
            None => break,
        }
    }

    debug!(
        granularity:%,
        total_units,
        major_ticks = major_ticks.len(),
        minor_ticks = minor_ticks.len();
        "Scale calculated"
    );

    ScaleInfo {
        granularity,
        start: padded_start,
        end: padded_end,
        total_units,
        unit_labels,
        major_ticks,
        minor_ticks,
    }
}

/// Snaps a date down to the start of its unit.
///
/// Weeks start on Monday.
pub fn floor(date: NaiveDateTime, granularity: Granularity) -> NaiveDateTime {
    let day = date.date();
    let snapped = match granularity {
        Granularity::Hour => {
            let hour = NaiveTime::from_hms_opt(date.hour(), 0, 0).unwrap_or(NaiveTime::MIN);
            return day.and_time(hour);
        }
        Granularity::Day => Some(day),
        Granularity::Week => {
            day.checked_sub_days(Days::new(u64::from(day.weekday().num_days_from_monday())))
        }
        Granularity::Month => NaiveDate::from_ymd_opt(day.year(), day.month(), 1),
        Granularity::Quarter => {
            let first_month = (day.month0() / 3) * 3 + 1;
            NaiveDate::from_ymd_opt(day.year(), first_month, 1)
        }
        Granularity::Year => NaiveDate::from_ymd_opt(day.year(), 1, 1),
    };
    snapped.unwrap_or(day).and_time(NaiveTime::MIN)
}

/// Moves a date by `units` whole units, backwards when negative.
///
/// Hours, days and weeks are fixed durations; months, quarters and years
/// follow the calendar. Returns `None` outside the representable range.
pub fn add_units(date: NaiveDateTime, granularity: Granularity, units: i64) -> Option<NaiveDateTime> {
    let delta = match granularity {
        Granularity::Hour => TimeDelta::try_hours(units)?,
        Granularity::Day => TimeDelta::try_days(units)?,
        Granularity::Week => TimeDelta::try_weeks(units)?,
        Granularity::Month | Granularity::Quarter | Granularity::Year => {
            let per_unit = i64::from(granularity.months().unwrap_or(1));
            let months = u32::try_from(units.checked_mul(per_unit)?.unsigned_abs()).ok()?;
            return if units >= 0 {
                date.checked_add_months(Months::new(months))
            } else {
                date.checked_sub_months(Months::new(months))
            };
        }
    };
    date.checked_add_signed(delta)
}

/// Calendar-aware unit count between two dates, never negative
fn unit_count(start: NaiveDateTime, end: NaiveDateTime, granularity: Granularity) -> u32 {
    let elapsed = end - start;
    let months = i64::from(end.year() - start.year()) * 12 + i64::from(end.month())
        - i64::from(start.month());

    let units = match granularity {
        Granularity::Hour => elapsed.num_hours(),
        Granularity::Day => elapsed.num_days(),
        Granularity::Week => elapsed.num_days() / 7,
        Granularity::Month => months,
        Granularity::Quarter => months / 3,
        Granularity::Year => i64::from(end.year() - start.year()),
    };
    u32::try_from(units.max(0)).unwrap_or(u32::MAX)
}

fn label(date: NaiveDateTime, granularity: Granularity) -> String {
    match granularity {
        Granularity::Hour => date.format("%H:%M").to_string(),
        Granularity::Day => date.format("%b %d").to_string(),
        Granularity::Week => format!("W{:02}", date.iso_week().week()),
        Granularity::Month => date.format("%b %Y").to_string(),
        Granularity::Quarter => format!("Q{} {}", date.month0() / 3 + 1, date.year()),
        Granularity::Year => date.year().to_string(),
    }
}

/// Sub-unit tick dates following a unit boundary
fn minor_offsets(boundary: NaiveDateTime, granularity: Granularity) -> Vec<NaiveDateTime> {
    let shifted = |delta: Option<TimeDelta>| delta.and_then(|d| boundary.checked_add_signed(d));
    let months_later = |months: u32| boundary.checked_add_months(Months::new(months));

    match granularity {
        Granularity::Hour => shifted(TimeDelta::try_minutes(30)).into_iter().collect(),
        Granularity::Day => shifted(TimeDelta::try_hours(12)).into_iter().collect(),
        Granularity::Week => (1..7)
            .filter_map(|days| shifted(TimeDelta::try_days(days)))
            .collect(),
        Granularity::Month => shifted(TimeDelta::try_days(15)).into_iter().collect(),
        Granularity::Quarter => [1, 2].into_iter().filter_map(months_later).collect(),
        Granularity::Year => [3, 6, 9].into_iter().filter_map(months_later).collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        at(y, m, d, 0, 0)
    }

    #[test]
    fn test_floor_each_granularity() {
        let date = at(2024, 5, 15, 13, 45); // a Wednesday
        assert_eq!(floor(date, Granularity::Hour), at(2024, 5, 15, 13, 0));
        assert_eq!(floor(date, Granularity::Day), day(2024, 5, 15));
        assert_eq!(floor(date, Granularity::Week), day(2024, 5, 13));
        assert_eq!(floor(date, Granularity::Month), day(2024, 5, 1));
        assert_eq!(floor(date, Granularity::Quarter), day(2024, 4, 1));
        assert_eq!(floor(date, Granularity::Year), day(2024, 1, 1));
    }

    #[test]
    fn test_floor_week_on_sunday() {
        let sunday = day(2024, 5, 19);
        assert_eq!(sunday.weekday(), Weekday::Sun);
        assert_eq!(floor(sunday, Granularity::Week), day(2024, 5, 13));
    }

    #[test]
    fn test_add_units_calendar_aware() {
        assert_eq!(
            add_units(day(2024, 1, 1), Granularity::Month, 1),
            Some(day(2024, 2, 1))
        );
        assert_eq!(
            add_units(day(2024, 1, 1), Granularity::Quarter, -1),
            Some(day(2023, 10, 1))
        );
        assert_eq!(
            add_units(day(2024, 2, 29), Granularity::Year, 1),
            Some(day(2025, 2, 28))
        );
        assert_eq!(
            add_units(day(2024, 3, 9), Granularity::Week, 2),
            Some(day(2024, 3, 23))
        );
    }

    #[test]
    fn test_scenario_monthly_year() {
        let scale = calculate_scale(day(2024, 1, 1), day(2024, 12, 1), Granularity::Month, 1);

        assert!(scale.start() <= day(2024, 1, 1));
        assert!(scale.end() >= day(2024, 12, 1));
        assert!(scale.unit_labels().len() >= 13);
        assert_eq!(scale.unit_labels().len(), scale.major_ticks().len());
        assert_eq!(scale.unit_labels()[1], "Jan 2024");
    }

    #[test]
    fn test_equal_dates_still_span() {
        let date = at(2024, 6, 10, 8, 0);
        for granularity in Granularity::ALL {
            let scale = calculate_scale(date, date, granularity, 0);
            assert!(scale.start() <= date, "{granularity}");
            assert!(scale.end() > date, "{granularity}");
            assert!(scale.total_units() >= 1, "{granularity}");
        }
    }

    #[test]
    fn test_zero_padding_on_boundary() {
        let scale = calculate_scale(day(2024, 1, 1), day(2024, 1, 1), Granularity::Day, 0);
        assert_eq!(scale.start(), day(2024, 1, 1));
        assert_eq!(scale.end(), day(2024, 1, 2));
        assert_eq!(scale.total_units(), 1);
    }

    #[test]
    fn test_zero_padding_rounds_end_up() {
        let scale = calculate_scale(day(2024, 1, 10), day(2024, 3, 10), Granularity::Month, 0);
        assert_eq!(scale.start(), day(2024, 1, 1));
        assert_eq!(scale.end(), day(2024, 4, 1));
        assert_eq!(scale.total_units(), 3);
    }

    #[test]
    fn test_reversed_input_swapped() {
        let forward = calculate_scale(day(2024, 1, 1), day(2024, 6, 1), Granularity::Month, 1);
        let reversed = calculate_scale(day(2024, 6, 1), day(2024, 1, 1), Granularity::Month, 1);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_labels_per_granularity() {
        let hourly = calculate_scale(at(2024, 1, 1, 9, 10), at(2024, 1, 1, 11, 0), Granularity::Hour, 1);
        assert_eq!(hourly.unit_labels()[0], "08:00");

        let daily = calculate_scale(day(2024, 3, 5), day(2024, 3, 7), Granularity::Day, 1);
        assert_eq!(daily.unit_labels()[0], "Mar 04");

        let weekly = calculate_scale(day(2024, 1, 10), day(2024, 1, 20), Granularity::Week, 1);
        assert_eq!(weekly.unit_labels()[0], "W01");

        let quarterly = calculate_scale(day(2024, 5, 1), day(2024, 8, 1), Granularity::Quarter, 1);
        assert_eq!(quarterly.unit_labels()[0], "Q1 2024");

        let yearly = calculate_scale(day(2020, 5, 1), day(2022, 8, 1), Granularity::Year, 1);
        assert_eq!(yearly.unit_labels(), ["2019", "2020", "2021", "2022", "2023"]);
    }

    #[test]
    fn test_minor_ticks() {
        let monthly = calculate_scale(day(2024, 1, 1), day(2024, 1, 1), Granularity::Month, 0);
        assert_eq!(monthly.minor_ticks(), [day(2024, 1, 16)]);

        let yearly = calculate_scale(day(2024, 1, 1), day(2024, 1, 1), Granularity::Year, 0);
        assert_eq!(
            yearly.minor_ticks(),
            [day(2024, 4, 1), day(2024, 7, 1), day(2024, 10, 1)]
        );

        let weekly = calculate_scale(day(2024, 5, 13), day(2024, 5, 13), Granularity::Week, 0);
        assert_eq!(weekly.minor_ticks().len(), 6);
    }

    #[test]
    fn test_minor_ticks_within_range() {
        let scale = calculate_scale(day(2024, 1, 1), day(2024, 3, 1), Granularity::Quarter, 1);
        assert!(
            scale
                .minor_ticks()
                .iter()
                .all(|tick| (scale.start()..=scale.end()).contains(tick))
        );
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        fn date_strategy() -> impl Strategy<Value = NaiveDateTime> {
            (1990i32..2060, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60)
                .prop_map(|(y, m, d, h, min)| at(y, m, d, h, min))
        }

        fn granularity_strategy() -> impl Strategy<Value = Granularity> {
            prop::sample::select(Granularity::ALL.to_vec())
        }

        fn check_scale_contains_range(
            a: NaiveDateTime,
            b: NaiveDateTime,
            granularity: Granularity,
            padding: u32,
        ) -> Result<(), TestCaseError> {
            // Hourly scales over decades are valid but slow to enumerate.
            let span_days = (a - b).num_days().abs();
            prop_assume!(granularity != Granularity::Hour || span_days < 60);
            prop_assume!(granularity != Granularity::Day || span_days < 2000);

            let scale = calculate_scale(a, b, granularity, padding);
            prop_assert!(scale.start() <= a.min(b));
            prop_assert!(scale.end() >= a.max(b));
            prop_assert!(scale.start() < scale.end());
            prop_assert_eq!(scale.unit_labels().len(), scale.major_ticks().len());
            prop_assert_eq!(scale.major_ticks().len(), scale.total_units() as usize + 1);
            prop_assert!(scale.major_ticks().windows(2).all(|w| w[0] <= w[1]));
            Ok(())
        }

        proptest! {
            #[test]
            fn scale_contains_range(
                a in date_strategy(),
                b in date_strategy(),
                granularity in granularity_strategy(),
                padding in 0u32..3,
            ) {
                check_scale_contains_range(a, b, granularity, padding)?;
            }
        }
    }
}
