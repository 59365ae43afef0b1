//! Date to pixel mapping.

use chrono::NaiveDateTime;

use crate::scale::ScaleInfo;

/// Maps a date onto an axis of `total_length` pixels spanning the scale.
///
/// The mapping is linear over millisecond offsets. Dates outside the scale
/// extrapolate rather than clamp. A zero-length scale maps every date to
/// the middle of the axis.
///
/// # Examples
///
/// ```
/// # use almanac::{position::date_to_position, scale::calculate_scale, Granularity};
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let scale = calculate_scale(day(1), day(10), Granularity::Day, 0);
///
/// assert_eq!(date_to_position(scale.start(), &scale, 500.0), 0.0);
/// assert_eq!(date_to_position(scale.end(), &scale, 500.0), 500.0);
/// ```
pub fn date_to_position(date: NaiveDateTime, scale: &ScaleInfo, total_length: f32) -> f32 {
    let span = (scale.end() - scale.start()).num_milliseconds();
    if span == 0 {
        return total_length / 2.0;
    }

    let offset = (date - scale.start()).num_milliseconds();
    (offset as f64 / span as f64 * f64::from(total_length)) as f32
}

#[cfg(test)]
mod tests {
    use almanac_core::granularity::Granularity;
    use chrono::NaiveDate;
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::scale::calculate_scale;

    fn day(m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_midpoint() {
        let scale = calculate_scale(day(1, 1), day(1, 11), Granularity::Day, 0);
        assert_approx_eq!(f32, date_to_position(day(1, 6), &scale, 1000.0), 500.0);
    }

    #[test]
    fn test_extrapolates_outside_range() {
        let scale = calculate_scale(day(1, 1), day(1, 10), Granularity::Day, 0);
        assert!(date_to_position(day(1, 21), &scale, 100.0) > 100.0);
        let before = day(1, 1) - chrono::TimeDelta::days(30);
        assert!(date_to_position(before, &scale, 100.0) < 0.0);
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        fn check_monotonic(a: i64, b: i64, length: f32) -> Result<(), TestCaseError> {
            let scale = calculate_scale(day(1, 1), day(12, 31), Granularity::Month, 1);
            let base = scale.start();
            let (lo, hi) = (a.min(b), a.max(b));
            let at = |minutes| base + chrono::TimeDelta::minutes(minutes);

            let p_lo = date_to_position(at(lo), &scale, length);
            let p_hi = date_to_position(at(hi), &scale, length);
            prop_assert!(p_lo <= p_hi);
            Ok(())
        }

        proptest! {
            #[test]
            fn position_is_monotonic(
                a in 0i64..900_000,
                b in 0i64..900_000,
                length in 1.0f32..10_000.0,
            ) {
                check_monotonic(a, b, length)?;
            }
        }
    }
}
