// SPDX-License-Identifier: MIT

//!
//! Bijective (year, month, day) <-> signed ordinal conversion for the two
//! Chronoplay calendar models
//!
//! The *real* model is the proleptic Gregorian calendar, converted with
//! Howard Hinnant's `days_from_civil` / `civil_from_days` algorithms (days
//! relative to 1970-01-01, valid for arbitrary-magnitude years).  The
//! *no-leap* model gives every year exactly 365 days, as fictional game
//! calendars do.
//!
//! Years are numbered historically: there is no year zero, year -1 is the
//! year before year 1.  The Gregorian arithmetic internally shifts to
//! astronomical numbering (where year 0 exists) and shifts back on the way
//! out, so both mappings are exact inverses over every representable year.
//!
//! These are the raw conversions and they are not overflow-checked: callers
//! must keep years within the range `CalendarDate` enforces.
//!

/// Gregorian month lengths in a non-leap year
pub const MONTH_LENGTHS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days before the start of each month in a non-leap year (index 0 = before
/// January, index 12 = 365)
const CUMULATIVE_DAYS: [i64; 13] = [
    0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365,
];

/// Historical year -> astronomical year (BCE 1 = -1 -> 0)
fn to_astronomical(year: i64) -> i64 {
    if year < 0 { year + 1 } else { year }
}

/// Astronomical year -> historical year (0 -> -1)
fn to_historical(year: i64) -> i64 {
    if year < 1 { year - 1 } else { year }
}

/// Whether `year` (historical numbering) is a leap year in the proleptic
/// Gregorian calendar
pub fn is_gregorian_leap(year: i64) -> bool {
    let y = to_astronomical(year);
    y % 4 == 0 && (y % 100 != 0 || y % 400 == 0)
}

/// Number of days in `month` of `year` under the real calendar
pub fn real_month_length(year: i64, month: u8) -> u8 {
    if month == 2 && is_gregorian_leap(year) {
        29
    } else {
        MONTH_LENGTHS[month as usize - 1]
    }
}

/// Convert a civil date to days since 1970-01-01 (can be negative).  The
/// inverse of [`civil_from_days`].
pub fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let y = to_astronomical(year);
    let m = month as i64;
    let d = day as i64;

    let y = if m <= 2 { y - 1 } else { y };
    let era = y.div_euclid(400);
    let yoe = y - era * 400; // 0..=399
    let mp = if m > 2 { m - 3 } else { m + 9 }; // March-first month index
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}

/// Convert days since 1970-01-01 back to a civil (year, month, day).  The
/// inverse of [`days_from_civil`].
pub fn civil_from_days(z: i64) -> (i64, u8, u8) {
    let z = z + 719468;
    let era = z.div_euclid(146097);
    let doe = z - era * 146097; // 0..=146096
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let mut y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    if m <= 2 {
        y += 1;
    }
    (to_historical(y), m, d)
}

/// Day-of-year (1-based) treating February as 28 days always
pub fn no_leap_day_of_year(month: u8, day: u8) -> i64 {
    CUMULATIVE_DAYS[month as usize - 1] + day as i64
}

/// Ordinal (0-based) in the no-leap calendar: symmetric and monotonic across
/// the (absent) year zero.
pub fn no_leap_ordinal(year: i64, month: u8, day: u8) -> i64 {
    let doy = no_leap_day_of_year(month, day);
    if year > 0 {
        (year - 1) * 365 + (doy - 1)
    } else {
        year * 365 + (doy - 1)
    }
}

/// Convert a no-leap ordinal back to (year, month, day).  Floor division, not
/// truncating division, so negative ordinals resolve to the right year.
pub fn no_leap_from_ordinal(ordinal: i64) -> (i64, u8, u8) {
    let year = to_historical(ordinal.div_euclid(365) + 1);
    let doy = ordinal.rem_euclid(365) + 1;

    let mut month = 1u8;
    for i in 1..=12usize {
        if doy <= CUMULATIVE_DAYS[i] {
            month = i as u8;
            break;
        }
    }
    let day = (doy - CUMULATIVE_DAYS[month as usize - 1]) as u8;
    (year, month, day)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unix_epoch_anchor() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(days_from_civil(2000, 1, 1), 10957);
        assert_eq!(days_from_civil(2000, 3, 1), 11017);
    }

    #[test]
    fn leap_years() {
        assert!(is_gregorian_leap(2000));
        assert!(is_gregorian_leap(2004));
        assert!(!is_gregorian_leap(1900));
        assert!(!is_gregorian_leap(2001));
        // historical -1 is astronomical 0, which is divisible by 400
        assert!(is_gregorian_leap(-1));
        assert!(!is_gregorian_leap(-2));
        // historical -5 is astronomical -4
        assert!(is_gregorian_leap(-5));
    }

    #[test]
    fn real_round_trip_wide_range() {
        for year in (-3000..=3000i64).filter(|&y| y != 0) {
            for month in 1..=12u8 {
                let len = real_month_length(year, month);
                for day in [1, 15, len] {
                    let z = days_from_civil(year, month, day);
                    assert_eq!(
                        civil_from_days(z),
                        (year, month, day),
                        "round trip failed for {year}-{month}-{day}"
                    );
                }
            }
        }
    }

    #[test]
    fn real_round_trip_huge_years() {
        for year in [-99999i64, -40000, 40000, 99999] {
            let z = days_from_civil(year, 6, 15);
            assert_eq!(civil_from_days(z), (year, 6, 15));
        }
    }

    #[test]
    fn real_no_year_zero() {
        // the day after -1-12-31 is 1-1-1
        let z = days_from_civil(-1, 12, 31);
        assert_eq!(civil_from_days(z + 1), (1, 1, 1));
    }

    #[test]
    fn real_ordinals_contiguous_across_years() {
        // every consecutive pair of ordinals maps to consecutive dates
        let start = days_from_civil(1999, 12, 28);
        let mut prev = civil_from_days(start);
        for z in start + 1..start + 800 {
            let next = civil_from_days(z);
            assert_eq!(days_from_civil(next.0, next.1, next.2), z);
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn no_leap_forward() {
        assert_eq!(no_leap_ordinal(1, 1, 1), 0);
        assert_eq!(no_leap_ordinal(1, 12, 31), 364);
        assert_eq!(no_leap_ordinal(2, 1, 1), 365);
        assert_eq!(no_leap_ordinal(-1, 1, 1), -365);
        assert_eq!(no_leap_ordinal(-1, 12, 31), -1);
        assert_eq!(no_leap_ordinal(-2, 12, 31), -366);
    }

    #[test]
    fn no_leap_inverse_negative_ordinals() {
        assert_eq!(no_leap_from_ordinal(-1), (-1, 12, 31));
        assert_eq!(no_leap_from_ordinal(-365), (-1, 1, 1));
        assert_eq!(no_leap_from_ordinal(-366), (-2, 12, 31));
        assert_eq!(no_leap_from_ordinal(0), (1, 1, 1));
        assert_eq!(no_leap_from_ordinal(364), (1, 12, 31));
        assert_eq!(no_leap_from_ordinal(365), (2, 1, 1));
    }

    #[test]
    fn no_leap_round_trip() {
        for year in (-500..=500i64).filter(|&y| y != 0) {
            for month in 1..=12u8 {
                for day in [1, 15, MONTH_LENGTHS[month as usize - 1]] {
                    let ord = no_leap_ordinal(year, month, day);
                    assert_eq!(
                        no_leap_from_ordinal(ord),
                        (year, month, day),
                        "round trip failed for {year}-{month}-{day}"
                    );
                }
            }
        }
    }

    #[test]
    fn no_leap_february_always_28() {
        assert_eq!(no_leap_day_of_year(3, 1), 60);
        // a leap year under the real rule still has 365 no-leap days
        assert_eq!(no_leap_ordinal(2001, 1, 1) - no_leap_ordinal(2000, 1, 1), 365);
    }
}
