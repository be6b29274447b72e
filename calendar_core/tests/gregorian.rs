//! The bundled Gregorian preset agrees with chrono's proleptic calendar.

use calendar_core::{presets, CalendarDriver};
use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

fn gregorian() -> CalendarDriver {
    CalendarDriver::new(presets::load("gregorian").unwrap())
}

fn chrono_date(absolute_day: i64) -> NaiveDate {
    NaiveDate::from_num_days_from_ce_opt((absolute_day + 1) as i32).unwrap()
}

#[test]
fn test_known_dates() {
    let driver = gregorian();

    let millennium = driver.absolute_day(2000, 0, 1);
    assert_eq!(millennium, 730_119);
    assert_eq!(driver.date(millennium).to_string(), "Saturday, 1 January, 2000 AD");

    assert!(driver.try_absolute_day(2024, 1, 29).is_ok());
    assert!(driver.try_absolute_day(1900, 1, 29).is_err());
    assert!(driver.try_absolute_day(2000, 1, 29).is_ok());
}

#[test]
fn test_years_before_the_era_use_the_fallback_suffix() {
    let driver = gregorian();
    let date = driver.date(-1);
    assert_eq!(date.ymd(), Some((0, 11, 31)));
    assert_eq!(date.year_label(), "0 BC");
    assert_eq!(date.day_of_week.as_deref(), Some("Sunday"));
}

#[test]
fn test_leap_years_follow_the_gregorian_rule() {
    let driver = gregorian();
    for year in 1500..2500 {
        assert_eq!(
            driver.is_leap_year(year),
            NaiveDate::from_ymd_opt(year as i32, 2, 29).is_some(),
            "year {year}"
        );
    }
}

proptest! {
    #[test]
    fn test_matches_chrono(day in -3_000_000i64..3_000_000) {
        let driver = gregorian();
        let date = driver.date(day);
        let expected = chrono_date(day);

        prop_assert_eq!(date.year, i64::from(expected.year()));
        prop_assert_eq!(date.month_index, Some(expected.month0() as usize));
        prop_assert_eq!(date.day_of_month, expected.day());
        prop_assert_eq!(date.day_of_year, i64::from(expected.ordinal0()));
        prop_assert_eq!(
            date.day_of_week_index,
            Some(expected.weekday().num_days_from_monday() as usize)
        );
    }
}
