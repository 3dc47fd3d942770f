//! Integration tests for `Date` and `Weekday`.

use std::collections::HashSet;

use nl_time::date::{days_in_month, is_leap_year};
use nl_time::weekday::Weekday;
use nl_time::Date;
use proptest::prelude::*;

fn date(y: i32, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

// ─── Date consistency test ────────────────────────────────────────────────────

#[test]
fn test_consistency() {
    // Walk 1890..=2110, a margin around the lunar table span, and check that
    // every increment of the serial is a valid next civil day.
    let start = date(1890, 1, 1);
    let end = date(2110, 12, 31);

    let mut prev = start;
    for t in (start + 1).iter_until(end) {
        let (y, m, d) = t.ymd();
        let (y_old, m_old, d_old) = prev.ymd();

        assert_eq!(t.serial(), prev.serial() + 1);

        assert!(
            (d == d_old + 1 && m == m_old && y == y_old)
                || (d == 1 && m == m_old + 1 && y == y_old)
                || (d == 1 && m == 1 && y == y_old + 1),
            "wrong day/month/year increment: date={t}, prev={prev}"
        );

        let dy = t.day_of_year();
        let dy_old = prev.day_of_year();
        assert!(
            (dy == dy_old + 1)
                || (dy == 1 && dy_old == 365 && !is_leap_year(y_old))
                || (dy == 1 && dy_old == 366 && is_leap_year(y_old)),
            "wrong day of year increment: date={t}, dy={dy}, prev={dy_old}"
        );

        assert!(d >= 1 && d <= days_in_month(y, m), "invalid day: {t}");

        let wd = t.weekday().ordinal();
        let wd_old = prev.weekday().ordinal();
        assert!(
            (wd == wd_old + 1) || (wd == 1 && wd_old == 7),
            "invalid weekday increment: date={t}"
        );

        assert_eq!(date(y, m, d), t, "roundtrip failed for {t}");
        prev = t;
    }
}

#[test]
fn can_hash() {
    let start = date(2020, 1, 1);
    let set: HashSet<Date> = (0..500).map(|i| start + i).collect();
    assert_eq!(set.len(), 500);
    assert!(set.contains(&date(2020, 6, 1)));
}

#[test]
fn leap_years() {
    assert!(is_leap_year(2000));
    assert!(!is_leap_year(1900));
    assert!(is_leap_year(2024));
    assert!(!is_leap_year(2100));
}

#[test]
fn date_arithmetic() {
    let d = date(2024, 1, 15);
    assert_eq!(d + 10, date(2024, 1, 25));
    assert_eq!(d - 15, date(2023, 12, 31));
    assert_eq!((d + 10) - (d - 15), 25);
    assert_eq!(date(1900, 1, 1).days_between(date(1900, 1, 31)), 30);
    assert_eq!(date(2023, 12, 31) + 1, date(2024, 1, 1));
}

#[test]
fn weekday_consistency() {
    assert_eq!(date(2024, 1, 1).weekday(), Weekday::Monday);
    assert_eq!(date(2024, 1, 7).weekday(), Weekday::Sunday);
    assert_eq!(date(2024, 1, 7).weekday().days_from_sunday(), 0);
}

#[test]
fn parse_formats() {
    for s in ["2024-09-17", "2024/09/17", "2024年9月17日"] {
        assert_eq!(s.parse::<Date>().unwrap(), date(2024, 9, 17), "failed on {s}");
    }
    assert!("tomorrow".parse::<Date>().is_err());
}

proptest! {
    #[test]
    fn serial_ymd_roundtrip(serial in Date::MIN.serial()..=Date::MAX.serial()) {
        let d = Date::from_serial(serial).unwrap();
        let (y, m, day) = d.ymd();
        prop_assert_eq!(Date::from_ymd(y, m, day).unwrap(), d);
    }

    #[test]
    fn unix_millis_lands_in_same_day(days in -25_567i64..47_482, ms in 0i64..86_400_000) {
        let start = Date::from_unix_millis((days * 86_400_000) as f64).unwrap();
        let inside = Date::from_unix_millis((days * 86_400_000 + ms) as f64).unwrap();
        prop_assert_eq!(start, inside);
    }
}
