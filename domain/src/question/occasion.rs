//! Calendar occasions used to theme the daily question.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Window around birthdays, anniversaries and Easter.
const OCCASION_WINDOW_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occasion {
    Birthday,
    Anniversary,
    Christmas,
    Valentine,
    NewYear,
    Easter,
    Ramadan,
    Diwali,
}

/// Dates known about a couple on the day a question is drawn.
#[derive(Debug, Clone, Default)]
pub struct OccasionContext<'a> {
    pub today: Option<NaiveDate>,
    pub user_birthday: Option<NaiveDate>,
    pub partner_birthday: Option<NaiveDate>,
    pub anniversary: Option<NaiveDate>,
    pub religion: Option<&'a str>,
}

/// Occasions that apply on `ctx.today`, without duplicates.
///
/// Returns an empty list when `today` is unset.
pub fn current_occasions(ctx: &OccasionContext<'_>) -> Vec<Occasion> {
    let Some(today) = ctx.today else {
        return Vec::new();
    };
    let mut found = Vec::new();
    let mut push = |o: Occasion| {
        if !found.contains(&o) {
            found.push(o);
        }
    };

    let near = |d: NaiveDate| is_within_days(today, d, OCCASION_WINDOW_DAYS);

    if ctx.user_birthday.is_some_and(near) || ctx.partner_birthday.is_some_and(near) {
        push(Occasion::Birthday);
    }
    if ctx.anniversary.is_some_and(near) {
        push(Occasion::Anniversary);
    }

    let (month, day) = (today.month(), today.day());
    if month == 12 && (20..=26).contains(&day) {
        push(Occasion::Christmas);
    }
    if month == 2 && (10..=14).contains(&day) {
        push(Occasion::Valentine);
    }
    if (month == 12 && day >= 28) || (month == 1 && day <= 5) {
        push(Occasion::NewYear);
    }
    if let Some(easter) = easter_sunday(today.year())
        && is_within_days(today, easter, OCCASION_WINDOW_DAYS)
    {
        push(Occasion::Easter);
    }

    match ctx.religion.map(str::to_ascii_lowercase).as_deref() {
        // Season approximations, no lunar calendar.
        Some("muslim") if (3..=5).contains(&month) => push(Occasion::Ramadan),
        Some("hindu") if month == 10 || (month == 11 && day <= 15) => push(Occasion::Diwali),
        _ => {}
    }

    found
}

/// Whether the recurring date `date` (month/day) falls within `days` of
/// `today`, compared inside `today`'s year.
///
/// Feb 29 rolls over to Mar 1 in non-leap years.
fn is_within_days(today: NaiveDate, date: NaiveDate, days: i64) -> bool {
    let this_year = NaiveDate::from_ymd_opt(today.year(), date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(today.year(), 3, 1));
    this_year.is_some_and(|d| (today - d).num_days().abs() <= days)
}

/// Easter Sunday in the Gregorian calendar (anonymous computus).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn on(today: NaiveDate) -> OccasionContext<'static> {
        OccasionContext {
            today: Some(today),
            ..Default::default()
        }
    }

    #[test]
    fn test_easter_dates() {
        assert_eq!(easter_sunday(2024), Some(date(2024, 3, 31)));
        assert_eq!(easter_sunday(2025), Some(date(2025, 4, 20)));
        assert_eq!(easter_sunday(2026), Some(date(2026, 4, 5)));
    }

    #[test]
    fn test_plain_day_has_no_occasions() {
        assert!(current_occasions(&on(date(2026, 7, 14))).is_empty());
        assert!(current_occasions(&OccasionContext::default()).is_empty());
    }

    #[test]
    fn test_holiday_windows() {
        assert_eq!(current_occasions(&on(date(2026, 12, 24))), vec![Occasion::Christmas]);
        assert_eq!(current_occasions(&on(date(2026, 2, 12))), vec![Occasion::Valentine]);
        assert_eq!(current_occasions(&on(date(2026, 12, 30))), vec![Occasion::NewYear]);
        assert_eq!(current_occasions(&on(date(2027, 1, 5))), vec![Occasion::NewYear]);
        assert_eq!(current_occasions(&on(date(2026, 4, 3))), vec![Occasion::Easter]);
    }

    #[test]
    fn test_birthday_window_ignores_birth_year() {
        let mut ctx = on(date(2026, 10, 19));
        ctx.partner_birthday = Some(date(1994, 10, 21));
        assert_eq!(current_occasions(&ctx), vec![Occasion::Birthday]);

        ctx.partner_birthday = Some(date(1994, 10, 23));
        assert!(current_occasions(&ctx).is_empty());
    }

    #[test]
    fn test_two_birthdays_reported_once() {
        let mut ctx = on(date(2026, 6, 1));
        ctx.user_birthday = Some(date(1990, 6, 2));
        ctx.partner_birthday = Some(date(1991, 5, 30));
        ctx.anniversary = Some(date(2020, 6, 1));
        assert_eq!(
            current_occasions(&ctx),
            vec![Occasion::Birthday, Occasion::Anniversary]
        );
    }

    #[test]
    fn test_religious_seasons() {
        let mut ctx = on(date(2026, 10, 19));
        ctx.religion = Some("Hindu");
        assert_eq!(current_occasions(&ctx), vec![Occasion::Diwali]);

        let mut ctx = on(date(2026, 5, 10));
        ctx.religion = Some("muslim");
        assert_eq!(current_occasions(&ctx), vec![Occasion::Ramadan]);
    }

    #[test]
    fn test_leap_day_birthday_in_common_year() {
        let mut ctx = on(date(2026, 3, 2));
        ctx.user_birthday = Some(date(2000, 2, 29));
        assert_eq!(current_occasions(&ctx), vec![Occasion::Birthday]);
    }
}
