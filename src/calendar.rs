//! Calendar arithmetic shared by the RTC driver, the home page and the
//! date/time editors.

use crate::config::YEAR_MIN;

/// Wall-clock date and time as kept by the RTC.
///
/// `weekday` is 1 = Monday .. 7 = Sunday.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub weekday: u8,
}

impl Default for DateTime {
    fn default() -> Self {
        Self {
            year: YEAR_MIN,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            weekday: weekday_of(YEAR_MIN, 1, 1),
        }
    }
}

const WEEKDAY_NAMES: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

impl DateTime {
    /// True when every field is inside its calendar range.
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(self.year, self.month)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
            && (1..=7).contains(&self.weekday)
    }

    /// Three-letter weekday label, "---" for an out-of-range weekday.
    pub fn weekday_name(&self) -> &'static str {
        match self.weekday {
            1..=7 => WEEKDAY_NAMES[usize::from(self.weekday - 1)],
            _ => "---",
        }
    }

    /// Time as shown on screen, shifted by one hour when daylight saving
    /// is enabled and the date falls inside the DST window.
    pub fn local(self, dst_enabled: bool) -> DateTime {
        if dst_enabled && self.in_dst_window() {
            self.plus_one_hour()
        } else {
            self
        }
    }

    /// US-style window: April..October, plus March from the 10th and
    /// November before the 3rd.
    pub fn in_dst_window(&self) -> bool {
        match self.month {
            4..=10 => true,
            3 => self.day >= 10,
            11 => self.day < 3,
            _ => false,
        }
    }

    fn plus_one_hour(mut self) -> DateTime {
        self.hour += 1;
        if self.hour < 24 {
            return self;
        }
        self.hour = 0;
        self.weekday = if self.weekday >= 7 { 1 } else { self.weekday + 1 };
        self.day += 1;
        if self.day > days_in_month(self.year, self.month) {
            self.day = 1;
            self.month += 1;
            if self.month > 12 {
                self.month = 1;
                self.year += 1;
            }
        }
        self
    }
}

/// Gregorian leap-year rule.
pub const fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-based) of `year`. Out-of-range months
/// report 31 so callers never divide by zero.
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Day of week for a Gregorian date, 1 = Monday .. 7 = Sunday.
pub fn weekday_of(year: u16, month: u8, day: u8) -> u8 {
    const OFFSETS: [u16; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let month = month.clamp(1, 12);
    let y = if month < 3 { year.saturating_sub(1) } else { year };
    // 0 = Sunday
    let dow = (y + y / 4 - y / 100 + y / 400 + OFFSETS[usize::from(month - 1)] + u16::from(day)) % 7;
    if dow == 0 {
        7
    } else {
        dow as u8
    }
}

/// Wrap `value + delta` into `min..=max`.
pub fn wrap_in_range(value: u16, delta: i32, min: u16, max: u16) -> u16 {
    let span = i32::from(max) - i32::from(min) + 1;
    let offset = (i32::from(value) - i32::from(min) + delta).rem_euclid(span);
    (i32::from(min) + offset) as u16
}

/// Clamp the day down to the length of the current month.
pub fn clamp_day(dt: &mut DateTime) {
    let last = days_in_month(dt.year, dt.month);
    if dt.day > last {
        dt.day = last;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: u16, month: u8, day: u8, hour: u8) -> DateTime {
        DateTime {
            year,
            month,
            day,
            hour,
            minute: 30,
            second: 0,
            weekday: weekday_of(year, month, day),
        }
    }

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(2100));
        assert!(is_leap_year(2000));
    }

    #[test]
    fn days_in_february_follow_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
    }

    #[test]
    fn weekday_of_known_dates() {
        // 2024-01-01 was a Monday, 2000-01-01 a Saturday.
        assert_eq!(weekday_of(2024, 1, 1), 1);
        assert_eq!(weekday_of(2000, 1, 1), 6);
        assert_eq!(weekday_of(2024, 3, 3), 7);
    }

    #[test]
    fn wrap_in_range_both_directions() {
        assert_eq!(wrap_in_range(23, 1, 0, 23), 0);
        assert_eq!(wrap_in_range(0, -1, 0, 59), 59);
        assert_eq!(wrap_in_range(2099, 1, 2000, 2099), 2000);
        assert_eq!(wrap_in_range(1, -13, 1, 12), 12);
    }

    #[test]
    fn clamp_day_shortens_to_month_length() {
        let mut dt = date(2023, 4, 31, 0);
        clamp_day(&mut dt);
        assert_eq!(dt.day, 30);
    }

    #[test]
    fn dst_window_edges() {
        assert!(!date(2024, 3, 9, 12).in_dst_window());
        assert!(date(2024, 3, 10, 12).in_dst_window());
        assert!(date(2024, 11, 2, 12).in_dst_window());
        assert!(!date(2024, 11, 3, 12).in_dst_window());
        assert!(!date(2024, 1, 15, 12).in_dst_window());
    }

    #[test]
    fn dst_disabled_leaves_time_untouched() {
        let dt = date(2024, 7, 4, 10);
        assert_eq!(dt.local(false), dt);
        assert_eq!(dt.local(true).hour, 11);
    }

    #[test]
    fn dst_shift_rolls_over_month_end() {
        let dt = date(2024, 6, 30, 23);
        let shifted = dt.local(true);
        assert_eq!((shifted.month, shifted.day, shifted.hour), (7, 1, 0));
        assert_eq!(shifted.weekday, weekday_of(2024, 7, 1));
    }

    #[test]
    fn weekday_names() {
        assert_eq!(date(2024, 1, 1, 0).weekday_name(), "MON");
        let mut dt = date(2024, 1, 1, 0);
        dt.weekday = 0;
        assert_eq!(dt.weekday_name(), "---");
    }
}
