use std::fmt;

use crate::error::DateError;

const MONTH_NAMES: [&str; 12] = [
    "Janvier",
    "Février",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Août",
    "Septembre",
    "Octobre",
    "Novembre",
    "Décembre",
];

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const WEEKDAY_ABBREV: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A calendar date-time as read from the page (local time, no zone).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageDate {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl PageDate {
    /// Midnight on the given day. `month` is 1-based.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, DateError> {
        if !(1..=12).contains(&month) {
            return Err(DateError::Month(month));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(DateError::Day { year, month, day });
        }
        Ok(Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
        })
    }

    pub fn with_time(self, hour: u8, minute: u8, second: u8) -> Result<Self, DateError> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(DateError::Time {
                hour,
                minute,
                second,
            });
        }
        Ok(Self {
            hour,
            minute,
            second,
            ..self
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    /// Day of week, 0 = Sunday.
    pub fn weekday(&self) -> u8 {
        // Sakamoto's method.
        const T: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
        let y = if self.month < 3 {
            self.year - 1
        } else {
            self.year
        };
        let m = usize::from(self.month - 1);
        let v = y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
            + T[m]
            + i32::from(self.day);
        v.rem_euclid(7) as u8
    }
}

/// Generic textual form, e.g. `Sun Oct 18 2026 09:05:00`.
impl fmt::Display for PageDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:02} {:04} {:02}:{:02}:{:02}",
            WEEKDAY_ABBREV[usize::from(self.weekday())],
            MONTH_ABBREV[usize::from(self.month - 1)],
            self.day,
            self.year,
            self.hour,
            self.minute,
            self.second
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `d/m/Y`: `18/10/2026`
    DayMonthYear,
    /// `MMMM YYYY`: `Octobre 2026`
    MonthNameYear,
}

impl DateFormat {
    pub fn parse(key: &str) -> Option<DateFormat> {
        match key {
            "d/m/Y" => Some(DateFormat::DayMonthYear),
            "MMMM YYYY" => Some(DateFormat::MonthNameYear),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            DateFormat::DayMonthYear => "d/m/Y",
            DateFormat::MonthNameYear => "MMMM YYYY",
        }
    }

    pub fn all() -> &'static [DateFormat] {
        &[DateFormat::DayMonthYear, DateFormat::MonthNameYear]
    }
}

/// Format `date` using a named pattern.
///
/// Unknown pattern keys fall back to the date's generic textual form.
pub fn format_date(date: &PageDate, format: &str) -> String {
    match DateFormat::parse(format) {
        Some(fmt) => format_date_with(date, fmt),
        None => date.to_string(),
    }
}

pub fn format_date_with(date: &PageDate, format: DateFormat) -> String {
    match format {
        DateFormat::DayMonthYear => {
            format!("{:02}/{:02}/{}", date.day, date.month, date.year)
        }
        DateFormat::MonthNameYear => {
            format!("{} {}", MONTH_NAMES[usize::from(date.month - 1)], date.year)
        }
    }
}

/// French month name for a 1-based month.
pub fn month_name(month: u8) -> Option<&'static str> {
    MONTH_NAMES.get(usize::from(month).checked_sub(1)?).copied()
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
