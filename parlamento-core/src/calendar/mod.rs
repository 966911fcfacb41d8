//! Month layout and navigation.

mod grid;
mod labels;

pub use grid::{CalendarGrid, DayCell, GridCell, any_date, is_selectable, not_before};
pub use labels::Locale;

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::error::{ParlamentoError, ParlamentoResult};

/// First column of a rendered week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Column index (0..7) of `weekday` under this convention.
    pub fn column_of(&self, weekday: Weekday) -> u32 {
        match self {
            WeekStart::Sunday => weekday.num_days_from_sunday(),
            WeekStart::Monday => weekday.num_days_from_monday(),
        }
    }
}

/// A month of a year. The month index is 0-based (0 = January).
///
/// Values are immutable; `next` and `previous` return new months. Navigation
/// saturates at the edges of the representable date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    pub fn new(year: i32, index: u32) -> ParlamentoResult<Self> {
        if index > 11 {
            return Err(ParlamentoError::InvalidMonth(index));
        }
        let first = NaiveDate::from_ymd_opt(year, index + 1, 1)
            .ok_or(ParlamentoError::InvalidYear(year))?;
        Ok(CalendarMonth { first })
    }

    /// The month containing `date`.
    pub fn of(date: CalendarDate) -> Self {
        let naive = date.naive();
        let first = naive - Days::new(naive.day0().into());
        CalendarMonth { first }
    }

    /// Parse "YYYY-MM" (1-based month, as written on a calendar).
    pub fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.trim().split_once('-')?;
        let year = year.parse::<i32>().ok()?;
        let month = month.parse::<u32>().ok()?;
        if month == 0 {
            return None;
        }
        Self::new(year, month - 1).ok()
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// 0-based month index.
    pub fn index(&self) -> u32 {
        self.first.month0()
    }

    /// 1-based month number.
    pub fn number(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> CalendarDate {
        self.first.into()
    }

    pub fn first_weekday(&self) -> Weekday {
        self.first.weekday()
    }

    pub fn days_in_month(&self) -> u32 {
        match self.number() {
            2 if is_leap_year(self.year()) => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        date.year() == self.year() && date.month() == self.number()
    }

    /// Iterate every date of the month in order.
    pub fn dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        (1..=self.days_in_month())
            .filter_map(move |day| CalendarDate::new(self.year(), self.number(), day))
    }

    /// The following month; December rolls over to January of the next year.
    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| CalendarMonth { first })
            .unwrap_or(*self)
    }

    /// The preceding month; January rolls back to December of the previous year.
    pub fn previous(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| CalendarMonth { first })
            .unwrap_or(*self)
    }

    /// "Febrero 2024" / "February 2024".
    pub fn title(&self, locale: Locale) -> String {
        format!("{} {}", locale.month_name(self.index()), self.year())
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.number())
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
