use serde::Serialize;

use super::{CalendarMonth, WeekStart};
use crate::date::CalendarDate;

/// A real day in a rendered month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: CalendarDate,
    pub in_current_month: bool,
    pub is_today: bool,
}

/// One slot of the grid: a leading placeholder or a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GridCell {
    Empty,
    Day(DayCell),
}

impl GridCell {
    pub fn day(&self) -> Option<&DayCell> {
        match self {
            GridCell::Day(cell) => Some(cell),
            GridCell::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, GridCell::Empty)
    }
}

/// Produces month layouts under a fixed week-start convention.
#[derive(Debug, Clone, Default)]
pub struct CalendarGrid {
    week_start: WeekStart,
    today: Option<CalendarDate>,
}

impl CalendarGrid {
    pub fn new(week_start: WeekStart) -> Self {
        CalendarGrid {
            week_start,
            today: None,
        }
    }

    /// Mark `today` in generated grids.
    pub fn with_today(mut self, today: CalendarDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Number of placeholders before day 1.
    pub fn leading_blanks(&self, month: CalendarMonth) -> u32 {
        self.week_start.column_of(month.first_weekday())
    }

    /// Lay out `month`: leading placeholders, then every day of the month.
    ///
    /// The last row is not padded, so the length is
    /// `leading_blanks + days_in_month`.
    pub fn generate(&self, month: CalendarMonth) -> Vec<GridCell> {
        let blanks = self.leading_blanks(month) as usize;
        let mut cells = Vec::with_capacity(blanks + month.days_in_month() as usize);

        cells.extend(std::iter::repeat_n(GridCell::Empty, blanks));
        cells.extend(month.dates().map(|date| {
            GridCell::Day(DayCell {
                date,
                in_current_month: true,
                is_today: self.today == Some(date),
            })
        }));

        cells
    }
}

/// Whether `date` may be picked, as decided by the caller's `policy`.
pub fn is_selectable<P>(date: CalendarDate, policy: P) -> bool
where
    P: Fn(CalendarDate) -> bool,
{
    policy(date)
}

/// Policy that accepts every date.
pub fn any_date(_: CalendarDate) -> bool {
    true
}

/// Policy that rejects dates before `limit`, e.g. past days on a booking form.
pub fn not_before(limit: CalendarDate) -> impl Fn(CalendarDate) -> bool {
    move |date| date >= limit
}
