//! Terminal rendering for parlamento-core types.
//!
//! Extension traits that add colored output using owo_colors.

use std::collections::BTreeSet;

use owo_colors::OwoColorize;
use parlamento_core::calendar::Locale;
use parlamento_core::reveal::SectionState;
use parlamento_core::{CalendarDate, CalendarMonth, GridCell, ScheduleRecord, WeekStart};

/// Width of one rendered day column, including its trailing space.
const CELL_WIDTH: usize = 4;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for ScheduleRecord {
    fn render(&self) -> String {
        let time = if self.time.is_empty() { "--:--" } else { &self.time };
        let mut line = format!(
            "{} {} {}",
            format!("{:>5}", time).bold(),
            self.title,
            format!("[{}]", self.category).dimmed()
        );

        if !self.location.is_empty() {
            line.push_str(&format!(" {}", self.location.dimmed()));
        }
        line.push_str(&format!(" {}", format!("({} places)", self.capacity).dimmed()));
        line
    }
}

impl Render for SectionState {
    fn render(&self) -> String {
        match self {
            SectionState::Unobserved => "unobserved".dimmed().to_string(),
            SectionState::Observed => "observed".yellow().to_string(),
            SectionState::Triggered => "triggered".green().to_string(),
        }
    }
}

/// Month table with a title row, weekday headers and one row per week.
pub fn render_month(
    month: CalendarMonth,
    cells: &[GridCell],
    week_start: WeekStart,
    locale: Locale,
    with_records: &BTreeSet<CalendarDate>,
) -> String {
    let width = CELL_WIDTH * 7;
    let mut lines = vec![
        format!("{:^width$}", month.title(locale)).bold().to_string(),
        locale
            .weekday_headers(week_start)
            .iter()
            .map(|h| format!("{:>3} ", h))
            .collect::<String>()
            .dimmed()
            .to_string(),
    ];

    for week in cells.chunks(7) {
        let row: String = week
            .iter()
            .map(|cell| match cell.day() {
                None => " ".repeat(CELL_WIDTH),
                Some(day) => {
                    let label = format!("{:>3}", day.date.day());
                    let label = if with_records.contains(&day.date) {
                        label.red().bold().to_string()
                    } else {
                        label
                    };
                    let label = if day.is_today {
                        label.reversed().to_string()
                    } else {
                        label
                    };
                    format!("{} ", label)
                }
            })
            .collect();
        lines.push(row.trim_end().to_string());
    }

    lines.join("\n")
}

pub fn legend(locale: Locale) -> &'static str {
    match locale {
        Locale::Es => "Fechas con eventos",
        Locale::En => "Dates with events",
    }
}

pub fn no_events(locale: Locale) -> &'static str {
    match locale {
        Locale::Es => "No hay eventos programados para esta fecha",
        Locale::En => "No events scheduled for this date",
    }
}

/// "Junio 1, 2025" / "June 1, 2025"
pub fn long_date(date: CalendarDate, locale: Locale) -> String {
    format!(
        "{} {}, {}",
        locale.month_name(date.month() - 1),
        date.day(),
        date.year()
    )
}
