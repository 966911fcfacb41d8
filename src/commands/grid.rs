use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use parlamento_core::config::SiteConfig;
use parlamento_core::{CalendarDate, CalendarGrid, CalendarMonth, matcher};

use crate::records;
use crate::render::{legend, render_month};

pub fn run(config: &SiteConfig, month: CalendarMonth, records: Option<&Path>, json: bool) -> Result<()> {
    let settings = &config.calendar;
    let grid = CalendarGrid::new(settings.week_start).with_today(CalendarDate::today());
    let cells = grid.generate(month);

    if json {
        println!("{}", serde_json::to_string_pretty(&cells)?);
        return Ok(());
    }

    let with_records = match records {
        Some(path) => matcher::dates_with_records(&records::load(path)?, month),
        None => BTreeSet::new(),
    };

    println!(
        "{}",
        render_month(month, &cells, settings.week_start, settings.locale, &with_records)
    );

    if !with_records.is_empty() {
        println!();
        println!("{} {}", "●".red(), legend(settings.locale).dimmed());
    }

    Ok(())
}
