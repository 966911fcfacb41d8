use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use parlamento_core::calendar::{is_selectable, not_before};
use parlamento_core::config::SiteConfig;
use parlamento_core::{CalendarDate, SelectionStore};

use crate::records;
use crate::render::{Render, long_date, no_events};

pub fn run(config: &SiteConfig, date: &str, records: &Path, booking: bool, json: bool) -> Result<()> {
    let date = CalendarDate::parse_ymd(date)
        .ok_or_else(|| anyhow::anyhow!("Invalid date '{}'. Expected YYYY-MM-DD", date))?;

    if booking && !is_selectable(date, not_before(CalendarDate::today())) {
        anyhow::bail!("{} is in the past and cannot be booked", date);
    }

    let all_records = records::load(records)?;
    let locale = config.calendar.locale;
    let store = SelectionStore::new();

    // The detail panel: redrawn whenever the selection changes.
    let _panel = store.subscribe(move |state| {
        if json {
            match serde_json::to_string_pretty(state) {
                Ok(out) => println!("{}", out),
                Err(e) => eprintln!("{}", e.to_string().red()),
            }
            return;
        }

        let Some(selected) = state.selected_date else {
            return;
        };
        println!("{}", long_date(selected, locale).bold());

        if state.selected_records.is_empty() {
            println!("  {}", no_events(locale).dimmed());
        }
        for record in &state.selected_records {
            println!("  {}", record.render());
        }
    });

    store.set_selected_date(date, &all_records);

    Ok(())
}
