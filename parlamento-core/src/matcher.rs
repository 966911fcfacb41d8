//! Matching schedule records to calendar days.

use std::collections::BTreeSet;

use crate::calendar::CalendarMonth;
use crate::date::CalendarDate;
use crate::record::ScheduleRecord;

/// True iff `record` falls on `date`. Records with an unreadable date never match.
pub fn matches(record: &ScheduleRecord, date: CalendarDate) -> bool {
    record.calendar_date() == Some(date)
}

/// Records on `date`, in input order.
pub fn filter_by_date(records: &[ScheduleRecord], date: CalendarDate) -> Vec<ScheduleRecord> {
    records
        .iter()
        .filter(|record| matches(record, date))
        .cloned()
        .collect()
}

/// Whether any record falls on `date`.
pub fn has_records_on(records: &[ScheduleRecord], date: CalendarDate) -> bool {
    records.iter().any(|record| matches(record, date))
}

/// Every day of `month` that has at least one record.
pub fn dates_with_records(records: &[ScheduleRecord], month: CalendarMonth) -> BTreeSet<CalendarDate> {
    records
        .iter()
        .filter_map(ScheduleRecord::calendar_date)
        .filter(|date| month.contains(*date))
        .collect()
}
