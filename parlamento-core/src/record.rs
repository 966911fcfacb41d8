//! Schedule records as delivered by the events API.
//!
//! The API returns a JSON array of loosely shaped objects. `decode_records`
//! is the single place where that array becomes typed `ScheduleRecord`s; the
//! rest of the crate never sees raw JSON.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::error::{ParlamentoError, ParlamentoResult};

/// Kind of activity a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Workshop,
    Performance,
    Meeting,
    Exhibition,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Workshop => "workshop",
            Category::Performance => "performance",
            Category::Meeting => "meeting",
            Category::Exhibition => "exhibition",
        };
        f.write_str(label)
    }
}

/// A record timestamp as sent, with the calendar date derived from it.
///
/// The date is `None` when the timestamp could not be read; such records are
/// kept but never match any day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RecordDate {
    raw: String,
    date: Option<CalendarDate>,
}

impl RecordDate {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let date = CalendarDate::from_timestamp(&raw);
        RecordDate { raw, date }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn calendar_date(&self) -> Option<CalendarDate> {
        self.date
    }
}

impl From<String> for RecordDate {
    fn from(raw: String) -> Self {
        RecordDate::parse(raw)
    }
}

impl From<RecordDate> for String {
    fn from(date: RecordDate) -> Self {
        date.raw
    }
}

/// An event or activity offered at the venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub id: String,
    pub title: String,
    pub date: RecordDate,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub category: Category,
    pub capacity: u32,
}

impl ScheduleRecord {
    pub fn calendar_date(&self) -> Option<CalendarDate> {
        self.date.calendar_date()
    }
}

impl fmt::Display for ScheduleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Decode the events API payload.
///
/// Fails on malformed JSON, unknown categories and repeated ids. Records whose
/// date cannot be read are accepted and logged.
pub fn decode_records(json: &str) -> ParlamentoResult<Vec<ScheduleRecord>> {
    let records: Vec<ScheduleRecord> = serde_json::from_str(json)?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.id.as_str()) {
            return Err(ParlamentoError::DuplicateRecordId(record.id.clone()));
        }
        if record.calendar_date().is_none() {
            tracing::warn!(
                id = %record.id,
                date = record.date.raw(),
                "schedule record has an unreadable date and will not appear on the calendar"
            );
        }
    }

    tracing::debug!(count = records.len(), "decoded schedule records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"[
        {
            "id": "evt-1",
            "title": "Noche de Jazz",
            "date": "2025-06-01T18:00:00-04:00",
            "time": "18:00",
            "location": "Salón principal",
            "description": "Trío en vivo",
            "image": "/events/jazz.jpg",
            "category": "performance",
            "capacity": 80
        },
        {
            "id": "evt-2",
            "title": "Taller de cerámica",
            "date": "June 1-15, 2025",
            "time": "10:00",
            "location": "Patio",
            "category": "workshop",
            "capacity": 12
        }
    ]"#;

    #[test]
    fn test_decode_payload() {
        let records = decode_records(PAYLOAD).expect("payload should decode");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].category, Category::Performance);
        assert_eq!(records[0].calendar_date(), CalendarDate::new(2025, 6, 1));
        assert_eq!(records[1].description, None);
        assert_eq!(records[1].calendar_date(), CalendarDate::new(2025, 6, 1));
    }

    #[test]
    fn test_unreadable_date_is_kept() {
        let json = r#"[{"id":"x","title":"TBA","date":"por confirmar","category":"meeting","capacity":5}]"#;
        let records = decode_records(json).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].calendar_date(), None);
        assert_eq!(records[0].date.raw(), "por confirmar");
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let json = r#"[
            {"id":"a","title":"One","date":"2025-06-01","category":"meeting","capacity":5},
            {"id":"a","title":"Two","date":"2025-06-02","category":"meeting","capacity":5}
        ]"#;

        assert!(matches!(
            decode_records(json),
            Err(ParlamentoError::DuplicateRecordId(id)) if id == "a"
        ));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let json = r#"[{"id":"a","title":"One","date":"2025-06-01","category":"party","capacity":5}]"#;
        assert!(matches!(
            decode_records(json),
            Err(ParlamentoError::RecordDecode(_))
        ));
    }

    #[test]
    fn test_date_serializes_as_sent() {
        let records = decode_records(PAYLOAD).unwrap();
        let json = serde_json::to_value(&records[1]).unwrap();
        assert_eq!(json["date"], "June 1-15, 2025");
        assert!(json.get("description").is_none());
    }
}
