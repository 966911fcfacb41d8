//! Core of the El Parlamento site.
//!
//! - `calendar`: month grids and month navigation
//! - `matcher`: which schedule records fall on a day
//! - `selection`: the selected day, shared by every region that shows it
//! - `reveal`: scroll-triggered staggered entrance of page sections
//!
//! Records enter through `record::decode_records`; everything after that
//! works on typed values and does not fail on bad data.

pub mod calendar;
pub mod config;
pub mod constants;
pub mod date;
pub mod error;
pub mod matcher;
pub mod record;
pub mod reveal;
pub mod selection;

pub use calendar::{CalendarGrid, CalendarMonth, DayCell, GridCell, WeekStart};
pub use date::CalendarDate;
pub use error::{ParlamentoError, ParlamentoResult};
pub use record::{Category, ScheduleRecord, decode_records};
pub use selection::{SelectionState, SelectionStore, Subscription};
