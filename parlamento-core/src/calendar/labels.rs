use serde::{Deserialize, Serialize};

use super::WeekStart;

const MONTHS_ES: [&str; 12] = [
    "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio",
    "Julio", "Agosto", "Septiembre", "Octubre", "Noviembre", "Diciembre",
];

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

// Sunday first.
const WEEKDAYS_ES: [&str; 7] = ["Dom", "Lun", "Mar", "Mie", "Jue", "Vie", "Sab"];
const WEEKDAYS_EN: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Language used for month titles and weekday headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    /// Name of the month at 0-based `index`.
    pub fn month_name(&self, index: u32) -> &'static str {
        let names = match self {
            Locale::Es => &MONTHS_ES,
            Locale::En => &MONTHS_EN,
        };
        names[index as usize % 12]
    }

    /// Short weekday names in column order.
    pub fn weekday_headers(&self, week_start: WeekStart) -> [&'static str; 7] {
        let mut names = match self {
            Locale::Es => WEEKDAYS_ES,
            Locale::En => WEEKDAYS_EN,
        };
        if week_start == WeekStart::Monday {
            names.rotate_left(1);
        }
        names
    }
}
