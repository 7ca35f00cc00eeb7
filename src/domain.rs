use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar;

/// A named run of per-day productivity values. Index `i` into `values`
/// corresponds to the calendar day `start_date + i`; `None` means "no data".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub start_date: NaiveDate,
    pub values: Vec<Option<u32>>,
}

impl Profile {
    pub fn new(name: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start_date,
            values: Vec::new(),
        }
    }

    /// Appends one week of empty days. Growing in whole weeks keeps the
    /// rendered grid ending on a Sunday.
    pub fn grow_week(&mut self) {
        self.values.extend(std::iter::repeat(None).take(7));
    }

    pub fn value_at(&self, day_index: usize) -> Option<u32> {
        self.values.get(day_index).copied().flatten()
    }

    pub fn date_of(&self, day_index: usize) -> NaiveDate {
        calendar::add_days(self.start_date, day_index as i64)
    }
}
