use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub solved: bool,
    #[serde(default)]
    pub is_today: bool,
}

/// One calendar row. `slots` holds at most seven entries; only the first row
/// carries leading `None` padding and only the last row may be short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRow {
    pub slots: Vec<Option<DayRecord>>,
    pub month_label: Option<String>,
}

impl WeekRow {
    pub fn days(&self) -> impl Iterator<Item = &DayRecord> {
        self.slots.iter().flatten()
    }

    pub fn solved_count(&self) -> usize {
        self.days().filter(|d| d.solved).count()
    }
}

/// Weekday column of a date, Sunday first.
pub fn weekday_offset(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

pub fn bucket_calendar(days: &[DayRecord]) -> Vec<WeekRow> {
    let offset = days.first().map(|d| weekday_offset(d.date)).unwrap_or(0);
    bucket_weeks(days, offset)
}

pub fn bucket_weeks(days: &[DayRecord], weekday_offset: usize) -> Vec<WeekRow> {
    if days.is_empty() {
        return Vec::new();
    }

    let offset = weekday_offset % DAYS_PER_WEEK;
    let padded: Vec<Option<DayRecord>> = std::iter::repeat(None)
        .take(offset)
        .chain(days.iter().copied().map(Some))
        .collect();

    let mut months_shown: HashSet<(i32, u32)> = HashSet::new();

    padded
        .chunks(DAYS_PER_WEEK)
        .map(|chunk| {
            let month_label = chunk.iter().flatten().next().and_then(|first| {
                let key = (first.date.year(), first.date.month());
                months_shown
                    .insert(key)
                    .then(|| first.date.format("%b").to_string())
            });

            WeekRow {
                slots: chunk.to_vec(),
                month_label,
            }
        })
        .collect()
}

pub fn solved_days(days: &[DayRecord]) -> usize {
    days.iter().filter(|d| d.solved).count()
}
