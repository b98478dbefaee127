use chrono::prelude::*;
use num_traits::FromPrimitive;
use std::cmp::Ordering;
use std::convert::From;

/// Number of days in the given month, proleptic Gregorian.
pub fn days_of_month(month: &Month, year: i32) -> u32 {
    if month.number_from_month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month.number_from_month() + 1, 1)
    }
    .unwrap()
    .signed_duration_since(NaiveDate::from_ymd_opt(year, month.number_from_month(), 1).unwrap())
    .num_days() as u32
}

/// Column of the month's first day in a Sunday-first week, 0..=6 with
/// 0 = Sunday. This is the number of leading padding cells in the grid.
pub fn first_weekday_offset(month: &Month, year: i32) -> u32 {
    NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
        .unwrap()
        .weekday()
        .num_days_from_sunday()
}

/// `YYYY-MM-DD`, zero-padded. The only date format that crosses the API
/// and navigation boundaries.
pub fn iso_date(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// A (month, year) pair identifying the month currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthIndex {
    index: Month,
    year: i32,
}

impl MonthIndex {
    pub fn new(index: Month, year: i32) -> Self {
        MonthIndex { index, year }
    }

    pub fn month(&self) -> Month {
        self.index
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month number, as the count API expects it.
    pub fn number(&self) -> u32 {
        self.index.number_from_month()
    }

    pub fn num_days(&self) -> u32 {
        days_of_month(&self.index, self.year)
    }

    pub fn weekday_offset(&self) -> u32 {
        first_weekday_offset(&self.index, self.year)
    }

    pub fn iso_for_day(&self, day: u32) -> String {
        iso_date(self.year, self.number(), day)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.number()
    }

    pub fn next(&self) -> Self {
        let next_month = self.index.succ();

        MonthIndex {
            index: next_month,
            year: if next_month.number_from_month() == 1 {
                self.year + 1
            } else {
                self.year
            },
        }
    }

    pub fn prev(&self) -> Self {
        let prev_month = self.index.pred();

        MonthIndex {
            index: prev_month,
            year: if prev_month.number_from_month() == 12 {
                self.year - 1
            } else {
                self.year
            },
        }
    }
}

impl Default for MonthIndex {
    fn default() -> Self {
        MonthIndex {
            index: Month::from_u32(Local::now().month()).unwrap_or(Month::January),
            year: Local::now().year(),
        }
    }
}

impl<T: Datelike> From<T> for MonthIndex {
    fn from(m: T) -> Self {
        MonthIndex::new(Month::from_u32(m.month()).unwrap(), m.year())
    }
}

impl PartialOrd for MonthIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.year != other.year {
            self.year.partial_cmp(&other.year)
        } else {
            self.number().partial_cmp(&other.number())
        }
    }
}
