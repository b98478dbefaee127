use serde::Deserialize;
use std::collections::HashMap;

use crate::calendar::MonthIndex;

/// Per-day post counts for a single month, keyed by ISO date.
///
/// Scoped to exactly the displayed month and replaced wholesale on every
/// navigation or refresh. Days without an entry count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostCounts {
    counts: HashMap<String, u32>,
}

impl PostCounts {
    pub fn empty() -> Self {
        PostCounts::default()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, iso_date: &str) -> u32 {
        self.counts.get(iso_date).copied().unwrap_or(0)
    }

    pub fn for_day(&self, month: &MonthIndex, day: u32) -> u32 {
        self.get(&month.iso_for_day(day))
    }

    /// Days of `month` with a non-zero count, in day order.
    pub fn active_days(&self, month: &MonthIndex) -> Vec<(u32, u32)> {
        (1..=month.num_days())
            .filter_map(|day| {
                let count = self.for_day(month, day);
                if count > 0 {
                    Some((day, count))
                } else {
                    None
                }
            })
            .collect()
    }
}

impl std::iter::FromIterator<(String, u32)> for PostCounts {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        PostCounts {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Wire format of the count-lookup response. A missing `counts` field is
/// the documented encoding of "no activity this month".
#[derive(Debug, Deserialize)]
pub struct CountsBody {
    #[serde(default)]
    counts: HashMap<String, u32>,
}

impl From<CountsBody> for PostCounts {
    fn from(body: CountsBody) -> Self {
        PostCounts {
            counts: body.counts,
        }
    }
}
