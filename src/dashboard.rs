use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use itertools::Itertools;

use crate::history::TestResult;
use crate::session::TestDuration;
use crate::util::rounded_mean;

/// Which test lengths the dashboard shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationFilter {
    #[default]
    All,
    Only(TestDuration),
}

impl std::fmt::Display for DurationFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All Durations"),
            Self::Only(d) => write!(f, "{d}"),
        }
    }
}

impl DurationFilter {
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Only(TestDuration::Fifteen),
            Self::Only(TestDuration::Fifteen) => Self::Only(TestDuration::Thirty),
            Self::Only(TestDuration::Thirty) => Self::Only(TestDuration::Sixty),
            Self::Only(TestDuration::Sixty) => Self::All,
        }
    }

    pub fn matches(self, result: &TestResult) -> bool {
        match self {
            Self::All => true,
            Self::Only(d) => result.duration == d.secs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum SortKey {
    #[default]
    Date,
    #[strum(to_string = "WPM")]
    Wpm,
    Accuracy,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            Self::Date => Self::Wpm,
            Self::Wpm => Self::Accuracy,
            Self::Accuracy => Self::Date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Headline numbers over a set of results
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    pub tests_completed: usize,
    pub average_wpm: u32,
    pub average_accuracy: u32,
    pub best: Option<TestResult>,
}

/// Controls of the statistics page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub filter: DurationFilter,
    pub sort_key: SortKey,
    pub order: SortOrder,
    pub confirm_reset: bool,
    pub scroll: usize,
}

impl DashboardState {
    pub fn visible(&self, results: &[TestResult]) -> Vec<TestResult> {
        filter_and_sort(results, self.filter, self.sort_key, self.order)
    }
}

fn sort_timestamp(result: &TestResult) -> DateTime<Utc> {
    result.timestamp().unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Descending comparison for `key`; stable sorting keeps ties in input order.
fn compare(key: SortKey, a: &TestResult, b: &TestResult) -> Ordering {
    match key {
        SortKey::Date => sort_timestamp(b).cmp(&sort_timestamp(a)),
        SortKey::Wpm => b.wpm.cmp(&a.wpm),
        SortKey::Accuracy => b.accuracy.cmp(&a.accuracy),
    }
}

pub fn filter_and_sort(
    results: &[TestResult],
    filter: DurationFilter,
    key: SortKey,
    order: SortOrder,
) -> Vec<TestResult> {
    results
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .sorted_by(|a, b| match order {
            SortOrder::Descending => compare(key, a, b),
            SortOrder::Ascending => compare(key, a, b).reverse(),
        })
        .collect()
}

pub fn summarize(results: &[TestResult]) -> Summary {
    let best = results
        .iter()
        .fold(None::<&TestResult>, |best, r| match best {
            Some(b) if r.wpm <= b.wpm => Some(b),
            _ => Some(r),
        })
        .cloned();

    Summary {
        tests_completed: results.len(),
        average_wpm: rounded_mean(results.iter().map(|r| r.wpm)),
        average_accuracy: rounded_mean(results.iter().map(|r| r.accuracy)),
        best,
    }
}
