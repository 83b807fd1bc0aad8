//! Word count log: merging and day-over-day deltas.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// Date-keyed word count log.
///
/// Keys are ISO 8601 date strings, so the map's key order is chronological.
/// Values are `[words, words_with_unused]` pairs kept as strings, matching the
/// project file on disk.
pub type WcLog = BTreeMap<String, [String; 2]>;

/// Error raised when a stored count cannot be read as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WcLogError {
    BadCount { date: String, value: String },
}

impl fmt::Display for WcLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WcLogError::BadCount { date, value } => {
                write!(f, "word count for {} is not a number: \"{}\"", date, value)
            }
        }
    }
}

impl std::error::Error for WcLogError {}

/// Sign classification of a day's raw delta, used for color styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

/// One presentation-ready row of the progress log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaRow {
    pub date: String,
    pub words: i64,
    pub words_delta: i64,
    pub total: i64,
    pub total_delta: i64,
    pub sign: Sign,
}

/// Merge the historical log, the session update log and the live count into
/// one chronological log.
///
/// Later sources win on date collision: `update` overrides `history`, and the
/// entry for `today` is always replaced by the live count.
pub fn merge_logs(history: &WcLog, update: &WcLog, live: (i64, i64), today: &str) -> WcLog {
    let mut merged = history.clone();
    for (date, counts) in update {
        merged.insert(date.clone(), counts.clone());
    }
    merged.insert(today.to_string(), [live.0.to_string(), live.1.to_string()]);
    merged
}

/// Lazy delta walk over a merged log.
///
/// Yields one row per day, skipping days where neither count changed. The
/// running baseline advances over skipped days as well.
pub struct DeltaIter<'a> {
    entries: btree_map::Iter<'a, String, [String; 2]>,
    last_words: i64,
    last_total: i64,
}

impl Iterator for DeltaIter<'_> {
    type Item = Result<DeltaRow, WcLogError>;

    fn next(&mut self) -> Option<Self::Item> {
        for (date, counts) in self.entries.by_ref() {
            let words = match parse_count(date, &counts[0]) {
                Ok(n) => n,
                Err(e) => return Some(Err(e)),
            };
            let total = match parse_count(date, &counts[1]) {
                Ok(n) => n,
                Err(e) => return Some(Err(e)),
            };
            let words_delta = words - self.last_words;
            let total_delta = total - self.last_total;
            self.last_words = words;
            self.last_total = total;

            // A day where nothing moved is noise, not history.
            if words_delta == 0 && total_delta == 0 {
                continue;
            }

            let sign = if words_delta > 0 {
                Sign::Positive
            } else {
                Sign::Negative
            };
            return Some(Ok(DeltaRow {
                date: date.clone(),
                words,
                words_delta,
                total,
                total_delta,
                sign,
            }));
        }
        None
    }
}

fn parse_count(date: &str, value: &str) -> Result<i64, WcLogError> {
    value.trim().parse().map_err(|_| WcLogError::BadCount {
        date: date.to_string(),
        value: value.to_string(),
    })
}

/// Iterate delta rows in chronological order.
pub fn delta_rows(log: &WcLog) -> DeltaIter<'_> {
    DeltaIter {
        entries: log.iter(),
        last_words: 0,
        last_total: 0,
    }
}

/// Collect the full delta view, failing on the first malformed count.
pub fn compute_deltas(log: &WcLog) -> Result<Vec<DeltaRow>, WcLogError> {
    delta_rows(log).collect()
}
