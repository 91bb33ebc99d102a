use crate::record::Record;
use std::cmp::{Ordering, Reverse};

pub const SORT_COLUMN: &str = "Won";

/// Stable, descending by the integer in the "Won" column. Rows whose value
/// is missing or not a number go last, in their original order.
pub fn sort_by_won(records: &mut [Record]) {
    records.sort_by(|a, b| compare(seats(a), seats(b)));
}

fn seats(record: &Record) -> Option<u64> {
    record
        .get(SORT_COLUMN)
        .and_then(|v| v.replace(',', "").trim().parse().ok())
}

fn compare(a: Option<u64>, b: Option<u64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => Reverse(x).cmp(&Reverse(y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
