//! Slice ordering policy.

use std::cmp::Ordering;
use std::fmt;

use volume_types::SliceRecord;

/// The key a series was sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceOrdering {
    /// Ascending slice location.
    SliceLocation,
    /// Ascending instance number.
    InstanceNumber,
    /// Discovery order.
    Arrival,
}

impl fmt::Display for SliceOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SliceLocation => "slice location",
            Self::InstanceNumber => "instance number",
            Self::Arrival => "arrival order",
        })
    }
}

/// Sort records in place and report which key was used.
///
/// Slice location wins if any record has one, then instance number.
/// Records without the chosen key go last; equal keys keep discovery
/// order.
pub fn order_slices(records: &mut [SliceRecord]) -> SliceOrdering {
    records.sort_by_key(|r| r.arrival);

    if records.iter().any(|r| r.slice_location.is_some()) {
        records.sort_by(|a, b| missing_last(a.slice_location, b.slice_location, f64::total_cmp));
        SliceOrdering::SliceLocation
    } else if records.iter().any(|r| r.instance_number.is_some()) {
        records.sort_by(|a, b| missing_last(a.instance_number, b.instance_number, Ord::cmp));
        SliceOrdering::InstanceNumber
    } else {
        SliceOrdering::Arrival
    }
}

fn missing_last<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(&a, &b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
