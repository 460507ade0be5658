use std::cmp::Ordering;

use super::{FieldValue, Record, SortOrder, SortSpec};

/// Numbers compare numerically; anything else by lower-cased string form,
/// a missing value counting as the empty string.
pub fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.normalized().cmp(&b.normalized()),
    }
}

fn as_number(value: &FieldValue) -> Option<i128> {
    match value {
        FieldValue::Integer(n) => Some(i128::from(*n)),
        FieldValue::Unsigned(n) => Some(i128::from(*n)),
        _ => None,
    }
}

/// Stable sort by `spec.key`. Ties keep their relative order in both
/// directions. An unknown key leaves `records` untouched.
pub fn sort_records<T: Record>(records: &mut Vec<&T>, spec: &SortSpec) {
    if !T::FIELDS.contains(&spec.key.as_str()) {
        return;
    }

    let mut keyed: Vec<(FieldValue, &T)> = records
        .drain(..)
        .map(|record| (record.field(&spec.key).unwrap_or(FieldValue::Missing), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = compare_values(a, b);
        match spec.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    records.extend(keyed.into_iter().map(|(_, record)| record));
}
