//! Reverse scoring of negatively worded items.
//!
//! Applied once, by the executor, after recoding and before aggregation.

use qscore_model::ItemRange;
use tracing::debug;

use crate::recode::ItemMatrix;

/// `(min + max) - value`; missing stays missing.
pub fn reverse_value(value: Option<f64>, range: ItemRange) -> Option<f64> {
    value.map(|v| range.reverse(v))
}

/// Reverses the canonical values of `reverse_items` in place.
pub fn apply(matrix: &mut ItemMatrix, reverse_items: &[String], range: ItemRange) {
    for item in reverse_items {
        let Some(values) = matrix.get_mut(item) else {
            continue;
        };
        for value in values.iter_mut() {
            *value = reverse_value(*value, range);
        }
        debug!(item = %item, "reverse scored");
    }
}
