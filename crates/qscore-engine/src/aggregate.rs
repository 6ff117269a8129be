//! Missing-aware aggregation of additive subscales.

use qscore_model::{ScoringRule, Subscale};

use crate::recode::ItemMatrix;

/// Per-row results for one additive subscale.
#[derive(Debug, Clone, PartialEq)]
pub struct Additive {
    /// Items with a canonical value.
    pub present: Vec<usize>,
    /// `n_items - present`, with `n_items` resolved per respondent role.
    pub nan_count: Vec<usize>,
    /// Applicable item count per row.
    pub items_count: Vec<usize>,
    /// Sum or mean of present items; missing when none are present.
    pub score: Vec<Option<f64>>,
}

/// Aggregates `items` for every row.
///
/// `roles` holds each row's respondent role when the subscale is
/// respondent-conditioned.
pub fn aggregate(
    matrix: &ItemMatrix,
    scale: &Subscale,
    items: &[String],
    roles: Option<&[Option<String>]>,
) -> Additive {
    let rows = matrix.rows();
    let mut result = Additive {
        present: Vec::with_capacity(rows),
        nan_count: Vec::with_capacity(rows),
        items_count: Vec::with_capacity(rows),
        score: Vec::with_capacity(rows),
    };

    for row in 0..rows {
        let values: Vec<f64> = matrix.row(row, items).into_iter().flatten().collect();
        let role = roles.and_then(|roles| roles[row].as_deref());
        let n_items = scale.n_items_for(role);
        let present = values.len();

        result.present.push(present);
        result.nan_count.push(n_items.saturating_sub(present));
        result.items_count.push(n_items);
        result.score.push(combine(&scale.rule, &values));
    }
    result
}

fn combine(rule: &ScoringRule, values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().sum();
    match rule {
        ScoringRule::Mean => Some(sum / values.len() as f64),
        _ => Some(sum),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn partial_rows_sum_present_items() {
        let mut matrix = ItemMatrix::new(3);
        matrix.insert("a", vec![Some(1.0), None, None]);
        matrix.insert("b", vec![Some(2.0), Some(3.0), None]);
        let scale = Subscale::sum("s", ["a", "b"]);
        let result = aggregate(&matrix, &scale, &names(&["a", "b"]), None);
        assert_eq!(result.score, vec![Some(3.0), Some(3.0), None]);
        assert_eq!(result.nan_count, vec![0, 1, 2]);
        assert_eq!(result.items_count, vec![2, 2, 2]);
    }

    #[test]
    fn mean_rule_averages_present_items() {
        let mut matrix = ItemMatrix::new(1);
        matrix.insert("a", vec![Some(2.0)]);
        matrix.insert("b", vec![Some(3.0)]);
        matrix.insert("c", vec![None]);
        let scale = Subscale::sum("s", ["a", "b", "c"]).with_rule(ScoringRule::Mean);
        let result = aggregate(&matrix, &scale, &names(&["a", "b", "c"]), None);
        assert_eq!(result.score, vec![Some(2.5)]);
        assert_eq!(result.nan_count, vec![1]);
    }

    #[test]
    fn respondent_role_adjusts_baseline() {
        let mut matrix = ItemMatrix::new(2);
        matrix.insert("a", vec![Some(1.0), Some(1.0)]);
        matrix.insert("b", vec![None, None]);
        let scale = Subscale::sum("tot", ["a", "b"]).with_respondent_count("Child", 1);
        let roles = vec![Some("Parent".to_string()), Some("Child".to_string())];
        let result = aggregate(&matrix, &scale, &names(&["a", "b"]), Some(roles.as_slice()));
        assert_eq!(result.nan_count, vec![1, 0]);
        assert_eq!(result.items_count, vec![2, 1]);
    }
}
