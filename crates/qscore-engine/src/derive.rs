//! Categorical derivations for non-additive subscales.

use crate::recode::ItemMatrix;

fn endorsed(value: f64) -> bool {
    value > 0.0
}

/// Position (1-based) of the most severe endorsed item.
///
/// `items` run from least to most severe. Rows with nothing endorsed score 0,
/// rows with every item missing are missing.
pub fn severity_index(matrix: &ItemMatrix, items: &[String]) -> Vec<Option<f64>> {
    (0..matrix.rows())
        .map(|row| {
            let values = matrix.row(row, items);
            if values.iter().all(Option::is_none) {
                return None;
            }
            let most_severe = values
                .iter()
                .rposition(|value| value.is_some_and(endorsed))
                .map_or(0, |index| index + 1);
            Some(most_severe as f64)
        })
        .collect()
}

/// 1 if any item is endorsed, 0 if every present item is not, missing if all are missing.
pub fn any_endorsed(matrix: &ItemMatrix, items: &[String]) -> Vec<Option<f64>> {
    (0..matrix.rows())
        .map(|row| {
            let values: Vec<f64> = matrix.row(row, items).into_iter().flatten().collect();
            if values.is_empty() {
                None
            } else if values.iter().copied().any(endorsed) {
                Some(1.0)
            } else {
                Some(0.0)
            }
        })
        .collect()
}

/// The canonical value of a single item.
pub fn pass_through(matrix: &ItemMatrix, item: &str) -> Vec<Option<f64>> {
    matrix
        .get(item)
        .map_or_else(|| vec![None; matrix.rows()], <[Option<f64>]>::to_vec)
}

/// Endorsement of one labelled set in one row; `None` when all its items are missing.
fn set_endorsement(values: &[Option<f64>]) -> Option<bool> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.into_iter().any(endorsed))
    }
}

/// Labels a grouping classifier can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupLabel {
    FirstOnly,
    SecondOnly,
    Both,
    Neither,
    Missing,
}

/// Per-row outcome of a grouping classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMatch {
    pub label: GroupLabel,
    /// Number of label conditions that held; exactly one for a well-formed row.
    pub matched: usize,
}

/// Evaluates every label condition independently for each row.
///
/// The label is taken in priority order (both, first only, second only,
/// neither, missing) and `matched` records how many conditions held, so the
/// validator can confirm that the labels partition the rows.
pub fn classify_groups(matrix: &ItemMatrix, first: &[String], second: &[String]) -> Vec<GroupMatch> {
    (0..matrix.rows())
        .map(|row| {
            let a = set_endorsement(&matrix.row(row, first));
            let b = set_endorsement(&matrix.row(row, second));
            let a_yes = a == Some(true);
            let b_yes = b == Some(true);

            let conditions = [
                (GroupLabel::Both, a_yes && b_yes),
                (GroupLabel::FirstOnly, a_yes && !b_yes),
                (GroupLabel::SecondOnly, !a_yes && b_yes),
                (
                    GroupLabel::Neither,
                    !a_yes && !b_yes && (a.is_some() || b.is_some()),
                ),
                (GroupLabel::Missing, a.is_none() && b.is_none()),
            ];
            let matched = conditions.iter().filter(|(_, held)| *held).count();
            let label = conditions
                .iter()
                .find(|(_, held)| *held)
                .map_or(GroupLabel::Missing, |(label, _)| *label);
            GroupMatch { label, matched }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(columns: &[(&str, Vec<Option<f64>>)]) -> ItemMatrix {
        let rows = columns.first().map_or(0, |(_, v)| v.len());
        let mut matrix = ItemMatrix::new(rows);
        for (name, values) in columns {
            matrix.insert(*name, values.clone());
        }
        matrix
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn severity_takes_most_severe_endorsed() {
        let m = matrix(&[
            ("s1", vec![Some(0.0), Some(0.0), None]),
            ("s2", vec![Some(1.0), Some(0.0), None]),
            ("s3", vec![Some(1.0), None, None]),
        ]);
        let values = severity_index(&m, &names(&["s1", "s2", "s3"]));
        assert_eq!(values, vec![Some(3.0), Some(0.0), None]);
    }

    #[test]
    fn any_endorsed_distinguishes_zero_and_missing() {
        let m = matrix(&[
            ("b1", vec![Some(0.0), Some(0.0), None]),
            ("b2", vec![Some(1.0), None, None]),
        ]);
        assert_eq!(
            any_endorsed(&m, &names(&["b1", "b2"])),
            vec![Some(1.0), Some(0.0), None]
        );
    }

    #[test]
    fn pass_through_copies_values() {
        let m = matrix(&[("actlthl1", vec![Some(3.0), None])]);
        assert_eq!(pass_through(&m, "actlthl1"), vec![Some(3.0), None]);
        assert_eq!(pass_through(&m, "absent"), vec![None, None]);
    }

    #[test]
    fn grouping_labels_each_row_once() {
        let m = matrix(&[
            ("dep", vec![Some(1.0), Some(1.0), Some(0.0), Some(0.0), None]),
            ("anx", vec![Some(0.0), Some(1.0), Some(1.0), None, None]),
        ]);
        let labels: Vec<GroupLabel> = classify_groups(&m, &names(&["dep"]), &names(&["anx"]))
            .into_iter()
            .map(|g| {
                assert_eq!(g.matched, 1);
                g.label
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                GroupLabel::FirstOnly,
                GroupLabel::Both,
                GroupLabel::SecondOnly,
                GroupLabel::Neither,
                GroupLabel::Missing
            ]
        );
    }
}
