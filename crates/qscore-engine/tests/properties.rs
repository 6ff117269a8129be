//! Property tests for recoding, reverse scoring and aggregation.

use proptest::prelude::*;
use qscore_engine::ItemMatrix;
use qscore_engine::aggregate::aggregate;
use qscore_engine::recode::recode_values;
use qscore_engine::reverse::reverse_value;
use qscore_engine::validate::check_range;
use qscore_model::{
    Instrument, ItemRange, ItemSource, RawValue, RecodeTable, Recoded, ScaleItems, Subscale,
};

const ITEMS: usize = 5;

fn item_names() -> Vec<String> {
    (1..=ITEMS).map(|n| format!("q{n}")).collect()
}

/// Five items rated 1-4 with one total.
fn instrument() -> Instrument {
    Instrument::new(
        "prop",
        "Property instrument",
        ItemSource::numbered("q", ITEMS),
        ItemRange::new(1.0, 4.0),
    )
    .with_recode(ScaleItems::All, RecodeTable::identity(1..=4))
    .with_subscale(Subscale::total(ITEMS))
}

fn matrix(rows: &[Vec<Option<u8>>]) -> ItemMatrix {
    let mut matrix = ItemMatrix::new(rows.len());
    for (index, item) in item_names().into_iter().enumerate() {
        let values = rows
            .iter()
            .map(|row| row[index].map(f64::from))
            .collect();
        matrix.insert(item, values);
    }
    matrix
}

fn response() -> impl Strategy<Value = Option<u8>> {
    prop::option::of(1u8..=4)
}

fn rows() -> impl Strategy<Value = Vec<Vec<Option<u8>>>> {
    prop::collection::vec(prop::collection::vec(response(), ITEMS), 1..20)
}

fn raw_cell() -> impl Strategy<Value = Option<RawValue>> {
    prop_oneof![
        Just(None),
        (-20i32..1005).prop_map(|v| Some(RawValue::from(v))),
        "[0-9a-zA-Z.]{0,4}".prop_map(|s| Some(RawValue::Text(s))),
    ]
}

proptest! {
    #[test]
    fn reverse_scoring_is_an_involution(min in -3i32..3, width in 1i32..7, offset in 0i32..7) {
        let range = ItemRange::new(f64::from(min), f64::from(min + width));
        let value = f64::from(min + offset.min(width));
        let reversed = reverse_value(Some(value), range);

        prop_assert!(reversed.is_some_and(|v| range.contains(v)));
        prop_assert_eq!(reverse_value(reversed, range), Some(value));
        prop_assert_eq!(reverse_value(None, range), None);
    }

    #[test]
    fn nan_count_and_score_agree_with_present_items(rows in rows()) {
        let matrix = matrix(&rows);
        let scale = Subscale::total(ITEMS);
        let result = aggregate(&matrix, &scale, &item_names(), None);

        for (row, responses) in rows.iter().enumerate() {
            let present: Vec<f64> = responses.iter().flatten().copied().map(f64::from).collect();
            prop_assert_eq!(result.present[row], present.len());
            prop_assert_eq!(result.nan_count[row] + result.present[row], ITEMS);
            if present.is_empty() {
                prop_assert_eq!(result.score[row], None);
            } else {
                prop_assert_eq!(result.score[row], Some(present.iter().sum::<f64>()));
            }
        }
    }

    #[test]
    fn in_range_responses_stay_within_theoretical_range(rows in rows()) {
        let instrument = instrument();
        let scale = &instrument.subscales[0];
        let result = aggregate(&matrix(&rows), scale, &item_names(), None);

        prop_assert!(check_range(&instrument, scale, &result, None).is_ok());
    }

    #[test]
    fn every_cell_recodes_to_exactly_one_outcome(cells in prop::collection::vec(raw_cell(), 0..40)) {
        let table = RecodeTable::identity(1..=4).missing(999).also_as_text();
        let (values, unmapped) = recode_values(&table, &cells);

        prop_assert_eq!(values.len(), cells.len());
        for (row, cell) in cells.iter().enumerate() {
            match table.lookup(cell.as_ref()) {
                Recoded::Value(v) => {
                    prop_assert!((1.0..=4.0).contains(&v));
                    prop_assert_eq!(values[row], Some(v));
                    prop_assert!(!unmapped.contains(&row));
                }
                Recoded::Missing => {
                    prop_assert_eq!(values[row], None);
                    prop_assert!(!unmapped.contains(&row));
                }
                Recoded::Unmapped => {
                    prop_assert_eq!(values[row], None);
                    prop_assert!(unmapped.contains(&row));
                }
            }
        }
    }

    #[test]
    fn declared_codes_never_fall_through(code in 1i32..=4) {
        let table = RecodeTable::identity(1..=4).missing(999).also_as_text();
        let expected = Recoded::Value(f64::from(code));

        prop_assert_eq!(table.lookup(Some(&RawValue::from(code))), expected);
        prop_assert_eq!(table.lookup(Some(&RawValue::Text(code.to_string()))), expected);
        prop_assert_eq!(table.lookup(Some(&RawValue::Text(format!("{code}.0")))), expected);
    }
}
