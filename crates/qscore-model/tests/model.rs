//! Integration tests for instrument definitions and their serialized form.

use qscore_model::{
    DefinitionError, Instrument, ItemLevelPolicy, ItemRange, ItemSource, LabeledSet, RawValue,
    RecodeTable, ScaleItems, ScoringOptions, ScoringRule, Subscale, UnmappedPolicy,
};
use serde_json::json;

fn demo() -> Instrument {
    let base = Instrument::new(
        "demo",
        "Demo Scale",
        ItemSource::numbered("demo", 6),
        ItemRange::new(1.0, 4.0),
    );
    let first = base.items_by_number(&[2, 3]);
    let second = base.items_by_number(&[4, 5, 6]);
    base.with_source_prefix("demo01")
        .with_recode(
            ScaleItems::All,
            RecodeTable::identity(1..=4).missing(999).also_as_text(),
        )
        .with_reverse_items(vec!["demo3".to_string()])
        .with_filler_items(vec!["demo1".to_string()])
        .with_subscale(Subscale::sum("first", first))
        .with_subscale(Subscale::sum("second", second))
        .with_subscale(Subscale::total(5))
}

#[test]
fn demo_definition_is_well_formed() {
    let demo = demo();
    assert!(demo.check().is_ok());
    assert!(demo.is_additive());
    assert_eq!(
        demo.output_columns(),
        vec![
            "demo_first_nan_count",
            "demo_first_items_count",
            "demo_first",
            "demo_second_nan_count",
            "demo_second_items_count",
            "demo_second",
            "demo_tot_nan_count",
            "demo_tot_items_count",
            "demo_tot",
        ]
    );
}

#[test]
fn definition_survives_json() {
    let ksads_like = Instrument::new(
        "dx",
        "Diagnoses",
        ItemSource::listed(["mdd", "gad"]),
        ItemRange::new(0.0, 1.0),
    )
    .with_recode(ScaleItems::All, RecodeTable::identity(0..=1).missing("NA"))
    .with_subscale(Subscale::grouping(
        "group",
        LabeledSet::new("depressed", ["mdd"]),
        LabeledSet::new("anxious", ["gad"]),
        "comorbid",
        "hc",
    ))
    .with_label_prefix("dx");

    for instrument in [demo(), ksads_like] {
        let text = serde_json::to_string(&instrument).unwrap();
        let back: Instrument = serde_json::from_str(&text).unwrap();
        assert_eq!(back, instrument);
    }
}

#[test]
fn rules_are_tagged_by_kind() {
    let rule = ScoringRule::PassThrough {
        range: ItemRange::new(0.0, 2.0),
    };
    assert_eq!(
        serde_json::to_value(&rule).unwrap(),
        json!({ "kind": "pass_through", "range": { "min": 0.0, "max": 2.0 } })
    );

    let mean: ScoringRule = serde_json::from_value(json!({ "kind": "mean" })).unwrap();
    assert_eq!(mean, ScoringRule::Mean);
}

#[test]
fn raw_values_keep_numbers_and_text_apart() {
    let values: Vec<RawValue> = serde_json::from_value(json!([1, "1", 999.0, "NaN"])).unwrap();
    assert_eq!(
        values,
        vec![
            RawValue::Number(1.0),
            RawValue::Text("1".to_string()),
            RawValue::Number(999.0),
            RawValue::Text("NaN".to_string()),
        ]
    );
}

#[test]
fn minimal_subscale_takes_defaults() {
    let scale: Subscale = serde_json::from_value(json!({ "name": "tot", "n_items": 5 })).unwrap();
    assert_eq!(scale.items, ScaleItems::All);
    assert_eq!(scale.rule, ScoringRule::Sum);
    assert!(!scale.is_respondent_conditioned());
}

#[test]
fn options_default_to_lenient_drop() {
    let options: ScoringOptions = serde_json::from_value(json!({})).unwrap();
    assert_eq!(options, ScoringOptions::default());
    assert_eq!(options.item_level, ItemLevelPolicy::Drop);
    assert_eq!(options.unmapped, UnmappedPolicy::Lenient);
    assert_eq!(options.respondent_column, "respondent");
    assert!(!options.emits_item_count());
}

#[test]
fn reverse_item_outside_the_item_list_is_rejected() {
    let broken = demo().with_reverse_items(vec!["demo9".to_string()]);
    assert!(matches!(
        broken.check(),
        Err(DefinitionError::UnknownItem { item, .. }) if item == "demo9"
    ));
}

#[test]
fn recode_target_outside_the_range_is_rejected() {
    let broken = Instrument::new(
        "demo",
        "Demo",
        ItemSource::numbered("demo", 2),
        ItemRange::new(0.0, 2.0),
    )
    .with_recode(ScaleItems::All, RecodeTable::new().code(1, 3.0))
    .with_subscale(Subscale::total(2));

    assert!(matches!(
        broken.check(),
        Err(DefinitionError::RecodeOutOfRange { value, .. }) if value == 3.0
    ));
}

#[test]
fn respondent_counts_override_the_declared_count() {
    let scale = Subscale::total(34).with_respondent_count("Child", 33);
    assert_eq!(scale.n_items_for(Some("Child")), 33);
    assert_eq!(scale.n_items_for(Some("Parent")), 34);
    assert_eq!(scale.n_items_for(None), 34);
}

#[test]
fn subscale_range_overrides_the_instrument_range() {
    let demo = demo().with_subscale(
        Subscale::sum("wide", ["demo2"]).with_item_range(ItemRange::new(0.0, 10.0)),
    );
    let wide = demo.subscales.last().unwrap();
    assert_eq!(demo.item_range_for(wide), ItemRange::new(0.0, 10.0));
    assert_eq!(demo.item_range_for(&demo.subscales[0]), ItemRange::new(1.0, 4.0));
}

#[test]
fn reverse_item_under_an_overridden_range_is_rejected() {
    let base = demo();
    let mut broken = base.clone();
    broken.subscales[0] = Subscale::sum("first", base.items_by_number(&[2, 3]))
        .with_item_range(ItemRange::new(0.0, 3.0));

    assert!(matches!(
        broken.check(),
        Err(DefinitionError::InvalidSubscale { subscale, .. }) if subscale == "first"
    ));

    let mut unaffected = base.clone();
    unaffected.subscales[1] = Subscale::sum("second", base.items_by_number(&[4, 5, 6]))
        .with_item_range(ItemRange::new(0.0, 3.0));
    assert!(unaffected.check().is_ok());
}
