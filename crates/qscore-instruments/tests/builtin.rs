use qscore_instruments::{
    Catalog, all_instruments, get_instrument, instrument_ids, load_definitions,
};
use qscore_model::{ItemSource, ScaleRole, ScoringRule};

#[test]
fn every_builtin_definition_is_well_formed() {
    for instrument in all_instruments() {
        assert_eq!(instrument.check(), Ok(()), "{}", instrument.id);
    }
}

#[test]
fn builtin_ids_are_unique() {
    let mut ids: Vec<&str> = instrument_ids().collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

/// Component subscales plus fillers cover every item exactly once, and each
/// total spans the same set.
#[test]
fn additive_builtins_partition_their_items() {
    for instrument in all_instruments().iter().filter(|i| i.is_additive()) {
        let expected = instrument.items.expected_len();
        let fillers = instrument.filler_items.len();
        let components: usize = instrument
            .subscales
            .iter()
            .filter(|s| s.role == ScaleRole::Component)
            .map(|s| s.n_items)
            .sum();
        if components > 0 {
            assert_eq!(components + fillers, expected, "{}", instrument.id);
        }
        for total in instrument
            .subscales
            .iter()
            .filter(|s| s.role == ScaleRole::Total)
        {
            assert_eq!(total.n_items + fillers, expected, "{}", instrument.id);
        }
    }
}

#[test]
fn masq_subscales_are_resolved_by_item_number() {
    let masq = get_instrument("masq").expect("masq");
    assert_eq!(masq.items.expected_len(), 62);
    assert_eq!(masq.reverse_items.len(), 13);
    assert_eq!(masq.reverse_items[0], "poms038");
    let anhedonia = masq
        .subscales
        .iter()
        .find(|s| s.name == "anhedonic_depression")
        .expect("anhedonic_depression");
    assert_eq!(anhedonia.n_items, 22);
}

#[test]
fn rmbi_groups_follow_item_numbers() {
    let rmbi = get_instrument("rmbi").expect("rmbi");
    let shifted = &rmbi.recode[1];
    assert_eq!(
        shifted.items,
        qscore_model::ScaleItems::listed(["rmbi4", "rmbi5", "rmbi7", "rmbi11", "rmbi13", "rmbi15"])
    );
}

#[test]
fn ksads_grouping_items_are_retained() {
    let ksads = get_instrument("ksads").expect("ksads");
    assert_eq!(ksads.items.expected_len(), 79);
    assert_eq!(ksads.retain_on_drop.len(), 9);
    assert!(matches!(
        &ksads.subscales[0].rule,
        ScoringRule::Grouping { both, neither, .. } if both == "comorbid" && neither == "hc"
    ));
    let past = get_instrument("ksadsp201").expect("ksadsp201");
    assert_eq!(past.items.expected_len(), 80);
    assert!(past.subscales.is_empty());
}

#[test]
fn prefixed_builtins_declare_expected_counts() {
    let prefixed: Vec<(&str, usize)> = all_instruments()
        .iter()
        .filter_map(|i| match &i.items {
            ItemSource::Prefixed { prefix, expected } => Some((prefix.as_str(), *expected)),
            ItemSource::Listed(_) => None,
        })
        .collect();
    assert_eq!(prefixed, [("hu0", 13), ("mfq", 34)]);
}

#[test]
fn catalogue_listing() {
    let listing = all_instruments()
        .iter()
        .map(|i| {
            let scales: Vec<&str> = i.subscales.iter().map(|s| s.name.as_str()).collect();
            format!(
                "{} [{}] items={} scales={}",
                i.id,
                i.source_prefix.as_deref().unwrap_or("-"),
                i.items.expected_len(),
                scales.join(",")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(listing, @r"
    bisbas [bisbas01] items=24 scales=bis,bas_drive,bas_fun_seeking,bas_reward_respon
    chaphand [chaphand01] items=13 scales=tot
    cssrs [cssrs01] items=11 scales=ideation,behave,damage,lethality
    ksads [ksads_diagnoses01] items=79 scales=group
    ksadsp201 [ksads_diagnosesp201] items=80 scales=
    masq [masq01] items=62 scales=gd_anxious_symptoms,anxious_arousal,gd_depressive_symptoms,anhedonic_depression,tot
    mfq [mfq01] items=34 scales=tot
    nffi [nffi01] items=12 scales=neuroticism
    rbqa [rbqa01] items=20 scales=tot
    rcads [rcads01] items=47 scales=social,panic,mdd,sad,gad,ocd,tot
    rmbi [rmbi01] items=18 scales=tot
    shaps [shaps01] items=14 scales=tot
    tanner [tanner_sms01] items=5 scales=tot
    ");
}

#[test]
fn example_definitions_load_into_catalogue() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("definitions/example.toml");
    let definitions = load_definitions(&path).expect("load example");
    let mut catalog = Catalog::builtin();
    catalog.extend(definitions, false).expect("extend");

    let wellbeing = catalog.instrument("wellbeing").expect("wellbeing");
    assert!(wellbeing.is_additive());
    assert_eq!(wellbeing.subscales.len(), 3);
    assert!(catalog.relabel_set("clinic_scores").is_ok());
}
