//! RCADS: Revised Children's Anxiety and Depression Scale.
//!
//! Responses are exported as text only.

use qscore_model::{Instrument, ItemRange, ItemSource, ScaleItems, Subscale};

use super::text_codes;

pub fn definition() -> Instrument {
    let base = Instrument::new(
        "rcads",
        "Revised Children's Anxiety and Depression Scale",
        ItemSource::numbered("rcads_", 47),
        ItemRange::new(0.0, 3.0),
    );
    let social = base.items_by_number(&[4, 7, 8, 12, 20, 30, 32, 38, 43]);
    let panic = base.items_by_number(&[3, 14, 24, 26, 28, 34, 36, 39, 41]);
    let mdd = base.items_by_number(&[2, 6, 11, 15, 19, 21, 25, 29, 40, 47]);
    let sad = base.items_by_number(&[5, 9, 17, 18, 33, 45, 46]);
    let gad = base.items_by_number(&[1, 13, 22, 27, 35, 37]);
    let ocd = base.items_by_number(&[10, 16, 23, 31, 42, 44]);

    base.with_source_prefix("rcads01")
        .with_recode(
            ScaleItems::All,
            text_codes(&[
                ("Never", 0.0),
                ("Sometimes", 1.0),
                ("Often", 2.0),
                ("Always", 3.0),
            ]),
        )
        .with_subscale(Subscale::sum("social", social))
        .with_subscale(Subscale::sum("panic", panic))
        .with_subscale(Subscale::sum("mdd", mdd))
        .with_subscale(Subscale::sum("sad", sad))
        .with_subscale(Subscale::sum("gad", gad))
        .with_subscale(Subscale::sum("ocd", ocd))
        .with_subscale(Subscale::total(47))
}
