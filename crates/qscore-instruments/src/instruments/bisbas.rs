//! BIS/BAS: Behavioral Inhibition and Approach System scales.
//!
//! 24 items rated 1-4. Items 1, 6, 11 and 17 are fillers that belong to no
//! subscale.

use qscore_model::{Instrument, ItemRange, ItemSource, RecodeTable, ScaleItems, Subscale};

pub fn definition() -> Instrument {
    let base = Instrument::new(
        "bisbas",
        "BIS/BAS Scales",
        ItemSource::numbered("bisbas", 24),
        ItemRange::new(1.0, 4.0),
    );
    let fillers = base.items_by_number(&[1, 6, 11, 17]);
    let bis = base.items_by_number(&[2, 8, 13, 16, 19, 22, 24]);
    let drive = base.items_by_number(&[3, 9, 12, 21]);
    let fun_seeking = base.items_by_number(&[5, 10, 15, 20]);
    let reward = base.items_by_number(&[4, 7, 14, 18, 23]);

    base.with_source_prefix("bisbas01")
        .with_recode(ScaleItems::All, RecodeTable::identity(1..=4).also_as_text())
        .with_filler_items(fillers)
        .with_subscale(Subscale::sum("bis", bis))
        .with_subscale(Subscale::sum("bas_drive", drive))
        .with_subscale(Subscale::sum("bas_fun_seeking", fun_seeking))
        .with_subscale(Subscale::sum("bas_reward_respon", reward))
        .with_superseded_columns(super::names(&[
            "bissc_total",
            "bas_drive",
            "bas_fs",
            "bas_rr",
        ]))
}
