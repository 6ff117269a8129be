//! RBQA: Risky Behavior Questionnaire for Adolescents.

use qscore_model::{Instrument, ItemRange, ItemSource, RecodeTable, ScaleItems, Subscale};

pub fn definition() -> Instrument {
    Instrument::new(
        "rbqa",
        "Risky Behavior Questionnaire for Adolescents",
        ItemSource::numbered("rbqa", 20),
        ItemRange::new(0.0, 4.0),
    )
    .with_source_prefix("rbqa01")
    .with_recode(ScaleItems::All, RecodeTable::identity(0..=4).also_as_text())
    .with_subscale(Subscale::total(20))
}
