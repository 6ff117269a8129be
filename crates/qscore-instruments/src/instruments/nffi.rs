//! NEO-FFI, neuroticism items only.

use qscore_model::{Instrument, ItemRange, ItemSource, RecodeTable, ScaleItems, Subscale};

use super::names;

pub fn definition() -> Instrument {
    // Every fifth item of the full inventory.
    let items: Vec<String> = (1..=56).step_by(5).map(|n| format!("nffi_{n}")).collect();

    Instrument::new(
        "nffi",
        "NEO Five-Factor Inventory (Neuroticism)",
        ItemSource::Listed(items.clone()),
        ItemRange::new(1.0, 5.0),
    )
    .with_source_prefix("nffi01")
    .with_recode(ScaleItems::All, RecodeTable::identity(1..=5).also_as_text())
    .with_reverse_items(names(&["nffi_1", "nffi_16", "nffi_31", "nffi_46"]))
    .with_subscale(Subscale::sum("neuroticism", items))
}
