//! Chapman Handedness Inventory.

use qscore_model::{Instrument, ItemRange, ItemSource, ScaleItems, Subscale};

use super::numeric_codes;

pub fn definition() -> Instrument {
    Instrument::new(
        "chaphand",
        "Chapman Handedness Inventory",
        ItemSource::Prefixed {
            prefix: "hu0".to_string(),
            expected: 13,
        },
        ItemRange::new(1.0, 3.0),
    )
    .with_source_prefix("chaphand01")
    // Exported as 0 left, 1 either, 2 right; scored left 3, either 2, right 1.
    .with_recode(
        ScaleItems::All,
        numeric_codes(&[(0, 3.0), (1, 2.0), (2, 1.0)]),
    )
    .with_subscale(Subscale::total(13))
}
