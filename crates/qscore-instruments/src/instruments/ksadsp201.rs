//! K-SADS past and DSM-5 diagnoses.
//!
//! No score is derived. The columns are collapsed to present/absent and then
//! kept or dropped with the item-level policy.

use qscore_model::{Instrument, ItemRange, ItemSource, ScaleItems};

use super::numeric_codes;

const PAST_DIAGNOSES: &[&str] = &[
    "hypomaniapast", "schizophreniapast", "schizoaffectivepast", "avoidantchildhoodpast",
    "acutestresspast", "adjustmentanxiouspast", "adjustmentconductpast", "adjustmentmixedpast",
    "tourettespast", "chronicticpast", "transientticpast", "mentalretardationpast",
    "otherpsychiatricdisorderpast", "briefreactivepsychosispast", "schziophreniformpast",
    "adjdiswdepcurr", "adjdiswdeppast", "sldc194", "sldc232", "depressotherspeccurrent_dsm5",
    "depressotherspecpast_dsm5", "disruptmooddysregpast_dsm5", "premenstrualdysphcurrent_dsm5",
    "premenstrualdysphpast_dsm5", "bipolarotherspeccurrent_dsm5", "bipolarotherspecpast_dsm5",
    "schizophreniapast_dsm5", "schizoaffectivecurrent_dsm5", "schizoaffectivepast_dsm5",
    "schizophreniformpast_dsm5", "briefreactivepsychpast_dsm5", "schizophreniaothspeccurr_dsm5",
    "schizophreniaothspecpast_dsm5", "schizophreniaunspeccurr_dsm5",
    "schizophreniaunspecpast_dsm5", "illnessanxietycurrent_dsm5", "illnessanxietypast_dsm5",
    "otherspecanxietycurrent_dsm5", "otherspecanxietypast_dsm5", "unspecanxietycurrent_dsm5",
    "unspecanxietypast_dsm5", "selectivemutismcurrent_dsm5", "selectivemutismpast_dsm5",
    "hoardingcurrent_dsm5", "hoardingpast_dsm5", "trichotillomaniacurrent_dsm5",
    "trichotillomaniapast_dsm5", "excoriationcurrent_dsm5", "excoriationpast_dsm5",
    "bodydysmorphiccurrent_dsm5", "bodydysmorphicpast_dsm5", "ocdotherspeccurrent_dsm5",
    "ocdotherspecpast_dsm5", "ocdunspeccurrent_dsm5", "ocdunspecpast_dsm5",
    "acutestresspast_dsm5", "bingeeatingcurrent_dsm5", "bingeeatingpast_dsm5",
    "adhdotherspeccurrent_dsm5", "adhdotherspecpast_dsm5", "adhdunspeccurrent_dsm5",
    "adhdunspecpast_dsm5", "intermittentexplosivecurr_dsm5", "intermittentexplosivepast_dsm5",
    "pyromaniacurrent_dsm5", "pyromaniapast_dsm5", "kleptomaniacurrent_dsm5",
    "kleptomaniapast_dsm5", "disruptiveotherspeccurr_dsm5", "disruptiveotherspecpast_dsm5",
    "disruptiveunspeccurrent_dsm5", "disruptiveunspecpast_dsm5", "tourettespast_dsm5",
    "chronicticpast_dsm5", "transientticpast_dsm5", "alcoholusepast_dsm5",
    "alcoholunspeccurrent_dsm5", "alcoholunspecpast_dsm5", "substanceusecurrent_dsm5",
    "substanceusepast_dsm5",
];

pub fn definition() -> Instrument {
    Instrument::new(
        "ksadsp201",
        "K-SADS Past Diagnoses",
        ItemSource::listed(PAST_DIAGNOSES.iter().copied()),
        ItemRange::new(0.0, 1.0),
    )
    .with_source_prefix("ksads_diagnosesp201")
    .with_recode(
        ScaleItems::All,
        numeric_codes(&[(4, 1.0), (3, 1.0), (2, 0.0), (1, 0.0), (0, 0.0)]),
    )
    .with_label_prefix("ksadsp201")
}
