//! C-SSRS: Columbia Suicide Severity Rating Scale.
//!
//! Scores are categorical. Ideation is the most severe endorsed type, behaviour
//! is whether any behaviour was reported in the last three months, and the two
//! lethality ratings pass through unchanged.

use qscore_model::{
    Instrument, ItemRange, ItemSource, RecodeTable, ScaleItems, ScoringRule, Subscale,
};

use super::{names, numeric_codes};

const IDEATION: &[&str] = &["css_sim1", "css_sim2", "css_sim3", "css_sim4", "css_sim5"];
const BEHAVIOUR: &[&str] = &["sbaap3m", "sbiap3m", "sbasiap3m", "sbpabp3m"];
const DAMAGE: &str = "actlthl1";
const LETHALITY: &str = "potlthl1";

const BOOKKEEPING: &[&str] = &[
    "si1l", "si2l", "si3l", "si4l", "si5l", "sb2l", "sb3l", "sb4l", "sb5l", "sb6l", "rctattdt",
    "lthldt", "actlthl2", "potlthl2", "initatdt", "actlthl3", "potlthl3", "cssrs_base_06",
    "cssrs_base_06a", "iilmsi", "iirmsi", "sbtnal", "sbtnap3m", "sbnssibl", "sbnssibp3m",
    "sbsibiul", "sbsibiup3m", "sbiatnal", "sbiatnap3m", "sbasiatnal", "sbasiatnap3m",
    "sb_present_interview_3m",
];

pub fn definition() -> Instrument {
    let items = IDEATION
        .iter()
        .chain(BEHAVIOUR)
        .copied()
        .chain([DAMAGE, LETHALITY]);

    Instrument::new(
        "cssrs",
        "Columbia Suicide Severity Rating Scale",
        ItemSource::listed(items),
        ItemRange::new(0.0, 5.0),
    )
    .with_source_prefix("cssrs01")
    .with_recode(
        ScaleItems::listed(IDEATION.iter().copied()),
        RecodeTable::identity(0..=1).also_as_text(),
    )
    // Exported as 1 yes, 2 no.
    .with_recode(
        ScaleItems::listed(BEHAVIOUR.iter().copied()),
        numeric_codes(&[(1, 1.0), (2, 0.0)]),
    )
    .with_recode(
        ScaleItems::listed([DAMAGE, LETHALITY]),
        RecodeTable::passthrough(),
    )
    .with_subscale(Subscale::derived(
        "ideation",
        ScoringRule::SeverityIndex,
        IDEATION.iter().copied(),
    ))
    .with_subscale(Subscale::derived(
        "behave",
        ScoringRule::AnyEndorsed,
        BEHAVIOUR.iter().copied(),
    ))
    .with_subscale(Subscale::derived(
        "damage",
        ScoringRule::PassThrough {
            range: ItemRange::new(0.0, 5.0),
        },
        [DAMAGE],
    ))
    .with_subscale(Subscale::derived(
        "lethality",
        ScoringRule::PassThrough {
            range: ItemRange::new(0.0, 2.0),
        },
        [LETHALITY],
    ))
    .with_extra_drop_columns(names(BOOKKEEPING))
}
