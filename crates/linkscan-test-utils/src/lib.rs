//! Shared fixtures for linkscan tests.
//!
//! The reference configuration used across the workspace:
//! strategic_entities (80), chinese_cities (50, word), commodity_keywords (0),
//! exclusion "aztec environmental", tiers 100/70/50/0.

use linkscan_common::record::fields;
use linkscan_common::{Record, TierBand, TierTable};
use linkscan_patterns::{CategorySpec, FalsePositiveFilter, MatchMode, PatternLibrary};

pub use pretty_assertions;

pub const STRATEGIC_ENTITIES: &str = "strategic_entities";
pub const CHINESE_CITIES: &str = "chinese_cities";
pub const COMMODITY_KEYWORDS: &str = "commodity_keywords";

pub fn reference_categories() -> Vec<CategorySpec> {
    vec![
        CategorySpec::new(STRATEGIC_ENTITIES, 80)
            .triggers(["HUAWEI", "ZTE", "LENOVO", "HIKVISION"]),
        CategorySpec::new(CHINESE_CITIES, 50)
            .mode(MatchMode::Word)
            .triggers(["beijing", "shanghai", "shenzhen"]),
        CategorySpec::new(COMMODITY_KEYWORDS, 0).triggers(["laptop", "thinkpad", "toner"]),
    ]
}

pub fn reference_library() -> PatternLibrary {
    PatternLibrary::new(&reference_categories()).expect("reference library compiles")
}

pub fn reference_exclusions() -> FalsePositiveFilter {
    FalsePositiveFilter::new(["aztec environmental"]).expect("reference exclusions compile")
}

pub fn reference_tiers() -> TierTable {
    TierTable::new(vec![
        TierBand::new(100, "VERY_HIGH"),
        TierBand::new(70, "HIGH"),
        TierBand::new(50, "MEDIUM"),
        TierBand::new(0, "LOW"),
    ])
    .expect("reference tiers are valid")
}

/// Record with a single `name` field.
pub fn named(name: &str) -> Record {
    Record::new().with(fields::NAME, name)
}

/// Record with `name` and `description`.
pub fn named_with_description(name: &str, description: &str) -> Record {
    Record::new()
        .with(fields::NAME, name)
        .with(fields::DESCRIPTION, description)
}

/// A handful of mixed records resembling a contracts extract.
pub fn sample_contracts() -> Vec<Record> {
    let rows = serde_json::json!([
        {"recipient_name": "Huawei Technologies USA", "award_description": "network equipment", "award_amount": 125000},
        {"recipient_name": "Aztec Environmental LLC", "award_description": "site remediation"},
        {"vendor_name": "Acme Heating", "award_description": "industrial-grade space heater, model SH-9000"},
        {"recipient_name": "Lenovo (Beijing) Co", "award_description": "ThinkPad laptop procurement"},
        {"recipient_name": null, "award_description": ""},
    ]);
    match rows {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|v| Record::from_json(v).expect("fixture rows are objects"))
            .collect(),
        _ => Vec::new(),
    }
}
