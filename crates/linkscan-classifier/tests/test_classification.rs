//! Classification behaviour against the reference configuration.

use linkscan_classifier::{EntityClassifier, FieldSelection, ImportanceRules};
use linkscan_common::{ClassificationResult, ImportanceTier, Record, Signal};
use linkscan_test_utils::pretty_assertions::assert_eq;
use linkscan_test_utils::*;

fn reference_classifier() -> EntityClassifier {
    EntityClassifier::new(
        reference_library(),
        reference_exclusions(),
        reference_tiers(),
        FieldSelection::default(),
    )
}

fn reference_importance() -> ImportanceRules {
    ImportanceRules {
        strategic_entities: vec![STRATEGIC_ENTITIES.to_string()],
        strategic_tech: vec![],
        commodity: vec![COMMODITY_KEYWORDS.to_string()],
    }
}

#[test]
fn test_huawei_scores_high() {
    let r = reference_classifier().classify(&named("Huawei Technologies USA"));
    assert_eq!(r.score, 80);
    assert_eq!(r.confidence_tier, "HIGH");
    assert_eq!(r.signals, vec![Signal::new(STRATEGIC_ENTITIES, "huawei")]);
}

#[test]
fn test_aztec_exclusion_beats_zte_substring() {
    let c = reference_classifier();
    // Without the exclusion "zte" would match inside "aztec".
    assert!(c.library().get(STRATEGIC_ENTITIES).unwrap().is_match("aztec environmental llc"));

    let r = c.classify(&named("Aztec Environmental LLC"));
    assert_eq!(r.score, 0);
    assert_eq!(r.confidence_tier, "LOW");
    assert!(r.signals.is_empty());
    assert_eq!(r.excluded_by.as_deref(), Some("aztec environmental"));
}

#[test]
fn test_space_heater_has_no_signal() {
    let record = Record::new().with("description", "industrial-grade space heater, model SH-9000");
    let r = reference_classifier().classify(&record);
    assert_eq!(r.score, 0);
    assert_eq!(r.confidence_tier, "LOW");
    assert!(r.signals.is_empty());
    assert!(!r.is_excluded());
}

#[test]
fn test_lenovo_thinkpad_is_strategic_entity_commodity_purchase() {
    let record = named_with_description("Lenovo (Beijing) Co", "ThinkPad laptop procurement");
    let r = reference_classifier().classify(&record);
    // "laptop" is declared before "thinkpad", so it is the reported trigger.
    assert_eq!(
        r.signals,
        vec![
            Signal::new(STRATEGIC_ENTITIES, "lenovo"),
            Signal::new(CHINESE_CITIES, "beijing"),
            Signal::new(COMMODITY_KEYWORDS, "laptop"),
        ]
    );
    assert_eq!(r.score, 130);

    let a = reference_importance().assess(&r);
    assert_eq!(a.tier, ImportanceTier::Tier2);
    assert_eq!(a.reason, "strategic_entity_commodity_purchase");

    // Same entity without the commodity purchase is TIER_1.
    let r = reference_classifier().classify(&named("Lenovo (Beijing) Co"));
    assert_eq!(reference_importance().assess(&r).tier, ImportanceTier::Tier1);
}

#[test]
fn test_independent_instances_agree() {
    let a = reference_classifier();
    let b = reference_classifier();
    for record in sample_contracts() {
        assert_eq!(a.classify(&record), b.classify(&record));
    }
}

#[test]
fn test_deterministic() {
    let c = reference_classifier();
    for record in sample_contracts() {
        let first = c.classify(&record);
        let second = c.classify(&record);
        assert_eq!(first, second);
    }
}

#[test]
fn test_exclusion_precedence_regardless_of_signals() {
    let record = named_with_description(
        "Aztec Environmental LLC",
        "Huawei ZTE Lenovo equipment shipped to Beijing and Shanghai",
    );
    let r = reference_classifier().classify(&record);
    assert_eq!(r, ClassificationResult::excluded("LOW", "aztec environmental"));
}

#[test]
fn test_same_category_counted_once() {
    let r = reference_classifier().classify(&named("Huawei, ZTE and Hikvision consortium"));
    assert_eq!(r.score, 80);
    assert_eq!(r.signals.len(), 1);
    assert_eq!(r.signals[0].trigger, "huawei");
}

#[test]
fn test_monotonic_in_matched_categories() {
    let c = reference_classifier();
    let steps = [
        "acme widgets",
        "acme widgets shanghai",
        "acme widgets shanghai hikvision",
        "acme widgets shanghai hikvision toner",
    ];
    let mut previous: Option<ClassificationResult> = None;
    for text in steps {
        let r = c.classify(&named(text));
        if let Some(prev) = &previous {
            assert!(r.score >= prev.score, "{text}");
            let rank = c.tier_rank(&r.confidence_tier).unwrap();
            let prev_rank = c.tier_rank(&prev.confidence_tier).unwrap();
            assert!(rank <= prev_rank, "{text}");
        }
        previous = Some(r);
    }
}

#[test]
fn test_empty_record_scores_zero_and_is_not_excluded() {
    let c = reference_classifier();
    for record in [Record::new(), named(""), Record::new().with("city", "   ")] {
        let r = c.classify(&record);
        assert_eq!(r.score, 0);
        assert_eq!(r.confidence_tier, "LOW");
        assert!(!r.is_excluded());
    }
    assert!(!c.exclusions().is_false_positive(""));
}

#[test]
fn test_tier_boundaries() {
    let tiers = reference_tiers();
    for (score, tier) in [
        (100, "VERY_HIGH"),
        (99, "HIGH"),
        (70, "HIGH"),
        (69, "MEDIUM"),
        (50, "MEDIUM"),
        (49, "LOW"),
        (0, "LOW"),
    ] {
        assert_eq!(tiers.resolve(score), tier, "score {score}");
    }
}

#[test]
fn test_tier_boundaries_through_classify() {
    let library = linkscan_patterns::PatternLibrary::new(&[
        linkscan_patterns::CategorySpec::new("sixty", 60).triggers(["alpha"]),
        linkscan_patterns::CategorySpec::new("forty", 40).triggers(["bravo"]),
        linkscan_patterns::CategorySpec::new("thirty_nine", 39).triggers(["charlie"]),
    ])
    .unwrap();
    let c = EntityClassifier::new(
        library,
        linkscan_patterns::FalsePositiveFilter::empty(),
        reference_tiers(),
        FieldSelection::default(),
    );

    let exactly_100 = c.classify(&named("alpha bravo"));
    assert_eq!(exactly_100.score, 100);
    assert_eq!(exactly_100.confidence_tier, "VERY_HIGH");

    let just_below = c.classify(&named("alpha charlie"));
    assert_eq!(just_below.score, 99);
    assert_eq!(just_below.confidence_tier, "HIGH");

    let thirty_nine_only = c.classify(&named("charlie"));
    assert_eq!(thirty_nine_only.score, 39);
    assert_eq!(thirty_nine_only.confidence_tier, "LOW");
}

#[test]
fn test_degenerate_configuration() {
    let c = EntityClassifier::new(
        linkscan_patterns::PatternLibrary::new(&[]).unwrap(),
        linkscan_patterns::FalsePositiveFilter::empty(),
        reference_tiers(),
        FieldSelection::default(),
    );
    for record in sample_contracts() {
        let r = c.classify(&record);
        assert_eq!(r.score, 0);
        assert_eq!(r.confidence_tier, "LOW");
    }
}

#[test]
fn test_numeric_fields_are_coerced_not_rejected() {
    let record: Record = serde_json::from_value(serde_json::json!({
        "recipient_name": "Huawei",
        "award_amount": 1.5e6,
        "fiscal_year": 2023,
    }))
    .unwrap();
    assert_eq!(reference_classifier().classify(&record).score, 80);
}

#[test]
fn test_result_serializes_standalone() {
    let r = reference_classifier().classify(&named("Huawei"));
    let json = serde_json::to_string(&r).unwrap();
    let back: ClassificationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, r);
    assert!(!json.contains("excluded_by"));
}

#[test]
fn test_embedded_classifier_scenarios() {
    let c = EntityClassifier::embedded().unwrap();
    assert_eq!(c.classify(&named("Huawei Technologies USA")).confidence_tier, "HIGH");
    assert!(c.classify(&named("Aztec Environmental LLC")).is_excluded());
    let heater = Record::new().with("description", "industrial-grade space heater, model SH-9000");
    assert_eq!(c.classify(&heater).score, 0);

    let lenovo = c.classify(&named_with_description(
        "Lenovo (Beijing) Co",
        "ThinkPad laptop procurement",
    ));
    assert_eq!(ImportanceRules::default().assess(&lenovo).tier, ImportanceTier::Tier2);
}
