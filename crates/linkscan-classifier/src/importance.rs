//! Procurement-importance tiers layered over a classification result.
//!
//! TIER_1  strategic entity or strategic technology
//! TIER_2  strategic entity buying a commodity, or any other China link
//! TIER_3  commodity-only purchase, or no signal at all

use serde::{Deserialize, Serialize};

use linkscan_common::{
    ClassificationResult, ImportanceAssessment, ImportanceTier, LinkscanError, Result,
};
use linkscan_patterns::{embedded, PatternLibrary};

const STRATEGIC_SCORE: f64 = 1.0;
const COMPOUND_SCORE: f64 = 0.6;
const GENERIC_SCORE: f64 = 0.5;
const FLOOR_SCORE: f64 = 0.1;

/// Names of the categories the importance rules key on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportanceRules {
    #[serde(default = "default_strategic_entities")]
    pub strategic_entities: Vec<String>,
    #[serde(default = "default_strategic_tech")]
    pub strategic_tech: Vec<String>,
    #[serde(default = "default_commodity")]
    pub commodity: Vec<String>,
}

fn default_strategic_entities() -> Vec<String> { vec![embedded::STRATEGIC_ENTITIES.to_string()] }
fn default_strategic_tech() -> Vec<String> { vec![embedded::STRATEGIC_TECH.to_string()] }
fn default_commodity() -> Vec<String> { vec![embedded::COMMODITY_KEYWORDS.to_string()] }

impl Default for ImportanceRules {
    fn default() -> Self {
        Self {
            strategic_entities: default_strategic_entities(),
            strategic_tech: default_strategic_tech(),
            commodity: default_commodity(),
        }
    }
}

impl ImportanceRules {
    /// Every category named by the rules must exist in the library.
    pub fn validate(&self, library: &PatternLibrary) -> Result<()> {
        let named = self
            .strategic_entities
            .iter()
            .chain(&self.strategic_tech)
            .chain(&self.commodity);
        for name in named {
            if !library.contains(name) {
                return Err(LinkscanError::config(format!(
                    "importance rules reference unknown category `{name}`"
                )));
            }
        }
        Ok(())
    }

    pub fn assess(&self, result: &ClassificationResult) -> ImportanceAssessment {
        if result.is_excluded() || !result.has_signals() {
            return assessment(ImportanceTier::Tier3, FLOOR_SCORE, "no_signal");
        }

        let hit = |names: &[String]| names.iter().any(|n| result.matched_category(n));
        let entity = hit(self.strategic_entities.as_slice());
        let tech = hit(self.strategic_tech.as_slice());
        let commodity = hit(self.commodity.as_slice());

        // Strategic entity, but the purchase itself is an off-the-shelf commodity.
        if entity && commodity {
            return assessment(
                ImportanceTier::Tier2,
                COMPOUND_SCORE,
                "strategic_entity_commodity_purchase",
            );
        }
        if entity {
            return assessment(ImportanceTier::Tier1, STRATEGIC_SCORE, "strategic_entity");
        }
        if tech {
            return assessment(ImportanceTier::Tier1, STRATEGIC_SCORE, "strategic_technology");
        }
        if commodity {
            let only_commodity = result
                .matched_categories()
                .all(|c| self.commodity.iter().any(|n| n == c));
            if only_commodity {
                return assessment(ImportanceTier::Tier3, FLOOR_SCORE, "commodity_purchase");
            }
        }

        assessment(ImportanceTier::Tier2, GENERIC_SCORE, "geographic_or_generic_link")
    }
}

fn assessment(tier: ImportanceTier, importance_score: f64, reason: &str) -> ImportanceAssessment {
    ImportanceAssessment {
        tier,
        importance_score,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkscan_common::Signal;

    fn result(categories: &[&str]) -> ClassificationResult {
        ClassificationResult {
            score: 0,
            signals: categories.iter().map(|c| Signal::new(*c, "t")).collect(),
            confidence_tier: "LOW".to_string(),
            excluded_by: None,
        }
    }

    #[test]
    fn test_entity_with_commodity_is_tier2() {
        let a = ImportanceRules::default()
            .assess(&result(&["strategic_entities", "commodity_keywords"]));
        assert_eq!(a.tier, ImportanceTier::Tier2);
        assert_eq!(a.reason, "strategic_entity_commodity_purchase");
        assert!((a.importance_score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_entity_alone_is_tier1() {
        let a = ImportanceRules::default().assess(&result(&["strategic_entities"]));
        assert_eq!(a.tier, ImportanceTier::Tier1);
        assert_eq!(a.importance_score, 1.0);
    }

    #[test]
    fn test_tech_is_tier1_even_with_commodity() {
        let a =
            ImportanceRules::default().assess(&result(&["strategic_tech", "commodity_keywords"]));
        assert_eq!(a.tier, ImportanceTier::Tier1);
    }

    #[test]
    fn test_commodity_only_is_tier3() {
        let a = ImportanceRules::default().assess(&result(&["commodity_keywords"]));
        assert_eq!(a.tier, ImportanceTier::Tier3);
        assert_eq!(a.reason, "commodity_purchase");
    }

    #[test]
    fn test_geographic_link_is_tier2() {
        let a =
            ImportanceRules::default().assess(&result(&["chinese_cities", "commodity_keywords"]));
        assert_eq!(a.tier, ImportanceTier::Tier2);
        assert_eq!(a.importance_score, 0.5);
    }

    #[test]
    fn test_no_signal_and_excluded_are_floor() {
        let rules = ImportanceRules::default();
        assert_eq!(rules.assess(&result(&[])).tier, ImportanceTier::Tier3);
        let excluded = ClassificationResult::excluded("LOW", "aztec");
        let a = rules.assess(&excluded);
        assert_eq!(a.tier, ImportanceTier::Tier3);
        assert_eq!(a.importance_score, 0.1);
    }

    #[test]
    fn test_scores_within_bounds() {
        let rules = ImportanceRules::default();
        for cats in [
            vec![],
            vec!["strategic_entities"],
            vec!["strategic_entities", "commodity_keywords"],
            vec!["chinese_cities"],
            vec!["commodity_keywords"],
        ] {
            let s = rules.assess(&result(&cats)).importance_score;
            assert!((0.1..=1.0).contains(&s));
        }
    }

    #[test]
    fn test_validate_against_library() {
        let lib = PatternLibrary::embedded().unwrap();
        assert!(ImportanceRules::default().validate(&lib).is_ok());
        let bad = ImportanceRules {
            commodity: vec!["missing".to_string()],
            ..Default::default()
        };
        assert!(bad.validate(&lib).is_err());
    }
}
