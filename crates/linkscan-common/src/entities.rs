/// Classification output types handed to aggregators and reporters.
/// Every type here serializes without reference to classifier state.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Signal
// ---------------------------------------------------------------------------

/// A single matched (category, trigger) pair contributing to a score.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signal {
    pub category: String,
    pub trigger: String,
}

impl Signal {
    pub fn new(category: impl Into<String>, trigger: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            trigger: trigger.into(),
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category, self.trigger)
    }
}

// ---------------------------------------------------------------------------
// Classification result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub score: u32,
    pub signals: Vec<Signal>,
    pub confidence_tier: String,
    /// Exclusion entry that suppressed the record, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_by: Option<String>,
}

impl ClassificationResult {
    /// Result for a record suppressed by the false-positive filter.
    pub fn excluded(lowest_tier: impl Into<String>, exclusion: impl Into<String>) -> Self {
        Self {
            score: 0,
            signals: Vec::new(),
            confidence_tier: lowest_tier.into(),
            excluded_by: Some(exclusion.into()),
        }
    }

    pub fn is_excluded(&self) -> bool {
        self.excluded_by.is_some()
    }

    pub fn has_signals(&self) -> bool {
        !self.signals.is_empty()
    }

    pub fn matched_category(&self, category: &str) -> bool {
        self.signals.iter().any(|s| s.category == category)
    }

    pub fn matched_categories(&self) -> impl Iterator<Item = &str> {
        self.signals.iter().map(|s| s.category.as_str())
    }
}

// ---------------------------------------------------------------------------
// Importance (procurement-importance variant)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ImportanceTier {
    #[serde(rename = "TIER_1")]
    Tier1,
    #[serde(rename = "TIER_2")]
    Tier2,
    #[serde(rename = "TIER_3")]
    Tier3,
}

impl ImportanceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportanceTier::Tier1 => "TIER_1",
            ImportanceTier::Tier2 => "TIER_2",
            ImportanceTier::Tier3 => "TIER_3",
        }
    }
}

impl fmt::Display for ImportanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceAssessment {
    pub tier: ImportanceTier,
    /// Rescaled importance in [0.1, 1.0].
    pub importance_score: f64,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_signal_display() {
        let s = Signal::new("strategic_entities", "huawei");
        assert_eq!(s.to_string(), "strategic_entities:huawei");
    }

    #[test]
    fn test_result_json_shape() {
        let result = ClassificationResult {
            score: 80,
            signals: vec![Signal::new("strategic_entities", "huawei")],
            confidence_tier: "HIGH".to_string(),
            excluded_by: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "score": 80,
                "signals": [{"category": "strategic_entities", "trigger": "huawei"}],
                "confidence_tier": "HIGH",
            })
        );
    }

    #[test]
    fn test_excluded_result() {
        let result = ClassificationResult::excluded("LOW", "aztec environmental");
        assert!(result.is_excluded());
        assert_eq!(result.score, 0);
        assert!(!result.has_signals());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["excluded_by"], "aztec environmental");
    }

    #[test]
    fn test_importance_tier_serde_names() {
        assert_eq!(serde_json::to_string(&ImportanceTier::Tier2).unwrap(), "\"TIER_2\"");
        assert!(ImportanceTier::Tier1 < ImportanceTier::Tier3);
    }
}
