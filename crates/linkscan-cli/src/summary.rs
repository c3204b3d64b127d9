use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use linkscan_common::{ClassificationResult, ImportanceAssessment, TierTable};

/// One output line: a classified record or a tagged source error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OutputLine<'a> {
    Classified {
        line: u64,
        result: &'a ClassificationResult,
        #[serde(skip_serializing_if = "Option::is_none")]
        importance: Option<&'a ImportanceAssessment>,
    },
    Failed {
        line: u64,
        error: String,
    },
}

/// Aggregate counts for one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub records: usize,
    pub errors: usize,
    pub excluded: usize,
    /// Every configured tier appears, including those with no records.
    pub tiers: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub importance: BTreeMap<String, usize>,
}

impl RunSummary {
    pub fn new(tiers: &TierTable) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            records: 0,
            errors: 0,
            excluded: 0,
            tiers: tiers.bands().iter().map(|b| (b.tier.clone(), 0)).collect(),
            importance: BTreeMap::new(),
        }
    }

    pub fn add_result(
        &mut self,
        result: &ClassificationResult,
        importance: Option<&ImportanceAssessment>,
    ) {
        self.records += 1;
        if result.is_excluded() {
            self.excluded += 1;
        }
        *self.tiers.entry(result.confidence_tier.clone()).or_default() += 1;
        if let Some(a) = importance {
            *self.importance.entry(a.tier.to_string()).or_default() += 1;
        }
    }

    pub fn add_error(&mut self) {
        self.errors += 1;
    }

    pub fn log(&self) {
        info!(
            "Run {} complete: {} records, {} errors, {} excluded",
            self.run_id, self.records, self.errors, self.excluded
        );
        for (tier, count) in &self.tiers {
            info!("  {:<12} {}", tier, count);
        }
    }
}
