//! Entity classifier: record → (score, signals, confidence tier).

use serde::{Deserialize, Serialize};
use tracing::debug;

use linkscan_common::record::fields;
use linkscan_common::{ClassificationResult, Record, Result, Signal, TierTable};
use linkscan_patterns::{embedded, FalsePositiveFilter, PatternLibrary};

/// Which record fields feed scoring and the exclusion check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSelection {
    #[serde(default = "default_scan_fields")]
    pub scan: Vec<String>,
    /// Exclusion scope; `None` means the scan fields.
    #[serde(default)]
    pub exclusion: Option<Vec<String>>,
}

fn default_scan_fields() -> Vec<String> {
    fields::DEFAULT_SCAN_FIELDS.iter().map(|s| s.to_string()).collect()
}

impl Default for FieldSelection {
    fn default() -> Self {
        Self {
            scan: default_scan_fields(),
            exclusion: None,
        }
    }
}

impl FieldSelection {
    pub fn new<I, S>(scan: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scan: scan.into_iter().map(Into::into).collect(),
            exclusion: None,
        }
    }

    /// Restrict the exclusion check to a narrower field subset.
    pub fn with_exclusion_fields<I, S>(mut self, exclusion: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusion = Some(exclusion.into_iter().map(Into::into).collect());
        self
    }

    pub fn exclusion_fields(&self) -> &[String] {
        self.exclusion.as_deref().unwrap_or(&self.scan)
    }
}

/// Parameterized, immutable classifier. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct EntityClassifier {
    library: PatternLibrary,
    exclusions: FalsePositiveFilter,
    tiers: TierTable,
    fields: FieldSelection,
}

impl EntityClassifier {
    pub fn new(
        library: PatternLibrary,
        exclusions: FalsePositiveFilter,
        tiers: TierTable,
        fields: FieldSelection,
    ) -> Self {
        Self {
            library,
            exclusions,
            tiers,
            fields,
        }
    }

    /// Embedded library and exclusions with the default tier table.
    pub fn embedded() -> Result<Self> {
        Ok(Self::new(
            PatternLibrary::embedded()?,
            FalsePositiveFilter::new(embedded::exclusions())?,
            TierTable::default(),
            FieldSelection::default(),
        ))
    }

    /// Classify one record.
    pub fn classify(&self, record: &Record) -> ClassificationResult {
        let search_text = record.search_text(self.fields.scan.as_slice());
        if self.fields.exclusion.is_some() {
            let exclusion_text = record.search_text(self.fields.exclusion_fields());
            self.classify_text(&search_text, &exclusion_text)
        } else {
            self.classify_text(&search_text, &search_text)
        }
    }

    /// Classify pre-built lowercase texts.
    pub fn classify_text(&self, search_text: &str, exclusion_text: &str) -> ClassificationResult {
        if let Some(exclusion) = self.exclusions.matched_exclusion(exclusion_text) {
            debug!("Excluded by false-positive entry `{}`", exclusion);
            return ClassificationResult::excluded(self.tiers.lowest(), exclusion);
        }

        let mut score: u32 = 0;
        let mut signals = Vec::new();

        for category in self.library.categories() {
            // One signal per category, however many triggers hit.
            if let Some(trigger) = category.first_match(search_text) {
                score = score.saturating_add(category.weight());
                signals.push(Signal::new(category.name(), trigger));
            }
        }

        ClassificationResult {
            score,
            signals,
            confidence_tier: self.tiers.resolve(score).to_string(),
            excluded_by: None,
        }
    }

    /// Classify many records; output order matches input order.
    /// Uses parallel processing for batches larger than 64 records.
    pub fn classify_batch(&self, records: &[Record]) -> Vec<ClassificationResult> {
        self.classify_batch_with_threshold(records, 64)
    }

    /// Set `parallel_threshold` to 0 to always run sequentially.
    pub fn classify_batch_with_threshold(
        &self,
        records: &[Record],
        parallel_threshold: usize,
    ) -> Vec<ClassificationResult> {
        #[cfg(feature = "parallel")]
        {
            if parallel_threshold > 0 && records.len() > parallel_threshold {
                use rayon::prelude::*;
                return records.par_iter().map(|r| self.classify(r)).collect();
            }
        }
        let _ = parallel_threshold;
        records.iter().map(|r| self.classify(r)).collect()
    }

    /// Ordinal of a tier name, 0 being the highest.
    pub fn tier_rank(&self, tier: &str) -> Option<usize> {
        self.tiers.rank(tier)
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    pub fn exclusions(&self) -> &FalsePositiveFilter {
        &self.exclusions
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    pub fn fields(&self) -> &FieldSelection {
        &self.fields
    }
}
