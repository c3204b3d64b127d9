/// Score → confidence tier mapping.
/// Bands are closed at their minimum and open at the next band's minimum.

use serde::{Deserialize, Serialize};

use crate::error::{LinkscanError, Result};

/// One threshold band: every score >= `min_score` (and below the previous
/// band's minimum) resolves to `tier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierBand {
    pub min_score: u32,
    #[serde(alias = "name")]
    pub tier: String,
}

impl TierBand {
    pub fn new(min_score: u32, tier: impl Into<String>) -> Self {
        Self {
            min_score,
            tier: tier.into(),
        }
    }
}

/// Validated, descending threshold table. The last band is the lowest tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TierTable {
    bands: Vec<TierBand>,
}

impl TierTable {
    /// Validate and build a table.
    ///
    /// Bands must be non-empty, strictly descending by `min_score`, have
    /// unique non-empty tier names, and end with a band starting at 0 so
    /// that every score maps to a tier.
    pub fn new(bands: Vec<TierBand>) -> Result<Self> {
        let last = bands
            .last()
            .ok_or_else(|| LinkscanError::config("tier threshold table is empty"))?;

        if last.min_score != 0 {
            return Err(LinkscanError::config(format!(
                "lowest tier `{}` starts at {}; scores below it would be unmapped (expected 0)",
                last.tier, last.min_score
            )));
        }

        for pair in bands.windows(2) {
            if pair[0].min_score <= pair[1].min_score {
                return Err(LinkscanError::config(format!(
                    "tier thresholds must be strictly descending: `{}` ({}) is not above `{}` ({})",
                    pair[0].tier, pair[0].min_score, pair[1].tier, pair[1].min_score
                )));
            }
        }

        for (i, band) in bands.iter().enumerate() {
            if band.tier.trim().is_empty() {
                return Err(LinkscanError::config(format!(
                    "tier band with min_score {} has an empty name",
                    band.min_score
                )));
            }
            if bands[..i].iter().any(|b| b.tier == band.tier) {
                return Err(LinkscanError::config(format!(
                    "duplicate tier name `{}`",
                    band.tier
                )));
            }
        }

        Ok(Self { bands })
    }

    /// Resolve a score to its tier name.
    pub fn resolve(&self, score: u32) -> &str {
        self.bands
            .iter()
            .find(|b| score >= b.min_score)
            .map(|b| b.tier.as_str())
            // Unreachable: the last band starts at 0.
            .unwrap_or_else(|| self.lowest())
    }

    /// Name of the lowest tier.
    pub fn lowest(&self) -> &str {
        self.bands
            .last()
            .map(|b| b.tier.as_str())
            .unwrap_or_default()
    }

    /// Ordinal of a tier, 0 being the highest.
    pub fn rank(&self, tier: &str) -> Option<usize> {
        self.bands.iter().position(|b| b.tier == tier)
    }

    pub fn bands(&self) -> &[TierBand] {
        &self.bands
    }
}

impl Default for TierTable {
    /// VERY_HIGH ≥ 100, HIGH ≥ 70, MEDIUM ≥ 50, LOW otherwise.
    fn default() -> Self {
        Self {
            bands: vec![
                TierBand::new(100, "VERY_HIGH"),
                TierBand::new(70, "HIGH"),
                TierBand::new(50, "MEDIUM"),
                TierBand::new(0, "LOW"),
            ],
        }
    }
}

impl<'de> Deserialize<'de> for TierTable {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let bands = Vec::<TierBand>::deserialize(deserializer)?;
        TierTable::new(bands).map_err(serde::de::Error::custom)
    }
}
