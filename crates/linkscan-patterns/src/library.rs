//! The pattern library: ordered, compiled categories.

use tracing::info;

use linkscan_common::{LinkscanError, Result};

use crate::category::{CategorySpec, PatternCategory};
use crate::embedded;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryStats {
    pub category_count: usize,
    pub trigger_count: usize,
    pub regex_count: usize,
}

/// Ordered set of categories. Iteration order is scoring order.
#[derive(Debug, Clone, Default)]
pub struct PatternLibrary {
    categories: Vec<PatternCategory>,
    stats: LibraryStats,
}

impl PatternLibrary {
    /// Compile categories from their specs. Category names must be unique.
    pub fn new(specs: &[CategorySpec]) -> Result<Self> {
        let mut categories: Vec<PatternCategory> = Vec::with_capacity(specs.len());
        for spec in specs {
            if categories.iter().any(|c| c.name() == spec.name) {
                return Err(LinkscanError::config(format!(
                    "duplicate category `{}`",
                    spec.name
                )));
            }
            categories.push(PatternCategory::compile(spec)?);
        }

        let stats = LibraryStats {
            category_count: categories.len(),
            trigger_count: categories.iter().map(|c| c.triggers().len()).sum(),
            regex_count: categories.iter().map(|c| c.regex_count()).sum(),
        };

        info!(
            "PatternLibrary loaded: {} categories, {} triggers, {} regex patterns",
            stats.category_count, stats.trigger_count, stats.regex_count
        );

        Ok(Self { categories, stats })
    }

    /// The curated default library (see [`embedded`]).
    pub fn embedded() -> Result<Self> {
        Self::new(&embedded::categories())
    }

    pub fn categories(&self) -> &[PatternCategory] {
        &self.categories
    }

    pub fn get(&self, name: &str) -> Option<&PatternCategory> {
        self.categories.iter().find(|c| c.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn stats(&self) -> &LibraryStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::MatchMode;

    #[test]
    fn test_order_preserved() {
        let lib = PatternLibrary::new(&[
            CategorySpec::new("b", 1).triggers(["x"]),
            CategorySpec::new("a", 2).triggers(["y", "z"]),
        ])
        .unwrap();
        let names: Vec<&str> = lib.categories().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(lib.stats().trigger_count, 3);
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let err = PatternLibrary::new(&[CategorySpec::new("a", 1), CategorySpec::new("a", 2)])
            .unwrap_err();
        assert!(err.to_string().contains("duplicate category"));
    }

    #[test]
    fn test_empty_library_is_valid() {
        let lib = PatternLibrary::new(&[]).unwrap();
        assert!(lib.is_empty());
    }

    #[test]
    fn test_embedded_library_compiles() {
        let lib = PatternLibrary::embedded().unwrap();
        assert!(lib.contains(embedded::STRATEGIC_ENTITIES));
        assert!(lib.contains(embedded::COMMODITY_KEYWORDS));
        assert_eq!(lib.get(embedded::COUNTRY_NAMES).unwrap().mode(), MatchMode::Word);
        assert!(lib.stats().trigger_count > 100);
    }
}
