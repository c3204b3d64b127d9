//! linkscan-classifier — China-link entity classifier.
//!
//! Exclusions are checked first; surviving records collect one signal per
//! matched category, the weights are summed and the sum is mapped to a
//! confidence tier. The importance categorizer layers the TIER_1/2/3
//! procurement-importance view on top of a classification result.

pub mod classifier;
pub mod importance;

pub use classifier::{EntityClassifier, FieldSelection};
pub use importance::ImportanceRules;
