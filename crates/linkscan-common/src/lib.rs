//! linkscan-common — Shared types and errors used across all linkscan crates.

pub mod error;
pub mod record;
pub mod entities;
pub mod confidence;

// Re-export commonly used types
pub use error::{LinkscanError, Result};
pub use record::Record;
pub use entities::{ClassificationResult, ImportanceAssessment, ImportanceTier, Signal};
pub use confidence::{TierBand, TierTable};
